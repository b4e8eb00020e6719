//! # typeprobe-core
//!
//! Decoding of the runtime type metadata that a garbage-collected, statically
//! typed language embeds in its statically linked ELF64 executables.
//!
//! This crate provides:
//! - A section index over the loaded image (address → section, name → address)
//! - Bounds-checked little-endian primitive reads
//! - Decoding of type descriptors, interface descriptors and their method sets
//! - Decoding of itabs (interface ↔ concrete type bindings)
//!
//! ## Layering
//!
//! ELF container parsing is delegated to the [`object`] crate. Everything after
//! "here is a list of sections with addresses and bytes" lives in this crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use typeprobe_core::{Address, Decoder};
//!
//! let mut decoder = Decoder::open("./server")?;
//! let itab = decoder.decode_itab(Address::new(0x4d_2f80))?;
//! println!("{itab}");
//! # Ok::<(), typeprobe_core::TypeProbeError>(())
//! ```

pub mod decoder;
pub mod error;
pub mod image;
pub mod metadata;
pub mod prelude;
pub mod reader;
pub mod section;
pub mod types;

pub use decoder::{DecodeMode, Decoded, Decoder, DecoderConfig};
pub use error::{Result, TypeProbeError};
pub use section::{Section, SectionIndex};
pub use types::{Address, InterfaceDescriptor, InterfaceMethod, ItabRecord, TypeDescriptor, TypeFlags, TypeRef};
