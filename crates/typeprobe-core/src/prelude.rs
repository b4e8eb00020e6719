//! Common module for library exports

pub use crate::decoder::{DecodeMode, Decoded, Decoder, DecoderConfig};
pub use crate::error::{Result, TypeProbeError};
pub use crate::section::{Section, SectionIndex};
pub use crate::types::address::Address;
pub use crate::types::descriptor::{TypeDescriptor, TypeFlags, TypeRef};
pub use crate::types::interface::{InterfaceDescriptor, InterfaceMethod, ItabRecord};
