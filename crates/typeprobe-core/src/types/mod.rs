//! # Types
//!
//! Plain data produced by the decoder.
//!
//! Nothing in here touches the image: these are the results handed back to the
//! caller, plus the `Address` newtype used everywhere an address travels.

pub mod address;
pub mod descriptor;
pub mod interface;

// Re-export all public types
pub use address::{Address, ParseAddressError};
pub use descriptor::{TypeDescriptor, TypeFlags, TypeRef};
pub use interface::{InterfaceDescriptor, InterfaceMethod, ItabRecord};
