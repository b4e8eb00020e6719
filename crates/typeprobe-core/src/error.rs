//! # Error Types
//!
//! General error handling for image loading and metadata decoding.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use thiserror::Error;

use crate::types::Address;

/// Main error type for loading an image and decoding metadata from it
///
/// ## Error Categories
///
/// 1. **Load errors**: InvalidImage, Io (fatal, nothing can be decoded)
/// 2. **Session errors**: SectionNotFound (every decode call of the session fails)
/// 3. **Decode errors**: AddressNotMapped, TruncatedRead, VarintOverflow (fatal for
///    the failing decode call only)
///
/// No variant is retried. Decode errors always carry the offending address.
#[derive(Error, Debug)]
pub enum TypeProbeError
{
    /// The input is not a parseable little-endian ELF64 image
    ///
    /// This happens when:
    /// - The ELF header or section headers are malformed
    /// - The file is some other object format (Mach-O, PE, ...)
    /// - The file is a 32-bit or big-endian ELF
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A section looked up by name is absent
    ///
    /// Most commonly the metadata section that anchors relative offsets.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// An address lies outside every section of the image
    #[error("No section contains address {0}")]
    AddressNotMapped(Address),

    /// A field read would run past the end of its section's bytes
    #[error("Truncated read: {width} bytes at {address} run past the end of section '{section}'")]
    TruncatedRead
    {
        /// Absolute address where the read started
        address: Address,
        /// Width of the attempted read in bytes
        width: usize,
        /// Name of the section that owns `address`
        section: String,
    },

    /// A name-length varint does not fit in 64 bits
    #[error("Varint at {0} overflows 64 bits")]
    VarintOverflow(Address),

    /// I/O error while reading the image from disk
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, TypeProbeError>`
///
/// ```rust
/// use typeprobe_core::error::Result;
/// fn foo() -> Result<()>
/// {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, TypeProbeError>;
