//! Name records.
//!
//! ```text
//! +------+----------------+--------------+
//! | flag | uvarint length | length bytes |
//! +------+----------------+--------------+
//! ```
//!
//! The flag byte marks exported names, trailing tag data and so on. Only the
//! name itself is decoded; tag data is left alone.

use tracing::debug;

use crate::error::{Result, TypeProbeError};
use crate::section::SectionIndex;
use crate::types::Address;

use super::MetadataReader;

/// Decode the name record at `address`.
///
/// Invalid UTF-8 is replaced rather than rejected, since the bytes are only
/// ever shown to a human.
///
/// ## Errors
///
/// - `AddressNotMapped` if `address` is outside every section
/// - `TruncatedRead` if the flag, the length, or the bytes run past the section
/// - `VarintOverflow` if the length does not fit in 64 bits
pub fn decode_name_at(sections: &SectionIndex, address: Address) -> Result<String>
{
    let mut cursor = sections.cursor_at(address)?;
    let _flags = cursor.u8()?;
    let length_at = cursor.address();
    let length = cursor.uvarint()?;
    let length = usize::try_from(length).map_err(|_| TypeProbeError::TruncatedRead {
        address: length_at,
        width: usize::MAX,
        section: cursor.section().name().to_string(),
    })?;
    let bytes = cursor.bytes(length)?;

    let name = String::from_utf8_lossy(bytes).into_owned();
    debug!(%address, name = %name, "decoded name");
    Ok(name)
}

impl MetadataReader<'_>
{
    /// Decode the name record `relative` bytes past the module base.
    pub fn name_at_offset(&self, relative: u32) -> Result<String>
    {
        decode_name_at(self.sections, self.module.name_off(relative))
    }

    pub fn name_at(&self, address: Address) -> Result<String>
    {
        decode_name_at(self.sections, address)
    }
}
