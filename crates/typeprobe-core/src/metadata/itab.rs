use tracing::debug;

use super::{MetadataReader, TypeCache};
use crate::error::Result;
use crate::types::{Address, ItabRecord};

impl MetadataReader<'_>
{
    /// Decode the itab at `address`: an interface pointer then a type pointer.
    ///
    /// Both halves must decode; there is no partial record.
    pub fn decode_itab(&self, cache: &mut TypeCache, address: Address) -> Result<ItabRecord>
    {
        let mut cursor = self.sections.cursor_at(address)?;
        let interface_ptr = Address::new(cursor.u64()?);
        let type_ptr = Address::new(cursor.u64()?);
        debug!(%address, interface = %interface_ptr, concrete = %type_ptr, "itab pointers");

        let interface = self.decode_interface(cache, interface_ptr)?;
        let concrete_type = self.decode_type(cache, type_ptr)?;

        Ok(ItabRecord {
            source_address: address,
            interface,
            concrete_type,
        })
    }
}
