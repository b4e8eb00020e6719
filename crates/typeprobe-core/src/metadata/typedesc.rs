use tracing::{debug, warn};

use super::{MetadataReader, TypeCache};
use crate::error::Result;
use crate::types::{Address, TypeDescriptor, TypeFlags, TypeRef};

impl MetadataReader<'_>
{
    /// Decode the type descriptor at `address`, consulting `cache` first.
    ///
    /// A pointer-to-this that fails to decode is logged and left as `None`; it
    /// does not fail the descriptor that points at it.
    ///
    /// ## Errors
    ///
    /// `AddressNotMapped`, `TruncatedRead` or `VarintOverflow` from reading
    /// the record or its name. Nothing is cached on failure.
    pub fn decode_type(&self, cache: &mut TypeCache, address: Address) -> Result<TypeDescriptor>
    {
        if let Some(cached) = cache.get(address) {
            debug!(%address, name = %cached.name, "type cache hit");
            return Ok(cached.clone());
        }
        debug!(%address, "type cache miss, decoding");

        let mut cursor = self.sections.cursor_at(address)?;
        let size = cursor.u64()?;
        let ptr_data = cursor.u64()?;
        let hash = cursor.u32()?;
        let tflag = TypeFlags::from_bits(cursor.u8()?);
        let align = cursor.u8()?;
        let field_align = cursor.u8()?;
        let kind = cursor.u8()?;
        let equal_fn = cursor.u64()?;
        let gc_data = cursor.u64()?;
        let name_off = cursor.u32()?;
        let ptr_to_this = cursor.u32()?;

        let name = self.name_at_offset(name_off)?;
        debug!(%address, name = %name, kind, size, "decoded type");

        let mut descriptor = TypeDescriptor {
            address,
            size,
            ptr_data,
            hash,
            tflag,
            align,
            field_align,
            kind,
            equal_fn,
            gc_data,
            name,
            self_type: None,
        };

        // Visible to re-entrant lookups before the pointer-to-this is followed.
        cache.insert(descriptor.clone());

        if ptr_to_this == 0 {
            debug!(%address, "null pointer-to-this, skipping");
            return Ok(descriptor);
        }

        let target = self.module.type_off(ptr_to_this);
        match self.decode_type(cache, target) {
            Ok(resolved) => {
                debug!(%address, target = %target, name = %resolved.name, "resolved pointer-to-this");
                let target = TypeRef::new(target, resolved.name);
                cache.link_self_type(address, target.clone());
                descriptor.self_type = Some(target);
            }
            Err(err) => {
                warn!(%address, target = %target, "could not decode the type at the pointer-to-this offset: {err}");
            }
        }

        Ok(descriptor)
    }
}
