use tracing::debug;

use super::{MetadataReader, TypeCache};
use crate::error::{Result, TypeProbeError};
use crate::types::descriptor::TYPE_DESCRIPTOR_SIZE;
use crate::types::{Address, InterfaceDescriptor, InterfaceMethod};

/// Width of one method-slice entry: a name offset then a type offset.
const IMETHOD_SIZE: u64 = 8;

/// Offset of the package-path pointer from the start of an interface record.
const PKG_PATH_OFFSET: u64 = TYPE_DESCRIPTOR_SIZE;

/// Offset of the method-slice header from the start of an interface record.
const METHODS_OFFSET: u64 = TYPE_DESCRIPTOR_SIZE + 8;

impl MetadataReader<'_>
{
    /// Decode the interface descriptor at `address`.
    ///
    /// The record is a type descriptor, followed by a pointer to the package
    /// path name, followed by a slice header for the method set.
    ///
    /// A null package-path pointer decodes as the empty path.
    pub fn decode_interface(&self, cache: &mut TypeCache, address: Address) -> Result<InterfaceDescriptor>
    {
        let type_info = self.decode_type(cache, address)?;

        let pkg_path = Address::new(self.sections.cursor_at(address + PKG_PATH_OFFSET)?.u64()?);
        let package_path = if pkg_path.is_null() {
            debug!(%address, "interface has no package path");
            String::new()
        } else {
            self.name_at(pkg_path)?
        };

        let methods = self.decode_method_slice(cache, address + METHODS_OFFSET)?;
        debug!(%address, name = %type_info.name, methods = methods.len(), "decoded interface");

        Ok(InterfaceDescriptor {
            type_info,
            package_path,
            methods,
        })
    }

    /// Decode the method slice whose header is at `address`.
    ///
    /// The header is `{ data, len, cap }`, three 8-byte words. A null `data`
    /// pointer is a valid empty method set. Any failing entry fails the whole
    /// slice; partial lists are never returned.
    pub fn decode_method_slice(&self, cache: &mut TypeCache, address: Address) -> Result<Vec<InterfaceMethod>>
    {
        let mut header = self.sections.cursor_at(address)?;
        let data = Address::new(header.u64()?);
        if data.is_null() {
            debug!(%address, "method slice is empty");
            return Ok(Vec::new());
        }
        let len = header.u64()?;
        let cap = header.u64()?;
        debug!(%address, %data, len, cap, "method slice header");

        // The whole backing array must lie inside one section before any entry is read.
        let backing = self.sections.section_for_address(data)?;
        let span = len.checked_mul(IMETHOD_SIZE);
        let fits = span
            .zip(backing.offset_of(data))
            .and_then(|(bytes, offset)| offset.checked_add(bytes))
            .is_some_and(|end| end <= backing.size());
        if !fits {
            return Err(TypeProbeError::TruncatedRead {
                address: data,
                width: span.and_then(|bytes| usize::try_from(bytes).ok()).unwrap_or(usize::MAX),
                section: backing.name().to_string(),
            });
        }

        let mut entries = backing.cursor_at(data)?;
        let mut methods = Vec::new();
        for _ in 0..len {
            let name_off = entries.u32()?;
            let type_off = entries.u32()?;

            let name = self.name_at_offset(name_off)?;
            let method_type = self.decode_type(cache, self.module.type_off(type_off))?;
            debug!(method = %name, ty = %method_type.name, "decoded interface method");

            methods.push(InterfaceMethod { name, method_type });
        }

        Ok(methods)
    }
}
