//! ELF64 image loading.
//!
//! Container parsing is the `object` crate's job. This module only checks that
//! the file is the kind of image the decoder understands and copies every
//! section out into a [`SectionIndex`].

use std::borrow::Cow;
use std::sync::Arc;

use object::{BinaryFormat, Object, ObjectSection};
use tracing::debug;

use crate::error::{Result, TypeProbeError};
use crate::section::{Section, SectionIndex};
use crate::types::Address;

/// Copy one section out of the image.
///
/// A section whose contents cannot be read (a corrupt compressed debug
/// section, say) keeps its address range with no bytes, like `SHT_NOBITS`.
fn load_section(section: &object::Section<'_, '_>) -> Section
{
    let name = match section.name() {
        Ok(name) => name.to_string(),
        Err(err) => {
            debug!(index = section.index().0, "section has no resolvable name: {err}");
            String::new()
        }
    };

    let data = match section.uncompressed_data() {
        Ok(Cow::Borrowed(bytes)) => Arc::<[u8]>::from(bytes),
        Ok(Cow::Owned(vec)) => vec.into(),
        Err(err) => {
            debug!(section = %name, "section contents unreadable, keeping it empty: {err}");
            Arc::from(Vec::new())
        }
    };

    Section::new(name, Address::new(section.address()), section.size(), data)
}

/// Parse `bytes` as a little-endian ELF64 image and index its sections.
///
/// ## Errors
///
/// `InvalidImage` if the header or section table cannot be parsed, or if the
/// image is not a 64-bit little-endian ELF file.
pub fn load_sections(bytes: &[u8]) -> Result<SectionIndex>
{
    let file = object::File::parse(bytes).map_err(|err| TypeProbeError::InvalidImage(format!("failed to parse: {err}")))?;

    if file.format() != BinaryFormat::Elf {
        return Err(TypeProbeError::InvalidImage(format!(
            "expected an ELF image, found {:?}",
            file.format()
        )));
    }
    if !file.is_64() {
        return Err(TypeProbeError::InvalidImage("expected a 64-bit ELF image".to_string()));
    }
    if !file.is_little_endian() {
        return Err(TypeProbeError::InvalidImage("big-endian images are not supported".to_string()));
    }

    let sections: Vec<Section> = file.sections().map(|section| load_section(&section)).collect();
    debug!(count = sections.len(), "loaded section table");
    Ok(SectionIndex::new(sections))
}
