//! # Runtime Metadata
//!
//! Decoders for the records the runtime emits into the image: names, type
//! descriptors, interface descriptors with their method slices, and itabs.
//!
//! All decoders hang off [`MetadataReader`], which borrows the section index
//! and the module offset for one session. The only mutable state is the
//! [`TypeCache`], passed explicitly into every call that can decode a type.
//!
//! ## Cycles
//!
//! A type's pointer-to-this can lead back to itself, directly or through
//! other types. The cache entry for a type is written as soon as its own
//! fields are known and before its pointer-to-this is followed, so any
//! re-entrant lookup hits the cache instead of recursing. Back-references are
//! stored as [`TypeRef`](crate::types::TypeRef) keys, never as owned copies.

mod cache;
mod interface;
mod itab;
mod name;
mod offset;
mod typedesc;

use crate::section::SectionIndex;

pub use cache::TypeCache;
pub use name::decode_name_at;
pub use offset::ModuleOffset;

/// Section that conventionally holds read-only metadata and anchors offsets.
pub const DEFAULT_METADATA_SECTION: &str = ".rodata";

/// Borrowed view used by every metadata decoder during one session.
#[derive(Debug, Clone, Copy)]
pub struct MetadataReader<'a>
{
    sections: &'a SectionIndex,
    module: ModuleOffset,
}

impl<'a> MetadataReader<'a>
{
    pub fn new(sections: &'a SectionIndex, module: ModuleOffset) -> Self
    {
        Self { sections, module }
    }

    pub fn sections(&self) -> &'a SectionIndex
    {
        self.sections
    }

    pub fn module(&self) -> ModuleOffset
    {
        self.module
    }
}
