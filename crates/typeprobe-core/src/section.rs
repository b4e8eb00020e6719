//! # Section Index
//!
//! The loaded image seen as a flat list of sections, each with a virtual
//! address range and the bytes backing it.
//!
//! Lookups are linear. Sections are assumed not to overlap; if they do, the
//! first section in table order that contains the address wins.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::{Result, TypeProbeError};
use crate::reader::{self, ReadError};
use crate::types::Address;

/// One section of the image.
///
/// `size` is the span of the section in the address space. `data` is what the
/// file actually stores, which is shorter than `size` for `SHT_NOBITS`
/// sections such as `.bss`.
#[derive(Clone)]
pub struct Section
{
    name: String,
    address: Address,
    size: u64,
    data: Arc<[u8]>,
}

impl Section
{
    pub fn new(name: impl Into<String>, address: Address, size: u64, data: impl Into<Arc<[u8]>>) -> Self
    {
        Self {
            name: name.into(),
            address,
            size,
            data: data.into(),
        }
    }

    /// Build a section whose span is exactly its bytes.
    pub fn from_bytes(name: impl Into<String>, address: Address, data: Vec<u8>) -> Self
    {
        let size = data.len() as u64;
        Self::new(name, address, size, data)
    }

    pub fn name(&self) -> &str
    {
        &self.name
    }

    pub fn address(&self) -> Address
    {
        self.address
    }

    pub fn size(&self) -> u64
    {
        self.size
    }

    pub fn data(&self) -> &[u8]
    {
        &self.data
    }

    /// Whether `start <= address < start + size`.
    pub fn contains(&self, address: Address) -> bool
    {
        address.offset_from(self.address).is_some_and(|offset| offset < self.size)
    }

    /// Byte offset of `address` within this section.
    pub fn offset_of(&self, address: Address) -> Option<u64>
    {
        address.offset_from(self.address).filter(|offset| *offset < self.size)
    }

    /// Start a sequential reader at `address`.
    ///
    /// ## Errors
    ///
    /// `AddressNotMapped` if `address` is outside this section.
    pub fn cursor_at(&self, address: Address) -> Result<SectionCursor<'_>>
    {
        let offset = self.offset_of(address).ok_or(TypeProbeError::AddressNotMapped(address))?;
        // An offset that does not fit in usize is certainly past the bytes we hold.
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(SectionCursor { section: self, offset })
    }
}

impl fmt::Debug for Section
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("size", &self.size)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Sequential little-endian reader over one section.
///
/// Wraps the stateless functions in [`reader`] and turns their errors into
/// [`TypeProbeError`]s that name the absolute address and the section.
pub struct SectionCursor<'a>
{
    section: &'a Section,
    offset: usize,
}

impl<'a> SectionCursor<'a>
{
    /// Absolute address of the next read.
    pub fn address(&self) -> Address
    {
        self.address_at(self.offset)
    }

    pub fn section(&self) -> &'a Section
    {
        self.section
    }

    fn address_at(&self, offset: usize) -> Address
    {
        self.section.address + offset as u64
    }

    fn lift(&self, err: ReadError) -> TypeProbeError
    {
        match err {
            ReadError::OutOfBounds { offset, width, .. } => TypeProbeError::TruncatedRead {
                address: self.address_at(offset),
                width,
                section: self.section.name.clone(),
            },
            ReadError::VarintOverflow { offset } => TypeProbeError::VarintOverflow(self.address_at(offset)),
        }
    }

    fn step<T>(&mut self, read: impl FnOnce(&'a [u8], usize) -> std::result::Result<(T, usize), ReadError>) -> Result<T>
    {
        let section: &'a Section = self.section;
        let (value, next) = read(section.data(), self.offset).map_err(|err| self.lift(err))?;
        trace!(section = %self.section.name, offset = self.offset, width = next - self.offset, "read");
        self.offset = next;
        Ok(value)
    }

    pub fn u8(&mut self) -> Result<u8>
    {
        self.step(reader::read_u8)
    }

    pub fn u32(&mut self) -> Result<u32>
    {
        self.step(reader::read_u32_le)
    }

    pub fn u64(&mut self) -> Result<u64>
    {
        self.step(reader::read_u64_le)
    }

    pub fn uvarint(&mut self) -> Result<u64>
    {
        self.step(reader::read_uvarint)
    }

    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8]>
    {
        self.step(|data, offset| reader::read_bytes(data, offset, len))
    }
}

/// All sections of the image, in section-table order.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex
{
    sections: Vec<Section>,
}

impl SectionIndex
{
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self
    {
        Self { sections }
    }

    /// The section whose address range contains `address`.
    ///
    /// ## Errors
    ///
    /// `AddressNotMapped` if no section contains it.
    pub fn section_for_address(&self, address: Address) -> Result<&Section>
    {
        let section = self
            .sections
            .iter()
            .find(|section| section.contains(address))
            .ok_or(TypeProbeError::AddressNotMapped(address))?;
        trace!(%address, section = section.name(), "resolved address");
        Ok(section)
    }

    /// Base address of the section called `name`.
    ///
    /// ## Errors
    ///
    /// `SectionNotFound` if there is no such section.
    pub fn address_of_section(&self, name: &str) -> Result<Address>
    {
        self.section_by_name(name)
            .map(Section::address)
            .ok_or_else(|| TypeProbeError::SectionNotFound(name.to_string()))
    }

    pub fn section_by_name(&self, name: &str) -> Option<&Section>
    {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Cursor positioned at `address` in whichever section contains it.
    pub fn cursor_at(&self, address: Address) -> Result<SectionCursor<'_>>
    {
        self.section_for_address(address)?.cursor_at(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section>
    {
        self.sections.iter()
    }

    pub fn len(&self) -> usize
    {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.sections.is_empty()
    }
}
