//! # Decoder
//!
//! The entry point: owns the section index and the type cache for one image
//! and exposes one method per kind of record.
//!
//! ## Lifecycle
//!
//! 1. Load an image: [`Decoder::open`], [`Decoder::from_bytes`] or
//!    [`Decoder::from_sections`]
//! 2. Decode records by address: [`Decoder::decode_type`],
//!    [`Decoder::decode_interface`], [`Decoder::decode_itab`]
//! 3. Look cached descriptors back up: [`Decoder::resolve`], [`Decoder::cached`]
//!
//! The module base (the address of the metadata section) is looked up on the
//! first decode call and reused for the rest of the session.
//!
//! ## Thread Safety
//!
//! Decoding takes `&mut self` because it fills the type cache. If you need
//! to share a decoder across threads, wrap it in a `Mutex`.

use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::error::{Result, TypeProbeError};
use crate::image;
use crate::metadata::{self, MetadataReader, ModuleOffset, TypeCache, DEFAULT_METADATA_SECTION};
use crate::section::SectionIndex;
use crate::types::{Address, InterfaceDescriptor, InterfaceMethod, ItabRecord, TypeDescriptor, TypeRef};

/// Settings for a decoding session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig
{
    /// Name of the section whose base address anchors relative offsets.
    pub metadata_section: String,
}

impl Default for DecoderConfig
{
    fn default() -> Self
    {
        Self {
            metadata_section: DEFAULT_METADATA_SECTION.to_string(),
        }
    }
}

impl DecoderConfig
{
    #[must_use]
    pub fn with_metadata_section(mut self, name: impl Into<String>) -> Self
    {
        self.metadata_section = name.into();
        self
    }
}

/// Which kind of record to decode at an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeMode
{
    Type,
    Interface,
    Itab,
}

/// Result of [`Decoder::decode`], one variant per [`DecodeMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded
{
    Type(TypeDescriptor),
    Interface(InterfaceDescriptor),
    Itab(ItabRecord),
}

impl fmt::Display for Decoded
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Decoded::Type(ty) => write!(f, "{ty}"),
            Decoded::Interface(iface) => write!(f, "{iface}"),
            Decoded::Itab(itab) => write!(f, "{itab}"),
        }
    }
}

/// Metadata decoder for one loaded image.
#[derive(Debug)]
pub struct Decoder
{
    sections: SectionIndex,
    config: DecoderConfig,
    module: OnceCell<ModuleOffset>,
    cache: TypeCache,
}

impl Decoder
{
    /// Read and parse the image at `path` with the default configuration.
    ///
    /// ## Errors
    ///
    /// - `Io`: the file cannot be read
    /// - `InvalidImage`: the file is not a little-endian ELF64 image
    pub fn open(path: impl AsRef<Path>) -> Result<Self>
    {
        Self::open_with_config(path, DecoderConfig::default())
    }

    pub fn open_with_config(path: impl AsRef<Path>, config: DecoderConfig) -> Result<Self>
    {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading image");
        let bytes = fs::read(path)?;
        Self::from_bytes_with_config(&bytes, config)
    }

    /// Parse an in-memory image with the default configuration.
    ///
    /// ## Errors
    ///
    /// `InvalidImage` if the bytes are not a little-endian ELF64 image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self>
    {
        Self::from_bytes_with_config(bytes, DecoderConfig::default())
    }

    pub fn from_bytes_with_config(bytes: &[u8], config: DecoderConfig) -> Result<Self>
    {
        let sections = image::load_sections(bytes)?;
        Ok(Self::from_sections(sections, config))
    }

    /// Build a decoder over an already parsed section list.
    #[must_use]
    pub fn from_sections(sections: SectionIndex, config: DecoderConfig) -> Self
    {
        Self {
            sections,
            config,
            module: OnceCell::new(),
            cache: TypeCache::new(),
        }
    }

    pub fn sections(&self) -> &SectionIndex
    {
        &self.sections
    }

    pub fn config(&self) -> &DecoderConfig
    {
        &self.config
    }

    /// The module base for this session.
    ///
    /// ## Errors
    ///
    /// `SectionNotFound` if the configured metadata section is absent.
    pub fn module_offset(&self) -> Result<ModuleOffset>
    {
        self.module
            .get_or_try_init(|| {
                let base = self.sections.address_of_section(&self.config.metadata_section)?;
                debug!(section = %self.config.metadata_section, %base, "resolved module base");
                Ok::<_, TypeProbeError>(ModuleOffset::new(base))
            })
            .copied()
    }

    /// Decode the type descriptor at `address`.
    ///
    /// ## Errors
    ///
    /// `SectionNotFound`, `AddressNotMapped`, `TruncatedRead`, `VarintOverflow`.
    pub fn decode_type(&mut self, address: Address) -> Result<TypeDescriptor>
    {
        let module = self.module_offset()?;
        MetadataReader::new(&self.sections, module).decode_type(&mut self.cache, address)
    }

    /// Decode the interface descriptor at `address`.
    pub fn decode_interface(&mut self, address: Address) -> Result<InterfaceDescriptor>
    {
        let module = self.module_offset()?;
        MetadataReader::new(&self.sections, module).decode_interface(&mut self.cache, address)
    }

    /// Decode the interface method slice whose header is at `address`.
    pub fn decode_method_slice(&mut self, address: Address) -> Result<Vec<InterfaceMethod>>
    {
        let module = self.module_offset()?;
        MetadataReader::new(&self.sections, module).decode_method_slice(&mut self.cache, address)
    }

    /// Decode the itab at `address`.
    pub fn decode_itab(&mut self, address: Address) -> Result<ItabRecord>
    {
        let module = self.module_offset()?;
        MetadataReader::new(&self.sections, module).decode_itab(&mut self.cache, address)
    }

    /// Decode the name record at `address`.
    pub fn decode_name(&self, address: Address) -> Result<String>
    {
        metadata::decode_name_at(&self.sections, address)
    }

    /// Decode whatever `mode` says lives at `address`.
    pub fn decode(&mut self, mode: DecodeMode, address: Address) -> Result<Decoded>
    {
        match mode {
            DecodeMode::Type => self.decode_type(address).map(Decoded::Type),
            DecodeMode::Interface => self.decode_interface(address).map(Decoded::Interface),
            DecodeMode::Itab => self.decode_itab(address).map(Decoded::Itab),
        }
    }

    /// Previously decoded descriptor at `address`, if any.
    pub fn cached(&self, address: Address) -> Option<&TypeDescriptor>
    {
        self.cache.get(address)
    }

    /// Follow a back-reference to the descriptor it names.
    pub fn resolve(&self, target: &TypeRef) -> Option<&TypeDescriptor>
    {
        self.cache.get(target.address)
    }

    /// Number of descriptors decoded so far.
    pub fn cache_len(&self) -> usize
    {
        self.cache.len()
    }
}
