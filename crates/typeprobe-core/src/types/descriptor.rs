//! Type descriptor records.

use std::fmt;

use super::Address;

/// Size of an on-disk type descriptor record in bytes.
///
/// Layout (all little-endian):
///
/// | offset | width | field            |
/// |--------|-------|------------------|
/// | 0      | 8     | size             |
/// | 8      | 8     | ptrdata          |
/// | 16     | 4     | hash             |
/// | 20     | 1     | tflag            |
/// | 21     | 1     | align            |
/// | 22     | 1     | field align      |
/// | 23     | 1     | kind             |
/// | 24     | 8     | equality fn      |
/// | 32     | 8     | gcdata           |
/// | 40     | 4     | name offset      |
/// | 44     | 4     | ptr-to-this off  |
pub const TYPE_DESCRIPTOR_SIZE: u64 = 48;

/// View over the `tflag` byte of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeFlags(u8);

impl TypeFlags
{
    /// An uncommon-type record follows the descriptor.
    pub const UNCOMMON: u8 = 1 << 0;
    /// The stored name carries a leading `*` that is not part of the type.
    pub const EXTRA_STAR: u8 = 1 << 1;
    /// The type has a declared name.
    pub const NAMED: u8 = 1 << 2;
    /// Equality and hashing can treat the value as plain memory.
    pub const REGULAR_MEMORY: u8 = 1 << 3;

    const LABELS: [(u8, &'static str); 4] = [
        (Self::UNCOMMON, "uncommon"),
        (Self::EXTRA_STAR, "extra-star"),
        (Self::NAMED, "named"),
        (Self::REGULAR_MEMORY, "regular-memory"),
    ];

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self
    {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8
    {
        self.0
    }

    #[must_use]
    pub const fn contains(self, flag: u8) -> bool
    {
        self.0 & flag == flag
    }
}

impl fmt::Display for TypeFlags
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let set: Vec<&str> = Self::LABELS
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, label)| *label)
            .collect();

        if set.is_empty() {
            write!(f, "0x{:02x}", self.0)
        } else {
            write!(f, "0x{:02x} ({})", self.0, set.join("|"))
        }
    }
}

/// Back-reference from one descriptor to another.
///
/// Descriptors never own each other. A reference is the target's address (its
/// key in the decoder's cache) plus its name, so cyclic type graphs stay plain
/// data. Use [`Decoder::resolve`](crate::Decoder::resolve) for the full record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef
{
    pub address: Address,
    pub name: String,
}

impl TypeRef
{
    pub fn new(address: Address, name: impl Into<String>) -> Self
    {
        Self {
            address,
            name: name.into(),
        }
    }
}

/// A decoded type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor
{
    /// Address the record was decoded from
    pub address: Address,
    /// Size in bytes of a value of this type
    pub size: u64,
    /// Prefix of the value that can contain pointers
    pub ptr_data: u64,
    pub hash: u32,
    pub tflag: TypeFlags,
    pub align: u8,
    pub field_align: u8,
    pub kind: u8,
    /// Address of the equality function (zero when not comparable)
    pub equal_fn: u64,
    pub gc_data: u64,
    pub name: String,
    /// The pointer-to-this type, when the record has one and it decoded
    pub self_type: Option<TypeRef>,
}

impl TypeDescriptor
{
    /// Name of the pointer-to-this type, if any.
    pub fn self_type_name(&self) -> Option<&str>
    {
        self.self_type.as_ref().map(|target| target.name.as_str())
    }
}

impl fmt::Display for TypeDescriptor
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "&this: {}", self.self_type_name().unwrap_or("none"))?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Size: {}", self.size)?;
        writeln!(f, "PtrData: {}", self.ptr_data)?;
        writeln!(f, "Hash: 0x{:08x}", self.hash)?;
        writeln!(f, "TFlag: {}", self.tflag)?;
        writeln!(f, "Align: {}", self.align)?;
        writeln!(f, "FieldAlign: {}", self.field_align)?;
        writeln!(f, "Kind: 0x{:02x}", self.kind)?;
        writeln!(f, "Equal: 0x{:x}", self.equal_fn)?;
        write!(f, "GCData: 0x{:x}", self.gc_data)
    }
}
