use crate::types::Address;

/// Origin for the 32-bit relative offsets stored in metadata records.
///
/// Name offsets and type offsets are both relative to the start of the
/// metadata section; resolving one is a plain addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleOffset
{
    base: Address,
}

impl ModuleOffset
{
    #[must_use]
    pub const fn new(base: Address) -> Self
    {
        Self { base }
    }

    #[must_use]
    pub const fn base(self) -> Address
    {
        self.base
    }

    /// Absolute address of `relative`.
    #[must_use]
    pub fn resolve(self, relative: u32) -> Address
    {
        self.base + u64::from(relative)
    }

    /// Absolute address of a name record.
    #[must_use]
    pub fn name_off(self, relative: u32) -> Address
    {
        self.resolve(relative)
    }

    /// Absolute address of a type descriptor.
    #[must_use]
    pub fn type_off(self, relative: u32) -> Address
    {
        self.resolve(relative)
    }
}
