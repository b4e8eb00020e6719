//! Virtual address type.

use std::fmt;
use std::num::ParseIntError;
use std::ops::Add;
use std::str::FromStr;

use thiserror::Error;

/// Strongly typed virtual address inside the inspected image
///
/// This wrapper around `u64` keeps addresses apart from the sizes, counts and
/// relative offsets that the metadata records are full of. Relative offsets
/// only become an `Address` once they have gone through a
/// [`ModuleOffset`](crate::metadata::ModuleOffset).
///
/// ## Example
///
/// ```rust
/// use typeprobe_core::types::Address;
///
/// let addr = Address::from(0x1000);
/// let next_addr = addr + 0x30; // Skip a type descriptor
/// assert_eq!(next_addr.value(), 0x1030);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address
{
    /// The null address (0x0)
    ///
    /// Metadata records use a null pointer to mean "absent" (empty method
    /// slices, missing package paths).
    pub const ZERO: Self = Address(0);

    /// Create a new address from a `u64` value
    ///
    /// ```rust
    /// use typeprobe_core::types::Address;
    ///
    /// const RODATA: Address = Address::new(0x48_0000);
    /// ```
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Get the raw `u64` value of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Whether this is the null address
    pub const fn is_null(self) -> bool
    {
        self.0 == 0
    }

    /// Add an offset to this address, checking for overflow
    ///
    /// ```rust
    /// use typeprobe_core::types::Address;
    ///
    /// let addr = Address::from(0x1000);
    /// assert_eq!(addr.checked_add(0x100), Some(Address::from(0x1100)));
    /// assert_eq!(addr.checked_add(u64::MAX), None);
    /// ```
    pub fn checked_add(self, offset: u64) -> Option<Self>
    {
        self.0.checked_add(offset).map(Address)
    }

    /// Distance from `base` to this address, or `None` if `base` is above it
    pub fn offset_from(self, base: Address) -> Option<u64>
    {
        self.0.checked_sub(base.0)
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:016x}", self.0)
    }
}

impl fmt::LowerHex for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Add<u64> for Address
{
    type Output = Address;

    fn add(self, rhs: u64) -> Self::Output
    {
        Address(self.0.wrapping_add(rhs))
    }
}

/// Error returned when a textual address cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address '{input}': {source}")]
pub struct ParseAddressError
{
    input: String,
    source: ParseIntError,
}

impl FromStr for Address
{
    type Err = ParseAddressError;

    /// Parse `0x`-prefixed hexadecimal or plain decimal
    ///
    /// ```rust
    /// use typeprobe_core::types::Address;
    ///
    /// assert_eq!("0x4d2f80".parse::<Address>().unwrap(), Address::new(0x4d_2f80));
    /// assert_eq!("4096".parse::<Address>().unwrap(), Address::new(4096));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };

        parsed.map(Address).map_err(|source| ParseAddressError {
            input: s.to_string(),
            source,
        })
    }
}
