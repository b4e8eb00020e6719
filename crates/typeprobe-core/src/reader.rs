//! Stateless little-endian reads from a byte buffer.
//!
//! Every read takes a buffer and a cursor offset and returns the value along
//! with the offset just past it. Nothing here knows about sections or
//! addresses; [`SectionCursor`](crate::section::SectionCursor) lifts these
//! errors into [`TypeProbeError`](crate::TypeProbeError) with the absolute
//! address attached.

use thiserror::Error;

/// Longest encoding of a 64-bit base-128 varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Failure of a primitive read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError
{
    /// `offset + width` is past the end of the buffer (or overflows).
    #[error("read of {width} bytes at offset {offset:#x} exceeds buffer length {len:#x}")]
    OutOfBounds
    {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// A varint starting at `offset` encodes a value wider than 64 bits.
    #[error("varint at offset {offset:#x} overflows 64 bits")]
    VarintOverflow
    {
        offset: usize
    },
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<([u8; N], usize), ReadError>
{
    let bytes = offset
        .checked_add(N)
        .and_then(|end| data.get(offset..end))
        .ok_or(ReadError::OutOfBounds {
            offset,
            width: N,
            len: data.len(),
        })?;

    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok((out, offset + N))
}

pub fn read_u8(data: &[u8], offset: usize) -> Result<(u8, usize), ReadError>
{
    let ([value], next) = read_array::<1>(data, offset)?;
    Ok((value, next))
}

pub fn read_u32_le(data: &[u8], offset: usize) -> Result<(u32, usize), ReadError>
{
    let (bytes, next) = read_array::<4>(data, offset)?;
    Ok((u32::from_le_bytes(bytes), next))
}

pub fn read_u64_le(data: &[u8], offset: usize) -> Result<(u64, usize), ReadError>
{
    let (bytes, next) = read_array::<8>(data, offset)?;
    Ok((u64::from_le_bytes(bytes), next))
}

/// Borrow `len` raw bytes starting at `offset`.
pub fn read_bytes(data: &[u8], offset: usize, len: usize) -> Result<(&[u8], usize), ReadError>
{
    let end = offset.checked_add(len).ok_or(ReadError::OutOfBounds {
        offset,
        width: len,
        len: data.len(),
    })?;
    let bytes = data.get(offset..end).ok_or(ReadError::OutOfBounds {
        offset,
        width: len,
        len: data.len(),
    })?;
    Ok((bytes, end))
}

/// Decode a base-128 little-endian varint.
///
/// The low seven bits of each byte carry the value, the high bit says another
/// byte follows.
pub fn read_uvarint(data: &[u8], offset: usize) -> Result<(u64, usize), ReadError>
{
    let mut value = 0u64;
    let mut cursor = offset;

    for index in 0..MAX_VARINT_LEN {
        let (byte, next) = read_u8(data, cursor)?;
        cursor = next;

        // The tenth byte may only contribute the single remaining bit.
        if index == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(ReadError::VarintOverflow { offset });
        }

        value |= u64::from(byte & 0x7f) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok((value, cursor));
        }
    }

    Err(ReadError::VarintOverflow { offset })
}
