//! Bounds-checked big-endian readers.
//!
//! Every reader takes the full buffer and an absolute offset, and reports
//! underflow as [`MalformedDefinition::BufferTooShort`] instead of panicking.

use super::error::{MalformedDefinition, ReadingType};

#[inline]
const fn too_short(
    buf: &[u8],
    offset: usize,
    need: usize,
    reading: ReadingType,
) -> MalformedDefinition {
    MalformedDefinition::BufferTooShort {
        reading,
        offset,
        need,
        have: buf.len().saturating_sub(offset),
    }
}

/// Decode a u8.
///
/// # Errors
///
/// Returns [`MalformedDefinition::BufferTooShort`] if `offset` is past the end.
#[inline]
pub fn u8(buf: &[u8], offset: usize) -> Result<u8, MalformedDefinition> {
    buf.get(offset)
        .copied()
        .ok_or_else(|| too_short(buf, offset, 1, ReadingType::U8))
}

/// Decode a u16 from big-endian bytes.
///
/// # Errors
///
/// Returns [`MalformedDefinition::BufferTooShort`] if fewer than 2 bytes remain.
#[inline]
pub fn u16(buf: &[u8], offset: usize) -> Result<u16, MalformedDefinition> {
    let bytes: [u8; 2] = buf
        .get(offset..offset.saturating_add(2))
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| too_short(buf, offset, 2, ReadingType::U16))?;
    Ok(u16::from_be_bytes(bytes))
}

/// Decode a u32 from big-endian bytes.
///
/// # Errors
///
/// Returns [`MalformedDefinition::BufferTooShort`] if fewer than 4 bytes remain.
#[inline]
pub fn u32(buf: &[u8], offset: usize) -> Result<u32, MalformedDefinition> {
    let bytes: [u8; 4] = buf
        .get(offset..offset.saturating_add(4))
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| too_short(buf, offset, 4, ReadingType::U32))?;
    Ok(u32::from_be_bytes(bytes))
}

/// Decode a fixed-size array.
///
/// # Errors
///
/// Returns [`MalformedDefinition::BufferTooShort`] if fewer than `N` bytes remain.
#[inline]
pub fn array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], MalformedDefinition> {
    buf.get(offset..offset.saturating_add(N))
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| too_short(buf, offset, N, ReadingType::Array { size: N }))
}

/// Get a slice of bytes.
///
/// # Errors
///
/// Returns [`MalformedDefinition::BufferTooShort`] if fewer than `len` bytes remain.
#[inline]
pub fn slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], MalformedDefinition> {
    buf.get(offset..offset.saturating_add(len))
        .ok_or_else(|| too_short(buf, offset, len, ReadingType::Slice { len }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(u8(&buf, 4), Ok(0x05));
        assert_eq!(u16(&buf, 0), Ok(0x0102));
        assert_eq!(u32(&buf, 1), Ok(0x0203_0405));
        assert_eq!(array::<2>(&buf, 3), Ok([0x04, 0x05]));
        assert_eq!(slice(&buf, 1, 3), Ok(&buf[1..4]));
    }

    #[test]
    fn underflow_reports_remaining_bytes() {
        let buf = [0u8; 3];
        assert_eq!(
            u32(&buf, 1),
            Err(MalformedDefinition::BufferTooShort {
                reading: ReadingType::U32,
                offset: 1,
                need: 4,
                have: 2,
            })
        );
    }

    #[test]
    fn offset_past_end_does_not_panic() {
        let buf = [0u8; 2];
        assert!(u8(&buf, 10).is_err());
        assert!(slice(&buf, usize::MAX, 5).is_err());
        assert!(array::<32>(&buf, usize::MAX - 1).is_err());
    }
}
