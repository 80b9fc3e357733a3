//! Format tag identifying the definition wire format.

use thiserror::Error;

use crate::codec::FORMAT_TAG_SIZE;

/// Unit type representing a supported format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion;

/// The only supported format, before NUL padding.
pub const FORMAT_VERSION: &str = "trzd1";

impl FormatVersion {
    /// The tag as it appears on the wire, NUL padded to 8 bytes.
    #[must_use]
    pub const fn padded() -> [u8; FORMAT_TAG_SIZE] {
        let mut tag = [0u8; FORMAT_TAG_SIZE];
        let src = FORMAT_VERSION.as_bytes();
        let mut i = 0;
        while i < src.len() {
            tag[i] = src[i];
            i += 1;
        }
        tag
    }
}

/// Strip trailing NUL padding from a raw tag.
#[must_use]
pub fn strip_padding(raw: &[u8; FORMAT_TAG_SIZE]) -> &[u8] {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &raw[..end]
}

impl TryFrom<&[u8; FORMAT_TAG_SIZE]> for FormatVersion {
    type Error = UnsupportedFormatVersion;

    fn try_from(raw: &[u8; FORMAT_TAG_SIZE]) -> Result<Self, Self::Error> {
        if strip_padding(raw) == FORMAT_VERSION.as_bytes() {
            Ok(FormatVersion)
        } else {
            Err(UnsupportedFormatVersion { raw: *raw })
        }
    }
}

/// Error returned when the format tag is not [`FORMAT_VERSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "unsupported definition format {:?}",
    alloc::string::String::from_utf8_lossy(strip_padding(raw))
)]
pub struct UnsupportedFormatVersion {
    /// The tag as found on the wire.
    pub raw: [u8; FORMAT_TAG_SIZE],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_tag() {
        assert_eq!(FormatVersion::try_from(b"trzd1\0\0\0"), Ok(FormatVersion));
        assert_eq!(&FormatVersion::padded(), b"trzd1\0\0\0");
    }

    #[test]
    fn rejects_garbage_before_padding() {
        assert!(FormatVersion::try_from(b"trzd1\0x\0").is_err());
        assert!(FormatVersion::try_from(b"trzd1   ").is_err());
        assert!(FormatVersion::try_from(b"trzd2\0\0\0").is_err());
    }

    #[test]
    fn rejects_leading_padding() {
        assert!(FormatVersion::try_from(b"\0trzd1\0\0").is_err());
    }

    #[test]
    fn strips_only_trailing_nuls() {
        assert_eq!(strip_padding(b"ab\0c\0\0\0\0"), b"ab\0c");
        assert_eq!(strip_padding(&[0; 8]), b"");
    }
}
