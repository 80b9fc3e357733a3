//! Structural errors raised while reading a definition blob.

use thiserror::Error;

/// What was being read when a buffer underflow occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingType {
    /// Reading a u8.
    U8,
    /// Reading a u16.
    U16,
    /// Reading a u32.
    U32,
    /// Reading a fixed-size array.
    Array {
        /// Size of the array.
        size: usize,
    },
    /// Reading a byte slice.
    Slice {
        /// Length of the slice.
        len: usize,
    },
}

impl core::fmt::Display for ReadingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::Array { size } => write!(f, "[u8; {size}]"),
            Self::Slice { len } => write!(f, "&[u8] (len {len})"),
        }
    }
}

/// The blob does not have the shape of a definition.
///
/// Raised before any cryptographic work is done. A blob that produces one of
/// these can never become valid, so callers should not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedDefinition {
    /// Buffer ended before a field could be read.
    #[error(
        "buffer too short reading {reading} at offset {offset}: need {need} bytes, have {have}"
    )]
    BufferTooShort {
        /// What was being read.
        reading: ReadingType,
        /// Offset where the read was attempted.
        offset: usize,
        /// Bytes needed from offset.
        need: usize,
        /// Bytes available from offset.
        have: usize,
    },

    /// The proof has more siblings than any legitimate tree produces.
    #[error("proof has {count} hashes, max {max}")]
    ProofTooLong {
        /// Declared or supplied number of hashes.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Bytes remain after the signature.
    #[error("{extra} trailing bytes after signature")]
    TrailingBytes {
        /// Number of unexpected bytes.
        extra: usize,
    },
}
