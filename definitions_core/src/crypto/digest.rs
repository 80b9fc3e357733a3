//! Typed SHA-256 digest.

use core::marker::PhantomData;

use sha2::{Digest as _, Sha256};

/// A 32-byte SHA-256 digest with a phantom type tracking what was digested.
///
/// Keeps Merkle nodes and signed roots from being mixed up with each other
/// or with arbitrary 32-byte strings.
pub struct Digest<T> {
    bytes: [u8; 32],
    _marker: PhantomData<T>,
}

impl<T> Digest<T> {
    /// Create a digest from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self {
            bytes,
            _marker: PhantomData,
        }
    }

    /// Get the raw bytes of the digest by reference.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Consume the digest and return the raw bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; 32] {
        self.bytes
    }

    /// Hash the concatenation of `parts`.
    ///
    /// Equivalent to hashing the joined bytes, without allocating.
    #[must_use]
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Self::from_bytes(hasher.finalize().into())
    }

    /// Hash raw bytes.
    #[must_use]
    pub fn hash_bytes(data: &[u8]) -> Self {
        Self::hash_parts(&[data])
    }

    /// Cast to a different phantom type.
    #[must_use]
    pub const fn cast<U>(self) -> Digest<U> {
        Digest {
            bytes: self.bytes,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Digest<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Digest<T> {}

impl<T> PartialEq for Digest<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<T> Eq for Digest<T> {}

impl<T> PartialOrd for Digest<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Digest<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl<T> core::hash::Hash for Digest<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<T> core::fmt::Debug for Digest<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Digest<{}>(", core::any::type_name::<T>())?;
        for byte in self.bytes {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl<T> core::fmt::Display for Digest<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for byte in self.bytes {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<T> core::str::FromStr for Digest<T> {
    type Err = InvalidDigest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(InvalidDigest::WrongLength);
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidDigest::InvalidHex)?;
        Ok(Self::from_bytes(bytes))
    }
}

/// Error parsing a digest from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDigest {
    /// The hex string was invalid.
    #[error("invalid hex string")]
    InvalidHex,

    /// The digest was not 32 bytes.
    #[error("digest must be exactly 32 bytes")]
    WrongLength,
}

#[cfg(feature = "bolero")]
impl<T: 'static> bolero::generator::TypeGenerator for Digest<T> {
    fn generate<D: bolero::Driver>(driver: &mut D) -> Option<Self> {
        let bytes: [u8; 32] = bolero::generator::TypeGenerator::generate(driver)?;
        Some(Self::from_bytes(bytes))
    }
}
