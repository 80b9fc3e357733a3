//! Errors surfaced by definition decoding and resolution.

use thiserror::Error;

use crate::{
    codec::MalformedDefinition,
    definition::{DefinitionType, UnsupportedFormatVersion},
    info::InvalidAddress,
    payload::SchemaError,
};

/// Why a definition was refused.
///
/// Every variant is terminal for the current resolve call. Validity is a
/// property of the bytes, so retrying with the same input cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Length fields are inconsistent with the buffer.
    #[error("malformed definition: {0}")]
    Malformed(#[from] MalformedDefinition),

    /// Format tag is not the supported one.
    #[error(transparent)]
    UnsupportedFormatVersion(#[from] UnsupportedFormatVersion),

    /// The blob describes a different kind of record than requested.
    #[error("definition type mismatch: expected {expected}, found tag {found:#04x}")]
    TypeMismatch {
        /// Requested type.
        expected: DefinitionType,
        /// Type byte found in the blob.
        found: u8,
    },

    /// The blob comes from a definition set older than the minimum.
    #[error("definition is outdated: data version {data_version}, minimum {min}")]
    Outdated {
        /// Data version found in the blob.
        data_version: u32,
        /// Minimum accepted data version.
        min: u32,
    },

    /// The Merkle root is not signed by any trusted key.
    #[error("invalid definition signature")]
    InvalidSignature,

    /// A network definition describes a different chain than the request.
    #[error("network definition mismatch: expected chain id {expected}, found {found}")]
    NetworkMismatch {
        /// Chain id asserted by the caller.
        expected: u64,
        /// Chain id in the decoded definition.
        found: u64,
    },

    /// The authenticated payload is not a valid record.
    #[error("invalid definition payload: {0}")]
    Schema(#[from] SchemaError),

    /// A recipient hint is not a valid address.
    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddress),
}
