//! Binary layout of definition blobs.
//!
//! # Format Overview
//!
//! ```text
//! ┌──────────────────── signed data (Merkle leaf) ─────────────────────┬──────── authentication ────────┐
//! ╔════════╦══════╦═════════════╦═════════════╦═════════════════════════╦═══════╦════════════╦═══════════╗
//! ║ Format ║ Type ║ DataVersion ║ PayloadLen  ║         Payload         ║ Count ║   Proof    ║ Signature ║
//! ║   8B   ║  1B  ║     4B      ║     2B      ║      PayloadLen B       ║  1B   ║  Count×32B ║    64B    ║
//! ╚════════╩══════╩═════════════╩═════════════╩═════════════════════════╩═══════╩════════════╩═══════════╝
//! ```
//!
//! - **Format**: ASCII tag, NUL padded (`trzd1\0\0\0`)
//! - **Type**: [`DefinitionType`](crate::definition::DefinitionType) tag
//! - **`DataVersion`**: monotonically increasing release number of the signed set
//! - **Payload**: protobuf-encoded network or token record
//! - **Proof**: sibling hashes from the leaf up to the signed root
//! - **Signature**: ed25519 signature over the 32-byte Merkle root
//!
//! # Encoding Conventions
//!
//! - All integers are **big-endian** (network byte order)
//! - Sizes use fixed-width integers (not variable-length encoding)
//! - No bytes may follow the signature

pub mod decode;
pub mod encode;
pub mod error;

pub use error::{MalformedDefinition, ReadingType};

/// Size of the format tag.
pub const FORMAT_TAG_SIZE: usize = 8;

/// Size of the fixed header preceding the payload.
pub const HEADER_SIZE: usize = FORMAT_TAG_SIZE + 1 + 4 + 2;

/// Size of each proof hash.
pub const PROOF_HASH_SIZE: usize = 32;

/// Size of the trailing ed25519 signature.
pub const SIGNATURE_SIZE: usize = 64;
