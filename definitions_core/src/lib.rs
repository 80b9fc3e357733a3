//! Verification and resolution of signed network and token definitions.
//!
//! A signing device has to show network and token metadata that reaches it
//! through an untrusted host. Metadata is either compiled in, or supplied as
//! a _definition_: a small blob whose payload is a leaf of a Merkle tree
//! whose root is signed by a trusted key.
//!
//! ```text
//! blob ──► ParsedDefinition ──► Merkle root ──► signature ──► NetworkInfo / TokenInfo ──► Definitions
//! ```
//!
//! The compiled-in [`BuiltinTable`] always takes precedence over supplied
//! definitions, and a token is only resolved within an already-resolved
//! network. Every failure is a typed [`DefinitionError`].
//!
//! # Features
//!
//! - `std` (default): std support in the dependencies.
//! - `dev_key`: also trust the development signing key. Never enable in
//!   production builds.
//! - `test_utils`: fixtures for downstream tests.
//! - `bolero`: property-test generators.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod builder;
pub mod builtin;
pub mod codec;
pub mod crypto;
pub mod definition;
pub mod definitions;
pub mod error;
pub mod hints;
pub mod info;
pub mod payload;
pub mod resolver;
pub mod trust;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use builtin::BuiltinTable;
pub use definition::{DefinitionType, ParsedDefinition, VerifiedDefinition};
pub use definitions::Definitions;
pub use error::DefinitionError;
pub use info::{Address, NetworkInfo, TokenInfo, UNKNOWN_TOKEN};
pub use payload::DefinitionPayload;
pub use resolver::{DefinitionRecord, DefinitionResolver, decode_definition, decode_typed};
pub use trust::TrustAnchor;
