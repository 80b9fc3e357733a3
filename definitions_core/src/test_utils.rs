//! Fixtures for tests of definition decoding and resolution.
//!
//! The "production" key here is a throwaway test key, not the compiled-in
//! one; [`trust_anchor`] trusts it in place of the real production key.
//!
//! Enable with the `test_utils` feature flag.

use alloc::vec::Vec;

use ed25519_dalek::SigningKey;

use crate::{
    builder::DefinitionBuilder,
    info::{Address, NetworkInfo, TokenInfo},
    payload::DefinitionPayload,
    trust::TrustAnchor,
};

/// Seed of the key standing in for the production key.
pub const PRODUCTION_SEED: [u8; 32] = [7; 32];

/// Seed of the compiled-in development key.
pub const DEVELOPMENT_SEED: [u8; 32] = [0x41; 32];

/// Seed of a key nobody trusts.
pub const UNTRUSTED_SEED: [u8; 32] = [0xEE; 32];

/// Deterministic signing key from a seed.
#[must_use]
pub fn signing_key(seed: [u8; 32]) -> SigningKey {
    SigningKey::from_bytes(&seed)
}

/// Trust anchor whose production key is derived from [`PRODUCTION_SEED`].
#[must_use]
pub fn trust_anchor() -> TrustAnchor {
    TrustAnchor::new(signing_key(PRODUCTION_SEED).verifying_key())
}

/// Encode and sign `record` as a single-leaf blob under `seed`.
///
/// Returns an empty blob if the record does not fit a payload.
#[must_use]
pub fn signed_blob<T: DefinitionPayload>(record: &T, seed: [u8; 32]) -> Vec<u8> {
    DefinitionBuilder::for_record(1, record)
        .map(|builder| builder.sign_single(&signing_key(seed)))
        .unwrap_or_default()
}

/// Ethereum mainnet, as compiled in.
#[must_use]
pub fn ethereum() -> NetworkInfo {
    NetworkInfo::new(1, "ETH", 60, "Ethereum")
}

/// A network missing from the compiled-in table.
#[must_use]
pub fn arbitrum() -> NetworkInfo {
    NetworkInfo::new(42161, "ETH", 60, "Arbitrum One")
}

/// Tether on Ethereum mainnet, as compiled in.
#[must_use]
pub fn usdt() -> TokenInfo {
    TokenInfo::new(
        Address::from_hex_literal("dac17f958d2ee523a2206206994597c13d831ec7"),
        1,
        "USDT",
        6,
        "Tether",
    )
}

/// A mainnet token missing from the compiled-in table.
#[must_use]
pub fn chainlink() -> TokenInfo {
    TokenInfo::new(
        Address::from_hex_literal("514910771af9ca656af840dff83e8264ecf986ca"),
        1,
        "LINK",
        18,
        "Chainlink",
    )
}

/// A token on the network returned by [`arbitrum`].
#[must_use]
pub fn arbitrum_token() -> TokenInfo {
    TokenInfo::new(
        Address::from_hex_literal("912ce59144191c1204e64559fe8253a0e49e6548"),
        42161,
        "ARB",
        18,
        "Arbitrum",
    )
}
