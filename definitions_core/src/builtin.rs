//! Metadata compiled into the firmware and trusted implicitly.
//!
//! A builtin entry always wins over a signed definition for the same
//! identity, and matching one never touches the remote pipeline.

pub mod networks;
pub mod tokens;

use crate::info::{Address, NetworkInfo, TokenInfo};

/// Lookup over compiled-in networks and tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTable {
    networks: &'static [NetworkInfo],
    tokens: &'static [TokenInfo],
}

static COMPILED: BuiltinTable = BuiltinTable::new(&networks::NETWORKS, &tokens::TOKENS);

impl BuiltinTable {
    /// A table over the given entries.
    #[must_use]
    pub const fn new(networks: &'static [NetworkInfo], tokens: &'static [TokenInfo]) -> Self {
        Self { networks, tokens }
    }

    /// A table with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(&[], &[])
    }

    /// The table compiled into this crate.
    #[must_use]
    pub fn compiled() -> &'static Self {
        &COMPILED
    }

    /// The builtin network with `chain_id`.
    #[must_use]
    pub fn network(&self, chain_id: u64) -> Option<&'static NetworkInfo> {
        self.networks.iter().find(|network| network.chain_id() == chain_id)
    }

    /// The builtin token at `address` on `chain_id`.
    #[must_use]
    pub fn token(&self, chain_id: u64, address: &Address) -> Option<&'static TokenInfo> {
        self.tokens
            .iter()
            .find(|token| token.chain_id() == chain_id && token.address() == address)
    }

    /// All builtin networks.
    #[must_use]
    pub const fn networks(&self) -> &'static [NetworkInfo] {
        self.networks
    }

    /// All builtin tokens.
    #[must_use]
    pub const fn tokens(&self) -> &'static [TokenInfo] {
        self.tokens
    }
}
