//! Reconciling signed definitions with the compiled-in table.
//!
//! Every lookup is two-stage: the builtin table first, and only on a miss
//! the remote pipeline (parse, verify, decode). A builtin hit never reads
//! the supplied blob, so a corrupted blob cannot shadow a builtin entry.

use crate::{
    builtin::BuiltinTable,
    definition::{DefinitionType, ParsedDefinition},
    error::DefinitionError,
    hints::Recipient,
    info::{Address, NetworkInfo, TokenInfo, UNKNOWN_TOKEN},
    payload::DefinitionPayload,
    trust::TrustAnchor,
};

/// A record decoded from a verified blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionRecord {
    /// A network definition.
    Network(NetworkInfo),

    /// A token definition.
    Token(TokenInfo),
}

impl DefinitionRecord {
    /// The type of the carried record.
    #[must_use]
    pub const fn definition_type(&self) -> DefinitionType {
        match self {
            Self::Network(_) => DefinitionType::Network,
            Self::Token(_) => DefinitionType::Token,
        }
    }
}

/// Parse, verify and decode `blob` as a record of `expected` type.
///
/// # Errors
///
/// Returns the first failing check as a [`DefinitionError`].
pub fn decode_definition(
    blob: &[u8],
    expected: DefinitionType,
    trust: &TrustAnchor,
) -> Result<DefinitionRecord, DefinitionError> {
    let verified = ParsedDefinition::parse(blob)?.verify(expected, trust)?;
    Ok(match expected {
        DefinitionType::Network => DefinitionRecord::Network(verified.decode()?),
        DefinitionType::Token => DefinitionRecord::Token(verified.decode()?),
    })
}

/// Parse, verify and decode `blob` as a `T`.
///
/// # Errors
///
/// Returns the first failing check as a [`DefinitionError`].
pub fn decode_typed<T: DefinitionPayload>(blob: &[u8], trust: &TrustAnchor) -> Result<T, DefinitionError> {
    ParsedDefinition::parse(blob)?
        .verify(T::DEFINITION_TYPE, trust)?
        .decode()
}

/// Resolves networks and tokens against a trust anchor and builtin table.
///
/// Holds no state of its own; construct once and share by reference.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionResolver<'a> {
    trust: &'a TrustAnchor,
    builtins: &'a BuiltinTable,
}

impl<'a> DefinitionResolver<'a> {
    /// Create a resolver.
    #[must_use]
    pub const fn new(trust: &'a TrustAnchor, builtins: &'a BuiltinTable) -> Self {
        Self { trust, builtins }
    }

    /// The trust anchor remote definitions are verified against.
    #[must_use]
    pub const fn trust(&self) -> &'a TrustAnchor {
        self.trust
    }

    /// The builtin table consulted first.
    #[must_use]
    pub const fn builtins(&self) -> &'a BuiltinTable {
        self.builtins
    }

    /// Resolve the network for a request.
    ///
    /// A builtin entry for `expected_chain_id` is returned without looking at
    /// `encoded`. Otherwise `encoded` is decoded and must describe
    /// `expected_chain_id`, if one was given.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] if the supplied blob is invalid, or
    /// [`DefinitionError::NetworkMismatch`] if it describes another chain.
    pub fn resolve_network(
        &self,
        encoded: Option<&[u8]>,
        expected_chain_id: Option<u64>,
    ) -> Result<Option<NetworkInfo>, DefinitionError> {
        if let Some(chain_id) = expected_chain_id {
            if let Some(network) = self.builtins.network(chain_id) {
                tracing::debug!("Using builtin network for chain {}", chain_id);
                return Ok(Some(network.clone()));
            }
        }

        let Some(blob) = encoded else {
            return Ok(None);
        };

        let network: NetworkInfo = decode_typed(blob, self.trust)?;
        if let Some(expected) = expected_chain_id {
            if network.chain_id() != expected {
                tracing::warn!(
                    "Network definition for chain {} supplied for chain {}",
                    network.chain_id(),
                    expected
                );
                return Err(DefinitionError::NetworkMismatch {
                    expected,
                    found: network.chain_id(),
                });
            }
        }

        tracing::debug!("Accepted signed network definition for chain {}", network.chain_id());
        Ok(Some(network))
    }

    /// Resolve the token for a request.
    ///
    /// Falls back to [`UNKNOWN_TOKEN`] when nothing matches. A supplied
    /// token that verifies but describes a different chain or contract is
    /// also [`UNKNOWN_TOKEN`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] if the supplied blob fails any
    /// structural, signature or schema check.
    pub fn resolve_token(
        &self,
        encoded: Option<&[u8]>,
        chain_id: Option<u64>,
        address: Option<&Address>,
    ) -> Result<TokenInfo, DefinitionError> {
        let recipient = address.map_or(Recipient::Absent, |address| Recipient::Address(*address));
        self.resolve_token_for(encoded, chain_id, &recipient)
    }

    /// Resolve the token for a request with the given recipient.
    ///
    /// Like [`resolve_token`](Self::resolve_token), except that a
    /// [`Recipient::ContractCreation`] matches no token: a supplied blob is
    /// still verified, and then discarded as [`UNKNOWN_TOKEN`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] if the supplied blob fails any
    /// structural, signature or schema check.
    pub fn resolve_token_for(
        &self,
        encoded: Option<&[u8]>,
        chain_id: Option<u64>,
        recipient: &Recipient,
    ) -> Result<TokenInfo, DefinitionError> {
        if let (Some(chain_id), Some(address)) = (chain_id, recipient.address()) {
            if let Some(token) = self.builtins.token(chain_id, address) {
                tracing::debug!("Using builtin token {} on chain {}", address, chain_id);
                return Ok(token.clone());
            }
        }

        let Some(blob) = encoded else {
            return Ok(UNKNOWN_TOKEN.clone());
        };

        let token: TokenInfo = decode_typed(blob, self.trust)?;
        let chain_matches = chain_id.is_none_or(|id| token.chain_id() == id);
        let address_matches = match recipient {
            Recipient::Absent => true,
            Recipient::ContractCreation => false,
            Recipient::Address(address) => token.address() == address,
        };
        if chain_matches && address_matches {
            tracing::debug!(
                "Accepted signed token definition {} on chain {}",
                token.address(),
                token.chain_id()
            );
            Ok(token)
        } else {
            tracing::debug!(
                "Signed token {} on chain {} does not match the request",
                token.address(),
                token.chain_id()
            );
            Ok(UNKNOWN_TOKEN.clone())
        }
    }
}
