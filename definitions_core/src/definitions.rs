//! The per-request bundle of resolved definitions.

use alloc::collections::BTreeMap;

use crate::{
    error::DefinitionError,
    hints::{DefinitionHints, Recipient, extract_hints},
    info::{Address, NetworkInfo, TokenInfo, UNKNOWN_TOKEN},
    resolver::DefinitionResolver,
};

/// Network and token metadata resolved for one request.
///
/// A token is only ever resolved against an already-resolved network, and
/// only within that network's chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    network: Option<NetworkInfo>,
    tokens: BTreeMap<Address, TokenInfo>,
}

impl Definitions {
    /// Resolve the definitions for a request.
    ///
    /// # Errors
    ///
    /// Propagates any [`DefinitionError`] from resolving the network or the
    /// token.
    pub fn new(
        resolver: &DefinitionResolver<'_>,
        encoded_network: Option<&[u8]>,
        encoded_token: Option<&[u8]>,
        ref_chain_id: Option<u64>,
        ref_address: Option<&Address>,
    ) -> Result<Self, DefinitionError> {
        let recipient = ref_address.map_or(Recipient::Absent, |address| Recipient::Address(*address));
        Self::resolve(resolver, encoded_network, encoded_token, ref_chain_id, &recipient)
    }

    /// Resolve the definitions hinted at by `request`.
    ///
    /// The recipient is used as the token address. Without a recipient a
    /// supplied token is matched on chain alone. A contract-creation request
    /// resolves no token, though a supplied token blob must still verify.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidAddress`] for a malformed recipient,
    /// or any error from resolving the network or the token.
    pub fn from_request<R: DefinitionHints + ?Sized>(
        resolver: &DefinitionResolver<'_>,
        request: &R,
    ) -> Result<Self, DefinitionError> {
        let hints = extract_hints(request)?;
        Self::resolve(
            resolver,
            hints.encoded_network,
            hints.encoded_token,
            hints.chain_id,
            &hints.recipient,
        )
    }

    fn resolve(
        resolver: &DefinitionResolver<'_>,
        encoded_network: Option<&[u8]>,
        encoded_token: Option<&[u8]>,
        ref_chain_id: Option<u64>,
        recipient: &Recipient,
    ) -> Result<Self, DefinitionError> {
        let network = resolver.resolve_network(encoded_network, ref_chain_id)?;
        let mut tokens = BTreeMap::new();

        if let Some(network) = &network {
            let token = resolver.resolve_token_for(encoded_token, Some(network.chain_id()), recipient)?;
            if !token.is_unknown() {
                tokens.insert(*token.address(), token);
            }
        }

        Ok(Self { network, tokens })
    }

    /// A bundle with nothing resolved.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// The resolved network.
    #[must_use]
    pub const fn network(&self) -> Option<&NetworkInfo> {
        self.network.as_ref()
    }

    /// The token at `address`, or [`UNKNOWN_TOKEN`].
    #[must_use]
    pub fn get_token(&self, address: &Address) -> &TokenInfo {
        self.tokens.get(address).unwrap_or(&UNKNOWN_TOKEN)
    }

    /// All resolved tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenInfo> {
        self.tokens.values()
    }
}
