//! Pulling definition hints out of host requests.
//!
//! Different request messages carry definitions in different places. Each
//! implements [`DefinitionHints`], overriding only the accessors it has.

use alloc::{string::String, vec::Vec};

use crate::{error::DefinitionError, info::Address};

/// Encoded definitions nested inside a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedDefinitions {
    /// Signed network definition.
    pub encoded_network: Option<Vec<u8>>,

    /// Signed token definition.
    pub encoded_token: Option<Vec<u8>>,
}

/// Where a request may carry definition hints. Every hint defaults to absent.
pub trait DefinitionHints {
    /// Nested definitions.
    fn definitions(&self) -> Option<&EncodedDefinitions> {
        None
    }

    /// Top-level network definition, as sent by older hosts.
    fn encoded_network(&self) -> Option<&[u8]> {
        None
    }

    /// Chain the request targets.
    fn chain_id(&self) -> Option<u64> {
        None
    }

    /// Recipient address as hex. Empty for contract creation.
    fn recipient(&self) -> Option<&str> {
        None
    }
}

/// Parsed recipient hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// The request names no recipient.
    Absent,

    /// The recipient is empty: the request deploys a contract.
    ContractCreation,

    /// A concrete recipient, possibly a token contract.
    Address(Address),
}

impl Recipient {
    /// The address, if there is one.
    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        match self {
            Self::Address(address) => Some(address),
            Self::Absent | Self::ContractCreation => None,
        }
    }
}

/// Hints gathered from a request, borrowing its buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedHints<'a> {
    /// Network definition, nested first, then top-level.
    pub encoded_network: Option<&'a [u8]>,

    /// Token definition.
    pub encoded_token: Option<&'a [u8]>,

    /// Chain the request targets.
    pub chain_id: Option<u64>,

    /// Recipient of the request.
    pub recipient: Recipient,
}

/// Collect the hints `request` carries.
///
/// # Errors
///
/// Returns [`DefinitionError::InvalidAddress`] if a non-empty recipient is
/// not a valid address.
pub fn extract_hints<R: DefinitionHints + ?Sized>(request: &R) -> Result<ExtractedHints<'_>, DefinitionError> {
    let nested = request.definitions();
    let encoded_network = nested
        .and_then(|defs| defs.encoded_network.as_deref())
        .or_else(|| request.encoded_network());
    let encoded_token = nested.and_then(|defs| defs.encoded_token.as_deref());

    let recipient = match request.recipient() {
        None => Recipient::Absent,
        Some("") => Recipient::ContractCreation,
        Some(hex) => Recipient::Address(hex.parse()?),
    };

    Ok(ExtractedHints {
        encoded_network,
        encoded_token,
        chain_id: request.chain_id(),
        recipient,
    })
}

/// A request type for hosts without their own message structs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDefinitions {
    /// Nested definitions.
    pub definitions: Option<EncodedDefinitions>,

    /// Top-level network definition.
    pub encoded_network: Option<Vec<u8>>,

    /// Target chain.
    pub chain_id: Option<u64>,

    /// Recipient address as hex.
    pub recipient: Option<String>,
}

impl DefinitionHints for RequestDefinitions {
    fn definitions(&self) -> Option<&EncodedDefinitions> {
        self.definitions.as_ref()
    }

    fn encoded_network(&self) -> Option<&[u8]> {
        self.encoded_network.as_deref()
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::InvalidAddress;
    use alloc::{string::ToString, vec};
    use testresult::TestResult;

    /// A message that only knows its chain.
    struct ChainOnly;

    impl DefinitionHints for ChainOnly {
        fn chain_id(&self) -> Option<u64> {
            Some(137)
        }
    }

    #[test]
    fn defaults_are_absent() -> TestResult {
        let hints = extract_hints(&ChainOnly)?;
        assert_eq!(
            hints,
            ExtractedHints {
                encoded_network: None,
                encoded_token: None,
                chain_id: Some(137),
                recipient: Recipient::Absent,
            }
        );
        Ok(())
    }

    #[test]
    fn nested_network_wins_over_legacy() -> TestResult {
        let request = RequestDefinitions {
            definitions: Some(EncodedDefinitions {
                encoded_network: Some(vec![1]),
                encoded_token: Some(vec![2]),
            }),
            encoded_network: Some(vec![3]),
            ..RequestDefinitions::default()
        };
        let hints = extract_hints(&request)?;
        assert_eq!(hints.encoded_network, Some([1].as_slice()));
        assert_eq!(hints.encoded_token, Some([2].as_slice()));
        Ok(())
    }

    #[test]
    fn legacy_network_is_fallback() -> TestResult {
        let request = RequestDefinitions {
            definitions: Some(EncodedDefinitions {
                encoded_network: None,
                encoded_token: Some(vec![2]),
            }),
            encoded_network: Some(vec![3]),
            ..RequestDefinitions::default()
        };
        assert_eq!(extract_hints(&request)?.encoded_network, Some([3].as_slice()));
        Ok(())
    }

    #[test]
    fn recipients() -> TestResult {
        let mut request = RequestDefinitions {
            recipient: Some(String::new()),
            ..RequestDefinitions::default()
        };
        assert_eq!(extract_hints(&request)?.recipient, Recipient::ContractCreation);
        assert_eq!(Recipient::ContractCreation.address(), None);

        request.recipient = Some("0xdac17f958d2ee523a2206206994597c13d831ec7".to_string());
        let recipient = extract_hints(&request)?.recipient;
        assert_eq!(
            recipient.address(),
            Some(&Address::from_hex_literal("dac17f958d2ee523a2206206994597c13d831ec7"))
        );

        request.recipient = Some("0x1234".to_string());
        assert_eq!(
            extract_hints(&request),
            Err(DefinitionError::InvalidAddress(InvalidAddress::WrongLength(2)))
        );
        Ok(())
    }
}
