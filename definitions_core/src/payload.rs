//! Payload codec for verified definitions.
//!
//! Payloads are protobuf messages. Every field is required: a record is
//! either fully populated or rejected.

use alloc::{string::String, vec::Vec};

use prost::Message;
use thiserror::Error;

use crate::{
    definition::DefinitionType,
    info::{Address, NetworkInfo, TokenInfo},
};

/// A record that can be carried in a definition payload.
pub trait DefinitionPayload: Sized {
    /// The definition type tag that carries this record.
    const DEFINITION_TYPE: DefinitionType;

    /// Decode the record from authenticated payload bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the bytes are not a complete record.
    fn decode_payload(bytes: &[u8]) -> Result<Self, SchemaError>;

    /// Encode the record as payload bytes.
    fn encode_payload(&self) -> Vec<u8>;
}

/// The payload does not describe a valid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Bytes are not a well-formed protobuf message.
    #[error("payload is not a valid protobuf message")]
    Decode,

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The token address is not 20 bytes.
    #[error("token address must be 20 bytes, got {0}")]
    InvalidAddress(usize),
}

#[derive(Clone, PartialEq, Message)]
struct NetworkInfoProto {
    #[prost(uint64, optional, tag = "1")]
    chain_id: Option<u64>,
    #[prost(string, optional, tag = "2")]
    symbol: Option<String>,
    #[prost(uint32, optional, tag = "3")]
    slip44: Option<u32>,
    #[prost(string, optional, tag = "4")]
    name: Option<String>,
}

#[derive(Clone, PartialEq, Message)]
struct TokenInfoProto {
    #[prost(bytes = "vec", optional, tag = "1")]
    address: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "2")]
    chain_id: Option<u64>,
    #[prost(string, optional, tag = "3")]
    symbol: Option<String>,
    #[prost(uint32, optional, tag = "4")]
    decimals: Option<u32>,
    #[prost(string, optional, tag = "5")]
    name: Option<String>,
}

fn decode_proto<M: Message + Default>(bytes: &[u8]) -> Result<M, SchemaError> {
    M::decode(bytes).map_err(|err| {
        tracing::debug!("Payload failed to decode: {}", err);
        SchemaError::Decode
    })
}

fn required<T>(field: Option<T>, name: &'static str) -> Result<T, SchemaError> {
    field.ok_or(SchemaError::MissingField(name))
}

impl DefinitionPayload for NetworkInfo {
    const DEFINITION_TYPE: DefinitionType = DefinitionType::Network;

    fn decode_payload(bytes: &[u8]) -> Result<Self, SchemaError> {
        let proto: NetworkInfoProto = decode_proto(bytes)?;
        Ok(NetworkInfo::new(
            required(proto.chain_id, "chain_id")?,
            required(proto.symbol, "symbol")?,
            required(proto.slip44, "slip44")?,
            required(proto.name, "name")?,
        ))
    }

    fn encode_payload(&self) -> Vec<u8> {
        NetworkInfoProto {
            chain_id: Some(self.chain_id()),
            symbol: Some(self.symbol().into()),
            slip44: Some(self.slip44()),
            name: Some(self.name().into()),
        }
        .encode_to_vec()
    }
}

impl DefinitionPayload for TokenInfo {
    const DEFINITION_TYPE: DefinitionType = DefinitionType::Token;

    fn decode_payload(bytes: &[u8]) -> Result<Self, SchemaError> {
        let proto: TokenInfoProto = decode_proto(bytes)?;
        let raw_address = required(proto.address, "address")?;
        let address = Address::try_from(raw_address.as_slice())
            .map_err(|_| SchemaError::InvalidAddress(raw_address.len()))?;
        Ok(TokenInfo::new(
            address,
            required(proto.chain_id, "chain_id")?,
            required(proto.symbol, "symbol")?,
            required(proto.decimals, "decimals")?,
            required(proto.name, "name")?,
        ))
    }

    fn encode_payload(&self) -> Vec<u8> {
        TokenInfoProto {
            address: Some(self.address().as_bytes().to_vec()),
            chain_id: Some(self.chain_id()),
            symbol: Some(self.symbol().into()),
            decimals: Some(self.decimals()),
            name: Some(self.name().into()),
        }
        .encode_to_vec()
    }
}
