//! Host-side encoder for definition blobs.
//!
//! Produces blobs in exactly the layout [`ParsedDefinition::parse`] reads.
//! Many definitions are usually released together: [`sign_batch`] puts
//! them under one Merkle tree and signs its root once.
//!
//! [`ParsedDefinition::parse`]: crate::definition::ParsedDefinition::parse

use alloc::vec::Vec;

use ed25519_dalek::{Signer, SigningKey};
use thiserror::Error;

use crate::{
    codec::{HEADER_SIZE, PROOF_HASH_SIZE, SIGNATURE_SIZE, encode},
    crypto::{
        digest::Digest,
        merkle::{self, MAX_PROOF_LEN, MerkleTree, Node},
    },
    definition::{DefinitionType, FormatVersion},
    payload::DefinitionPayload,
};

/// The payload does not fit the 16-bit length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("payload of {len} bytes exceeds the {max} byte limit", max = u16::MAX)]
pub struct PayloadTooLarge {
    /// Length of the rejected payload.
    pub len: usize,
}

/// The proof has more hashes than a parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("proof of {len} hashes exceeds the limit of {max}", max = MAX_PROOF_LEN)]
pub struct ProofTooLong {
    /// Number of hashes in the rejected proof.
    pub len: usize,
}

/// Header and payload of a definition awaiting its proof and signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionBuilder {
    definition_type: DefinitionType,
    data_version: u32,
    payload: Vec<u8>,
}

impl DefinitionBuilder {
    /// Start a definition with raw payload bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadTooLarge`] if the payload is longer than `u16::MAX`.
    pub fn new(
        definition_type: DefinitionType,
        data_version: u32,
        payload: Vec<u8>,
    ) -> Result<Self, PayloadTooLarge> {
        if u16::try_from(payload.len()).is_err() {
            return Err(PayloadTooLarge { len: payload.len() });
        }
        Ok(Self {
            definition_type,
            data_version,
            payload,
        })
    }

    /// Start a definition carrying `record`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadTooLarge`] if the encoded record is too long.
    pub fn for_record<T: DefinitionPayload>(
        data_version: u32,
        record: &T,
    ) -> Result<Self, PayloadTooLarge> {
        Self::new(T::DEFINITION_TYPE, data_version, record.encode_payload())
    }

    /// The definition type.
    #[must_use]
    pub const fn definition_type(&self) -> DefinitionType {
        self.definition_type
    }

    /// Header followed by payload: the bytes that become the Merkle leaf.
    #[must_use]
    pub fn signed_data(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_SIZE + self.payload.len());
        encode::array(&FormatVersion::padded(), &mut buf);
        encode::u8(self.definition_type.tag(), &mut buf);
        encode::u32(self.data_version, &mut buf);
        #[allow(clippy::cast_possible_truncation)] // checked in `new`
        encode::u16(self.payload.len() as u16, &mut buf);
        encode::bytes(&self.payload, &mut buf);
        buf
    }

    /// Merkle leaf hash of this definition.
    #[must_use]
    pub fn leaf_hash(&self) -> Digest<Node> {
        merkle::leaf_hash(&self.signed_data())
    }

    /// Append `proof` and `signature`, producing the final blob.
    ///
    /// # Errors
    ///
    /// Returns [`ProofTooLong`] if `proof` has more than [`MAX_PROOF_LEN`]
    /// hashes.
    pub fn finish(&self, proof: &[Digest<Node>], signature: &[u8; SIGNATURE_SIZE]) -> Result<Vec<u8>, ProofTooLong> {
        if proof.len() > MAX_PROOF_LEN {
            return Err(ProofTooLong { len: proof.len() });
        }
        Ok(self.assemble(proof, signature))
    }

    /// Sign this definition alone: the root is its own leaf hash.
    #[must_use]
    pub fn sign_single(&self, key: &SigningKey) -> Vec<u8> {
        let signature = key.sign(self.leaf_hash().as_bytes());
        self.assemble(&[], &signature.to_bytes())
    }

    fn assemble(&self, proof: &[Digest<Node>], signature: &[u8; SIGNATURE_SIZE]) -> Vec<u8> {
        let mut buf = self.signed_data();
        buf.reserve(1 + proof.len() * PROOF_HASH_SIZE + SIGNATURE_SIZE);
        #[allow(clippy::cast_possible_truncation)] // at most `MAX_PROOF_LEN`
        encode::u8(proof.len() as u8, &mut buf);
        for hash in proof {
            encode::array(hash.as_bytes(), &mut buf);
        }
        encode::array(signature, &mut buf);
        buf
    }
}

/// Sign `builders` as one release under a single Merkle root.
///
/// Returns the blobs in input order, each carrying its own proof. An empty
/// input yields no blobs.
///
/// # Errors
///
/// Returns [`ProofTooLong`] if the batch is too large for its proofs to fit
/// the wire format.
pub fn sign_batch(builders: &[DefinitionBuilder], key: &SigningKey) -> Result<Vec<Vec<u8>>, ProofTooLong> {
    let leaves: Vec<Vec<u8>> = builders.iter().map(DefinitionBuilder::signed_data).collect();
    let Some(tree) = MerkleTree::new(leaves.as_slice()) else {
        return Ok(Vec::new());
    };

    let signature = key.sign(tree.root().as_bytes()).to_bytes();
    tracing::debug!("Signed {} definitions under root {}", builders.len(), tree.root());

    builders
        .iter()
        .enumerate()
        .filter_map(|(index, builder)| tree.proof(index).map(|proof| builder.finish(&proof, &signature)))
        .collect()
}
