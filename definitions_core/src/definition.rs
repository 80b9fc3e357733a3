//! Decoding of definition blobs.
//!
//! # Type-State Flow
//!
//! ```text
//! &[u8]  ──parse──►  ParsedDefinition  ──verify──►  VerifiedDefinition  ──decode──►  NetworkInfo / TokenInfo
//! ```
//!
//! - [`ParsedDefinition`] has passed structural checks only. Its payload is
//!   deliberately not exposed.
//! - [`VerifiedDefinition`] is a witness that the format, type, data version,
//!   Merkle proof and signature all checked out.

pub mod definition_type;
pub mod format_version;

pub use definition_type::DefinitionType;
pub use format_version::{FORMAT_VERSION, FormatVersion, UnsupportedFormatVersion};

use alloc::vec::Vec;

use crate::{
    codec::{FORMAT_TAG_SIZE, HEADER_SIZE, MalformedDefinition, PROOF_HASH_SIZE, SIGNATURE_SIZE, decode},
    crypto::{
        digest::Digest,
        merkle::{self, MAX_PROOF_LEN, Node, Root},
    },
    error::DefinitionError,
    payload::DefinitionPayload,
    trust::TrustAnchor,
};

/// Oldest data version still accepted.
pub const MIN_DATA_VERSION: u32 = 1;

/// A structurally valid, not yet authenticated definition.
///
/// Borrows the signed region and payload from the input blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedDefinition<'a> {
    format_tag: [u8; FORMAT_TAG_SIZE],
    type_tag: u8,
    data_version: u32,
    signed_data: &'a [u8],
    payload: &'a [u8],
    proof: Vec<Digest<Node>>,
    signature: [u8; SIGNATURE_SIZE],
}

impl<'a> ParsedDefinition<'a> {
    /// Parse a blob.
    ///
    /// Only checks that every length field is consistent with the buffer.
    /// Use [`verify`](Self::verify) before trusting anything inside.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedDefinition`] if the buffer is truncated, declares
    /// more than [`MAX_PROOF_LEN`] proof hashes, or has bytes after the
    /// signature.
    pub fn parse(blob: &'a [u8]) -> Result<Self, MalformedDefinition> {
        let format_tag = decode::array::<FORMAT_TAG_SIZE>(blob, 0)?;
        let type_tag = decode::u8(blob, FORMAT_TAG_SIZE)?;
        let data_version = decode::u32(blob, FORMAT_TAG_SIZE + 1)?;
        let payload_len = usize::from(decode::u16(blob, FORMAT_TAG_SIZE + 5)?);

        let payload = decode::slice(blob, HEADER_SIZE, payload_len)?;
        let mut offset = HEADER_SIZE + payload_len;
        let signed_data = decode::slice(blob, 0, offset)?;

        let proof_count = usize::from(decode::u8(blob, offset)?);
        offset += 1;
        if proof_count > MAX_PROOF_LEN {
            return Err(MalformedDefinition::ProofTooLong {
                count: proof_count,
                max: MAX_PROOF_LEN,
            });
        }

        let proof = (0..proof_count)
            .map(|i| decode::array::<PROOF_HASH_SIZE>(blob, offset + i * PROOF_HASH_SIZE))
            .map(|hash| hash.map(Digest::from_bytes))
            .collect::<Result<Vec<_>, _>>()?;
        offset += proof_count * PROOF_HASH_SIZE;

        let signature = decode::array::<SIGNATURE_SIZE>(blob, offset)?;
        offset += SIGNATURE_SIZE;

        if blob.len() > offset {
            return Err(MalformedDefinition::TrailingBytes {
                extra: blob.len() - offset,
            });
        }

        Ok(Self {
            format_tag,
            type_tag,
            data_version,
            signed_data,
            payload,
            proof,
            signature,
        })
    }

    /// Raw format tag, including padding.
    #[must_use]
    pub const fn format_tag(&self) -> &[u8; FORMAT_TAG_SIZE] {
        &self.format_tag
    }

    /// Format tag with trailing NULs stripped.
    #[must_use]
    pub fn format_version(&self) -> &[u8] {
        format_version::strip_padding(&self.format_tag)
    }

    /// Raw type byte.
    #[must_use]
    pub const fn type_tag(&self) -> u8 {
        self.type_tag
    }

    /// Type byte as a [`DefinitionType`], if recognised.
    #[must_use]
    pub const fn definition_type(&self) -> Option<DefinitionType> {
        DefinitionType::from_tag(self.type_tag)
    }

    /// Release number of the signed definition set.
    #[must_use]
    pub const fn data_version(&self) -> u32 {
        self.data_version
    }

    /// Header and payload: the exact bytes hashed into the Merkle leaf.
    #[must_use]
    pub const fn signed_data(&self) -> &'a [u8] {
        self.signed_data
    }

    /// Length of the (unverified) payload.
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Sibling hashes, leaf first.
    #[must_use]
    pub fn proof(&self) -> &[Digest<Node>] {
        &self.proof
    }

    /// Signature over the Merkle root.
    #[must_use]
    pub const fn signature(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.signature
    }

    /// Recompute the Merkle root from the signed data and proof.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedDefinition::ProofTooLong`] if the proof is oversized.
    pub fn compute_root(&self) -> Result<Digest<Root>, MalformedDefinition> {
        merkle::compute_root(self.signed_data, &self.proof)
    }

    /// Authenticate the definition as a record of `expected` type.
    ///
    /// Checks run cheapest first: format tag, type, data version, then the
    /// Merkle root and its signature.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`DefinitionError`].
    pub fn verify(
        self,
        expected: DefinitionType,
        trust: &TrustAnchor,
    ) -> Result<VerifiedDefinition<'a>, DefinitionError> {
        FormatVersion::try_from(&self.format_tag)?;

        if self.type_tag != expected.tag() {
            return Err(DefinitionError::TypeMismatch {
                expected,
                found: self.type_tag,
            });
        }

        if self.data_version < MIN_DATA_VERSION {
            return Err(DefinitionError::Outdated {
                data_version: self.data_version,
                min: MIN_DATA_VERSION,
            });
        }

        let root = self.compute_root()?;
        if !trust.verify_any(&root, &self.signature) {
            tracing::warn!("Rejected {} definition: no trusted key signed root {}", expected, root);
            return Err(DefinitionError::InvalidSignature);
        }

        Ok(VerifiedDefinition {
            parsed: self,
            definition_type: expected,
        })
    }
}

/// A definition whose signature has been verified.
///
/// Only [`ParsedDefinition::verify`] constructs this, so holding one proves
/// the payload was issued under a trusted key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedDefinition<'a> {
    parsed: ParsedDefinition<'a>,
    definition_type: DefinitionType,
}

impl<'a> VerifiedDefinition<'a> {
    /// The verified definition type.
    #[must_use]
    pub const fn definition_type(&self) -> DefinitionType {
        self.definition_type
    }

    /// Release number of the signed definition set.
    #[must_use]
    pub const fn data_version(&self) -> u32 {
        self.parsed.data_version
    }

    /// The authenticated payload bytes.
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] {
        self.parsed.payload
    }

    /// Access the underlying parsed definition.
    #[must_use]
    pub const fn parsed(&self) -> &ParsedDefinition<'a> {
        &self.parsed
    }

    /// Decode the payload into its typed record.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::TypeMismatch`] if `T` is not the verified
    /// type, or [`DefinitionError::Schema`] if the payload does not decode.
    pub fn decode<T: DefinitionPayload>(&self) -> Result<T, DefinitionError> {
        if T::DEFINITION_TYPE != self.definition_type {
            return Err(DefinitionError::TypeMismatch {
                expected: T::DEFINITION_TYPE,
                found: self.definition_type.tag(),
            });
        }
        Ok(T::decode_payload(self.parsed.payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::{DefinitionBuilder, sign_batch},
        codec::{ReadingType, encode},
        info::NetworkInfo,
        test_utils::{PRODUCTION_SEED, arbitrum, ethereum, signed_blob, signing_key, trust_anchor, usdt},
    };
    use alloc::vec;
    use testresult::TestResult;

    fn network_blob() -> Vec<u8> {
        signed_blob(&ethereum(), PRODUCTION_SEED)
    }

    mod parse {
        use super::*;

        #[test]
        fn reads_every_field() -> TestResult {
            let payload = vec![0xAA; 10];
            let builder = DefinitionBuilder::new(DefinitionType::Token, 7, payload.clone())?;
            let proof = [Digest::from_bytes([1; 32]), Digest::from_bytes([2; 32])];
            let blob = builder.finish(&proof, &[9; SIGNATURE_SIZE])?;

            let parsed = ParsedDefinition::parse(&blob)?;
            assert_eq!(parsed.format_version(), FORMAT_VERSION.as_bytes());
            assert_eq!(parsed.definition_type(), Some(DefinitionType::Token));
            assert_eq!(parsed.data_version(), 7);
            assert_eq!(parsed.payload_len(), 10);
            assert_eq!(parsed.signed_data(), &blob[..HEADER_SIZE + 10]);
            assert_eq!(parsed.proof(), &proof);
            assert_eq!(parsed.signature(), &[9; SIGNATURE_SIZE]);
            Ok(())
        }

        #[test]
        fn every_truncation_is_malformed() {
            let blob = network_blob();
            for len in 0..blob.len() {
                assert!(
                    matches!(
                        ParsedDefinition::parse(&blob[..len]),
                        Err(MalformedDefinition::BufferTooShort { .. })
                    ),
                    "truncated to {len}"
                );
            }
        }

        #[test]
        fn payload_length_past_end_is_malformed() {
            let mut blob = Vec::new();
            encode::array(&FormatVersion::padded(), &mut blob);
            encode::u8(DefinitionType::Network.tag(), &mut blob);
            encode::u32(1, &mut blob);
            encode::u16(u16::MAX, &mut blob);
            blob.extend_from_slice(&[0; 100]);

            assert_eq!(
                ParsedDefinition::parse(&blob),
                Err(MalformedDefinition::BufferTooShort {
                    reading: ReadingType::Slice { len: usize::from(u16::MAX) },
                    offset: HEADER_SIZE,
                    need: usize::from(u16::MAX),
                    have: 100,
                })
            );
        }

        #[test]
        fn oversized_proof_count_is_rejected_before_reading_hashes() -> TestResult {
            let builder = DefinitionBuilder::new(DefinitionType::Network, 1, vec![1, 2, 3])?;
            let mut blob = builder.signed_data();
            encode::u8(33, &mut blob);

            assert_eq!(
                ParsedDefinition::parse(&blob),
                Err(MalformedDefinition::ProofTooLong { count: 33, max: MAX_PROOF_LEN })
            );
            Ok(())
        }

        #[test]
        fn trailing_bytes_are_rejected() {
            let mut blob = network_blob();
            blob.push(0);
            assert_eq!(
                ParsedDefinition::parse(&blob),
                Err(MalformedDefinition::TrailingBytes { extra: 1 })
            );
        }
    }

    mod verify {
        use super::*;

        fn verify_blob(blob: &[u8], expected: DefinitionType) -> Result<(), DefinitionError> {
            ParsedDefinition::parse(blob)?
                .verify(expected, &trust_anchor())
                .map(|_| ())
        }

        #[test]
        fn accepts_production_signed_network() -> TestResult {
            let blob = network_blob();
            let verified = ParsedDefinition::parse(&blob)?.verify(DefinitionType::Network, &trust_anchor())?;
            assert_eq!(verified.decode::<NetworkInfo>()?, ethereum());
            Ok(())
        }

        #[test]
        fn rejects_unknown_format() {
            let mut blob = network_blob();
            blob[5] = b'x';
            assert!(matches!(
                verify_blob(&blob, DefinitionType::Network),
                Err(DefinitionError::UnsupportedFormatVersion(_))
            ));
        }

        #[test]
        fn rejects_wrong_type() {
            assert_eq!(
                verify_blob(&network_blob(), DefinitionType::Token),
                Err(DefinitionError::TypeMismatch {
                    expected: DefinitionType::Token,
                    found: DefinitionType::Network.tag(),
                })
            );
        }

        #[test]
        fn data_version_boundary() -> TestResult {
            let key = signing_key(PRODUCTION_SEED);

            let outdated = DefinitionBuilder::for_record(MIN_DATA_VERSION - 1, &ethereum())?.sign_single(&key);
            assert_eq!(
                verify_blob(&outdated, DefinitionType::Network),
                Err(DefinitionError::Outdated {
                    data_version: MIN_DATA_VERSION - 1,
                    min: MIN_DATA_VERSION,
                })
            );

            let current = DefinitionBuilder::for_record(MIN_DATA_VERSION, &ethereum())?.sign_single(&key);
            assert_eq!(verify_blob(&current, DefinitionType::Network), Ok(()));
            Ok(())
        }

        /// Flip the low bit of every byte after the header; each copy must be refused.
        ///
        /// Flipping the proof count makes it declare hashes that are not
        /// there, so that byte is refused as malformed instead.
        fn assert_every_flip_rejected(blob: &[u8], expected: DefinitionType) -> TestResult {
            let count_index = HEADER_SIZE + ParsedDefinition::parse(blob)?.payload_len();
            for index in HEADER_SIZE..blob.len() {
                let mut tampered = blob.to_vec();
                tampered[index] ^= 0x01;
                if index == count_index {
                    assert!(
                        matches!(verify_blob(&tampered, expected), Err(DefinitionError::Malformed(_))),
                        "flipped proof count"
                    );
                } else {
                    assert_eq!(
                        verify_blob(&tampered, expected),
                        Err(DefinitionError::InvalidSignature),
                        "flipped byte {index}"
                    );
                }
            }
            Ok(())
        }

        #[test]
        fn any_flipped_byte_breaks_the_signature() -> TestResult {
            assert_every_flip_rejected(&network_blob(), DefinitionType::Network)
        }

        #[test]
        fn any_flipped_proof_byte_breaks_the_signature() -> TestResult {
            let builders = [
                DefinitionBuilder::for_record(1, &ethereum())?,
                DefinitionBuilder::for_record(1, &arbitrum())?,
                DefinitionBuilder::for_record(1, &usdt())?,
            ];
            let blobs = sign_batch(&builders, &signing_key(PRODUCTION_SEED))?;
            assert_eq!(ParsedDefinition::parse(&blobs[0])?.proof().len(), 2);

            assert_every_flip_rejected(&blobs[0], DefinitionType::Network)
        }

        #[test]
        fn decode_checks_requested_record_type() -> TestResult {
            let blob = network_blob();
            let verified = ParsedDefinition::parse(&blob)?.verify(DefinitionType::Network, &trust_anchor())?;
            assert!(matches!(
                verified.decode::<crate::info::TokenInfo>(),
                Err(DefinitionError::TypeMismatch { .. })
            ));
            Ok(())
        }
    }
}
