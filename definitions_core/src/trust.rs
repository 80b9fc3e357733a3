//! Keys authorized to sign definition roots.

use ed25519_dalek::{Signature, VerifyingKey};
use thiserror::Error;

use crate::{
    codec::SIGNATURE_SIZE,
    crypto::{digest::Digest, merkle::Root},
};

/// Compiled-in production signing key.
pub const PRODUCTION_PUBLIC_KEY: [u8; 32] = [
    0x43, 0x34, 0x99, 0x63, 0x43, 0x62, 0x3e, 0x46, 0x2f, 0x0f, 0xc9, 0x33, 0x11, 0xfe, 0xf1, 0x48,
    0x4c, 0xa2, 0x3d, 0x2f, 0xf1, 0xee, 0xc6, 0xdf, 0x1f, 0xa8, 0xeb, 0x7e, 0x35, 0x73, 0xb3, 0xdb,
];

/// Compiled-in development signing key.
///
/// The matching secret is the well-known seed `[0x41; 32]`, so anything it
/// signs must never be trusted outside of development builds.
#[cfg(feature = "dev_key")]
pub const DEVELOPMENT_PUBLIC_KEY: [u8; 32] = [
    0xdb, 0x99, 0x5f, 0xe2, 0x51, 0x69, 0xd1, 0x41, 0xca, 0xb9, 0xbb, 0xba, 0x92, 0xba, 0xa0, 0x1f,
    0x9f, 0x2e, 0x1e, 0xce, 0x7d, 0xf4, 0xcb, 0x2a, 0xc0, 0x51, 0x90, 0xf3, 0x7f, 0xcc, 0x1f, 0x9d,
];

/// Compiled-in key bytes are not a valid ed25519 point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("compiled-in trust key is not a valid ed25519 public key")]
pub struct InvalidTrustKey;

impl From<ed25519_dalek::SignatureError> for InvalidTrustKey {
    fn from(_: ed25519_dalek::SignatureError) -> Self {
        Self
    }
}

/// The set of keys whose signatures make a definition root trusted.
///
/// The production key is always present. The development key only exists
/// when the crate is built with the `dev_key` feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrustAnchor {
    production: VerifyingKey,

    #[cfg(feature = "dev_key")]
    development: Option<VerifyingKey>,
}

impl TrustAnchor {
    /// Trust only `production`.
    #[must_use]
    pub const fn new(production: VerifyingKey) -> Self {
        Self {
            production,
            #[cfg(feature = "dev_key")]
            development: None,
        }
    }

    /// The compiled-in key set.
    ///
    /// With `dev_key`, the compiled-in development key is attached as well.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTrustKey`] if a compiled-in key does not decode.
    pub fn builtin() -> Result<Self, InvalidTrustKey> {
        let anchor = Self::new(VerifyingKey::from_bytes(&PRODUCTION_PUBLIC_KEY)?);

        #[cfg(feature = "dev_key")]
        let anchor = anchor.with_development_key(VerifyingKey::from_bytes(&DEVELOPMENT_PUBLIC_KEY)?);

        Ok(anchor)
    }

    /// Also trust `development`.
    #[cfg(feature = "dev_key")]
    #[must_use]
    pub const fn with_development_key(mut self, development: VerifyingKey) -> Self {
        self.development = Some(development);
        self
    }

    /// The production key.
    #[must_use]
    pub const fn production(&self) -> &VerifyingKey {
        &self.production
    }

    /// The development key, if attached.
    #[cfg(feature = "dev_key")]
    #[must_use]
    pub const fn development(&self) -> Option<&VerifyingKey> {
        self.development.as_ref()
    }

    /// Whether any trusted key signed `root`.
    ///
    /// The production key is tried first. Signatures that are not exactly
    /// 64 bytes never verify.
    #[must_use]
    pub fn verify_any(&self, root: &Digest<Root>, signature: &[u8]) -> bool {
        let Ok(raw) = <[u8; SIGNATURE_SIZE]>::try_from(signature) else {
            return false;
        };
        let signature = Signature::from_bytes(&raw);
        let message = root.as_bytes().as_slice();

        if self.production.verify_strict(message, &signature).is_ok() {
            return true;
        }

        #[cfg(feature = "dev_key")]
        if let Some(development) = &self.development {
            if development.verify_strict(message, &signature).is_ok() {
                tracing::debug!("Root {} accepted under the development key", root);
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DEVELOPMENT_SEED, PRODUCTION_SEED, signing_key, trust_anchor};
    use ed25519_dalek::Signer;
    use testresult::TestResult;

    fn root() -> Digest<Root> {
        Digest::hash_bytes(b"some root")
    }

    #[test]
    fn builtin_keys_decode() -> TestResult {
        let anchor = TrustAnchor::builtin()?;
        assert_eq!(anchor.production().as_bytes(), &PRODUCTION_PUBLIC_KEY);
        Ok(())
    }

    #[test]
    fn production_signature_verifies() {
        let signature = signing_key(PRODUCTION_SEED).sign(root().as_bytes());
        assert!(trust_anchor().verify_any(&root(), &signature.to_bytes()));
    }

    #[test]
    fn signature_over_other_root_fails() {
        let signature = signing_key(PRODUCTION_SEED).sign(b"another root");
        assert!(!trust_anchor().verify_any(&root(), &signature.to_bytes()));
    }

    #[test]
    fn wrong_length_signature_fails() {
        let signature = signing_key(PRODUCTION_SEED).sign(root().as_bytes()).to_bytes();
        assert!(!trust_anchor().verify_any(&root(), &signature[..63]));
        assert!(!trust_anchor().verify_any(&root(), &[]));
    }

    #[cfg(not(feature = "dev_key"))]
    #[test]
    fn development_signature_is_rejected() {
        let signature = signing_key(DEVELOPMENT_SEED).sign(root().as_bytes());
        assert!(!trust_anchor().verify_any(&root(), &signature.to_bytes()));
    }

    #[cfg(feature = "dev_key")]
    mod dev_key {
        use super::*;

        #[test]
        fn compiled_development_key_matches_seed() -> TestResult {
            let anchor = TrustAnchor::builtin()?;
            assert_eq!(
                anchor.development(),
                Some(&signing_key(DEVELOPMENT_SEED).verifying_key())
            );
            Ok(())
        }

        #[test]
        fn development_signature_is_accepted_when_attached() {
            let dev = signing_key(DEVELOPMENT_SEED);
            let signature = dev.sign(root().as_bytes());
            assert!(!trust_anchor().verify_any(&root(), &signature.to_bytes()));

            let anchor = trust_anchor().with_development_key(dev.verifying_key());
            assert!(anchor.verify_any(&root(), &signature.to_bytes()));
        }
    }
}
