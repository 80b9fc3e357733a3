//! Trusted and signing key arguments.

use definitions_core::TrustAnchor;
use ed25519_dalek::{SigningKey, VerifyingKey};
use eyre::{Result, WrapErr};

/// Which keys to trust when verifying.
#[derive(Debug, clap::Args)]
pub(crate) struct TrustArgs {
    /// Public key (64 hex characters) to trust instead of the compiled-in keys
    #[arg(long, env = "DEFINITIONS_TRUSTED_KEY")]
    pub(crate) trusted_key: Option<String>,
}

/// Key used to sign new definitions.
#[derive(Debug, clap::Args)]
pub(crate) struct SigningArgs {
    /// Signing key seed (64 hex characters)
    #[arg(long, env = "DEFINITIONS_SIGNING_KEY", hide_env_values = true)]
    pub(crate) signing_key: String,
}

/// Build the trust anchor from the configured source.
pub(crate) fn load_trust_anchor(args: &TrustArgs) -> Result<TrustAnchor> {
    if let Some(hex_key) = &args.trusted_key {
        let bytes = crate::parse_32_bytes(hex_key, "trusted key")?;
        let key = VerifyingKey::from_bytes(&bytes).wrap_err("trusted key is not a valid ed25519 public key")?;
        tracing::info!("Trusting key {} from --trusted-key", hex::encode(key.as_bytes()));
        return Ok(TrustAnchor::new(key));
    }

    let anchor = TrustAnchor::builtin()?;
    tracing::debug!("Trusting compiled-in keys");
    Ok(anchor)
}

/// Load the signing key.
pub(crate) fn load_signing_key(args: &SigningArgs) -> Result<SigningKey> {
    let seed = crate::parse_32_bytes(&args.signing_key, "signing key")?;
    let key = SigningKey::from_bytes(&seed);
    tracing::info!("Signing with key {}", hex::encode(key.verifying_key().as_bytes()));
    Ok(key)
}
