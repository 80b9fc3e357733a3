//! Encode and sign single definitions.
//!
//! Each blob is its own single-leaf tree, so the signature is over the leaf
//! hash. Intended for development and test fixtures.

use std::path::PathBuf;

use definitions_core::{Address, NetworkInfo, TokenInfo, builder::DefinitionBuilder, definition::MIN_DATA_VERSION};
use eyre::{Result, WrapErr};

use crate::key::{SigningArgs, load_signing_key};

/// Arguments for the build command.
#[derive(Debug, clap::Parser)]
pub(crate) struct BuildArgs {
    #[command(subcommand)]
    pub(crate) record: Record,
}

/// Record to encode.
#[derive(Debug, clap::Subcommand)]
pub(crate) enum Record {
    /// A network definition
    Network(NetworkArgs),

    /// A token definition
    Token(TokenArgs),
}

#[derive(Debug, clap::Args)]
pub(crate) struct NetworkArgs {
    #[arg(long)]
    pub(crate) chain_id: u64,

    #[arg(long)]
    pub(crate) symbol: String,

    /// SLIP-44 coin type
    #[arg(long)]
    pub(crate) slip44: u32,

    #[arg(long)]
    pub(crate) name: String,

    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub(crate) struct TokenArgs {
    /// Contract address (40 hex characters, optional 0x prefix)
    #[arg(long)]
    pub(crate) address: String,

    #[arg(long)]
    pub(crate) chain_id: u64,

    #[arg(long)]
    pub(crate) symbol: String,

    #[arg(long)]
    pub(crate) decimals: u32,

    #[arg(long)]
    pub(crate) name: String,

    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

/// Options shared by every record kind.
#[derive(Debug, clap::Args)]
pub(crate) struct OutputArgs {
    /// Data version of the release
    #[arg(long, default_value_t = MIN_DATA_VERSION)]
    pub(crate) data_version: u32,

    /// Write the raw blob here instead of printing hex
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) signing: SigningArgs,
}

impl Record {
    fn output(&self) -> &OutputArgs {
        match self {
            Self::Network(args) => &args.output,
            Self::Token(args) => &args.output,
        }
    }

    fn builder(&self) -> Result<DefinitionBuilder> {
        let builder = match self {
            Self::Network(args) => DefinitionBuilder::for_record(
                args.output.data_version,
                &NetworkInfo::new(args.chain_id, args.symbol.clone(), args.slip44, args.name.clone()),
            )?,
            Self::Token(args) => {
                let address: Address = args.address.parse().wrap_err("invalid token address")?;
                DefinitionBuilder::for_record(
                    args.output.data_version,
                    &TokenInfo::new(address, args.chain_id, args.symbol.clone(), args.decimals, args.name.clone()),
                )?
            }
        };
        Ok(builder)
    }
}

/// Run the build command.
pub(crate) fn run(args: &BuildArgs) -> Result<()> {
    let output = args.record.output();
    let key = load_signing_key(&output.signing)?;
    let builder = args.record.builder()?;
    let blob = builder.sign_single(&key);
    tracing::debug!("Built {} definition of {} bytes", builder.definition_type(), blob.len());
    crate::blob::write(&blob, output.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use definitions_core::{DefinitionType, TrustAnchor, decode_typed};
    use testresult::TestResult;

    fn token_args(address: &str) -> TokenArgs {
        TokenArgs {
            address: address.into(),
            chain_id: 42161,
            symbol: "ARB".into(),
            decimals: 18,
            name: "Arbitrum".into(),
            output: OutputArgs {
                data_version: 2,
                output: None,
                signing: SigningArgs {
                    signing_key: "41".repeat(32),
                },
            },
        }
    }

    #[test]
    fn built_token_verifies_under_signer() -> TestResult {
        let record = Record::Token(token_args("0x912ce59144191c1204e64559fe8253a0e49e6548"));
        let key = load_signing_key(&record.output().signing)?;
        let builder = record.builder()?;
        assert_eq!(builder.definition_type(), DefinitionType::Token);

        let blob = builder.sign_single(&key);
        let token: TokenInfo = decode_typed(&blob, &TrustAnchor::new(key.verifying_key()))?;
        assert_eq!(token.symbol(), "ARB");
        assert_eq!(token.chain_id(), 42161);
        Ok(())
    }

    #[test]
    fn bad_token_address_is_reported() {
        let record = Record::Token(token_args("0x1234"));
        assert!(record.builder().is_err());
    }
}
