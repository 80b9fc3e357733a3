//! Verify a blob and print its record.

use std::path::PathBuf;

use definitions_core::{DefinitionRecord, DefinitionType, NetworkInfo, TokenInfo, decode_definition};
use eyre::Result;

use crate::key::{TrustArgs, load_trust_anchor};

/// Definition type as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Kind {
    Network,
    Token,
}

impl From<Kind> for DefinitionType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Network => Self::Network,
            Kind::Token => Self::Token,
        }
    }
}

/// Arguments for the verify command.
#[derive(Debug, clap::Parser)]
pub(crate) struct VerifyArgs {
    /// Blob file, raw or hex
    pub(crate) file: PathBuf,

    /// Expected definition type
    #[arg(long = "type", value_enum)]
    pub(crate) kind: Kind,

    #[command(flatten)]
    pub(crate) trust: TrustArgs,
}

/// Run the verify command.
pub(crate) fn run(args: &VerifyArgs) -> Result<()> {
    let trust = load_trust_anchor(&args.trust)?;
    let blob = crate::blob::read(&args.file)?;

    match decode_definition(&blob, args.kind.into(), &trust)? {
        DefinitionRecord::Network(network) => print_network(&network),
        DefinitionRecord::Token(token) => print_token(&token),
    }
    Ok(())
}

pub(crate) fn print_network(network: &NetworkInfo) {
    println!("network:  {}", network.name());
    println!("chain id: {}", network.chain_id());
    println!("symbol:   {}", network.symbol());
    println!("slip44:   {}", network.slip44());
}

pub(crate) fn print_token(token: &TokenInfo) {
    println!("token:    {}", token.name());
    println!("address:  {}", token.address());
    println!("chain id: {}", token.chain_id());
    println!("symbol:   {}", token.symbol());
    println!("decimals: {}", token.decimals());
}
