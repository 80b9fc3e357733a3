//! Run the resolver over supplied blobs.

use std::path::PathBuf;

use definitions_core::{Address, BuiltinTable, DefinitionResolver, Definitions};
use eyre::{Result, WrapErr};

use crate::{
    key::{TrustArgs, load_trust_anchor},
    verify::{print_network, print_token},
};

/// Arguments for the resolve command.
#[derive(Debug, clap::Parser)]
pub(crate) struct ResolveArgs {
    /// Signed network definition
    #[arg(long)]
    pub(crate) network: Option<PathBuf>,

    /// Signed token definition
    #[arg(long)]
    pub(crate) token: Option<PathBuf>,

    /// Chain the request targets
    #[arg(long)]
    pub(crate) chain_id: Option<u64>,

    /// Recipient (token contract) address
    #[arg(long)]
    pub(crate) to: Option<String>,

    #[command(flatten)]
    pub(crate) trust: TrustArgs,
}

/// Run the resolve command.
pub(crate) fn run(args: &ResolveArgs) -> Result<()> {
    let trust = load_trust_anchor(&args.trust)?;
    let resolver = DefinitionResolver::new(&trust, BuiltinTable::compiled());

    let network = args.network.as_deref().map(crate::blob::read).transpose()?;
    let token = args.token.as_deref().map(crate::blob::read).transpose()?;
    let to = args
        .to
        .as_deref()
        .map(str::parse::<Address>)
        .transpose()
        .wrap_err("invalid --to address")?;

    let defs = Definitions::new(
        &resolver,
        network.as_deref(),
        token.as_deref(),
        args.chain_id,
        to.as_ref(),
    )?;

    match defs.network() {
        Some(network) => print_network(network),
        None => println!("network:  unresolved"),
    }
    let mut tokens = defs.tokens().peekable();
    if tokens.peek().is_none() {
        if let Some(address) = &to {
            println!();
            print_token(defs.get_token(address));
        }
    }
    for token in tokens {
        println!();
        print_token(token);
    }
    Ok(())
}
