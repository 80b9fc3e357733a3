//! Print the structure of a blob.

use std::path::PathBuf;

use definitions_core::ParsedDefinition;
use eyre::Result;

/// Arguments for the inspect command.
#[derive(Debug, clap::Parser)]
pub(crate) struct InspectArgs {
    /// Blob file, raw or hex
    pub(crate) file: PathBuf,
}

/// Run the inspect command.
pub(crate) fn run(args: &InspectArgs) -> Result<()> {
    let blob = crate::blob::read(&args.file)?;
    let parsed = ParsedDefinition::parse(&blob)?;

    println!("format:       {}", String::from_utf8_lossy(parsed.format_version()));
    match parsed.definition_type() {
        Some(ty) => println!("type:         {ty}"),
        None => println!("type:         unknown ({:#04x})", parsed.type_tag()),
    }
    println!("data version: {}", parsed.data_version());
    println!("payload:      {} bytes", parsed.payload_len());
    println!("proof:        {} hashes", parsed.proof().len());
    for hash in parsed.proof() {
        println!("  {hash}");
    }
    println!("root:         {}", parsed.compute_root()?);
    println!("signature:    {}", hex::encode(parsed.signature()));
    Ok(())
}
