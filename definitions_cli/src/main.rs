//! Command line tool for definition blobs.

mod blob;
mod build;
mod inspect;
mod key;
mod resolve;
mod verify;

use clap::{Parser, Subcommand};
use eyre::{Result, eyre};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Arguments::parse();
    match args.command {
        Command::Inspect(args) => inspect::run(&args),
        Command::Verify(args) => verify::run(&args),
        Command::Build(args) => build::run(&args),
        Command::Resolve(args) => resolve::run(&args),
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Inspect, verify, build and resolve signed definitions")]
struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a blob and print its fields without checking the signature
    Inspect(inspect::InspectArgs),

    /// Fully verify a blob and print the record it carries
    Verify(verify::VerifyArgs),

    /// Encode and sign a single definition
    Build(build::BuildArgs),

    /// Resolve network and token definitions the way a device would
    Resolve(resolve::ResolveArgs),
}

/// Parse 64 hex characters into 32 bytes.
pub(crate) fn parse_32_bytes(hex_str: &str, what: &str) -> Result<[u8; 32]> {
    let hex_str = hex_str.trim();
    if hex_str.len() != 64 {
        return Err(eyre!(
            "{what} must be 64 hex characters, got {}",
            hex_str.len()
        ));
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut bytes).map_err(|e| eyre!("invalid {what}: {e}"))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn parses_32_byte_hex() -> testresult::TestResult {
        let bytes = parse_32_bytes(&"41".repeat(32), "key")?;
        assert_eq!(bytes, [0x41; 32]);
        assert!(parse_32_bytes("41", "key").is_err());
        assert!(parse_32_bytes(&"zz".repeat(32), "key").is_err());
        Ok(())
    }
}
