//! Reading and writing blob files.
//!
//! Blobs are stored raw. Files holding a single hex string are accepted as
//! well, since that is how blobs are usually pasted around.

use std::{fs, path::Path};

use eyre::{Result, WrapErr};

/// Read a blob, decoding it if the file is hex text.
pub(crate) fn read(path: &Path) -> Result<Vec<u8>> {
    let contents = fs::read(path).wrap_err_with(|| format!("Failed to read blob: {}", path.display()))?;
    Ok(decode_contents(contents))
}

fn decode_contents(contents: Vec<u8>) -> Vec<u8> {
    let text = String::from_utf8_lossy(&contents);
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    if !trimmed.is_empty() && trimmed.len() % 2 == 0 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        if let Ok(decoded) = hex::decode(trimmed) {
            return decoded;
        }
    }
    contents
}

/// Write a blob raw to `path`, or as hex to stdout.
pub(crate) fn write(blob: &[u8], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, blob).wrap_err_with(|| format!("Failed to write blob: {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", blob.len(), path.display());
        }
        None => println!("{}", hex::encode(blob)),
    }
    Ok(())
}
