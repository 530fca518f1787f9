use tracing::debug;

use crate::error::{Error, Result};
use crate::types::KeyInfo;

/// Line separating the keyring header block from the key entries in
/// `gpg --list-public-keys` output.
const HEADER_SEPARATOR: &str = "--------------------------------";

/// Parses the human-readable output of `gpg --list-public-keys`.
///
/// Everything up to and including the header separator is discarded; the
/// remaining non-blank lines come in groups of four per key (info line,
/// fingerprint, identity, subkey). A listing without the separator yields
/// an empty list. A trailing group of fewer than four lines is an error.
pub fn parse_key_listing(output: &str) -> Result<Vec<KeyInfo>> {
    let mut lines = output.lines().filter(|line| !line.trim().is_empty());

    if !lines.any(|line| line == HEADER_SEPARATOR) {
        debug!("no header separator in listing output, treating as empty keyring");
        return Ok(Vec::new());
    }

    let entries: Vec<&str> = lines.collect();
    let trailing = entries.len() % 4;
    if trailing != 0 {
        return Err(Error::TruncatedListing { trailing });
    }

    Ok(entries
        .chunks_exact(4)
        .map(|group| {
            KeyInfo::new(
                group[0].trim(),
                group[1].trim(),
                group[2].trim(),
                group[3].trim(),
            )
        })
        .collect())
}
