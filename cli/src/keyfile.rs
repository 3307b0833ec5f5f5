//! Key files and identity arguments.
//!
//! A key file holds one hex-encoded 32-byte Ed25519 seed. The loaded key is
//! the caller identity for every operation that needs one.

use anyhow::{bail, Context};
use gate_crypto::{decode_identity, keypair_from_seed};
use gate_types::{Identity, KeyPair};
use std::io::Write;
use std::path::Path;

pub fn read_key_file(path: &Path) -> anyhow::Result<KeyPair> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read key file {}", path.display()))?;
    let bytes = hex::decode(text.trim())
        .with_context(|| format!("key file {} is not hex", path.display()))?;
    let seed: [u8; 32] = match bytes.try_into() {
        Ok(seed) => seed,
        Err(bytes) => bail!(
            "key file {} holds {} bytes, expected 32",
            path.display(),
            bytes.len()
        ),
    };
    Ok(keypair_from_seed(&seed))
}

/// Write `keypair`'s seed to a new file. Never overwrites.
pub fn write_key_file(path: &Path, keypair: &KeyPair) -> anyhow::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("failed to create key file {}", path.display()))?;
    writeln!(file, "{}", hex::encode(keypair.private.0))?;
    Ok(())
}

/// Parse an identity given as `gg_…` text or 64 hex characters.
pub fn parse_identity(s: &str) -> Result<Identity, String> {
    decode_identity(s)
        .or_else(|| Identity::from_hex(s))
        .ok_or_else(|| format!("'{s}' is not a valid identity"))
}
