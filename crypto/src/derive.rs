//! Record-address derivation.
//!
//! `address = Blake2b-256(PROGRAM_DOMAIN || len(tag) || tag || owner)`
//!
//! The tag is length-prefixed so no `(tag, owner)` pair can encode to the same
//! preimage as another. A wallet config and its vault share an owner but use
//! different tags, so they are always paired 1:1 and never collide.

use gate_types::{Identity, RecordAddress};

use crate::blake2b_256_multi;

/// Domain separator for every address derived by this program.
const PROGRAM_DOMAIN: &[u8] = b"guardian-gate/v1";

/// Namespace tag for `WalletConfig` records.
pub const WALLET_CONFIG_SEED: &[u8] = b"wallet_config";

/// Namespace tag for vault accounts.
pub const VAULT_SEED: &[u8] = b"vault";

/// Derive the address of the record stored under `tag` for `owner`.
pub fn derive_record_address(tag: &[u8], owner: &Identity) -> RecordAddress {
    let tag_len = (tag.len() as u32).to_le_bytes();
    RecordAddress::new(blake2b_256_multi(&[
        PROGRAM_DOMAIN,
        &tag_len,
        tag,
        owner.as_bytes(),
    ]))
}

/// Address of the wallet config owned (at initialization) by `owner`.
pub fn wallet_config_address(owner: &Identity) -> RecordAddress {
    derive_record_address(WALLET_CONFIG_SEED, owner)
}

/// Address of the vault bound to `owner`'s wallet config.
pub fn vault_address(owner: &Identity) -> RecordAddress {
    derive_record_address(VAULT_SEED, owner)
}
