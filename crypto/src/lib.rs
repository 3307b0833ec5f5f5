//! Cryptographic primitives for guardian-gate.
//!
//! - **Ed25519** key generation; a principal's identity is its public key
//! - **Blake2b** for hashing and record-address derivation
//! - Checksummed `gg_` text form for identities

pub mod address;
pub mod derive;
pub mod hash;
pub mod keys;

pub use address::{decode_identity, encode_identity, validate_identity};
pub use derive::{derive_record_address, vault_address, wallet_config_address, VAULT_SEED, WALLET_CONFIG_SEED};
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, identity_from_private, keypair_from_seed};
