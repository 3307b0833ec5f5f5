//! Raw key material.

use crate::Identity;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte Ed25519 private key (seed).
///
/// Does not implement `Debug`, `Serialize`, or `Clone`; bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// An Ed25519 key pair. The public half is the principal's [`Identity`].
///
/// Use `gate_crypto::generate_keypair()` or `gate_crypto::keypair_from_seed()`
/// to construct key pairs.
pub struct KeyPair {
    pub identity: Identity,
    pub private: PrivateKey,
}
