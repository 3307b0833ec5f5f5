//! Ed25519 key generation.

use ed25519_dalek::SigningKey;
use gate_types::{Identity, KeyPair, PrivateKey};
use rand::rngs::OsRng;

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        identity: Identity::new(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the identity (public key) of a private key.
pub fn identity_from_private(private: &PrivateKey) -> Identity {
    let signing_key = SigningKey::from_bytes(&private.0);
    Identity::new(signing_key.verifying_key().to_bytes())
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let private = PrivateKey(*seed);
    let identity = identity_from_private(&private);
    KeyPair { identity, private }
}
