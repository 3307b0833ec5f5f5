//! Deterministically derived record addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte address binding a persisted record to its owning identity and
/// a namespace tag. Produced by `gate_crypto::derive_record_address`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordAddress([u8; 32]);

impl RecordAddress {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordAddress({})", crate::identity::hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::identity::hex::encode(&self.0))
    }
}
