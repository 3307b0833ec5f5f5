//! Fundamental types for guardian-gate.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! principal identities, derived record addresses, timestamps and the clock
//! abstraction, and raw key material.

pub mod address;
pub mod identity;
pub mod keys;
pub mod time;

pub use address::RecordAddress;
pub use identity::Identity;
pub use keys::{KeyPair, PrivateKey};
pub use time::{Clock, SystemClock, Timestamp};
