//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the ledger (clock, storage, vault execution)
//! sits behind a trait. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! All of them are `Send + Sync`, so tests can drive one ledger from many threads.

pub mod clock;
pub mod store;
pub mod vault;

pub use clock::NullClock;
pub use store::NullWalletStore;
pub use vault::NullVaultExecutor;
