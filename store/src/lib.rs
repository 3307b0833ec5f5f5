//! Abstract storage traits for guardian-gate.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod wallet;

pub use error::StoreError;
pub use wallet::WalletStore;
