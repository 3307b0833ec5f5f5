//! LMDB storage backend for guardian-gate.
//!
//! Implements the `gate-store` traits using the `heed` LMDB bindings. LMDB
//! admits one write transaction at a time, which gives every wallet update the
//! per-record serializability the store contract requires.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod wallet;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
pub use wallet::LmdbWalletStore;
