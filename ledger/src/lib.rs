//! Store-backed guardian recovery.
//!
//! [`WalletLedger`] binds the pure recovery controller to a [`gate_store::WalletStore`]
//! and a trusted [`gate_types::Clock`]. Each entry point loads one wallet
//! record, runs one controller operation, and commits the result atomically.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::WalletLedger;
