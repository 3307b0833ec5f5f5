//! Guardian recovery for guardian-gate wallets.
//!
//! A wallet owner names up to five guardians and an approval threshold. If the
//! owner loses their key, a guardian initiates a recovery proposing a new
//! owner, further guardians approve, and once the threshold is met and the
//! 24-hour challenge period has elapsed anyone may finalize the transfer.
//! Until then the current owner can cancel.
//!
//! Lifecycle: Idle → Active (approvals accumulate) → Idle, via Cancel or Finalize.
//!
//! Everything here is pure: operations take the record and the current time
//! and either mutate the record or return a typed [`RecoveryError`]. Loading,
//! persisting and serializing access to records is the host's job.

pub mod controller;
pub mod error;
pub mod params;
pub mod state;
pub mod status;
pub mod vault;
pub mod wallet;

pub use controller::{FinalizedRecovery, RecoveryController};
pub use error::{ErrorKind, RecoveryError};
pub use params::{CHALLENGE_PERIOD_SECS, DEFAULT_THRESHOLD, MAX_GUARDIANS};
pub use state::{RecoveryPhase, RecoveryState};
pub use status::{format_recovery_progress, RecoveryStatus};
pub use vault::{VaultAccountMeta, VaultError, VaultExecutor, VaultInstruction, VaultRef};
pub use wallet::{GuardianSet, WalletConfig};
