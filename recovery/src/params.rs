//! Fixed protocol parameters.

/// Largest guardian set a wallet may name.
pub const MAX_GUARDIANS: usize = 5;

/// Delay between initiation and the earliest possible finalization, during
/// which the current owner may cancel (24 hours).
pub const CHALLENGE_PERIOD_SECS: u64 = 24 * 60 * 60;

/// Threshold suggested to new wallets by front ends. Not enforced.
pub const DEFAULT_THRESHOLD: u8 = 2;
