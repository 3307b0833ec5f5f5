//! The status reader — read-only recovery progress for display.

use gate_types::{Identity, Timestamp};
use serde::{Deserialize, Serialize};

use crate::params::CHALLENGE_PERIOD_SECS;
use crate::wallet::WalletConfig;

/// Snapshot of a wallet's recovery progress at a given time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryStatus {
    pub active: bool,
    pub proposed_owner: Option<Identity>,
    /// Approving guardians in approval order.
    pub approvals: Vec<Identity>,
    pub approvals_count: usize,
    pub threshold: u8,
    /// Seconds until the challenge period ends; zero when idle or expired.
    pub time_remaining: u64,
}

impl RecoveryStatus {
    /// Derive the status of `wallet` as of `now`. Never mutates.
    pub fn read(wallet: &WalletConfig, now: Timestamp) -> Self {
        match wallet.recovery().active() {
            Some(state) => Self {
                active: true,
                proposed_owner: Some(*state.proposed_owner()),
                approvals: state.approvals().to_vec(),
                approvals_count: state.approval_count(),
                threshold: wallet.threshold(),
                time_remaining: state.started_at().remaining(CHALLENGE_PERIOD_SECS, now),
            },
            None => Self {
                active: false,
                proposed_owner: None,
                approvals: Vec::new(),
                approvals_count: 0,
                threshold: wallet.threshold(),
                time_remaining: 0,
            },
        }
    }

    pub fn threshold_met(&self) -> bool {
        self.active && self.approvals_count >= self.threshold as usize
    }

    /// Whether a finalize submitted now would succeed.
    pub fn ready_to_finalize(&self) -> bool {
        self.threshold_met() && self.time_remaining == 0
    }

    /// One-line progress summary, e.g. `1/2 guardians approved • 24 hours remaining`.
    pub fn progress_line(&self) -> String {
        if !self.active {
            return "No active recovery".to_string();
        }
        format_recovery_progress(self.approvals_count, self.threshold, self.time_remaining)
    }
}

/// Render approval progress and the challenge countdown (hours rounded up).
pub fn format_recovery_progress(approvals: usize, threshold: u8, time_remaining: u64) -> String {
    let time_text = if time_remaining > 0 {
        format!("{} hours remaining", time_remaining.div_ceil(3600))
    } else {
        "Ready to finalize".to_string()
    };
    format!("{approvals}/{threshold} guardians approved • {time_text}")
}
