//! The in-flight recovery sub-record.

use gate_types::{Identity, Timestamp};
use serde::{Deserialize, Serialize};

/// Whether a wallet has a recovery in progress.
///
/// There is no expired or failed phase: an active recovery stays active until
/// it is cancelled or finalized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryPhase {
    #[default]
    Idle,
    Active(RecoveryState),
}

impl RecoveryPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn active(&self) -> Option<&RecoveryState> {
        match self {
            Self::Active(state) => Some(state),
            Self::Idle => None,
        }
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut RecoveryState> {
        match self {
            Self::Active(state) => Some(state),
            Self::Idle => None,
        }
    }
}

/// A recovery proposal and the guardian approvals collected for it.
///
/// `proposed_owner` and `started_at` are fixed for the life of the proposal;
/// only `approvals` grows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryState {
    proposed_owner: Identity,
    /// Guardians who approved, in approval order, without duplicates.
    approvals: Vec<Identity>,
    started_at: Timestamp,
}

impl RecoveryState {
    /// The initiating guardian counts as the first approval.
    pub(crate) fn new(initiator: Identity, proposed_owner: Identity, now: Timestamp) -> Self {
        Self {
            proposed_owner,
            approvals: vec![initiator],
            started_at: now,
        }
    }

    pub fn proposed_owner(&self) -> &Identity {
        &self.proposed_owner
    }

    pub fn approvals(&self) -> &[Identity] {
        &self.approvals
    }

    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    pub fn has_approved(&self, guardian: &Identity) -> bool {
        self.approvals.contains(guardian)
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub(crate) fn record_approval(&mut self, guardian: Identity) {
        self.approvals.push(guardian);
    }
}
