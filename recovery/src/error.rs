use gate_types::Identity;
use thiserror::Error;

/// Rejections produced by the recovery state machine.
///
/// Every failed operation leaves the record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    // Input validation
    #[error("guardian count {0} is outside 1..={max}", max = crate::MAX_GUARDIANS)]
    InvalidGuardianCount(usize),

    #[error("guardian {0} is listed more than once")]
    DuplicateGuardian(Identity),

    #[error("the owner cannot be one of its own guardians")]
    OwnerCannotBeGuardian,

    #[error("threshold {threshold} must be between 1 and the guardian count {guardians}")]
    InvalidThreshold { threshold: u8, guardians: usize },

    #[error("proposed owner {0} is the current owner or a guardian")]
    InvalidProposedOwner(Identity),

    // Authorization
    #[error("{0} is not a guardian of this wallet")]
    NotAGuardian(Identity),

    #[error("{0} is not the owner of this wallet")]
    Unauthorized(Identity),

    // State conflicts
    #[error("a wallet is already initialized for this owner")]
    AlreadyInitialized,

    #[error("a recovery is already in progress")]
    RecoveryAlreadyActive,

    #[error("no recovery is in progress")]
    NoActiveRecovery,

    #[error("guardian {0} has already approved this recovery")]
    DuplicateApproval(Identity),

    // Timing
    #[error("not enough guardian approvals: {have} < {need}")]
    ThresholdNotMet { have: usize, need: u8 },

    #[error("challenge period has not expired: {remaining_secs}s remaining")]
    ChallengePeriodNotExpired { remaining_secs: u64 },
}

/// Broad class of a [`RecoveryError`], telling the caller how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request; a caller bug. Do not retry.
    InputValidation,
    /// Caller lacks standing for the action.
    Authorization,
    /// Caller acted on a stale view; re-read status before resubmitting.
    StateConflict,
    /// Expected during normal operation; poll and retry later.
    Timing,
}

impl RecoveryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGuardianCount(_)
            | Self::DuplicateGuardian(_)
            | Self::OwnerCannotBeGuardian
            | Self::InvalidThreshold { .. }
            | Self::InvalidProposedOwner(_) => ErrorKind::InputValidation,
            Self::NotAGuardian(_) | Self::Unauthorized(_) => ErrorKind::Authorization,
            Self::AlreadyInitialized
            | Self::RecoveryAlreadyActive
            | Self::NoActiveRecovery
            | Self::DuplicateApproval(_) => ErrorKind::StateConflict,
            Self::ThresholdNotMet { .. } | Self::ChallengePeriodNotExpired { .. } => {
                ErrorKind::Timing
            }
        }
    }

    /// Whether the same request may succeed later without any other change.
    pub fn is_timing(&self) -> bool {
        self.kind() == ErrorKind::Timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_errors_are_distinguishable() {
        assert!(RecoveryError::ThresholdNotMet { have: 1, need: 2 }.is_timing());
        assert!(RecoveryError::ChallengePeriodNotExpired { remaining_secs: 5 }.is_timing());
        assert!(!RecoveryError::NoActiveRecovery.is_timing());
        assert!(!RecoveryError::Unauthorized(Identity::new([1; 32])).is_timing());
    }

    #[test]
    fn kinds_follow_taxonomy() {
        let g = Identity::new([1; 32]);
        assert_eq!(RecoveryError::InvalidGuardianCount(0).kind(), ErrorKind::InputValidation);
        assert_eq!(RecoveryError::OwnerCannotBeGuardian.kind(), ErrorKind::InputValidation);
        assert_eq!(RecoveryError::NotAGuardian(g).kind(), ErrorKind::Authorization);
        assert_eq!(RecoveryError::DuplicateApproval(g).kind(), ErrorKind::StateConflict);
        assert_eq!(RecoveryError::AlreadyInitialized.kind(), ErrorKind::StateConflict);
    }

    #[test]
    fn messages_carry_details() {
        let err = RecoveryError::ThresholdNotMet { have: 1, need: 3 };
        assert_eq!(err.to_string(), "not enough guardian approvals: 1 < 3");
        assert_eq!(
            RecoveryError::InvalidGuardianCount(6).to_string(),
            "guardian count 6 is outside 1..=5"
        );
    }
}
