use gate_recovery::{RecoveryError, VaultError};
use gate_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl LedgerError {
    /// The recovery rejection behind this error, if it is one.
    pub fn recovery(&self) -> Option<&RecoveryError> {
        match self {
            Self::Recovery(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the caller should poll and retry rather than give up.
    pub fn is_timing(&self) -> bool {
        self.recovery().is_some_and(RecoveryError::is_timing)
    }
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(address) => Self::WalletNotFound(address),
            // A concurrent initialize won the race for this address.
            StoreError::Duplicate(_) => Self::Recovery(RecoveryError::AlreadyInitialized),
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_domain_errors() {
        assert!(matches!(
            LedgerError::from(StoreError::NotFound("ab".into())),
            LedgerError::WalletNotFound(a) if a == "ab"
        ));
        assert!(matches!(
            LedgerError::from(StoreError::Duplicate("ab".into())),
            LedgerError::Recovery(RecoveryError::AlreadyInitialized)
        ));
        assert!(matches!(
            LedgerError::from(StoreError::Backend("disk".into())),
            LedgerError::Storage(_)
        ));
    }

    #[test]
    fn timing_passes_through() {
        let e = LedgerError::from(RecoveryError::ChallengePeriodNotExpired { remaining_secs: 60 });
        assert!(e.is_timing());
        assert!(!LedgerError::WalletNotFound("x".into()).is_timing());
        assert!(!LedgerError::Vault(VaultError::Empty).is_timing());
    }
}
