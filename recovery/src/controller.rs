//! The recovery controller — the five state-changing operations.
//!
//! Each operation validates every precondition before touching the record, so
//! a rejected call never leaves a partial write behind. Callers are expected to
//! run each call against a freshly loaded record and persist the result as one
//! atomic step.

use gate_types::{Identity, Timestamp};

use crate::error::RecoveryError;
use crate::params::CHALLENGE_PERIOD_SECS;
use crate::state::{RecoveryPhase, RecoveryState};
use crate::vault::VaultRef;
use crate::wallet::WalletConfig;

/// Outcome of a successful finalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalizedRecovery {
    pub previous_owner: Identity,
    pub new_owner: Identity,
    /// Guardians whose approvals carried the recovery.
    pub approvals: Vec<Identity>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RecoveryController;

impl RecoveryController {
    /// Create a wallet config for `owner`, bound to `vault`.
    pub fn initialize_wallet(
        &self,
        owner: Identity,
        guardians: Vec<Identity>,
        threshold: u8,
        vault: VaultRef,
        now: Timestamp,
    ) -> Result<WalletConfig, RecoveryError> {
        WalletConfig::new(owner, guardians, threshold, vault, now)
    }

    /// Open a recovery proposing `proposed_owner`. The initiating guardian's
    /// approval is recorded immediately.
    pub fn initiate_recovery(
        &self,
        wallet: &mut WalletConfig,
        caller: &Identity,
        proposed_owner: Identity,
        now: Timestamp,
    ) -> Result<(), RecoveryError> {
        if !wallet.is_guardian(caller) {
            return Err(RecoveryError::NotAGuardian(*caller));
        }
        if !wallet.recovery().is_idle() {
            return Err(RecoveryError::RecoveryAlreadyActive);
        }
        if wallet.is_owner(&proposed_owner) || wallet.is_guardian(&proposed_owner) {
            return Err(RecoveryError::InvalidProposedOwner(proposed_owner));
        }

        *wallet.recovery_mut() =
            RecoveryPhase::Active(RecoveryState::new(*caller, proposed_owner, now));
        wallet.touch(now);
        Ok(())
    }

    /// Add `caller`'s approval. Returns the new approval count.
    ///
    /// The challenge clock stays anchored to initiation.
    pub fn approve_recovery(
        &self,
        wallet: &mut WalletConfig,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<usize, RecoveryError> {
        let is_guardian = wallet.is_guardian(caller);
        let state = wallet
            .recovery_mut()
            .active_mut()
            .ok_or(RecoveryError::NoActiveRecovery)?;
        if !is_guardian {
            return Err(RecoveryError::NotAGuardian(*caller));
        }
        if state.has_approved(caller) {
            return Err(RecoveryError::DuplicateApproval(*caller));
        }

        state.record_approval(*caller);
        let count = state.approval_count();
        wallet.touch(now);
        Ok(count)
    }

    /// Abort the active recovery, discarding all approvals. Owner only.
    /// Returns the discarded proposal.
    pub fn cancel_recovery(
        &self,
        wallet: &mut WalletConfig,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<RecoveryState, RecoveryError> {
        if wallet.recovery().is_idle() {
            return Err(RecoveryError::NoActiveRecovery);
        }
        if !wallet.is_owner(caller) {
            return Err(RecoveryError::Unauthorized(*caller));
        }

        let discarded = match std::mem::take(wallet.recovery_mut()) {
            RecoveryPhase::Active(state) => state,
            RecoveryPhase::Idle => return Err(RecoveryError::NoActiveRecovery),
        };
        wallet.touch(now);
        Ok(discarded)
    }

    /// Transfer ownership to the proposed owner. Permissionless: anyone may
    /// call once the threshold is met and the challenge period has elapsed.
    ///
    /// Guardians and threshold carry over unchanged to the new owner.
    pub fn finalize_recovery(
        &self,
        wallet: &mut WalletConfig,
        now: Timestamp,
    ) -> Result<FinalizedRecovery, RecoveryError> {
        let state = wallet
            .recovery()
            .active()
            .ok_or(RecoveryError::NoActiveRecovery)?;
        if state.approval_count() < wallet.threshold() as usize {
            return Err(RecoveryError::ThresholdNotMet {
                have: state.approval_count(),
                need: wallet.threshold(),
            });
        }
        if !state.started_at().has_expired(CHALLENGE_PERIOD_SECS, now) {
            return Err(RecoveryError::ChallengePeriodNotExpired {
                remaining_secs: state.started_at().remaining(CHALLENGE_PERIOD_SECS, now),
            });
        }

        let state = match std::mem::take(wallet.recovery_mut()) {
            RecoveryPhase::Active(state) => state,
            RecoveryPhase::Idle => return Err(RecoveryError::NoActiveRecovery),
        };
        let previous_owner = *wallet.owner();
        wallet.set_owner(*state.proposed_owner());
        wallet.touch(now);

        Ok(FinalizedRecovery {
            previous_owner,
            new_owner: *state.proposed_owner(),
            approvals: state.approvals().to_vec(),
        })
    }

    /// Grant `caller` the vault's authority. Only the current owner may act
    /// through the vault, including while a recovery is pending.
    pub fn authorize_vault<'a>(
        &self,
        wallet: &'a WalletConfig,
        caller: &Identity,
    ) -> Result<&'a VaultRef, RecoveryError> {
        if !wallet.is_owner(caller) {
            return Err(RecoveryError::Unauthorized(*caller));
        }
        Ok(wallet.vault())
    }
}
