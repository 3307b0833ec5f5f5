//! The durable per-owner wallet record.

use gate_types::{Identity, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::RecoveryError;
use crate::params::MAX_GUARDIANS;
use crate::state::RecoveryPhase;
use crate::vault::VaultRef;

/// An ordered set of 1..=[`MAX_GUARDIANS`] distinct guardian identities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianSet(Vec<Identity>);

impl GuardianSet {
    /// Validate size and distinctness. Order is preserved.
    pub fn new(guardians: Vec<Identity>) -> Result<Self, RecoveryError> {
        if guardians.is_empty() || guardians.len() > MAX_GUARDIANS {
            return Err(RecoveryError::InvalidGuardianCount(guardians.len()));
        }
        for (i, guardian) in guardians.iter().enumerate() {
            if guardians[..i].contains(guardian) {
                return Err(RecoveryError::DuplicateGuardian(*guardian));
            }
        }
        Ok(Self(guardians))
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.0.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Identity] {
        &self.0
    }
}

/// Configuration of one guarded wallet.
///
/// `guardians` and `threshold` are fixed at creation, so `1 <= threshold <=
/// guardians.len()` and `owner ∉ guardians` hold for the record's lifetime
/// (recoveries may not propose a guardian as the new owner).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Owner at initialization; the record is addressed under this identity.
    origin: Identity,
    owner: Identity,
    guardians: GuardianSet,
    threshold: u8,
    vault: VaultRef,
    recovery: RecoveryPhase,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl WalletConfig {
    /// Build a new, idle wallet config.
    ///
    /// Checks run in order: guardian count, owner among guardians, duplicate
    /// guardians, threshold range.
    pub fn new(
        owner: Identity,
        guardians: Vec<Identity>,
        threshold: u8,
        vault: VaultRef,
        now: Timestamp,
    ) -> Result<Self, RecoveryError> {
        if guardians.is_empty() || guardians.len() > MAX_GUARDIANS {
            return Err(RecoveryError::InvalidGuardianCount(guardians.len()));
        }
        if guardians.contains(&owner) {
            return Err(RecoveryError::OwnerCannotBeGuardian);
        }
        let guardians = GuardianSet::new(guardians)?;
        if threshold == 0 || threshold as usize > guardians.len() {
            return Err(RecoveryError::InvalidThreshold {
                threshold,
                guardians: guardians.len(),
            });
        }
        Ok(Self {
            origin: owner,
            owner,
            guardians,
            threshold,
            vault,
            recovery: RecoveryPhase::Idle,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn origin(&self) -> &Identity {
        &self.origin
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn guardians(&self) -> &GuardianSet {
        &self.guardians
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn vault(&self) -> &VaultRef {
        &self.vault
    }

    pub fn recovery(&self) -> &RecoveryPhase {
        &self.recovery
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_guardian(&self, identity: &Identity) -> bool {
        self.guardians.contains(identity)
    }

    pub fn is_owner(&self, identity: &Identity) -> bool {
        self.owner == *identity
    }

    pub(crate) fn recovery_mut(&mut self) -> &mut RecoveryPhase {
        &mut self.recovery
    }

    pub(crate) fn set_owner(&mut self, owner: Identity) {
        self.owner = owner;
    }

    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }

    /// Re-check the record invariants that [`WalletConfig::new`] and the
    /// controller uphold. Decoding bypasses both, so stored records are
    /// checked with this. Returns every violation found.
    pub fn invariant_violations(&self) -> Vec<RecoveryError> {
        let mut violations = Vec::new();
        let guardians = self.guardians.as_slice();

        if guardians.is_empty() || guardians.len() > MAX_GUARDIANS {
            violations.push(RecoveryError::InvalidGuardianCount(guardians.len()));
        }
        for (i, guardian) in guardians.iter().enumerate() {
            if guardians[..i].contains(guardian) {
                violations.push(RecoveryError::DuplicateGuardian(*guardian));
            }
        }
        if self.threshold == 0 || self.threshold as usize > guardians.len() {
            violations.push(RecoveryError::InvalidThreshold {
                threshold: self.threshold,
                guardians: guardians.len(),
            });
        }
        if self.is_guardian(&self.owner) {
            violations.push(RecoveryError::OwnerCannotBeGuardian);
        }

        if let Some(state) = self.recovery.active() {
            let proposed = state.proposed_owner();
            if self.is_owner(proposed) || self.is_guardian(proposed) {
                violations.push(RecoveryError::InvalidProposedOwner(*proposed));
            }
            let approvals = state.approvals();
            for (i, guardian) in approvals.iter().enumerate() {
                if !self.is_guardian(guardian) {
                    violations.push(RecoveryError::NotAGuardian(*guardian));
                }
                if approvals[..i].contains(guardian) {
                    violations.push(RecoveryError::DuplicateApproval(*guardian));
                }
            }
        }
        violations
    }
}
