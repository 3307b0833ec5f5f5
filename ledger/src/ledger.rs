//! The wallet ledger — one atomic store step per recovery operation.

use gate_crypto::{vault_address, wallet_config_address};
use gate_recovery::{
    FinalizedRecovery, RecoveryController, RecoveryError, RecoveryState, RecoveryStatus,
    VaultError, VaultExecutor, VaultInstruction, VaultRef, WalletConfig,
};
use gate_store::WalletStore;
use gate_types::{Clock, Identity, RecordAddress, Timestamp};
use tracing::{debug, info};

use crate::LedgerError;

/// Guardian recovery over a wallet store.
///
/// Wallets are located by their origin identity (the owner at
/// initialization), which stays valid after a recovery reassigns the owner.
/// The current time always comes from the injected clock.
pub struct WalletLedger<S, C> {
    store: S,
    clock: C,
    controller: RecoveryController,
}

impl<S: WalletStore, C: Clock> WalletLedger<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            controller: RecoveryController,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Address of the wallet config originated by `origin`.
    pub fn wallet_address(&self, origin: &Identity) -> RecordAddress {
        wallet_config_address(origin)
    }

    /// Address of the vault bound to `origin`'s wallet config.
    pub fn vault_address(&self, origin: &Identity) -> RecordAddress {
        vault_address(origin)
    }

    /// Create the wallet config for `owner`. Returns its address.
    ///
    /// Fails with `AlreadyInitialized` if `owner` already has one, whatever
    /// the arguments. "One per owner" means one per origin identity: an
    /// identity that received a wallet through recovery can still originate
    /// its own.
    pub fn initialize_wallet(
        &self,
        owner: Identity,
        guardians: Vec<Identity>,
        threshold: u8,
    ) -> Result<RecordAddress, LedgerError> {
        let address = wallet_config_address(&owner);
        let now = self.clock.now();

        let result = self.try_initialize(&address, owner, guardians, threshold, now);
        match &result {
            Ok(config) => info!(
                wallet = %address,
                owner = %owner,
                guardians = config.guardians().len(),
                threshold = config.threshold(),
                "wallet initialized"
            ),
            Err(e) => rejected("initialize_wallet", &owner, e),
        }
        result.map(|_| address)
    }

    fn try_initialize(
        &self,
        address: &RecordAddress,
        owner: Identity,
        guardians: Vec<Identity>,
        threshold: u8,
        now: Timestamp,
    ) -> Result<WalletConfig, LedgerError> {
        if self.store.wallet_exists(address)? {
            return Err(RecoveryError::AlreadyInitialized.into());
        }
        let vault = VaultRef::new(vault_address(&owner));
        let config = self
            .controller
            .initialize_wallet(owner, guardians, threshold, vault, now)?;
        // Duplicate here means a concurrent initialize committed first.
        self.store.insert_wallet(address, &config)?;
        Ok(config)
    }

    /// Guardian `caller` opens a recovery proposing `proposed_owner`.
    pub fn initiate_recovery(
        &self,
        wallet: &Identity,
        caller: &Identity,
        proposed_owner: Identity,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        let result = self.store.update_wallet(&wallet_config_address(wallet), |config| {
            self.controller
                .initiate_recovery(config, caller, proposed_owner, now)
                .map_err(LedgerError::from)
        });
        match &result {
            Ok(()) => info!(
                wallet = %wallet,
                guardian = %caller,
                proposed_owner = %proposed_owner,
                "recovery initiated"
            ),
            Err(e) => rejected("initiate_recovery", wallet, e),
        }
        result
    }

    /// Guardian `caller` approves the active recovery. Returns the approval count.
    pub fn approve_recovery(&self, wallet: &Identity, caller: &Identity) -> Result<usize, LedgerError> {
        let now = self.clock.now();
        let result: Result<_, LedgerError> =
            self.store.update_wallet(&wallet_config_address(wallet), |config| {
                let approvals = self.controller.approve_recovery(config, caller, now)?;
                Ok((approvals, config.threshold()))
            });
        match &result {
            Ok((approvals, threshold)) => info!(
                wallet = %wallet,
                guardian = %caller,
                approvals,
                threshold,
                "recovery approved"
            ),
            Err(e) => rejected("approve_recovery", wallet, e),
        }
        result.map(|(approvals, _)| approvals)
    }

    /// The current owner aborts the active recovery. Returns the discarded proposal.
    pub fn cancel_recovery(&self, wallet: &Identity, caller: &Identity) -> Result<RecoveryState, LedgerError> {
        let now = self.clock.now();
        let result = self.store.update_wallet(&wallet_config_address(wallet), |config| {
            self.controller
                .cancel_recovery(config, caller, now)
                .map_err(LedgerError::from)
        });
        match &result {
            Ok(discarded) => info!(
                wallet = %wallet,
                proposed_owner = %discarded.proposed_owner(),
                approvals = discarded.approval_count(),
                "recovery cancelled"
            ),
            Err(e) => rejected("cancel_recovery", wallet, e),
        }
        result
    }

    /// Hand the wallet to the proposed owner. Anyone may call this.
    pub fn finalize_recovery(&self, wallet: &Identity) -> Result<FinalizedRecovery, LedgerError> {
        let now = self.clock.now();
        let result = self.store.update_wallet(&wallet_config_address(wallet), |config| {
            self.controller
                .finalize_recovery(config, now)
                .map_err(LedgerError::from)
        });
        match &result {
            Ok(done) => info!(
                wallet = %wallet,
                previous_owner = %done.previous_owner,
                new_owner = %done.new_owner,
                approvals = done.approvals.len(),
                "recovery finalized"
            ),
            Err(e) => rejected("finalize_recovery", wallet, e),
        }
        result
    }

    /// Snapshot of the wallet config.
    pub fn wallet_config(&self, wallet: &Identity) -> Result<WalletConfig, LedgerError> {
        let address = wallet_config_address(wallet);
        self.store
            .get_wallet(&address)?
            .ok_or_else(|| LedgerError::WalletNotFound(address.to_string()))
    }

    /// Recovery progress as of the clock's current time.
    pub fn recovery_status(&self, wallet: &Identity) -> Result<RecoveryStatus, LedgerError> {
        let config = self.wallet_config(wallet)?;
        Ok(RecoveryStatus::read(&config, self.clock.now()))
    }

    /// Run `instructions` with the vault's authority on behalf of the current owner.
    pub fn execute_vault<E: VaultExecutor>(
        &self,
        wallet: &Identity,
        caller: &Identity,
        instructions: &[VaultInstruction],
        executor: &E,
    ) -> Result<(), LedgerError> {
        let result = self.try_execute_vault(wallet, caller, instructions, executor);
        match &result {
            Ok(()) => info!(
                wallet = %wallet,
                owner = %caller,
                instructions = instructions.len(),
                "vault instructions executed"
            ),
            Err(e) => rejected("execute_vault", wallet, e),
        }
        result
    }

    fn try_execute_vault<E: VaultExecutor>(
        &self,
        wallet: &Identity,
        caller: &Identity,
        instructions: &[VaultInstruction],
        executor: &E,
    ) -> Result<(), LedgerError> {
        if instructions.is_empty() {
            return Err(VaultError::Empty.into());
        }
        let config = self.wallet_config(wallet)?;
        let vault = self.controller.authorize_vault(&config, caller)?;
        executor.execute(vault, instructions)?;
        Ok(())
    }

    pub fn wallet_count(&self) -> Result<u64, LedgerError> {
        Ok(self.store.wallet_count()?)
    }
}

fn rejected(op: &'static str, wallet: &Identity, error: &LedgerError) {
    match error.recovery() {
        Some(e) => debug!(op, wallet = %wallet, kind = ?e.kind(), error = %e, "rejected"),
        None => debug!(op, wallet = %wallet, error = %error, "rejected"),
    }
}
