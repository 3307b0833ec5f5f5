//! End-to-end recovery scenarios against the in-memory and LMDB stores.
//!
//! Every scenario drives the public `WalletLedger` entry points with a
//! controllable clock, the way a host would.

use std::sync::Arc;
use std::thread;

use gate_crypto::keypair_from_seed;
use gate_ledger::{LedgerError, WalletLedger};
use gate_nullables::{NullClock, NullWalletStore};
use gate_recovery::{RecoveryError, CHALLENGE_PERIOD_SECS};
use gate_store::WalletStore;
use gate_store_lmdb::{check_integrity, LmdbEnvironment};
use gate_types::{Clock, Identity};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const START: u64 = 1_700_000_000;

fn identity(seed: u8) -> Identity {
    keypair_from_seed(&[seed; 32]).identity
}

struct Cast {
    owner: Identity,
    g1: Identity,
    g2: Identity,
    g3: Identity,
    new_owner: Identity,
}

fn cast() -> Cast {
    Cast {
        owner: identity(1),
        g1: identity(11),
        g2: identity(12),
        g3: identity(13),
        new_owner: identity(21),
    }
}

fn memory_ledger() -> WalletLedger<NullWalletStore, NullClock> {
    WalletLedger::new(NullWalletStore::new(), NullClock::new(START))
}

fn recovery_err<T: std::fmt::Debug>(result: Result<T, LedgerError>) -> RecoveryError {
    match result {
        Err(LedgerError::Recovery(e)) => e,
        other => panic!("expected a recovery error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 1. Initialization
// ---------------------------------------------------------------------------

#[test]
fn initialize_exactly_once_per_owner() {
    let c = cast();
    let ledger = memory_ledger();

    ledger.initialize_wallet(c.owner, vec![c.g1, c.g2], 2).unwrap();
    assert_eq!(
        recovery_err(ledger.initialize_wallet(c.owner, vec![c.g3], 1)),
        RecoveryError::AlreadyInitialized
    );

    // A different owner is unaffected.
    ledger.initialize_wallet(c.new_owner, vec![c.g3], 1).unwrap();
    assert_eq!(ledger.wallet_count().unwrap(), 2);
}

#[test]
fn owner_as_guardian_rejected_for_any_threshold() {
    let c = cast();
    let ledger = memory_ledger();
    for threshold in 0..=6 {
        assert_eq!(
            recovery_err(ledger.initialize_wallet(c.owner, vec![c.g1, c.owner], threshold)),
            RecoveryError::OwnerCannotBeGuardian
        );
    }
    assert_eq!(ledger.wallet_count().unwrap(), 0);
}

// ---------------------------------------------------------------------------
// 2. Happy path
// ---------------------------------------------------------------------------

#[test]
fn initiate_approve_wait_finalize() {
    let c = cast();
    let ledger = memory_ledger();
    ledger.initialize_wallet(c.owner, vec![c.g1, c.g2], 2).unwrap();

    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();
    let status = ledger.recovery_status(&c.owner).unwrap();
    assert_eq!(status.approvals, vec![c.g1]);
    assert_eq!(status.proposed_owner, Some(c.new_owner));

    assert_eq!(ledger.approve_recovery(&c.owner, &c.g2).unwrap(), 2);

    // Threshold met but the challenge period is still running.
    let err = recovery_err(ledger.finalize_recovery(&c.owner));
    assert!(matches!(err, RecoveryError::ChallengePeriodNotExpired { .. }));
    assert!(err.is_timing());

    ledger.clock().advance(CHALLENGE_PERIOD_SECS);
    let done = ledger.finalize_recovery(&c.owner).unwrap();
    assert_eq!(done.previous_owner, c.owner);
    assert_eq!(done.new_owner, c.new_owner);

    let config = ledger.wallet_config(&c.owner).unwrap();
    assert_eq!(config.owner(), &c.new_owner);
    assert_eq!(config.origin(), &c.owner);
    assert!(config.recovery().is_idle());
    assert_eq!(config.guardians().as_slice(), &[c.g1, c.g2]);
    assert_eq!(config.threshold(), 2);
}

#[test]
fn finalize_below_threshold_fails_even_after_period() {
    let c = cast();
    let ledger = memory_ledger();
    ledger.initialize_wallet(c.owner, vec![c.g1, c.g2, c.g3], 3).unwrap();
    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();
    ledger.approve_recovery(&c.owner, &c.g2).unwrap();

    ledger.clock().advance(CHALLENGE_PERIOD_SECS * 2);
    assert_eq!(
        recovery_err(ledger.finalize_recovery(&c.owner)),
        RecoveryError::ThresholdNotMet { have: 2, need: 3 }
    );
    assert!(ledger.recovery_status(&c.owner).unwrap().active);
}

#[test]
fn finalize_is_permissionless_and_single_shot() {
    let c = cast();
    let ledger = memory_ledger();
    ledger.initialize_wallet(c.owner, vec![c.g1], 1).unwrap();
    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();
    ledger.clock().advance(CHALLENGE_PERIOD_SECS);

    ledger.finalize_recovery(&c.owner).unwrap();
    assert_eq!(
        recovery_err(ledger.finalize_recovery(&c.owner)),
        RecoveryError::NoActiveRecovery
    );
}

// ---------------------------------------------------------------------------
// 3. Cancellation and re-entrancy
// ---------------------------------------------------------------------------

#[test]
fn cancel_then_reinitiate_starts_fresh() {
    let c = cast();
    let ledger = memory_ledger();
    ledger.initialize_wallet(c.owner, vec![c.g1, c.g2], 2).unwrap();
    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();
    ledger.approve_recovery(&c.owner, &c.g2).unwrap();

    assert_eq!(
        recovery_err(ledger.cancel_recovery(&c.owner, &c.g1)),
        RecoveryError::Unauthorized(c.g1)
    );
    let discarded = ledger.cancel_recovery(&c.owner, &c.owner).unwrap();
    assert_eq!(discarded.approval_count(), 2);
    assert!(!ledger.recovery_status(&c.owner).unwrap().active);

    ledger.clock().advance(600);
    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();
    let status = ledger.recovery_status(&c.owner).unwrap();
    assert_eq!(status.approvals, vec![c.g1]);
    assert_eq!(status.time_remaining, CHALLENGE_PERIOD_SECS);
}

#[test]
fn second_initiate_with_other_proposal_rejected() {
    let c = cast();
    let ledger = memory_ledger();
    ledger.initialize_wallet(c.owner, vec![c.g1, c.g2], 2).unwrap();
    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();

    let other = identity(22);
    assert_eq!(
        recovery_err(ledger.initiate_recovery(&c.owner, &c.g2, other)),
        RecoveryError::RecoveryAlreadyActive
    );
    let status = ledger.recovery_status(&c.owner).unwrap();
    assert_eq!(status.proposed_owner, Some(c.new_owner));
}

#[test]
fn new_owner_can_cancel_the_next_recovery() {
    let c = cast();
    let ledger = memory_ledger();
    ledger.initialize_wallet(c.owner, vec![c.g1], 1).unwrap();
    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();
    ledger.clock().advance(CHALLENGE_PERIOD_SECS);
    ledger.finalize_recovery(&c.owner).unwrap();

    let third = identity(31);
    ledger.initiate_recovery(&c.owner, &c.g1, third).unwrap();
    assert_eq!(
        recovery_err(ledger.cancel_recovery(&c.owner, &c.owner)),
        RecoveryError::Unauthorized(c.owner)
    );
    ledger.cancel_recovery(&c.owner, &c.new_owner).unwrap();
}

// ---------------------------------------------------------------------------
// 4. Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_approvals_are_serialized() {
    let owner = identity(1);
    let guardians: Vec<Identity> = (0..5).map(|i| identity(100 + i)).collect();
    let ledger = Arc::new(memory_ledger());
    ledger.initialize_wallet(owner, guardians.clone(), 5).unwrap();
    ledger.initiate_recovery(&owner, &guardians[0], identity(21)).unwrap();

    // Every remaining guardian races to approve twice.
    let handles: Vec<_> = guardians[1..]
        .iter()
        .flat_map(|g| [*g, *g])
        .map(|g| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || ledger.approve_recovery(&owner, &g))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::Recovery(RecoveryError::DuplicateApproval(_)))))
        .count();
    assert_eq!(accepted, 4);
    assert_eq!(duplicates, 4);

    let mut counts: Vec<usize> = results.into_iter().filter_map(Result::ok).collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![2, 3, 4, 5]);
    assert_eq!(ledger.recovery_status(&owner).unwrap().approvals_count, 5);
}

#[test]
fn concurrent_initialize_has_one_winner() {
    let owner = identity(1);
    let ledger = Arc::new(memory_ledger());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || ledger.initialize_wallet(owner, vec![identity(50 + i)], 1))
        })
        .collect();

    let wins = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(wins, 1);
    assert_eq!(ledger.wallet_count().unwrap(), 1);
}

// ---------------------------------------------------------------------------
// 5. LMDB persistence
// ---------------------------------------------------------------------------

#[test]
fn lmdb_recovery_survives_reopen() {
    let c = cast();
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).expect("open env");
        let ledger = WalletLedger::new(env.wallet_store(), NullClock::new(START));
        ledger.initialize_wallet(c.owner, vec![c.g1, c.g2], 2).unwrap();
        ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();
    }

    let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).expect("reopen env");
    let clock = NullClock::new(START + 7_200);
    let ledger = WalletLedger::new(env.wallet_store(), &clock);

    let status = ledger.recovery_status(&c.owner).unwrap();
    assert_eq!(status.approvals, vec![c.g1]);
    assert_eq!(status.time_remaining, CHALLENGE_PERIOD_SECS - 7_200);

    ledger.approve_recovery(&c.owner, &c.g2).unwrap();
    clock.advance(CHALLENGE_PERIOD_SECS);
    assert!(clock.now().as_secs() > START + CHALLENGE_PERIOD_SECS);
    ledger.finalize_recovery(&c.owner).unwrap();

    assert_eq!(ledger.wallet_config(&c.owner).unwrap().owner(), &c.new_owner);
    assert!(check_integrity(&env).unwrap().is_healthy());
}

#[test]
fn lmdb_rejected_operation_leaves_record_intact() {
    let c = cast();
    let dir = tempfile::tempdir().expect("temp dir");
    let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).expect("open env");
    let ledger = WalletLedger::new(env.wallet_store(), NullClock::new(START));
    ledger.initialize_wallet(c.owner, vec![c.g1, c.g2], 2).unwrap();
    ledger.initiate_recovery(&c.owner, &c.g1, c.new_owner).unwrap();

    let address = ledger.wallet_address(&c.owner);
    let before = ledger.store().get_wallet(&address).unwrap();
    assert!(ledger.approve_recovery(&c.owner, &c.g1).is_err());
    assert!(ledger.approve_recovery(&c.owner, &c.owner).is_err());
    assert!(ledger.finalize_recovery(&c.owner).is_err());
    assert_eq!(ledger.store().get_wallet(&address).unwrap(), before);
}
