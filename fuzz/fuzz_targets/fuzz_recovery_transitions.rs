#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use gate_recovery::{RecoveryController, VaultRef, WalletConfig};
use gate_types::{Identity, RecordAddress, Timestamp};

#[derive(Arbitrary, Debug)]
enum Op {
    Initiate { caller: u8, proposed: u8 },
    Approve { caller: u8 },
    Cancel { caller: u8 },
    Finalize,
    Wait { secs: u32 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    guardians: Vec<u8>,
    threshold: u8,
    ops: Vec<Op>,
}

fn id(n: u8) -> Identity {
    Identity::new([n; 32])
}

// Drive arbitrary operation sequences and check the record invariants after
// every step. Identity 0 is the owner.
fuzz_target!(|input: Input| {
    let guardians = input.guardians.iter().map(|g| id(*g)).collect();
    let vault = VaultRef::new(RecordAddress::new([0xAA; 32]));
    let mut now = Timestamp::new(1_000);
    let Ok(mut wallet) =
        RecoveryController.initialize_wallet(id(0), guardians, input.threshold, vault, now)
    else {
        return;
    };

    for op in input.ops {
        let before: WalletConfig = wallet.clone();
        let result = match op {
            Op::Initiate { caller, proposed } => RecoveryController
                .initiate_recovery(&mut wallet, &id(caller), id(proposed), now)
                .map(|_| ()),
            Op::Approve { caller } => RecoveryController
                .approve_recovery(&mut wallet, &id(caller), now)
                .map(|_| ()),
            Op::Cancel { caller } => RecoveryController
                .cancel_recovery(&mut wallet, &id(caller), now)
                .map(|_| ()),
            Op::Finalize => RecoveryController.finalize_recovery(&mut wallet, now).map(|_| ()),
            Op::Wait { secs } => {
                now = Timestamp::new(now.as_secs() + u64::from(secs));
                Ok(())
            }
        };

        if result.is_err() {
            assert_eq!(wallet, before);
        }
        assert!(!wallet.is_guardian(wallet.owner()));
        if let Some(state) = wallet.recovery().active() {
            assert!(state.approval_count() <= wallet.guardians().len());
            assert!(state.approvals().iter().all(|g| wallet.is_guardian(g)));
        }
    }
});
