#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Stored records come back through bincode; malformed bytes must be an
    // error, never a panic.
    if let Ok(wallet) = bincode::deserialize::<gate_recovery::WalletConfig>(data) {
        let _ = gate_recovery::RecoveryStatus::read(&wallet, gate_types::Timestamp::new(u64::MAX));
    }

    let _ = bincode::deserialize::<gate_recovery::RecoveryPhase>(data);
    let _ = bincode::deserialize::<gate_recovery::VaultInstruction>(data);
    let _ = bincode::deserialize::<gate_types::Timestamp>(data);
});
