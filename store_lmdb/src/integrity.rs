//! Wallet database integrity checks.
//!
//! Run on startup to detect corruption early, before any operation is
//! applied to a damaged record.

use std::path::Path;

use crate::environment::LmdbEnvironment;
use crate::wallet::decode_wallet;
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub wallets_checked: u64,
    pub active_recoveries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decode every wallet record, confirm it sits at, and points to, the
/// addresses derived from its origin identity, and re-check its record
/// invariants (guardian set, threshold, approvals).
///
/// Problems with individual records are collected in the report rather than
/// aborting the scan.
pub fn check_integrity(env: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport::default();
    let rtxn = env.env().read_txn()?;

    for entry in env.wallets_db.iter(&rtxn)? {
        let (key, value) = match entry {
            Ok(kv) => kv,
            Err(e) => {
                report.errors.push(format!("failed to read wallet entry: {e}"));
                continue;
            }
        };
        report.wallets_checked += 1;

        let wallet = match decode_wallet(value) {
            Ok(w) => w,
            Err(e) => {
                report
                    .errors
                    .push(format!("undecodable wallet at {}: {e}", hex_prefix(key)));
                continue;
            }
        };

        let expected = gate_crypto::wallet_config_address(wallet.origin());
        if key != expected.as_bytes().as_slice() {
            report.errors.push(format!(
                "wallet for origin {} stored at {} instead of {}",
                wallet.origin(),
                hex_prefix(key),
                expected
            ));
        }
        if *wallet.vault().address() != gate_crypto::vault_address(wallet.origin()) {
            report
                .errors
                .push(format!("wallet for origin {} is bound to a foreign vault", wallet.origin()));
        }
        for violation in wallet.invariant_violations() {
            report
                .errors
                .push(format!("wallet for origin {}: {violation}", wallet.origin()));
        }
        if !wallet.recovery().is_idle() {
            report.active_recoveries += 1;
        }
    }

    if !report.is_healthy() {
        tracing::warn!(errors = report.errors.len(), "wallet database integrity problems found");
    }
    Ok(report)
}

fn hex_prefix(key: &[u8]) -> String {
    key.iter().take(8).map(|b| format!("{:02x}", b)).collect()
}

/// Check if the data directory looks valid before opening.
///
/// Returns `Ok(())` for a missing or empty directory (fresh start). Returns an
/// error if the directory has content but `data.mdb` is missing, which
/// suggests corruption or misconfiguration.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let is_empty = std::fs::read_dir(path)
        .map_err(|e| format!("cannot read data directory {}: {e}", path.display()))?
        .next()
        .is_none();
    if is_empty {
        return Ok(());
    }
    if !path.join("data.mdb").exists() {
        return Err(format!(
            "LMDB directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}
