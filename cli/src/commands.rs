//! Subcommand execution.

use anyhow::{anyhow, bail};
use gate_crypto::{encode_identity, generate_keypair};
use gate_ledger::WalletLedger;
use gate_recovery::{RecoveryPhase, RecoveryStatus};
use gate_store::WalletStore;
use gate_store_lmdb::{check_data_dir, check_integrity, LmdbEnvironment};
use gate_types::{Clock, Identity, SystemClock};
use gate_utils::format_duration;
use serde::Serialize;
use std::io::Write;

use crate::config::GateConfig;
use crate::keyfile::{read_key_file, write_key_file};
use crate::Command;

pub(crate) fn run(command: Command, config: &GateConfig) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    match command {
        Command::Keygen { out: path } => {
            let keypair = generate_keypair();
            write_key_file(&path, &keypair)?;
            writeln!(out, "{}", encode_identity(&keypair.identity))?;
        }
        Command::Identity { key } => {
            let keypair = read_key_file(&key)?;
            writeln!(out, "{}", encode_identity(&keypair.identity))?;
        }
        Command::Check => check(config, &mut out)?,
        command => {
            let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())?;
            let ledger = WalletLedger::new(env.wallet_store(), SystemClock);
            execute(command, &ledger, &mut out)?;
        }
    }
    Ok(())
}

/// Run a wallet subcommand against `ledger`.
pub(crate) fn execute<S: WalletStore, C: Clock>(
    command: Command,
    ledger: &WalletLedger<S, C>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Init {
            key,
            guardians,
            threshold,
        } => {
            let owner = read_key_file(&key)?.identity;
            let address = ledger.initialize_wallet(owner, guardians, threshold)?;
            writeln!(out, "wallet:  {}", encode_identity(&owner))?;
            writeln!(out, "config:  {address}")?;
            writeln!(out, "vault:   {}", ledger.vault_address(&owner))?;
        }
        Command::Initiate {
            key,
            wallet,
            new_owner,
        } => {
            let caller = read_key_file(&key)?.identity;
            ledger.initiate_recovery(&wallet, &caller, new_owner)?;
            writeln!(out, "recovery initiated")?;
            writeln!(out, "{}", ledger.recovery_status(&wallet)?.progress_line())?;
        }
        Command::Approve { key, wallet } => {
            let caller = read_key_file(&key)?.identity;
            ledger.approve_recovery(&wallet, &caller)?;
            writeln!(out, "approval recorded")?;
            writeln!(out, "{}", ledger.recovery_status(&wallet)?.progress_line())?;
        }
        Command::Cancel { key, wallet } => {
            let caller = read_key_file(&key)?.identity;
            let discarded = ledger.cancel_recovery(&wallet, &caller)?;
            writeln!(
                out,
                "recovery cancelled ({} approval(s) discarded)",
                discarded.approval_count()
            )?;
        }
        Command::Finalize { wallet } => {
            let done = ledger.finalize_recovery(&wallet)?;
            writeln!(out, "recovery finalized")?;
            writeln!(out, "new owner: {}", encode_identity(&done.new_owner))?;
        }
        Command::Status { wallet, json } => {
            let status = ledger.recovery_status(&wallet)?;
            if json {
                let view = StatusView::new(&wallet, &status);
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                write_status(out, &status)?;
            }
        }
        Command::Show { wallet } => show(ledger, &wallet, out)?,
        Command::Keygen { .. } | Command::Identity { .. } | Command::Check => {
            bail!("command does not operate on a wallet")
        }
    }
    Ok(())
}

/// JSON form of [`RecoveryStatus`] with identities in text form.
#[derive(Serialize)]
struct StatusView {
    wallet: String,
    active: bool,
    proposed_owner: Option<String>,
    approvals: Vec<String>,
    approvals_count: usize,
    threshold: u8,
    time_remaining: u64,
    ready_to_finalize: bool,
    progress: String,
}

impl StatusView {
    fn new(wallet: &Identity, status: &RecoveryStatus) -> Self {
        Self {
            wallet: encode_identity(wallet),
            active: status.active,
            proposed_owner: status.proposed_owner.as_ref().map(encode_identity),
            approvals: status.approvals.iter().map(encode_identity).collect(),
            approvals_count: status.approvals_count,
            threshold: status.threshold,
            time_remaining: status.time_remaining,
            ready_to_finalize: status.ready_to_finalize(),
            progress: status.progress_line(),
        }
    }
}

fn write_status(out: &mut impl Write, status: &RecoveryStatus) -> std::io::Result<()> {
    writeln!(out, "{}", status.progress_line())?;
    if let Some(proposed) = &status.proposed_owner {
        writeln!(out, "proposed owner: {}", encode_identity(proposed))?;
        for guardian in &status.approvals {
            writeln!(out, "  approved by {}", encode_identity(guardian))?;
        }
        if status.time_remaining > 0 {
            writeln!(
                out,
                "challenge period ends in {}",
                format_duration(status.time_remaining)
            )?;
        }
    }
    Ok(())
}

fn show<S: WalletStore, C: Clock>(
    ledger: &WalletLedger<S, C>,
    wallet: &Identity,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = ledger.wallet_config(wallet)?;
    writeln!(out, "origin:    {}", encode_identity(config.origin()))?;
    writeln!(out, "owner:     {}", encode_identity(config.owner()))?;
    writeln!(out, "threshold: {}/{}", config.threshold(), config.guardians().len())?;
    for guardian in config.guardians().iter() {
        writeln!(out, "guardian:  {}", encode_identity(guardian))?;
    }
    writeln!(out, "vault:     {}", config.vault().address())?;
    writeln!(out, "created:   {}", config.created_at().as_secs())?;
    writeln!(out, "updated:   {}", config.updated_at().as_secs())?;
    match config.recovery() {
        RecoveryPhase::Idle => writeln!(out, "recovery:  idle")?,
        RecoveryPhase::Active(state) => {
            writeln!(
                out,
                "recovery:  active since {}, proposing {}",
                state.started_at().as_secs(),
                encode_identity(state.proposed_owner())
            )?;
        }
    }
    Ok(())
}

fn check(config: &GateConfig, out: &mut impl Write) -> anyhow::Result<()> {
    check_data_dir(&config.data_dir).map_err(|e| anyhow!(e))?;
    let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())?;
    let report = check_integrity(&env)?;

    writeln!(out, "schema version:    {}", env.schema_version()?)?;
    writeln!(out, "wallets checked:   {}", report.wallets_checked)?;
    writeln!(out, "active recoveries: {}", report.active_recoveries)?;
    for error in &report.errors {
        writeln!(out, "error: {error}")?;
    }
    if !report.is_healthy() {
        bail!("{} integrity error(s) found", report.errors.len());
    }
    writeln!(out, "ok")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyfile::write_key_file;
    use gate_crypto::keypair_from_seed;
    use gate_nullables::{NullClock, NullWalletStore};
    use gate_recovery::CHALLENGE_PERIOD_SECS;
    use std::path::{Path, PathBuf};

    fn key(dir: &Path, name: &str, seed: u8) -> (PathBuf, Identity) {
        let keypair = keypair_from_seed(&[seed; 32]);
        let path = dir.join(name);
        write_key_file(&path, &keypair).unwrap();
        (path, keypair.identity)
    }

    fn output(ledger: &WalletLedger<NullWalletStore, NullClock>, command: Command) -> String {
        let mut out = Vec::new();
        execute(command, ledger, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn recovery_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let (owner_key, owner) = key(dir.path(), "owner.key", 1);
        let (g1_key, g1) = key(dir.path(), "g1.key", 2);
        let (g2_key, g2) = key(dir.path(), "g2.key", 3);
        let new_owner = keypair_from_seed(&[4; 32]).identity;
        let ledger = WalletLedger::new(NullWalletStore::new(), NullClock::new(1_000));

        output(
            &ledger,
            Command::Init {
                key: owner_key,
                guardians: vec![g1, g2],
                threshold: 2,
            },
        );
        let text = output(
            &ledger,
            Command::Initiate {
                key: g1_key,
                wallet: owner,
                new_owner,
            },
        );
        assert!(text.contains("1/2 guardians approved • 24 hours remaining"));

        let text = output(&ledger, Command::Approve { key: g2_key, wallet: owner });
        assert!(text.contains("2/2 guardians approved"));

        let mut out = Vec::new();
        assert!(execute(Command::Finalize { wallet: owner }, &ledger, &mut out).is_err());

        ledger.clock().advance(CHALLENGE_PERIOD_SECS);
        let text = output(&ledger, Command::Finalize { wallet: owner });
        assert!(text.contains(&encode_identity(&new_owner)));

        let text = output(&ledger, Command::Show { wallet: owner });
        assert!(text.contains(&format!("owner:     {}", encode_identity(&new_owner))));
        assert!(text.contains("recovery:  idle"));
    }

    #[test]
    fn status_json_uses_text_identities() {
        let dir = tempfile::tempdir().unwrap();
        let (owner_key, owner) = key(dir.path(), "owner.key", 1);
        let (g1_key, g1) = key(dir.path(), "g1.key", 2);
        let ledger = WalletLedger::new(NullWalletStore::new(), NullClock::new(0));

        output(
            &ledger,
            Command::Init {
                key: owner_key,
                guardians: vec![g1],
                threshold: 1,
            },
        );
        output(
            &ledger,
            Command::Initiate {
                key: g1_key,
                wallet: owner,
                new_owner: keypair_from_seed(&[9; 32]).identity,
            },
        );

        let text = output(&ledger, Command::Status { wallet: owner, json: true });
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["active"], true);
        assert_eq!(value["approvals"][0], encode_identity(&g1));
        assert_eq!(value["time_remaining"], CHALLENGE_PERIOD_SECS);
        assert_eq!(value["ready_to_finalize"], false);
    }

    #[test]
    fn idle_status_text() {
        let dir = tempfile::tempdir().unwrap();
        let (owner_key, owner) = key(dir.path(), "owner.key", 1);
        let ledger = WalletLedger::new(NullWalletStore::new(), NullClock::new(0));
        output(
            &ledger,
            Command::Init {
                key: owner_key,
                guardians: vec![keypair_from_seed(&[2; 32]).identity],
                threshold: 1,
            },
        );
        assert_eq!(
            output(&ledger, Command::Status { wallet: owner, json: false }),
            "No active recovery\n"
        );
    }

    #[test]
    fn check_on_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = GateConfig {
            data_dir: dir.path().join("data"),
            ..GateConfig::default()
        };
        let mut out = Vec::new();
        check(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("wallets checked:   0"));
        assert!(text.ends_with("ok\n"));
    }
}
