//! guardian-gate — command line front end for guardian wallet recovery.

mod commands;
mod config;
mod keyfile;

use clap::Parser;
use gate_utils::LogFormat;
use std::path::PathBuf;

use crate::config::GateConfig;
use crate::keyfile::parse_identity;
use gate_types::Identity;

#[derive(Parser)]
#[command(name = "guardian-gate", version, about = "Guardian-based wallet recovery")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "GUARDIAN_GATE_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the wallet database.
    #[arg(long, env = "GUARDIAN_GATE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log filter: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GUARDIAN_GATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format: "human" or "json".
    #[arg(long, env = "GUARDIAN_GATE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a new key file.
    Keygen {
        #[arg(long)]
        out: PathBuf,
    },

    /// Print the identity of a key file.
    Identity {
        #[arg(long)]
        key: PathBuf,
    },

    /// Create a wallet config owned by the key's identity.
    Init {
        #[arg(long)]
        key: PathBuf,
        /// Guardian identity; repeat for each guardian.
        #[arg(long = "guardian", required = true, value_parser = parse_identity)]
        guardians: Vec<Identity>,
        #[arg(long, default_value_t = gate_recovery::DEFAULT_THRESHOLD)]
        threshold: u8,
    },

    /// As a guardian, propose a new owner for a wallet.
    Initiate {
        #[arg(long)]
        key: PathBuf,
        /// Wallet origin identity.
        #[arg(long, value_parser = parse_identity)]
        wallet: Identity,
        #[arg(long, value_parser = parse_identity)]
        new_owner: Identity,
    },

    /// As a guardian, approve the active recovery.
    Approve {
        #[arg(long)]
        key: PathBuf,
        #[arg(long, value_parser = parse_identity)]
        wallet: Identity,
    },

    /// As the owner, cancel the active recovery.
    Cancel {
        #[arg(long)]
        key: PathBuf,
        #[arg(long, value_parser = parse_identity)]
        wallet: Identity,
    },

    /// Complete a ready recovery. Needs no key.
    Finalize {
        #[arg(long, value_parser = parse_identity)]
        wallet: Identity,
    },

    /// Show recovery progress.
    Status {
        #[arg(long, value_parser = parse_identity)]
        wallet: Identity,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the full wallet config.
    Show {
        #[arg(long, value_parser = parse_identity)]
        wallet: Identity,
    },

    /// Verify the wallet database.
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GateConfig::from_toml_file(path)?,
        None => GateConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    gate_utils::init_logging(config.log_format, &config.log_level);
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    commands::run(cli.command, &config)
}
