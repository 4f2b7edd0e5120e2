//! Bankline CLI - accounts and transfers in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::account::Direction;
use commands::transfer::TransferArgs;
use commands::{account, config, demo, logs, transfer, Reported};

/// Bankline - accounts and transfers over exact decimals
#[derive(Parser)]
#[command(name = "bl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Withdraw from an account, failing on insufficient funds
    Debit {
        /// Account owner
        #[arg(long)]
        owner: String,
        /// Opening balance
        #[arg(long, allow_hyphen_values = true)]
        balance: Decimal,
        /// Amount to withdraw
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deposit into an account (negative amounts are accepted)
    Credit {
        /// Account owner
        #[arg(long)]
        owner: String,
        /// Opening balance
        #[arg(long, allow_hyphen_values = true)]
        balance: Decimal,
        /// Amount to deposit
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer between two accounts of the default bank
    Transfer {
        /// Source account owner
        #[arg(long)]
        from: String,
        /// Source opening balance
        #[arg(long, allow_hyphen_values = true)]
        from_balance: Decimal,
        /// Destination account owner
        #[arg(long)]
        to: String,
        /// Destination opening balance
        #[arg(long, allow_hyphen_values = true)]
        to_balance: Decimal,
        /// Amount to transfer
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a scenario file (or "-" / piped stdin)
    Run {
        /// Path to scenario JSON
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in sample scenario
    Demo {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show settings, or change them with the flags below
    Config {
        /// Bank name used when a scenario does not name one
        #[arg(long)]
        bank_name: Option<String>,
        /// Turn the event log on or off
        #[arg(long)]
        logging: Option<bool>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Debit { .. } => "debit",
            Commands::Credit { .. } => "credit",
            Commands::Transfer { .. } => "transfer",
            Commands::Run { .. } => "run",
            Commands::Demo { .. } => "demo",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let event_log = commands::open_event_log();
    let name = cli.command.name();

    let result = run(cli);
    commands::record_outcome(event_log.as_ref(), name, &result);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<Reported>().is_none() {
                output::error(&format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Debit { owner, balance, amount, json } => {
            account::run(Direction::Debit, owner, balance, amount, json)
        }
        Commands::Credit { owner, balance, amount, json } => {
            account::run(Direction::Credit, owner, balance, amount, json)
        }
        Commands::Transfer { from, from_balance, to, to_balance, amount, json } => {
            transfer::run(TransferArgs { from, from_balance, to, to_balance, amount, json })
        }
        Commands::Run { file, json } => commands::run::run(file, json),
        Commands::Demo { json } => demo::run(json),
        Commands::Config { bank_name, logging, json } => config::run(bank_name, logging, json),
        Commands::Logs { command } => logs::run(command),
    }
}
