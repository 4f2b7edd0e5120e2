//! Logs command - inspect and prune the event log

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use bankline_core::{EventLog, Source};

use super::get_bankline_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Latest recorded commands, newest first
    List {
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Only commands that failed
        #[arg(long)]
        failed: bool,
        #[arg(long)]
        json: bool,
    },
    /// Remove events older than a number of days
    Prune {
        #[arg(long, default_value = "30")]
        days: i64,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
        #[arg(long)]
        json: bool,
    },
    /// Event counts and where the log lives
    Stats {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let bankline_dir = get_bankline_dir();
    std::fs::create_dir_all(&bankline_dir)?;
    let log = EventLog::open(&bankline_dir, Source::Cli, env!("CARGO_PKG_VERSION"))?;

    match command {
        LogsCommands::List { limit, failed, json } => list(&log, limit, failed, json),
        LogsCommands::Prune { days, yes, json } => prune(&log, days, yes, json),
        LogsCommands::Stats { json } => stats(&log, json),
    }
}

fn list(log: &EventLog, limit: usize, failed: bool, json: bool) -> Result<()> {
    let events = log.recent(limit, failed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }
    if events.is_empty() {
        output::info("Event log is empty");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["#", "When", "Command", "Outcome", "Error"]);
    for event in &events {
        let outcome = if event.failed() {
            event.outcome.red().to_string()
        } else {
            event.outcome.green().to_string()
        };
        table.add_row(vec![
            event.seq.to_string(),
            output::format_timestamp(event.recorded_at),
            event.command.clone(),
            outcome,
            event.error.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn prune(log: &EventLog, days: i64, yes: bool, json: bool) -> Result<()> {
    let cutoff = (Utc::now() - Duration::days(days)).timestamp_millis();

    let confirmed = yes
        || json
        || Confirm::new()
            .with_prompt(format!("Remove events older than {} days?", days))
            .default(false)
            .interact()?;
    if !confirmed {
        output::info("Nothing removed");
        return Ok(());
    }

    let removed = log.prune_before(cutoff)?;
    if json {
        println!("{}", serde_json::json!({ "removed": removed }));
    } else {
        output::success(&format!("Removed {} event(s)", removed));
    }
    Ok(())
}

fn stats(log: &EventLog, json: bool) -> Result<()> {
    let summary = log.summary()?;
    let size = std::fs::metadata(log.path()).map(|m| m.len()).unwrap_or(0);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "total": summary.total,
                "failed": summary.failed,
                "path": log.path().display().to_string(),
                "sizeBytes": size,
            })
        );
        return Ok(());
    }

    println!("{}", "Event log".bold());
    println!("  Commands recorded: {}", summary.total);
    println!("  Failed: {}", summary.failed);
    println!("  File: {} ({})", log.path().display(), output::format_size(size));
    Ok(())
}
