//! Run command - execute a scenario file in memory

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use bankline_core::services::{Scenario, ScenarioReport};

use super::{get_context, Reported};
use crate::output;

pub fn run(file: Option<PathBuf>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Read from the file argument, or from stdin when it is piped or "-"
    let scenario = match file.as_deref() {
        Some(path) if path.as_os_str() != "-" => Scenario::from_path(path)?,
        None if atty::is(atty::Stream::Stdin) => {
            anyhow::bail!("No scenario provided. Pass a file or pipe JSON on stdin.")
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read scenario from stdin")?;
            Scenario::from_json(&buffer)?
        }
    };

    let report = ctx.scenario_service.run(&scenario);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.failed > 0 {
        return Err(Reported(format!("{} operation(s) failed", report.failed)).into());
    }

    Ok(())
}

/// Human-readable scenario report
pub fn print_report(report: &ScenarioReport) {
    println!("{}", format!("Scenario at {}", report.bank).bold());
    println!();

    let mut operations = output::create_table();
    operations.set_header(vec!["#", "Operation", "Amount", "Result"]);
    for outcome in &report.operations {
        let result = match &outcome.error {
            None => "ok".green().to_string(),
            Some(e) => e.red().to_string(),
        };
        operations.add_row(vec![
            outcome.index.to_string(),
            outcome.op.clone(),
            outcome.amount.to_string(),
            result,
        ]);
    }
    println!("{}", operations);
    println!();

    let mut accounts = output::create_table();
    accounts.set_header(vec!["Owner", "Balance"]);
    for account in &report.accounts {
        accounts.add_row(vec![
            account.owner.clone().unwrap_or_else(|| "-".to_string()),
            output::format_balance(account.balance),
        ]);
    }
    println!("{}", accounts);
    println!();

    println!(
        "{} succeeded, {} failed. Total {} -> {}",
        report.succeeded, report.failed, report.opening_total, report.closing_total
    );
    if report.failed > 0 {
        output::error(&format!("{} operation(s) failed", report.failed));
    }
}
