//! Debit and credit commands - apply one operation to a single account

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;

use bankline_core::{Account, OperationResult};

use super::Reported;
use crate::output;

/// Which side of the ledger to apply
#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }
}

pub fn run(direction: Direction, owner: String, balance: Decimal, amount: Decimal, json: bool) -> Result<()> {
    let mut account = Account::new(owner, balance);

    let result = match direction {
        Direction::Debit => account.debit(amount),
        Direction::Credit => account.credit(amount),
    };

    if json {
        let envelope: OperationResult<Account> = match &result {
            Ok(()) => OperationResult::ok(account),
            Err(e) => OperationResult::fail(e.to_string()).with_context(
                "balance",
                serde_json::json!(output::format_balance(account.balance())),
            ),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        // The envelope already carries the error; main only records it
        return result.map_err(|e| Reported(e.to_string()).into());
    }

    result?;

    output::success(&format!("{} of {} applied", direction.as_str(), amount));
    println!(
        "  {}: {}",
        account.owner().unwrap_or("-").bold(),
        output::format_balance(account.balance())
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_failure_is_returned_as_reported() {
        let err = run(
            Direction::Debit,
            "Manuel".to_string(),
            Decimal::new(10001234, 4),
            Decimal::new(1500, 0),
            true,
        )
        .unwrap_err();

        let reported = err.downcast_ref::<Reported>().unwrap();
        assert_eq!(reported.0, "Insufficient Funds");
    }

    #[test]
    fn test_json_success() {
        let result = run(
            Direction::Credit,
            "Manuel".to_string(),
            Decimal::new(10001234, 4),
            Decimal::new(-2000, 0),
            true,
        );
        assert!(result.is_ok());
    }
}
