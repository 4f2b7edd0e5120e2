//! Transfer command - move funds between two ad-hoc accounts

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use bankline_core::{Account, Bank, OperationResult};

use super::{get_context, Reported};
use crate::output;

#[derive(Debug, Serialize)]
struct TransferView {
    bank: String,
    amount: Decimal,
    source: Account,
    destination: Account,
}

pub struct TransferArgs {
    pub from: String,
    pub from_balance: Decimal,
    pub to: String,
    pub to_balance: Decimal,
    pub amount: Decimal,
    pub json: bool,
}

pub fn run(args: TransferArgs) -> Result<()> {
    let ctx = get_context()?;

    let mut bank = Bank::new(ctx.config.default_bank_name.clone());
    let source = bank.add_account(Account::new(args.from, args.from_balance)).id();
    let destination = bank.add_account(Account::new(args.to, args.to_balance)).id();

    let result = bank.transfer_between(source, destination, args.amount);

    let view = TransferView {
        bank: bank.name().to_string(),
        amount: args.amount,
        source: bank.accounts()[0].clone(),
        destination: bank.accounts()[1].clone(),
    };

    if args.json {
        let envelope: OperationResult<TransferView> = match &result {
            Ok(()) => OperationResult::ok(view),
            Err(e) => OperationResult::fail(e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return result.map_err(|e| Reported(e.to_string()).into());
    }

    result?;

    output::success(&format!("Transferred {} at {}", args.amount, view.bank));

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Owner", "Balance"]);
    for (label, account) in [("source", &view.source), ("destination", &view.destination)] {
        table.add_row(vec![
            label.to_string(),
            account.owner().unwrap_or("-").to_string(),
            output::format_balance(account.balance()),
        ]);
    }
    println!("{}", table);

    Ok(())
}
