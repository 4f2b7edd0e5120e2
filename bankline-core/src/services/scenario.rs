//! Scenario service - run a scripted set of account operations in memory
//!
//! A scenario names a bank, its opening accounts, and an ordered list of
//! debits, credits and transfers. Nothing is persisted: the bank exists only
//! for the duration of [`ScenarioService::run`].

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::Error;
use crate::domain::{Account, Bank};

/// Scenario file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub accounts: Vec<OpeningAccount>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// Opening account in a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningAccount {
    pub owner: String,
    pub balance: Decimal,
}

/// One step of a scenario. Owners are matched ignoring case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    Debit { owner: String, amount: Decimal },
    Credit { owner: String, amount: Decimal },
    Transfer { from: String, to: String, amount: Decimal },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Debit { .. } => "debit",
            Operation::Credit { .. } => "credit",
            Operation::Transfer { .. } => "transfer",
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Operation::Debit { amount, .. }
            | Operation::Credit { amount, .. }
            | Operation::Transfer { amount, .. } => *amount,
        }
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid scenario JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {:?}", path))?;
        Self::from_json(&content)
    }
}

/// Result of running one operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub index: usize,
    pub op: String,
    pub amount: Decimal,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final state of one account
#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub id: String,
    pub owner: Option<String>,
    pub balance: Option<Decimal>,
}

/// Outcome of a full scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub bank: String,
    pub executed_at: DateTime<Utc>,
    pub succeeded: usize,
    pub failed: usize,
    pub opening_total: Decimal,
    pub closing_total: Decimal,
    pub operations: Vec<OperationOutcome>,
    pub accounts: Vec<AccountBalance>,
}

/// Scenario service for in-memory runs
pub struct ScenarioService {
    default_bank_name: String,
}

impl ScenarioService {
    pub fn new(default_bank_name: impl Into<String>) -> Self {
        Self {
            default_bank_name: default_bank_name.into(),
        }
    }

    /// Build the bank described by a scenario, before any operation runs
    pub fn build_bank(&self, scenario: &Scenario) -> Bank {
        let name = scenario
            .bank
            .clone()
            .unwrap_or_else(|| self.default_bank_name.clone());
        let mut bank = Bank::new(name);
        for opening in &scenario.accounts {
            bank.add_account(Account::new(opening.owner.clone(), opening.balance));
        }
        bank
    }

    /// Run every operation in order
    ///
    /// A failing operation is recorded in the report and the run continues
    /// with the next one.
    pub fn run(&self, scenario: &Scenario) -> ScenarioReport {
        let mut bank = self.build_bank(scenario);
        let opening_total = bank.total_balance();

        let operations: Vec<OperationOutcome> = scenario
            .operations
            .iter()
            .enumerate()
            .map(|(index, operation)| {
                let error = apply(&mut bank, operation).err().map(|e| e.to_string());
                OperationOutcome {
                    index,
                    op: operation.name().to_string(),
                    amount: operation.amount(),
                    success: error.is_none(),
                    error,
                }
            })
            .collect();

        let succeeded = operations.iter().filter(|o| o.success).count();

        ScenarioReport {
            bank: bank.name().to_string(),
            executed_at: Utc::now(),
            succeeded,
            failed: operations.len() - succeeded,
            opening_total,
            closing_total: bank.total_balance(),
            operations,
            accounts: bank
                .accounts()
                .iter()
                .map(|a| AccountBalance {
                    id: a.id().to_string(),
                    owner: a.owner().map(str::to_string),
                    balance: a.balance(),
                })
                .collect(),
        }
    }
}

fn resolve(bank: &Bank, owner: &str) -> crate::domain::result::Result<Uuid> {
    bank.find_by_owner(owner)
        .map(Account::id)
        .ok_or_else(|| Error::validation(format!("No account for owner: {}", owner)))
}

fn apply(bank: &mut Bank, operation: &Operation) -> crate::domain::result::Result<()> {
    match operation {
        Operation::Debit { owner, amount } => {
            let id = resolve(bank, owner)?;
            bank.debit_account(id, *amount)
        }
        Operation::Credit { owner, amount } => {
            let id = resolve(bank, owner)?;
            bank.credit_account(id, *amount)
        }
        Operation::Transfer { from, to, amount } => {
            let from = resolve(bank, from)?;
            let to = resolve(bank, to)?;
            bank.transfer_between(from, to, *amount)
        }
    }
}
