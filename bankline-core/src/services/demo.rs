//! Demo service - canned sample bank and scenario
//!
//! Gives the CLI something to show without a scenario file:
//! - Bancolombia with two accounts (Manuel 2500, Valencia 2000)
//! - a transfer, a debit that overdraws, and a credit

use anyhow::Result;
use rust_decimal::Decimal;

use crate::domain::{Account, Bank};
use crate::services::scenario::{
    OpeningAccount, Operation, Scenario, ScenarioReport, ScenarioService,
};

pub const DEMO_BANK_NAME: &str = "Bancolombia";

/// Demo opening accounts
pub fn generate_demo_accounts() -> Vec<Account> {
    vec![
        Account::new("Manuel", Decimal::new(2500, 0)),
        Account::new("Valencia", Decimal::new(2000, 0)),
    ]
}

/// Demo service for the sample scenario
pub struct DemoService {
    scenario_service: ScenarioService,
}

impl Default for DemoService {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoService {
    pub fn new() -> Self {
        Self {
            scenario_service: ScenarioService::new(DEMO_BANK_NAME),
        }
    }

    /// Sample bank with the demo accounts registered
    pub fn bank(&self) -> Bank {
        let mut bank = Bank::new(DEMO_BANK_NAME);
        for account in generate_demo_accounts() {
            bank.add_account(account);
        }
        bank
    }

    /// Sample scenario over the demo accounts
    pub fn scenario(&self) -> Scenario {
        Scenario {
            bank: Some(DEMO_BANK_NAME.to_string()),
            accounts: generate_demo_accounts()
                .into_iter()
                .filter_map(|a| {
                    Some(OpeningAccount {
                        owner: a.owner()?.to_string(),
                        balance: a.balance()?,
                    })
                })
                .collect(),
            operations: vec![
                Operation::Transfer {
                    from: "Manuel".to_string(),
                    to: "Valencia".to_string(),
                    amount: Decimal::new(500, 0),
                },
                Operation::Debit {
                    owner: "Manuel".to_string(),
                    amount: Decimal::new(1500, 0),
                },
                Operation::Debit {
                    owner: "Manuel".to_string(),
                    amount: Decimal::new(1000, 0),
                },
                Operation::Credit {
                    owner: "Valencia".to_string(),
                    amount: Decimal::new(1001234, 4), // 100.1234
                },
            ],
        }
    }

    pub fn run(&self) -> Result<ScenarioReport> {
        Ok(self.scenario_service.run(&self.scenario()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_bank() {
        let bank = DemoService::new().bank();
        assert_eq!(bank.name(), DEMO_BANK_NAME);
        assert_eq!(bank.accounts().len(), 2);
        assert!(bank
            .accounts()
            .iter()
            .all(|a| a.bank().map(|b| b.id) == Some(bank.id())));
    }

    #[test]
    fn test_demo_run() {
        let report = DemoService::new().run().unwrap();

        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(report.operations[2].error.as_deref(), Some("Insufficient Funds"));
        assert_eq!(report.accounts[0].balance, Some(dec!(500)));
        assert_eq!(report.accounts[1].balance, Some(dec!(2600.1234)));
    }
}
