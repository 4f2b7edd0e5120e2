//! Account domain model

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{Error, Result};

/// Non-owning handle to the bank an account is registered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRef {
    pub id: Uuid,
    pub name: String,
}

/// An account holding an exact decimal balance for an owner
///
/// Both `owner` and `balance` may be unset (see [`Account::default`]).
/// Arithmetic on an account without a balance fails with
/// [`Error::BalanceNotSet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: Uuid,
    owner: Option<String>,
    balance: Option<Decimal>,
    bank: Option<BankRef>,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: None,
            balance: None,
            bank: None,
        }
    }
}

impl Account {
    /// Create a new account with an owner and opening balance
    ///
    /// The balance is not validated; negative opening balances are accepted.
    pub fn new(owner: impl Into<String>, balance: Decimal) -> Self {
        Self {
            owner: Some(owner.into()),
            balance: Some(balance),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn set_owner(&mut self, owner: Option<String>) {
        self.owner = owner;
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.balance
    }

    pub fn set_balance(&mut self, balance: Option<Decimal>) {
        self.balance = balance;
    }

    /// Bank this account is registered with, if any
    pub fn bank(&self) -> Option<&BankRef> {
        self.bank.as_ref()
    }

    pub fn set_bank(&mut self, bank: Option<BankRef>) {
        self.bank = bank;
    }

    /// Withdraw `amount` from the balance
    ///
    /// Fails with [`Error::InsufficientFunds`] when the resulting balance
    /// would be negative. The balance is left untouched on failure.
    pub fn debit(&mut self, amount: Decimal) -> Result<()> {
        let balance = self.balance.ok_or(Error::BalanceNotSet)?;
        let new_balance = balance - amount;

        if new_balance < Decimal::ZERO {
            return Err(Error::InsufficientFunds);
        }

        self.balance = Some(new_balance);
        Ok(())
    }

    /// Deposit `amount` into the balance
    ///
    /// The sign of `amount` is not checked: a negative credit lowers the
    /// balance without the insufficient funds check.
    pub fn credit(&mut self, amount: Decimal) -> Result<()> {
        let balance = self.balance.ok_or(Error::BalanceNotSet)?;
        self.balance = Some(balance + amount);
        Ok(())
    }

    /// Integer part of the balance, truncated toward zero
    pub fn balance_units(&self) -> Option<i64> {
        self.balance.and_then(|b| b.trunc().to_i64())
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance.is_some_and(|b| b < Decimal::ZERO)
    }

    /// Case-insensitive owner match
    pub fn owned_by(&self, owner: &str) -> bool {
        self.owner
            .as_deref()
            .is_some_and(|o| o.to_lowercase() == owner.to_lowercase())
    }
}

// Not reflexive: an account with an unset owner or balance is unequal to
// every account, itself included. Hence no `Eq`. Balances must also agree
// on scale, so 1.0 and 1.00 differ.
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        match (&self.owner, self.balance, other.balance) {
            (Some(owner), Some(balance), Some(other_balance)) => {
                other.owner.as_ref() == Some(owner)
                    && balance == other_balance
                    && balance.scale() == other_balance.scale()
            }
            _ => false,
        }
    }
}
