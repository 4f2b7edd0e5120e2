//! Bank domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, BankRef};
use super::result::{Error, Result};

/// A named, insertion-ordered collection of accounts
///
/// Accounts are moved into the bank by [`Bank::add_account`] and are never
/// removed. Read access goes through [`Bank::accounts`], a read-only slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    id: Uuid,
    name: String,
    accounts: Vec<Account>,
}

impl Default for Bank {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            accounts: Vec::new(),
        }
    }
}

impl Bank {
    /// Create an empty bank with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the bank, refreshing the handle held by every registered account
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        let handle = self.handle();
        for account in &mut self.accounts {
            account.set_bank(Some(handle.clone()));
        }
    }

    /// Non-owning handle pointing at this bank
    pub fn handle(&self) -> BankRef {
        BankRef {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Register an account with this bank
    ///
    /// There is no duplicate check: adding an equal account twice yields
    /// two entries.
    pub fn add_account(&mut self, mut account: Account) -> &Account {
        account.set_bank(Some(self.handle()));
        self.accounts.push(account);
        &self.accounts[self.accounts.len() - 1]
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    /// First account (in insertion order) whose owner matches, ignoring case
    pub fn find_by_owner(&self, owner: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.owned_by(owner))
    }

    /// Sum of all set balances
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().filter_map(Account::balance).sum()
    }

    /// Debit a registered account
    pub fn debit_account(&mut self, id: Uuid, amount: Decimal) -> Result<()> {
        let idx = self.index_of(id)?;
        self.accounts[idx].debit(amount)
    }

    /// Credit a registered account
    pub fn credit_account(&mut self, id: Uuid, amount: Decimal) -> Result<()> {
        let idx = self.index_of(id)?;
        self.accounts[idx].credit(amount)
    }

    /// Move `amount` from `source` to `destination`
    ///
    /// The source is debited first; if that fails the error is returned and
    /// the destination is never credited. A destination without a balance
    /// is rejected before the source is touched.
    pub fn transfer(
        &self,
        source: &mut Account,
        destination: &mut Account,
        amount: Decimal,
    ) -> Result<()> {
        move_funds(source, destination, amount)
    }

    /// Transfer between two accounts held by this bank
    ///
    /// Transferring an account to itself still requires sufficient funds.
    pub fn transfer_between(&mut self, from: Uuid, to: Uuid, amount: Decimal) -> Result<()> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;

        if from_idx == to_idx {
            let account = &mut self.accounts[from_idx];
            account.debit(amount)?;
            return account.credit(amount);
        }

        let (source, destination) = pair_mut(&mut self.accounts, from_idx, to_idx);
        move_funds(source, destination, amount)
    }

    fn index_of(&self, id: Uuid) -> Result<usize> {
        self.accounts
            .iter()
            .position(|a| a.id() == id)
            .ok_or(Error::AccountNotFound(id))
    }
}

/// Debit `source` then credit `destination`, failing before either leg when
/// the destination has no balance
pub(crate) fn move_funds(
    source: &mut Account,
    destination: &mut Account,
    amount: Decimal,
) -> Result<()> {
    if destination.balance().is_none() {
        return Err(Error::BalanceNotSet);
    }
    source.debit(amount)?;
    destination.credit(amount)
}

/// Borrow two distinct slice elements mutably
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
