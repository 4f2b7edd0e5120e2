//! Thread-safe account handles
//!
//! The domain model is single-threaded. `SharedAccount` wraps an account in
//! `Arc<Mutex<_>>` for callers that need concurrent access; transfers lock
//! both sides in ascending account id order so two opposing transfers can
//! never deadlock.

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{move_funds, Account};

/// Cloneable, lockable handle to an account
#[derive(Debug, Clone)]
pub struct SharedAccount {
    id: Uuid,
    inner: Arc<Mutex<Account>>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        Self {
            id: account.id(),
            inner: Arc::new(Mutex::new(account)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Account>> {
        self.inner
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))
    }

    // Ties on id (two handles built from clones of one account) fall back
    // to the allocation address.
    fn lock_order(&self) -> (Uuid, usize) {
        (self.id, Arc::as_ptr(&self.inner) as usize)
    }

    /// Current balance, read under the lock
    pub fn balance(&self) -> Result<Option<Decimal>> {
        Ok(self.lock()?.balance())
    }

    pub fn debit(&self, amount: Decimal) -> Result<()> {
        self.lock()?.debit(amount)
    }

    pub fn credit(&self, amount: Decimal) -> Result<()> {
        self.lock()?.credit(amount)
    }

    /// Snapshot of the wrapped account
    pub fn snapshot(&self) -> Result<Account> {
        Ok(self.lock()?.clone())
    }
}

impl From<Account> for SharedAccount {
    fn from(account: Account) -> Self {
        Self::new(account)
    }
}

/// Debit `source` and credit `destination` while holding both locks
///
/// Same contract as [`crate::domain::Bank::transfer`]: a failed debit, or a
/// destination without a balance, leaves both balances untouched.
pub fn transfer_shared(
    source: &SharedAccount,
    destination: &SharedAccount,
    amount: Decimal,
) -> Result<()> {
    if Arc::ptr_eq(&source.inner, &destination.inner) {
        let mut account = source.lock()?;
        account.debit(amount)?;
        return account.credit(amount);
    }

    let (mut src, mut dst) = if source.lock_order() <= destination.lock_order() {
        let src = source.lock()?;
        let dst = destination.lock()?;
        (src, dst)
    } else {
        let dst = destination.lock()?;
        let src = source.lock()?;
        (src, dst)
    };

    move_funds(&mut src, &mut dst, amount)
}
