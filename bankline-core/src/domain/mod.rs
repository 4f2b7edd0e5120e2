//! Core domain entities
//!
//! Accounts and banks are pure in-memory values - no I/O or external
//! dependencies beyond exact decimal arithmetic.

mod account;
mod bank;
pub mod result;

pub use account::{Account, BankRef};
pub use bank::Bank;
pub(crate) use bank::move_funds;
