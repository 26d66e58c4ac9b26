use std::sync::Arc;

use rust_decimal::{Decimal, dec};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{Account, AccountError},
    transaction::TransactionRecord,
};

pub mod in_memory_ledger;

pub type AccountId = String;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error("No such account: {0}")]
    AccountNotFound(AccountId),
    // deliberately silent about which of the two was wrong
    #[error("Invalid account number or PIN")]
    AuthFailure,
    #[error("Cannot transfer to the same account")]
    InvalidTransfer,
    #[error("Account {0} is defined more than once")]
    DuplicateAccount(AccountId),
}

/// Initial contents of a ledger.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SeedAccount {
    pub account: AccountId,
    pub pin: String,
    pub balance: Decimal,
}

impl SeedAccount {
    pub fn new(account: &str, pin: &str, balance: Decimal) -> Self {
        Self {
            account: account.to_owned(),
            pin: pin.to_owned(),
            balance,
        }
    }
}

/// Accounts available when no seed file is given.
pub fn default_seed() -> Vec<SeedAccount> {
    vec![
        SeedAccount::new("1001", "1234", dec!(1000.00)),
        SeedAccount::new("1002", "2222", dec!(500.00)),
        SeedAccount::new("1003", "3333", dec!(2000.00)),
    ]
}

/// Account directory.
///
/// Only the in-memory flavour exists, but session handling and the driver
/// are written against this trait.
pub trait Ledger {
    fn lookup(&self, account_id: &str) -> Option<Arc<Account>>;

    /// Unknown accounts and wrong PINs both yield [`LedgerError::AuthFailure`].
    fn authenticate(&self, account_id: &str, pin: &str) -> Result<Arc<Account>, LedgerError>;

    /// Moves `amount` between two accounts as one unit and returns the
    /// `TransferOut` record written to the source.
    fn transfer(
        &self,
        source_id: &str,
        dest_id: &str,
        amount: Decimal,
    ) -> Result<TransactionRecord, LedgerError>;
}
