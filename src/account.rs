use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    clock::Clock,
    ledger::AccountId,
    transaction::{TransactionKind, TransactionRecord},
};

pub const MIN_PIN_LENGTH: usize = 4;

/// Money is kept in whole cents.
pub const MONEY_SCALE: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be positive, in whole cents")]
    InvalidAmount,
    #[error("Amount would exceed the largest balance an account can hold")]
    BalanceOverflow,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("PIN must be at least {} digits", MIN_PIN_LENGTH)]
    InvalidPin,
}

/// Everything guarded by the per-account lock.
#[derive(Debug)]
pub(crate) struct AccountState {
    pin: String,
    balance: Decimal,
    transactions: Vec<TransactionRecord>,
}

impl AccountState {
    pub(crate) fn balance(&self) -> Decimal {
        self.balance
    }

    /// The balance `amount` would produce, without applying it.
    pub(crate) fn check_add_funds(&self, amount: Decimal) -> Result<Decimal, AccountError> {
        validate_amount(amount)?;
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)
    }

    pub(crate) fn add_funds(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.balance = self.check_add_funds(amount)?;
        Ok(())
    }

    pub(crate) fn take_funds(&mut self, amount: Decimal) -> Result<(), AccountError> {
        validate_amount(amount)?;
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Appends a pre-built record. The caller must hold the lock across the
    /// balance change and the append so `balance_after` stays truthful.
    pub(crate) fn append_transaction(&mut self, record: TransactionRecord) -> &TransactionRecord {
        // keep the log's timestamps non-decreasing even if the wall clock steps back
        let record = match self.transactions.last() {
            Some(last) if last.timestamp() > record.timestamp() => TransactionRecord::new(
                record.kind(),
                record.amount(),
                record.balance_after(),
                last.timestamp(),
                record.note(),
            ),
            _ => record,
        };
        self.transactions.push(record);
        &self.transactions[self.transactions.len() - 1]
    }
}

fn validate_amount(amount: Decimal) -> Result<(), AccountError> {
    if amount > Decimal::ZERO && amount.normalize().scale() <= MONEY_SCALE {
        Ok(())
    } else {
        Err(AccountError::InvalidAmount)
    }
}

fn validate_pin(pin: &str) -> Result<(), AccountError> {
    if pin.chars().count() >= MIN_PIN_LENGTH {
        Ok(())
    } else {
        Err(AccountError::InvalidPin)
    }
}

pub struct Account {
    id: AccountId,
    state: Mutex<AccountState>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Account {
    // never print the PIN
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("balance", &self.balance())
            .finish_non_exhaustive()
    }
}

impl Account {
    /// Opens an account and seeds its log with an `AccountOpened` record.
    pub fn open(
        id: impl Into<AccountId>,
        pin: impl Into<String>,
        initial_balance: Decimal,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AccountError> {
        let pin = pin.into();
        validate_pin(&pin)?;
        if initial_balance < Decimal::ZERO || initial_balance.normalize().scale() > MONEY_SCALE {
            return Err(AccountError::InvalidAmount);
        }
        let opened = TransactionRecord::new(
            TransactionKind::AccountOpened,
            initial_balance,
            initial_balance,
            clock.now(),
            "",
        );
        Ok(Self {
            id: id.into(),
            state: Mutex::new(AccountState {
                pin,
                balance: initial_balance,
                transactions: vec![opened],
            }),
            clock,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> Decimal {
        self.state.lock().balance
    }

    pub fn check_pin(&self, candidate: &str) -> bool {
        self.state.lock().pin == candidate
    }

    pub fn deposit(&self, amount: Decimal) -> Result<TransactionRecord, AccountError> {
        let mut state = self.state.lock();
        state.add_funds(amount)?;
        let record = TransactionRecord::new(
            TransactionKind::Deposit,
            amount,
            state.balance,
            self.clock.now(),
            "",
        );
        let record = state.append_transaction(record).clone();
        debug!(account = %self.id, %amount, balance = %record.balance_after(), "deposit");
        Ok(record)
    }

    pub fn withdraw(&self, amount: Decimal) -> Result<TransactionRecord, AccountError> {
        let mut state = self.state.lock();
        state.take_funds(amount)?;
        let record = TransactionRecord::new(
            TransactionKind::Withdrawal,
            amount,
            state.balance,
            self.clock.now(),
            "",
        );
        let record = state.append_transaction(record).clone();
        debug!(account = %self.id, %amount, balance = %record.balance_after(), "withdrawal");
        Ok(record)
    }

    /// The last `max_items` records, oldest first.
    pub fn mini_statement(&self, max_items: usize) -> Vec<TransactionRecord> {
        let state = self.state.lock();
        let from = state.transactions.len().saturating_sub(max_items);
        state.transactions[from..].to_vec()
    }

    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.state.lock().transactions.clone()
    }

    pub fn change_pin(&self, new_pin: &str) -> Result<(), AccountError> {
        validate_pin(new_pin)?;
        self.state.lock().pin = new_pin.to_owned();
        debug!(account = %self.id, "pin changed");
        Ok(())
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock()
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
