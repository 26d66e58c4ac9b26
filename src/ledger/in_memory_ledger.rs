use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    account::Account,
    clock::Clock,
    transaction::{TransactionKind, TransactionRecord},
};

use super::{AccountId, Ledger, LedgerError, SeedAccount};

/// Ledger whose account set is fixed at construction.
///
/// The map is never mutated afterwards, so lookups need no lock of their own;
/// all mutual exclusion lives inside each [`Account`].
pub struct InMemoryLedger {
    accounts: HashMap<AccountId, Arc<Account>>,
}

impl InMemoryLedger {
    pub fn new(
        seed: impl IntoIterator<Item = SeedAccount>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        let mut accounts = HashMap::new();
        for SeedAccount {
            account,
            pin,
            balance,
        } in seed
        {
            match accounts.entry(account) {
                Entry::Occupied(entry) => {
                    return Err(LedgerError::DuplicateAccount(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    let acc = Account::open(entry.key().clone(), pin, balance, clock.clone())?;
                    entry.insert(Arc::new(acc));
                }
            }
        }
        debug!(accounts = accounts.len(), "ledger opened");
        Ok(Self { accounts })
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Arc<Account>> {
        self.accounts.values()
    }

    fn get(&self, account_id: &str) -> Result<&Arc<Account>, LedgerError> {
        self.accounts
            .get(account_id)
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_owned()))
    }
}

impl Ledger for InMemoryLedger {
    fn lookup(&self, account_id: &str) -> Option<Arc<Account>> {
        self.accounts.get(account_id).cloned()
    }

    fn authenticate(&self, account_id: &str, pin: &str) -> Result<Arc<Account>, LedgerError> {
        match self.accounts.get(account_id) {
            Some(acc) if acc.check_pin(pin) => {
                info!(account = account_id, "login");
                Ok(acc.clone())
            }
            _ => {
                warn!(account = account_id, "failed login");
                Err(LedgerError::AuthFailure)
            }
        }
    }

    fn transfer(
        &self,
        source_id: &str,
        dest_id: &str,
        amount: Decimal,
    ) -> Result<TransactionRecord, LedgerError> {
        if source_id == dest_id {
            warn!(account = source_id, "self transfer rejected");
            return Err(LedgerError::InvalidTransfer);
        }
        let source = self.get(source_id)?;
        let dest = self.get(dest_id)?;

        // both locks, always in ascending id order, so opposite transfers can't deadlock
        let (mut source_state, mut dest_state) = if source.id() < dest.id() {
            let source_state = source.lock_state();
            (source_state, dest.lock_state())
        } else {
            let dest_state = dest.lock_state();
            (source.lock_state(), dest_state)
        };

        // nothing is mutated until both legs are known to succeed
        dest_state.check_add_funds(amount)?;
        source_state.take_funds(amount)?;
        dest_state.add_funds(amount)?;

        let now = source.now();
        let source_balance = source_state.balance();
        let dest_balance = dest_state.balance();
        let out = source_state
            .append_transaction(TransactionRecord::new(
                TransactionKind::TransferOut,
                amount,
                source_balance,
                now,
                format!("To {dest_id}"),
            ))
            .clone();
        dest_state.append_transaction(TransactionRecord::new(
            TransactionKind::TransferIn,
            amount,
            dest_balance,
            now,
            format!("From {source_id}"),
        ));
        debug!(from = source_id, to = dest_id, %amount, "transfer");
        Ok(out)
    }
}
