use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    account::Account,
    ledger::{Ledger, LedgerError},
    transaction::TransactionRecord,
};

/// An authenticated handle on one account.
///
/// Holding a `Session` is the only authorization the core asks for; login
/// is delegated to [`Ledger::authenticate`].
pub struct Session<'l, L: ?Sized> {
    ledger: &'l L,
    account: Arc<Account>,
}

impl<'l, L> Session<'l, L>
where
    L: Ledger + ?Sized,
{
    pub fn login(ledger: &'l L, account_id: &str, pin: &str) -> Result<Self, LedgerError> {
        let account = ledger.authenticate(account_id, pin)?;
        Ok(Self { ledger, account })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    pub fn deposit(&self, amount: Decimal) -> Result<TransactionRecord, LedgerError> {
        Ok(self.account.deposit(amount)?)
    }

    pub fn withdraw(&self, amount: Decimal) -> Result<TransactionRecord, LedgerError> {
        Ok(self.account.withdraw(amount)?)
    }

    pub fn transfer(&self, dest_id: &str, amount: Decimal) -> Result<TransactionRecord, LedgerError> {
        self.ledger.transfer(self.account.id(), dest_id, amount)
    }

    pub fn mini_statement(&self, max_items: usize) -> Vec<TransactionRecord> {
        self.account.mini_statement(max_items)
    }

    pub fn change_pin(&self, new_pin: &str) -> Result<(), LedgerError> {
        Ok(self.account.change_pin(new_pin)?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use crate::{
        account::AccountError,
        clock::SystemClock,
        ledger::{default_seed, in_memory_ledger::InMemoryLedger},
        transaction::TransactionKind,
    };

    use super::*;

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(default_seed(), Arc::new(SystemClock)).unwrap()
    }

    #[test]
    fn login_and_operate() {
        let ledger = ledger();
        let session = Session::login(&ledger, "1002", "2222").unwrap();
        assert_eq!(session.account().id(), "1002");
        assert_eq!(session.balance(), dec!(500));

        session.deposit(dec!(50)).unwrap();
        session.withdraw(dec!(25)).unwrap();
        let out = session.transfer("1003", dec!(25)).unwrap();
        assert_eq!(out.balance_after(), dec!(500));
        assert_eq!(ledger.lookup("1003").unwrap().balance(), dec!(2025));

        let kinds: Vec<_> = session
            .mini_statement(5)
            .iter()
            .map(TransactionRecord::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::AccountOpened,
                TransactionKind::Deposit,
                TransactionKind::Withdrawal,
                TransactionKind::TransferOut,
            ]
        );
    }

    #[test]
    fn login_failures_are_generic() {
        let ledger = ledger();
        assert!(matches!(
            Session::login(&ledger, "1002", "1234"),
            Err(LedgerError::AuthFailure)
        ));
        assert!(matches!(
            Session::login(&ledger, "", "2222"),
            Err(LedgerError::AuthFailure)
        ));
    }

    #[test]
    fn rejected_pin_change_keeps_old_pin() {
        let ledger = ledger();
        let session = Session::login(&ledger, "1001", "1234").unwrap();
        let err = session.change_pin("123").unwrap_err();
        assert_eq!(err, LedgerError::AccountErr(AccountError::InvalidPin));
        assert!(Session::login(&ledger, "1001", "1234").is_ok());

        session.change_pin("4321").unwrap();
        assert!(Session::login(&ledger, "1001", "1234").is_err());
        assert!(Session::login(&ledger, "1001", "4321").is_ok());
    }

    #[test]
    fn works_through_a_trait_object() {
        let ledger = ledger();
        let dyn_ledger: &dyn Ledger = &ledger;
        let session = Session::login(dyn_ledger, "1003", "3333").unwrap();
        session.transfer("1001", dec!(0.5)).unwrap();
        assert_eq!(session.balance(), dec!(1999.5));
    }
}
