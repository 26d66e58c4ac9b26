use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    AccountOpened,
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionKind::AccountOpened => "Account Opened",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::TransferOut => "Transfer Out",
            TransactionKind::TransferIn => "Transfer In",
        };
        f.write_str(name)
    }
}

/// One balance-affecting event in an account's log.
///
/// Records are never mutated once built; `balance_after` is the owning
/// account's balance right after the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
    timestamp: NaiveDateTime,
    note: String,
}

impl TransactionRecord {
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        balance_after: Decimal,
        timestamp: NaiveDateTime,
        note: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            balance_after,
            timestamp,
            note: note.into(),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {:.2} | Balance: {:.2} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.kind,
            self.amount.round_dp(2),
            self.balance_after.round_dp(2),
            self.note
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::dec;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(hour, minute, 42)
            .unwrap()
    }

    #[test]
    fn renders_statement_line() {
        let record = TransactionRecord::new(
            TransactionKind::TransferOut,
            dec!(100),
            dec!(900.5),
            at(9, 5),
            "To 1002",
        );
        assert_eq!(
            record.to_string(),
            "2024-03-09 09:05 | Transfer Out | 100.00 | Balance: 900.50 | To 1002"
        );
    }

    #[test]
    fn renders_empty_note() {
        let record = TransactionRecord::new(
            TransactionKind::AccountOpened,
            dec!(0),
            dec!(0),
            at(23, 59),
            "",
        );
        assert_eq!(
            record.to_string(),
            "2024-03-09 23:59 | Account Opened | 0.00 | Balance: 0.00 | "
        );
    }
}
