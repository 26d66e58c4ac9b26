use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    Login,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Balance,
    Deposit,
    Withdraw,
    Transfer,
    MiniStatement,
    ChangePin,
    Logout,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid choice.")]
    UnknownChoice,
    #[error("Invalid option.")]
    UnknownOption,
    #[error("Amount is required")]
    AmountRequired,
    #[error("`{0}` is not a valid amount")]
    MalformedAmount(String),
}

impl FromStr for StartChoice {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Login),
            "2" => Ok(Self::Exit),
            _ => Err(CommandError::UnknownChoice),
        }
    }
}

impl FromStr for MenuChoice {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Balance),
            "2" => Ok(Self::Deposit),
            "3" => Ok(Self::Withdraw),
            "4" => Ok(Self::Transfer),
            "5" => Ok(Self::MiniStatement),
            "6" => Ok(Self::ChangePin),
            "7" => Ok(Self::Logout),
            _ => Err(CommandError::UnknownOption),
        }
    }
}

/// Parses a user-typed amount. Sign and zero checks belong to the account.
pub fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CommandError::AmountRequired);
    }
    Decimal::from_str(input).map_err(|_| CommandError::MalformedAmount(input.to_owned()))
}
