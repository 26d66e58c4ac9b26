//! Text front end for the teller core: the menu loop, seed loading and
//! configuration. Kept in the library so integration tests can drive it.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use crate::{
    command::{CommandError, MenuChoice, StartChoice, parse_amount},
    ledger::{Ledger, LedgerError},
    session::Session,
};

pub mod config;
pub mod seed_parser;

#[derive(Debug, Error)]
enum ActionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

enum Step {
    Continue,
    Logout,
    EndOfInput,
}

pub struct Service<'a, L: ?Sized, R, W: 'a> {
    pub ledger: &'a L,
    pub input: R,
    pub output: &'a mut W,
    pub statement_size: usize,
}

impl<'a, L, R, W> Service<'a, L, R, W>
where
    L: Ledger + ?Sized,
    R: BufRead,
    W: Write + 'a,
{
    /// Runs until the user exits or the input is exhausted.
    pub fn run(mut self) -> Result<()> {
        writeln!(self.output, "=== Welcome to Simple ATM ===")?;
        loop {
            writeln!(self.output, "\n1) Login  2) Exit")?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            match choice.parse::<StartChoice>() {
                Ok(StartChoice::Login) => {
                    let Some(session) = self.login()? else {
                        continue;
                    };
                    if let Step::EndOfInput = self.user_menu(&session)? {
                        break;
                    }
                }
                Ok(StartChoice::Exit) => {
                    writeln!(self.output, "Thank you for using Simple ATM. Goodbye!")?;
                    break;
                }
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn login(&mut self) -> Result<Option<Session<'a, L>>> {
        let Some(account_id) = self.prompt("Account number: ")? else {
            return Ok(None);
        };
        let Some(pin) = self.prompt("PIN: ")? else {
            return Ok(None);
        };
        match Session::login(self.ledger, &account_id, &pin) {
            Ok(session) => {
                writeln!(self.output, "Login successful.")?;
                Ok(Some(session))
            }
            Err(err) => {
                writeln!(self.output, "{err}.")?;
                Ok(None)
            }
        }
    }

    fn user_menu(&mut self, session: &Session<'a, L>) -> Result<Step> {
        debug!(account = session.account().id(), "session started");
        loop {
            writeln!(self.output, "\n--- ATM Menu ---")?;
            writeln!(self.output, "1) Balance")?;
            writeln!(self.output, "2) Deposit")?;
            writeln!(self.output, "3) Withdraw")?;
            writeln!(self.output, "4) Transfer")?;
            writeln!(self.output, "5) Mini-Statement")?;
            writeln!(self.output, "6) Change PIN")?;
            writeln!(self.output, "7) Logout")?;
            let Some(choice) = self.prompt("Choose: ")? else {
                return Ok(Step::EndOfInput);
            };
            let step = match choice.parse::<MenuChoice>() {
                Ok(choice) => self.perform(session, choice),
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    Ok(Step::Continue)
                }
            };
            match step {
                Ok(Step::Continue) => {}
                Ok(step) => return Ok(step),
                Err(ActionError::Io(err)) => return Err(err.into()),
                Err(err) => writeln!(self.output, "Error: {err}")?,
            }
        }
    }

    fn perform(
        &mut self,
        session: &Session<'a, L>,
        choice: MenuChoice,
    ) -> Result<Step, ActionError> {
        match choice {
            MenuChoice::Balance => {
                writeln!(self.output, "Your Balance: {:.2}", session.balance().round_dp(2))?;
            }
            MenuChoice::Deposit => {
                let Some(amount) = self.prompt("Amount to deposit: ")? else {
                    return Ok(Step::EndOfInput);
                };
                session.deposit(parse_amount(&amount)?)?;
                writeln!(self.output, "Deposited successfully.")?;
            }
            MenuChoice::Withdraw => {
                let Some(amount) = self.prompt("Amount to withdraw: ")? else {
                    return Ok(Step::EndOfInput);
                };
                session.withdraw(parse_amount(&amount)?)?;
                writeln!(self.output, "Withdrawn successfully.")?;
            }
            MenuChoice::Transfer => {
                let Some(dest_id) = self.prompt("Target account number: ")? else {
                    return Ok(Step::EndOfInput);
                };
                if self.ledger.lookup(&dest_id).is_none() {
                    writeln!(self.output, "No such account.")?;
                    return Ok(Step::Continue);
                }
                let Some(amount) = self.prompt("Amount to transfer: ")? else {
                    return Ok(Step::EndOfInput);
                };
                session.transfer(&dest_id, parse_amount(&amount)?)?;
                writeln!(self.output, "Transfer successful.")?;
            }
            MenuChoice::MiniStatement => {
                writeln!(self.output, "Last transactions:")?;
                for record in session.mini_statement(self.statement_size) {
                    writeln!(self.output, "{record}")?;
                }
            }
            MenuChoice::ChangePin => {
                let Some(new_pin) = self.prompt("New PIN: ")? else {
                    return Ok(Step::EndOfInput);
                };
                session.change_pin(&new_pin)?;
                writeln!(self.output, "PIN changed successfully.")?;
            }
            MenuChoice::Logout => {
                writeln!(self.output, "Logged out.")?;
                return Ok(Step::Logout);
            }
        }
        Ok(Step::Continue)
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// `None` once the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}
