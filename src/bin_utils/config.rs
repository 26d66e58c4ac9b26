use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};

use crate::ledger::{SeedAccount, default_seed};

use super::seed_parser::read_seed;

pub const SEED_FILE_VAR: &str = "ATM_SEED_FILE";
pub const STATEMENT_SIZE_VAR: &str = "ATM_STATEMENT_SIZE";
pub const DEFAULT_STATEMENT_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtmConfig {
    /// CSV file with the starting accounts; the built-in accounts when absent.
    pub seed_file: Option<PathBuf>,
    /// How many records a mini-statement shows.
    pub statement_size: usize,
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            statement_size: DEFAULT_STATEMENT_SIZE,
        }
    }
}

impl AtmConfig {
    /// The first argument wins over `ATM_SEED_FILE`.
    pub fn from_env(mut args: impl Iterator<Item = String>) -> Result<Self> {
        Self::from_sources(
            args.next(),
            std::env::var(SEED_FILE_VAR).ok(),
            std::env::var(STATEMENT_SIZE_VAR).ok(),
        )
    }

    fn from_sources(
        seed_arg: Option<String>,
        seed_var: Option<String>,
        statement_size_var: Option<String>,
    ) -> Result<Self> {
        let seed_file = seed_arg
            .or(seed_var)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let statement_size = match statement_size_var {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("{STATEMENT_SIZE_VAR} must be a count, got `{value}`"))?,
            None => DEFAULT_STATEMENT_SIZE,
        };
        Ok(Self {
            seed_file,
            statement_size,
        })
    }

    pub fn load_seed(&self) -> Result<Vec<SeedAccount>> {
        let Some(path) = &self.seed_file else {
            return Ok(default_seed());
        };
        let file =
            File::open(path).with_context(|| format!("Failed to open `{}`", path.display()))?;
        read_seed(file).with_context(|| format!("Failed to read seed from `{}`", path.display()))
    }
}
