use std::io::Read;

use anyhow::{Context, Result};
use csv::Trim;

use crate::ledger::SeedAccount;

/// Reads seed accounts from CSV with an `account,pin,balance` header.
pub fn read_seed<R>(source: R) -> Result<Vec<SeedAccount>>
where
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(source);

    let mut iter = reader.deserialize::<SeedAccount>();
    let mut seed = Vec::new();
    loop {
        let line = iter.reader().position().line();
        let Some(row) = iter.next() else {
            break;
        };
        seed.push(row.with_context(|| format!("Invalid seed account at line {line}"))?);
    }
    Ok(seed)
}
