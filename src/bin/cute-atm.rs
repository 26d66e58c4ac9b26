use std::sync::Arc;

use anyhow::{Context, Result};
use cute_atm::{
    bin_utils::{Service, config::AtmConfig},
    clock::SystemClock,
    ledger::in_memory_ledger::InMemoryLedger,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout belongs to the menu
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AtmConfig::from_env(std::env::args().skip(1))?;
    let seed = config.load_seed()?;
    let ledger =
        InMemoryLedger::new(seed, Arc::new(SystemClock)).context("Failed to open the ledger")?;

    let service = Service {
        ledger: &ledger,
        input: std::io::stdin().lock(),
        output: &mut std::io::stdout(),
        statement_size: config.statement_size,
    };
    service.run()
}
