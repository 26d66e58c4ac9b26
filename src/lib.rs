/// Immutable records that make up each account's history.
pub mod transaction;

/// Injectable time source for transaction timestamps.
pub mod clock;

/// Balance, PIN and history of a single account, guarded by its own lock.
pub mod account;

/// Account directory interface, plus "in memory" implementation.
/// Owns the accounts and orchestrates transfers between two of them.
pub mod ledger;

/// Authenticated handle the front end works through.
pub mod session;

/// Parsing of what the user typed into menu choices and amounts.
pub mod command;

/// The text menu, seed loading and configuration. Lives here rather than in
/// the binary so integration tests can drive it.
pub mod bin_utils;
