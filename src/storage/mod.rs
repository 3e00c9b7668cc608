pub mod codec;
mod repository;

pub use repository::*;

/// Ledger file used when no path is configured.
pub const DEFAULT_LEDGER_FILE: &str = "expenses.csv";
