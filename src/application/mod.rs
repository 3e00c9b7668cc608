// Application layer - the ledger store and its configuration.
// Every client (CLI, tests, other tools) goes through `LedgerStore`.

pub mod config;
pub mod error;
pub mod service;

pub use config::*;
pub use error::*;
pub use service::*;
