// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use expense_ledger::{IdPolicy, LedgerConfig, LedgerStore};
use tempfile::TempDir;

/// Helper to create a store over a ledger file in a fresh temporary directory.
/// The file itself does not exist yet.
pub fn test_store() -> (LedgerStore, TempDir) {
    test_store_with_policy(IdPolicy::RowCount)
}

pub fn test_store_with_policy(policy: IdPolicy) -> (LedgerStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = LedgerConfig::new(temp_dir.path().join("expenses.csv")).with_id_policy(policy);
    (LedgerStore::new(config), temp_dir)
}

/// Path of the ledger file inside a temp dir created by `test_store`.
pub fn ledger_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.csv")
}

/// Raw file contents, for asserting on-disk shape.
pub fn ledger_text(temp_dir: &TempDir) -> String {
    fs::read_to_string(ledger_path(temp_dir)).unwrap()
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}
