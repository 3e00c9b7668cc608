use std::path::PathBuf;

use crate::domain::IdPolicy;
use crate::storage::DEFAULT_LEDGER_FILE;

/// Where the ledger lives and how new ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub path: PathBuf,
    pub id_policy: IdPolicy,
}

impl LedgerConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            id_policy: IdPolicy::default(),
        }
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.path, PathBuf::from("expenses.csv"));
        assert_eq!(config.id_policy, IdPolicy::RowCount);
    }

    #[test]
    fn test_with_id_policy() {
        let config = LedgerConfig::new("/tmp/ledger.csv").with_id_policy(IdPolicy::NextAfterMax);
        assert_eq!(config.id_policy, IdPolicy::NextAfterMax);
    }
}
