use std::fmt;
use std::str::FromStr;

use super::{Record, RecordId};

/// How a new record's id is derived from the rows already in the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IdPolicy {
    /// The number of rows before insertion. Ids repeat once a delete is
    /// followed by an add; this is the historical behavior of the file format.
    #[default]
    RowCount,
    /// One past the largest numeric id in the file, or 0 for an empty ledger.
    NextAfterMax,
}

impl IdPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPolicy::RowCount => "row-count",
            IdPolicy::NextAfterMax => "next-after-max",
        }
    }

    /// Id for a record appended after `existing`.
    pub fn next_id(&self, existing: &[Record]) -> RecordId {
        match self {
            IdPolicy::RowCount => existing.len() as RecordId,
            IdPolicy::NextAfterMax => existing
                .iter()
                .filter_map(Record::id_value)
                .max()
                .map_or(0, |max| max.saturating_add(1)),
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IdPolicy {
    type Err = ParseIdPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "row-count" => Ok(IdPolicy::RowCount),
            "next-after-max" => Ok(IdPolicy::NextAfterMax),
            _ => Err(ParseIdPolicyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdPolicyError(String);

impl fmt::Display for ParseIdPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown id policy '{}' (expected row-count or next-after-max)",
            self.0
        )
    }
}

impl std::error::Error for ParseIdPolicyError {}
