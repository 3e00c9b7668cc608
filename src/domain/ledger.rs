use std::collections::HashMap;

use super::{month_key, Amount, Record, RecordId, FIELD_COUNT};

/// How a single row contributes to a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTally {
    /// Row is in range and its amount was added to the total.
    Counted(Amount),
    /// Row is outside the requested month.
    Filtered,
    /// Row is in range but its amount has no integer value.
    Unparsable,
}

/// Classify a row against an optional month filter (already zero padded).
pub fn tally_row(record: &Record, month_key: Option<&str>) -> RowTally {
    if let Some(key) = month_key {
        if record.month_segment() != Some(key) {
            return RowTally::Filtered;
        }
    }
    match record.amount_value() {
        Some(amount) => RowTally::Counted(amount),
        None => RowTally::Unparsable,
    }
}

/// Total spend, optionally restricted to one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub month: Option<u32>,
    pub total: Amount,
    /// Rows whose amount was added to the total
    pub counted: usize,
    /// Rows in range that were left out because the amount did not parse
    pub skipped: usize,
}

impl Summary {
    /// The month as the user gave it, or "all".
    pub fn label(&self) -> String {
        self.month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "all".to_string())
    }
}

/// Sum the amounts of every row matching `month`.
pub fn summarize(records: &[Record], month: Option<u32>) -> Summary {
    let key = month.map(month_key);
    records.iter().fold(
        Summary {
            month,
            total: 0,
            counted: 0,
            skipped: 0,
        },
        |mut summary, record| {
            match tally_row(record, key.as_deref()) {
                RowTally::Counted(amount) => {
                    summary.total = summary.total.saturating_add(amount);
                    summary.counted += 1;
                }
                RowTally::Unparsable => summary.skipped += 1,
                RowTally::Filtered => {}
            }
            summary
        },
    )
}

/// Result of removing records by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// This many rows carried the id and were removed.
    Removed(usize),
    /// No row carried the id; the ledger is unchanged.
    NoMatch,
}

impl DeleteOutcome {
    pub fn removed(&self) -> usize {
        match self {
            DeleteOutcome::Removed(count) => *count,
            DeleteOutcome::NoMatch => 0,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, DeleteOutcome::Removed(_))
    }
}

/// Drop every row whose id text matches `id`, returning what was removed.
pub fn remove_by_id<R: AsRef<Record>>(records: &mut Vec<R>, id: RecordId) -> DeleteOutcome {
    let before = records.len();
    records.retain(|record| !record.as_ref().has_id(id));
    match before - records.len() {
        0 => DeleteOutcome::NoMatch,
        removed => DeleteOutcome::Removed(removed),
    }
}

/// Problems found in a single row. Line numbers are 1-based positions among
/// the parsed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    FieldCount { line: usize, found: usize },
    InvalidId { line: usize, id: String },
    InvalidDate { line: usize, date: String },
    UnparsableAmount { line: usize, amount: String },
    DuplicateId { id: String, lines: Vec<usize> },
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowIssue::FieldCount { line, found } => write!(
                f,
                "line {}: expected {} fields, found {}",
                line, FIELD_COUNT, found
            ),
            RowIssue::InvalidId { line, id } => write!(f, "line {}: invalid id '{}'", line, id),
            RowIssue::InvalidDate { line, date } => {
                write!(f, "line {}: invalid date '{}'", line, date)
            }
            RowIssue::UnparsableAmount { line, amount } => {
                write!(f, "line {}: amount '{}' is not a number", line, amount)
            }
            RowIssue::DuplicateId { id, lines } => {
                let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
                write!(f, "id {} is used on lines {}", id, lines.join(", "))
            }
        }
    }
}

/// Ledger health as seen by the `check` command.
#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    pub record_count: usize,
    pub total: Amount,
    pub issues: Vec<RowIssue>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn duplicate_ids(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().filter_map(|issue| match issue {
            RowIssue::DuplicateId { id, .. } => Some(id.as_str()),
            _ => None,
        })
    }
}

/// Inspect rows together with the number of fields each one had on disk.
pub fn build_integrity_report(rows: &[(Record, usize)]) -> IntegrityReport {
    let mut issues = Vec::new();
    let mut lines_by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    let mut total: Amount = 0;

    for (index, (record, field_count)) in rows.iter().enumerate() {
        let line = index + 1;

        if *field_count != FIELD_COUNT {
            issues.push(RowIssue::FieldCount {
                line,
                found: *field_count,
            });
        }
        if record.id_value().is_none() {
            issues.push(RowIssue::InvalidId {
                line,
                id: record.id.clone(),
            });
        }
        if record.parsed_date().is_none() {
            issues.push(RowIssue::InvalidDate {
                line,
                date: record.date.clone(),
            });
        }
        match record.amount_value() {
            Some(amount) => total = total.saturating_add(amount),
            None => issues.push(RowIssue::UnparsableAmount {
                line,
                amount: record.amount.clone(),
            }),
        }

        let lines = lines_by_id.entry(record.id.as_str()).or_default();
        if lines.is_empty() {
            order.push(record.id.as_str());
        }
        lines.push(line);
    }

    for id in order {
        let lines = &lines_by_id[id];
        if lines.len() > 1 {
            issues.push(RowIssue::DuplicateId {
                id: id.to_string(),
                lines: lines.clone(),
            });
        }
    }

    IntegrityReport {
        record_count: rows.len(),
        total,
        issues,
    }
}
