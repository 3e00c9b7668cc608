use std::fmt::Display;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::domain::{
    build_integrity_report, remove_by_id, summarize, DeleteOutcome, IdPolicy, IntegrityReport,
    Record, RecordId, Summary,
};
use crate::storage::{codec, Repository};

use super::{LedgerConfig, LedgerError};

/// The expense ledger backed by a single file.
/// This is the primary interface for any client (CLI, tests, other tools).
///
/// Every operation reads the whole file and writes it at most once. There is
/// no locking: two processes working on the same file can lose updates or
/// hand out the same id.
pub struct LedgerStore {
    repo: Repository,
    id_policy: IdPolicy,
}

impl LedgerStore {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            repo: Repository::new(config.path),
            id_policy: config.id_policy,
        }
    }

    /// Open the ledger at `path` with the default id policy.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(LedgerConfig::new(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Record an expense dated today (UTC) and return its id.
    pub fn add(&self, description: &str, amount: impl Display) -> Result<RecordId, LedgerError> {
        self.add_on(description, amount, Utc::now().date_naive())
    }

    /// Record an expense with an explicit date and return its id.
    ///
    /// The amount is stored exactly as rendered; it is not checked here beyond
    /// rejecting line breaks, which would split the row.
    pub fn add_on(
        &self,
        description: &str,
        amount: impl Display,
        date: NaiveDate,
    ) -> Result<RecordId, LedgerError> {
        let amount = amount.to_string();
        reject_line_breaks("description", description)?;
        reject_line_breaks("amount", &amount)?;

        let text = match self.repo.read()? {
            Some(text) => text,
            None => {
                self.repo.create_if_missing()?;
                debug!(path = %self.repo.path().display(), "created ledger file");
                String::new()
            }
        };

        let existing = codec::decode(&text)?;
        let id = self.id_policy.next_id(&existing);
        if existing.iter().any(|record| record.has_id(id)) {
            warn!(id, policy = %self.id_policy, "assigned id is already used by another record");
        }

        let record = Record::new(id, date, description, amount);
        let mut bytes = Vec::new();
        // Rewritten ledgers have no trailing newline.
        if !text.is_empty() && !text.ends_with('\n') {
            bytes.push(b'\n');
        }
        bytes.extend(codec::encode_row(&record)?);
        self.repo.append(&bytes)?;

        debug!(id, date = %record.date, "added expense");
        Ok(id)
    }

    /// All records in file order. A missing or blank file yields no records.
    pub fn list(&self) -> Result<Vec<Record>, LedgerError> {
        match self.repo.read()? {
            Some(text) => Ok(codec::decode(&text)?),
            None => Ok(Vec::new()),
        }
    }

    /// Remove every record whose id is exactly `id`.
    ///
    /// Ids are compared as text, so a hand-edited `07` is not id 7. The file is
    /// only rewritten when a row was removed, and surviving rows are written
    /// back as their original line text. Removing the last row leaves an empty
    /// file.
    pub fn delete(&self, id: RecordId) -> Result<DeleteOutcome, LedgerError> {
        let Some(text) = self.repo.read()? else {
            debug!(id, "no ledger file, nothing to delete");
            return Ok(DeleteOutcome::NoMatch);
        };

        let mut rows = codec::decode_rows(&text)?;
        let outcome = remove_by_id(&mut rows, id);
        if outcome.is_applied() {
            self.repo.write(&codec::join_lines(&rows))?;
        }

        debug!(id, removed = outcome.removed(), remaining = rows.len(), "delete finished");
        Ok(outcome)
    }

    /// Total of all amounts, or of the amounts dated in `month`.
    ///
    /// Amounts without an integer value are skipped and counted in
    /// `Summary::skipped`. Months outside 1-12 match nothing.
    pub fn summary(&self, month: Option<u32>) -> Result<Summary, LedgerError> {
        let records = self.list()?;
        let summary = summarize(&records, month);
        debug!(
            month = %summary.label(),
            total = summary.total,
            counted = summary.counted,
            skipped = summary.skipped,
            "computed summary"
        );
        Ok(summary)
    }

    /// Inspect every row for shape, id, date and amount problems.
    pub fn check(&self) -> Result<IntegrityReport, LedgerError> {
        let rows: Vec<(Record, usize)> = match self.repo.read()? {
            Some(text) => codec::decode_rows(&text)?
                .into_iter()
                .map(|row| (row.record, row.field_count))
                .collect(),
            None => Vec::new(),
        };
        Ok(build_integrity_report(&rows))
    }
}

fn reject_line_breaks(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if value.contains(['\n', '\r']) {
        return Err(LedgerError::LineBreak {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
