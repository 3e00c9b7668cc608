use chrono::NaiveDate;
use serde::Serialize;

use super::{parse_amount, Amount};

/// Identifier assigned to a record when it is added.
pub type RecordId = u64;

/// Calendar date format used in the ledger file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of fields in a well-formed row.
pub const FIELD_COUNT: usize = 4;

/// A single expense entry, exactly as it reads from the ledger file.
///
/// Fields are kept as text: rows are never validated on read, so a hand-edited
/// or truncated line still comes back and can be listed. Use the accessors to
/// interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: String,
}

impl Record {
    /// Create a record for a freshly assigned id.
    pub fn new(
        id: RecordId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            description: description.into(),
            amount: amount.into(),
        }
    }

    /// Build a record from raw row fields. Missing fields read as empty,
    /// extra fields are dropped.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default().to_string();
        Self {
            id: next(),
            date: next(),
            description: next(),
            amount: next(),
        }
    }

    /// True when the stored id is exactly the canonical text of `id`.
    pub fn has_id(&self, id: RecordId) -> bool {
        self.id == id.to_string()
    }

    /// Numeric id, if the stored text is one.
    pub fn id_value(&self) -> Option<RecordId> {
        self.id.parse().ok()
    }

    /// Integer part of the stored amount.
    pub fn amount_value(&self) -> Option<Amount> {
        parse_amount(&self.amount)
    }

    /// Second `-`-separated segment of the date, e.g. "03" for "2024-03-15".
    pub fn month_segment(&self) -> Option<&str> {
        self.date.split('-').nth(1)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

/// Render a month filter the way dates store it: two digits, zero padded.
pub fn month_key(month: u32) -> String {
    format!("{:02}", month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_new_record_formats_fields() {
        let record = Record::new(3, date("2024-03-05"), "Coffee", "5");
        assert_eq!(record.id, "3");
        assert_eq!(record.date, "2024-03-05");
        assert_eq!(record.description, "Coffee");
        assert_eq!(record.amount, "5");
    }

    #[test]
    fn test_from_fields_pads_and_truncates() {
        let short = Record::from_fields(["7", "2024-01-01"]);
        assert_eq!(short.id, "7");
        assert_eq!(short.description, "");
        assert_eq!(short.amount, "");

        let long = Record::from_fields(["1", "2024-01-01", "Tea", "2", "extra"]);
        assert_eq!(long.amount, "2");
    }

    #[test]
    fn test_has_id_compares_text() {
        let record = Record::from_fields(["07", "2024-01-01", "Tea", "2"]);
        assert!(!record.has_id(7));
        assert_eq!(record.id_value(), Some(7));

        let record = Record::from_fields(["7", "2024-01-01", "Tea", "2"]);
        assert!(record.has_id(7));
    }

    #[test]
    fn test_month_segment() {
        let record = Record::new(0, date("2024-03-15"), "Book", "20");
        assert_eq!(record.month_segment(), Some("03"));

        let garbage = Record::from_fields(["0", "yesterday", "Book", "20"]);
        assert_eq!(garbage.month_segment(), None);
        assert_eq!(garbage.parsed_date(), None);
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key(3), "03");
        assert_eq!(month_key(12), "12");
        assert_eq!(month_key(13), "13");
        assert_eq!(month_key(0), "00");
    }
}
