//! Row format of the ledger file.
//!
//! One record per line, `id,date,description,amount`, no header. Fields are
//! written with minimal quoting: a field is quoted only when it contains the
//! delimiter or a quote, so an ordinary ledger is plain comma-joined text.
//!
//! A line is read as quoted CSV only when it is exactly what the writer would
//! have produced for the fields it parses to. Any other line, including
//! hand-written ones with stray `"` characters, is split on every delimiter
//! with quotes kept as literal text. Rows are never rejected for having the
//! wrong number of fields.

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::domain::Record;

pub const DELIMITER: u8 = b',';

/// A parsed row together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub record: Record,
    /// Number of fields on disk, before padding or truncation to four
    pub field_count: usize,
    /// Original line text, without its `\n`
    pub line: String,
}

impl AsRef<Record> for Row {
    fn as_ref(&self) -> &Record {
        &self.record
    }
}

/// Parse ledger text into rows.
///
/// Surrounding whitespace is trimmed first and blank lines are skipped, so a
/// trailing empty line never counts as a record.
pub fn decode_rows(text: &str) -> csv::Result<Vec<Row>> {
    let mut rows = Vec::new();
    for line in text.trim().split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let fields = decode_line(line)?;
        rows.push(Row {
            record: Record::from_fields(fields.iter()),
            field_count: fields.len(),
            line: line.to_string(),
        });
    }
    Ok(rows)
}

/// Parse ledger text into records.
pub fn decode(text: &str) -> csv::Result<Vec<Record>> {
    Ok(decode_rows(text)?.into_iter().map(|row| row.record).collect())
}

fn decode_line(line: &str) -> csv::Result<StringRecord> {
    if line.contains('"') {
        let quoted = parse_line(line, true)?;
        let canonical = encode_fields(&quoted)?;
        if canonical.strip_suffix(b"\n") == Some(line.trim_end_matches('\r').as_bytes()) {
            return Ok(quoted);
        }
    }
    parse_line(line, false)
}

fn parse_line(line: &str, quoting: bool) -> csv::Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(quoting)
        .delimiter(DELIMITER)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Serialize one record as a line, terminator included.
pub fn encode_row(record: &Record) -> csv::Result<Vec<u8>> {
    let mut writer = writer();
    writer.serialize(record)?;
    finish(writer)
}

fn encode_fields(fields: &StringRecord) -> csv::Result<Vec<u8>> {
    let mut writer = writer();
    writer.write_record(fields)?;
    finish(writer)
}

/// Join original row lines with line breaks, without a trailing one.
/// No rows yields no bytes at all.
pub fn join_lines(rows: &[Row]) -> Vec<u8> {
    rows.iter()
        .map(|row| row.line.as_str())
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

fn writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(mut writer: csv::Writer<Vec<u8>>) -> csv::Result<Vec<u8>> {
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, description: &str, amount: &str) -> Record {
        Record::from_fields([id, "2024-03-01", description, amount])
    }

    #[test]
    fn test_decode_plain_rows() {
        let rows = decode("0,2024-03-01,Coffee,5\n1,2024-03-02,Book,20").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], record("0", "Coffee", "5"));
        assert_eq!(rows[1].description, "Book");
    }

    #[test]
    fn test_decode_ignores_surrounding_blank_lines() {
        let rows = decode("\n0,2024-03-01,Coffee,5\n\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert!(decode("").unwrap().is_empty());
        assert!(decode("  \n\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_keeps_malformed_rows() {
        let rows = decode_rows("0,2024-03-01\n1,2024-03-02,Book,20,extra").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field_count, 2);
        assert_eq!(rows[0].record.amount, "");
        assert_eq!(rows[1].field_count, 5);
        assert_eq!(rows[1].record.amount, "20");
    }

    #[test]
    fn test_decode_keeps_line_text() {
        let rows = decode_rows("0,2024-03-01,Coffee,5\r\n1,2024-03-02,Book,20").unwrap();
        assert_eq!(rows[0].line, "0,2024-03-01,Coffee,5\r");
        assert_eq!(rows[0].record.amount, "5");
        assert_eq!(rows[1].line, "1,2024-03-02,Book,20");
    }

    #[test]
    fn test_stray_quotes_are_literal() {
        let rows = decode_rows("0,2024-03-01,\"Big\" TV,5\n2,2024-03-03,\"Snack,4").unwrap();
        assert_eq!(rows[0].record.description, "\"Big\" TV");
        assert_eq!(rows[0].field_count, 4);
        assert_eq!(rows[1].record.description, "\"Snack");
        assert_eq!(rows[1].record.amount, "4");

        // Quoting that the writer would not have produced stays literal too.
        let rows = decode("0,2024-03-01,\"Tea\",3").unwrap();
        assert_eq!(rows[0].description, "\"Tea\"");
    }

    #[test]
    fn test_encode_plain_record_is_unquoted() {
        let bytes = encode_row(&record("0", "Coffee", "5")).unwrap();
        assert_eq!(bytes, b"0,2024-03-01,Coffee,5\n");
    }

    #[test]
    fn test_join_lines_has_no_trailing_newline() {
        let rows = decode_rows("0,2024-03-01,\"Big\" TV,5\n1,2024-03-01,Book,20\n").unwrap();
        assert_eq!(
            join_lines(&rows),
            b"0,2024-03-01,\"Big\" TV,5\n1,2024-03-01,Book,20"
        );
        assert!(join_lines(&[]).is_empty());
    }

    #[test]
    fn test_description_with_delimiter_survives() {
        let original = record("0", "Lunch, with tip", "12");
        let bytes = encode_row(&original).unwrap();
        assert_eq!(bytes, b"0,2024-03-01,\"Lunch, with tip\",12\n");

        let text = String::from_utf8(bytes).unwrap();
        let rows = decode_rows(&text).unwrap();
        assert_eq!(rows[0].record, original);
        assert_eq!(rows[0].field_count, 4);
    }

    #[test]
    fn test_description_with_quotes_survives() {
        let original = record("0", "\"Big\" TV", "5");
        let bytes = encode_row(&original).unwrap();
        assert_eq!(bytes, b"0,2024-03-01,\"\"\"Big\"\" TV\",5\n");

        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(decode(&text).unwrap(), vec![original]);
    }
}
