//! Rows
//!
//! Line-oriented parsing for the comma-separated data files. Fields are split on `,` and
//! trimmed; there is no quoting. Rows that fail to parse are skipped and recorded in a
//! [`LoadReport`] instead of aborting the load.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::warn;

/// Reasons a row can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row does not have the exact number of fields required.
    #[error("expected {expected} fields, found {found}")]
    WrongFieldCount {
        /// Fields required
        expected: usize,

        /// Fields present
        found: usize,
    },

    /// The row has fewer fields than required.
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields {
        /// Minimum fields required
        expected: usize,

        /// Fields present
        found: usize,
    },

    /// Price is not a non-negative decimal.
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    /// Quantity is not a non-negative integer.
    #[error("invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// Monetary amount is not a decimal.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Role is neither buyer nor worker.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
}

/// A row that was skipped while loading a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source file
    pub line: usize,

    /// Why the row was rejected
    pub reason: RowError,
}

/// Summary of the rows skipped while loading a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    skipped: SmallVec<[SkippedRow; 4]>,
}

impl LoadReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped row.
    pub fn skip(&mut self, line: usize, reason: RowError) {
        self.skipped.push(SkippedRow { line, reason });
    }

    /// Rows that were skipped, in file order.
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Whether every row loaded.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Merge another report into this one.
    pub fn extend(&mut self, other: LoadReport) {
        self.skipped.extend(other.skipped);
    }
}

/// A loaded value together with the report of what was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    /// The loaded value
    pub value: T,

    /// Rows skipped while loading
    pub report: LoadReport,
}

impl<T> Loaded<T> {
    /// A value loaded with nothing skipped.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            report: LoadReport::new(),
        }
    }
}

/// Split a line into trimmed fields.
pub fn split_fields(line: &str) -> SmallVec<[&str; 4]> {
    line.split(',').map(str::trim).collect()
}

/// Parse every non-blank line of `contents` with `parse`.
///
/// `source` names the file in log events. When `skip_header` is set the first line is
/// ignored.
pub fn parse_rows<T, F>(source: &str, contents: &str, skip_header: bool, parse: F) -> Loaded<Vec<T>>
where
    F: Fn(&[&str]) -> Result<T, RowError>,
{
    let mut records = Vec::new();
    let mut report = LoadReport::new();

    let lines = contents
        .lines()
        .enumerate()
        .skip(usize::from(skip_header));

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        match parse(&split_fields(line)) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(source, line = idx + 1, %reason, "skipping malformed row");

                report.skip(idx + 1, reason);
            }
        }
    }

    Loaded {
        value: records,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_fields(fields: &[&str]) -> Result<(String, u32), RowError> {
        match fields {
            [name, count] => count
                .parse()
                .map(|count| ((*name).to_string(), count))
                .map_err(|_err| RowError::InvalidQuantity((*count).to_string())),
            _ => Err(RowError::WrongFieldCount {
                expected: 2,
                found: fields.len(),
            }),
        }
    }

    #[test]
    fn split_fields_trims_whitespace() {
        let fields = split_fields(" milk , 2.00 ,3, Dairy");

        assert_eq!(fields.as_slice(), ["milk", "2.00", "3", "Dairy"]);
    }

    #[test]
    fn parse_rows_skips_bad_rows_and_keeps_going() {
        let loaded = parse_rows("test", "a,1\nb\nc,x\nd,4\n", false, two_fields);

        assert_eq!(
            loaded.value,
            vec![("a".to_string(), 1), ("d".to_string(), 4)]
        );

        assert_eq!(
            loaded.report.skipped(),
            [
                SkippedRow {
                    line: 2,
                    reason: RowError::WrongFieldCount {
                        expected: 2,
                        found: 1
                    },
                },
                SkippedRow {
                    line: 3,
                    reason: RowError::InvalidQuantity("x".to_string()),
                },
            ]
        );
    }

    #[test]
    fn parse_rows_ignores_blank_lines() {
        let loaded = parse_rows("test", "\na,1\n   \n", false, two_fields);

        assert_eq!(loaded.value.len(), 1);
        assert!(loaded.report.is_clean());
    }

    #[test]
    fn parse_rows_skips_header_and_numbers_lines_from_file_start() {
        let loaded = parse_rows("test", "name,count\na,1\nbroken\n", true, two_fields);

        assert_eq!(loaded.value, vec![("a".to_string(), 1)]);
        assert_eq!(loaded.report.skipped().first().map(|row| row.line), Some(3));
    }

    #[test]
    fn extend_merges_reports() {
        let mut first = LoadReport::new();
        first.skip(1, RowError::InvalidAmount("x".to_string()));

        let mut second = LoadReport::new();
        second.skip(4, RowError::UnknownRole("admin".to_string()));

        first.extend(second);

        assert_eq!(first.skipped().len(), 2);
        assert!(!first.is_clean());
    }
}
