//! Sales Repository

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use mockall::automock;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    ledger::records::SaleRecord,
    money::round_amount,
    rows::{LoadReport, Loaded, RowError, parse_rows},
    storage::{self, StorageError},
};

/// Persistence for the running sales total and the sales log.
#[automock]
pub trait SalesRepository {
    /// Load the running total. Absent or unparsable totals load as zero.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the total exists but cannot be read.
    fn load_total(&self) -> Result<Loaded<Decimal>, StorageError>;

    /// Overwrite the running total.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the total cannot be written.
    fn save_total(&self, total: Decimal) -> Result<(), StorageError>;

    /// Append records to the sales log.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the log cannot be written.
    fn append_records(&self, records: &[SaleRecord]) -> Result<(), StorageError>;

    /// Load every record in the sales log, skipping malformed rows.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the log exists but cannot be read.
    fn load_records(&self) -> Result<Loaded<Vec<SaleRecord>>, StorageError>;
}

/// Running total in a one-line text file, sales in an append-only CSV log.
#[derive(Debug, Clone)]
pub struct CsvSalesRepository {
    total_path: PathBuf,
    log_path: PathBuf,
}

impl CsvSalesRepository {
    /// Default total file name inside a data directory.
    pub const TOTAL_FILE_NAME: &'static str = "sales.csv";

    /// Default log file name inside a data directory.
    pub const LOG_FILE_NAME: &'static str = "sales_log.csv";

    /// Repository backed by the given total and log files.
    pub fn new(total_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            total_path: total_path.into(),
            log_path: log_path.into(),
        }
    }

    /// Repository backed by `sales.csv` and `sales_log.csv` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(Self::TOTAL_FILE_NAME),
            dir.join(Self::LOG_FILE_NAME),
        )
    }

    /// Path of the running total file.
    pub fn total_path(&self) -> &Path {
        &self.total_path
    }

    /// Path of the sales log.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

impl SalesRepository for CsvSalesRepository {
    fn load_total(&self) -> Result<Loaded<Decimal>, StorageError> {
        let Some(contents) = storage::read_optional(&self.total_path)? else {
            return Ok(Loaded::clean(Decimal::ZERO));
        };

        let line = contents.lines().next().unwrap_or_default().trim();

        if line.is_empty() {
            return Ok(Loaded::clean(Decimal::ZERO));
        }

        match Decimal::from_str(line) {
            Ok(total) => Ok(Loaded::clean(total)),
            Err(_err) => {
                warn!(
                    path = %self.total_path.display(),
                    value = line,
                    "unparsable sales total, using zero"
                );

                let mut report = LoadReport::new();
                report.skip(1, RowError::InvalidAmount(line.to_string()));

                Ok(Loaded {
                    value: Decimal::ZERO,
                    report,
                })
            }
        }
    }

    fn save_total(&self, total: Decimal) -> Result<(), StorageError> {
        storage::replace(&self.total_path, &format!("{:.2}\n", round_amount(total)))
    }

    fn append_records(&self, records: &[SaleRecord]) -> Result<(), StorageError> {
        storage::append_lines(&self.log_path, records.iter().map(SaleRecord::to_row))
    }

    fn load_records(&self) -> Result<Loaded<Vec<SaleRecord>>, StorageError> {
        let Some(contents) = storage::read_optional(&self.log_path)? else {
            return Ok(Loaded::clean(Vec::new()));
        };

        let source = self.log_path.display().to_string();
        let loaded = parse_rows(&source, &contents, false, SaleRecord::from_fields);

        debug!(
            path = %source,
            records = loaded.value.len(),
            skipped = loaded.report.skipped().len(),
            "loaded sales log"
        );

        Ok(loaded)
    }
}
