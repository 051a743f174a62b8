//! Sales ledger service.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    ledger::{errors::LedgerError, records::SaleRecord, repository::SalesRepository},
    money::{AmountOverflow, checked_total, round_amount},
    report::SalesReport,
    rows::{LoadReport, Loaded},
};

/// Running sales total plus the append-only log of sale lines.
///
/// The total and the log are written separately; a crash between the two writes leaves
/// them out of step. [`SalesReport::drift`] exposes the difference.
pub struct SalesLedger {
    repository: Box<dyn SalesRepository>,
    total: Decimal,
}

impl Debug for SalesLedger {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SalesLedger")
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

impl SalesLedger {
    /// Open a ledger, loading the running total from `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the total cannot be read.
    pub fn open(
        repository: impl SalesRepository + 'static,
    ) -> Result<(Self, LoadReport), LedgerError> {
        let mut ledger = Self {
            repository: Box::new(repository),
            total: Decimal::ZERO,
        };

        let report = ledger.refresh()?;

        Ok((ledger, report))
    }

    /// Running sales total.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Reload the running total from storage.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the total cannot be read.
    pub fn refresh(&mut self) -> Result<LoadReport, LedgerError> {
        let loaded = self.repository.load_total()?;

        self.total = loaded.value;

        Ok(loaded.report)
    }

    /// Append `records` to the log, then add their subtotals to the running total and save
    /// it. The new total is rounded to whole minor units, both in memory and on disk, and
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] before anything is written if the new total is too
    /// large. Returns [`LedgerError::Storage`] if either write fails. When the log append
    /// succeeds but the total cannot be saved, the in-memory total is left unchanged.
    pub fn record_sale(&mut self, records: &[SaleRecord]) -> Result<Decimal, LedgerError> {
        if records.is_empty() {
            return Ok(self.total);
        }

        let amount = checked_total(records.iter().map(|record| record.subtotal))?;
        let total = round_amount(self.total.checked_add(amount).ok_or(AmountOverflow)?);

        self.repository.append_records(records)?;
        self.repository.save_total(total)?;
        self.total = total;

        info!(lines = records.len(), %amount, %total, "recorded sale");

        Ok(total)
    }

    /// Every record in the sales log.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the log cannot be read.
    pub fn records(&self) -> Result<Loaded<Vec<SaleRecord>>, LedgerError> {
        Ok(self.repository.load_records()?)
    }

    /// Build a report from the sales log and the running total.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the log cannot be read, or
    /// [`LedgerError::Overflow`] if its amounts cannot be totalled.
    pub fn report(&self) -> Result<SalesReport, LedgerError> {
        let loaded = self.records()?;

        Ok(SalesReport::new(loaded.value, self.total, loaded.report)?)
    }
}
