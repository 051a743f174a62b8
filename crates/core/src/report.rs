//! Sales Report

use std::io;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Serialize;
use tabled::builder::Builder;

use crate::{
    ledger::SaleRecord,
    money::{AmountOverflow, checked_total, format_amount},
    rows::LoadReport,
    table::render,
};

/// Units and revenue for one product across the sales log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    /// Product name as logged
    pub product_name: String,

    /// Units sold
    pub quantity: u64,

    /// Sum of subtotals
    pub revenue: Decimal,
}

/// Sales log contents alongside the stored running total.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    records: Vec<SaleRecord>,
    stored_total: Decimal,
    logged_total: Decimal,
    drift: Decimal,
    summary: Vec<ProductSales>,

    #[serde(skip)]
    load_report: LoadReport,
}

impl SalesReport {
    /// Create a report, totalling the records.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if a total or the drift does not fit in a [`Decimal`].
    pub fn new(
        records: Vec<SaleRecord>,
        stored_total: Decimal,
        load_report: LoadReport,
    ) -> Result<Self, AmountOverflow> {
        let logged_total = checked_total(records.iter().map(|record| record.subtotal))?;
        let drift = stored_total.checked_sub(logged_total).ok_or(AmountOverflow)?;
        let summary = summarise(&records)?;

        Ok(Self {
            records,
            stored_total,
            logged_total,
            drift,
            summary,
            load_report,
        })
    }

    /// Records in log order.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Running total as stored.
    pub fn stored_total(&self) -> Decimal {
        self.stored_total
    }

    /// Sum of every logged subtotal.
    pub fn logged_total(&self) -> Decimal {
        self.logged_total
    }

    /// Stored total minus logged total. Non-zero when the two files have gone out of step.
    pub fn drift(&self) -> Decimal {
        self.drift
    }

    /// Rows skipped while reading the log.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Per-product totals in order of first sale.
    pub fn summary(&self) -> &[ProductSales] {
        &self.summary
    }

    /// Render every sale line followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write, currency: &'static Currency) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Product", "Qty", "Subtotal"]);

        for record in &self.records {
            builder.push_record([
                record.product_name.clone(),
                record.quantity.to_string(),
                format_amount(record.subtotal, currency),
            ]);
        }

        writeln!(out, "{}", render(builder, 1..3))?;

        self.write_totals(&mut out, currency)
    }

    /// Render per-product totals followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_summary_to(
        &self,
        mut out: impl io::Write,
        currency: &'static Currency,
    ) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Product", "Units", "Revenue"]);

        for entry in &self.summary {
            builder.push_record([
                entry.product_name.clone(),
                entry.quantity.to_string(),
                format_amount(entry.revenue, currency),
            ]);
        }

        writeln!(out, "{}", render(builder, 1..3))?;

        self.write_totals(&mut out, currency)
    }

    fn write_totals(
        &self,
        out: &mut impl io::Write,
        currency: &'static Currency,
    ) -> io::Result<()> {
        writeln!(out, "Total sales: {}", format_amount(self.stored_total, currency))?;

        if !self.drift.is_zero() {
            writeln!(
                out,
                "Warning: stored total differs from the sales log by {}",
                format_amount(self.drift, currency)
            )?;
        }

        let skipped = self.load_report.skipped();

        if !skipped.is_empty() {
            writeln!(out, "Skipped {} malformed log row(s):", skipped.len())?;

            for row in skipped {
                writeln!(out, "  line {}: {}", row.line, row.reason)?;
            }
        }

        Ok(())
    }
}

fn summarise(records: &[SaleRecord]) -> Result<Vec<ProductSales>, AmountOverflow> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut summary: Vec<ProductSales> = Vec::new();

    for record in records {
        let idx = *positions
            .entry(record.product_name.as_str())
            .or_insert_with(|| {
                summary.push(ProductSales {
                    product_name: record.product_name.clone(),
                    quantity: 0,
                    revenue: Decimal::ZERO,
                });

                summary.len() - 1
            });

        if let Some(entry) = summary.get_mut(idx) {
            entry.quantity = entry.quantity.saturating_add(u64::from(record.quantity));
            entry.revenue = entry
                .revenue
                .checked_add(record.subtotal)
                .ok_or(AmountOverflow)?;
        }
    }

    Ok(summary)
}
