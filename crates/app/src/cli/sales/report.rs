use std::io::Write;

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use till::{
    ledger::SaleRecord,
    report::{ProductSales, SalesReport},
};

use crate::{context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct ReportArgs {
    /// Group sales by product instead of listing every sale
    #[arg(long)]
    summary: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    stored_total: Decimal,
    logged_total: Decimal,
    drift: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [SaleRecord]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a [ProductSales]>,
    skipped_rows: usize,
}

impl<'a> ReportView<'a> {
    fn new(report: &'a SalesReport, summary: bool) -> Self {
        Self {
            stored_total: report.stored_total(),
            logged_total: report.logged_total(),
            drift: report.drift(),
            records: (!summary).then(|| report.records()),
            summary: summary.then(|| report.summary()),
            skipped_rows: report.load_report().skipped().len(),
        }
    }
}

pub(crate) fn run(
    args: &ReportArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let (ledger, _) = context.open_ledger()?;
    let report = ledger.report()?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &ReportView::new(&report, args.summary))?;
        writeln!(out)?;
    } else if args.summary {
        report.write_summary_to(&mut *out, context.currency())?;
    } else {
        report.write_to(&mut *out, context.currency())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use testresult::TestResult;

    use crate::cli::tests::{run_in, seeded_dir};

    fn sell(dir: &tempfile::TempDir) -> TestResult {
        run_in(
            dir,
            &[
                "buy", "--item", "Milk=2", "--item", "Cheese=1", "-u", "alice", "-p", "pw",
            ],
        )?;
        run_in(dir, &["buy", "--item", "Milk=1", "-u", "alice", "-p", "pw"])?;

        Ok(())
    }

    #[test]
    fn report_lists_sales_and_flags_drift() -> TestResult {
        let dir = seeded_dir()?;
        sell(&dir)?;

        let out = run_in(&dir, &["sales", "report", "-u", "worker1", "-p", "1111"])?;

        assert!(out.contains("Cheese"));
        assert!(out.contains("Warning: stored total differs"));

        Ok(())
    }

    #[test]
    fn json_summary_groups_by_product() -> TestResult {
        let dir = seeded_dir()?;
        sell(&dir)?;

        let out = run_in(
            &dir,
            &["sales", "report", "--summary", "--json", "-u", "worker1", "-p", "1111"],
        )?;

        let value: Value = serde_json::from_str(&out)?;

        assert_eq!(value["summary"][0]["product_name"], "Milk");
        assert_eq!(value["summary"][0]["quantity"], 3);
        assert_eq!(value["drift"], "100.00");
        assert!(value.get("records").is_none());

        Ok(())
    }
}
