use std::io::Write;

use till::money::format_amount;

use crate::{cli::write_load_report, context::AppContext, errors::AppError};

pub(crate) fn run(context: &AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let (ledger, _) = context.open_ledger()?;

    writeln!(
        out,
        "Total sales: {}",
        format_amount(ledger.total(), context.currency())
    )?;

    Ok(())
}

pub(crate) fn refresh(context: &AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let (ledger, report) = context.open_ledger()?;

    writeln!(
        out,
        "Total sales: {}",
        format_amount(ledger.total(), context.currency())
    )?;

    write_load_report(out, "sales.csv", &report)
}
