use std::io::Write;

use clap::{Args, Subcommand};
use till::users::Capability;

use crate::{config::CredentialsConfig, context::AppContext, errors::AppError};

mod report;
mod total;

#[derive(Debug, Args)]
pub(crate) struct SalesCommand {
    #[command(subcommand)]
    command: SalesSubcommand,
}

#[derive(Debug, Subcommand)]
enum SalesSubcommand {
    /// Show the running sales total
    Total,

    /// Re-read the running total from disk and report problems with it
    Refresh,

    /// Show the sales log with totals
    Report(report::ReportArgs),
}

pub(crate) fn run(
    command: SalesCommand,
    context: &AppContext,
    credentials: &CredentialsConfig,
    out: &mut impl Write,
) -> Result<(), AppError> {
    context
        .sign_in(credentials)?
        .require(Capability::ViewReports)?;

    match command.command {
        SalesSubcommand::Total => total::run(context, out),
        SalesSubcommand::Refresh => total::refresh(context, out),
        SalesSubcommand::Report(args) => report::run(&args, context, out),
    }
}
