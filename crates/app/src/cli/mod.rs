//! `till` subcommands

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use till::rows::LoadReport;

use crate::{
    config::{CredentialsConfig, DataConfig, LoggingConfig},
    context::AppContext,
    errors::AppError,
};

mod buy;
mod login;
mod products;
mod sales;
mod shell;

/// Till point-of-sale
#[derive(Debug, Parser)]
#[command(name = "till", about = "Till point-of-sale", long_about = None)]
pub struct Cli {
    /// Data directory and display settings.
    #[command(flatten)]
    pub data: DataConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Sign-in credentials.
    #[command(flatten)]
    pub credentials: CredentialsConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check credentials and show where the user lands
    Login,

    /// Browse and manage the catalogue
    Products(products::ProductsCommand),

    /// Buy items in one go and print the receipt
    Buy(buy::BuyArgs),

    /// Interactive shopping session
    Shell(shell::ShellArgs),

    /// Sales totals and reports
    Sales(sales::SalesCommand),
}

impl Cli {
    /// Parse configuration from a `.env` file, the environment and the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Run the selected command, reading interactive input from `input` and writing output
    /// to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first error the command hits.
    pub fn run(self, input: impl BufRead, out: &mut impl Write) -> Result<(), AppError> {
        let context = AppContext::new(self.data);
        let credentials = &self.credentials;

        match self.command {
            Commands::Login => login::run(&context, credentials, out),
            Commands::Products(command) => products::run(command, &context, credentials, out),
            Commands::Buy(args) => buy::run(&args, &context, credentials, out),
            Commands::Shell(args) => shell::run(&args, &context, credentials, input, out),
            Commands::Sales(command) => sales::run(command, &context, credentials, out),
        }
    }
}

/// Tell the user about rows skipped while loading `file`.
fn write_load_report(
    out: &mut impl Write,
    file: &str,
    report: &LoadReport,
) -> Result<(), AppError> {
    if report.is_clean() {
        return Ok(());
    }

    writeln!(
        out,
        "Note: skipped {} malformed row(s) in {file}",
        report.skipped().len()
    )?;

    for row in report.skipped() {
        writeln!(out, "  line {}: {}", row.line, row.reason)?;
    }

    Ok(())
}
