use std::io::Write;

use clap::Args;

use crate::{context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct ClearProductsArgs {
    /// Confirm removing every product
    #[arg(long)]
    yes: bool,
}

pub(crate) fn run(
    args: &ClearProductsArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if !args.yes {
        return Err(AppError::ConfirmationRequired("clear the catalogue"));
    }

    let (mut catalogue, _) = context.open_catalogue()?;
    let removed = catalogue.clear()?;

    writeln!(out, "Removed {removed} product(s)")?;

    Ok(())
}
