use std::io::Write;

use clap::Args;

use crate::{context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct RemoveProductArgs {
    /// Product to remove
    product: String,
}

pub(crate) fn run(
    args: &RemoveProductArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let (mut catalogue, _) = context.open_catalogue()?;
    let removed = catalogue.remove(&args.product)?;

    writeln!(out, "Removed {}", removed.name)?;

    Ok(())
}
