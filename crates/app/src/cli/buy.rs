use std::io::Write;

use clap::Args;
use till::{
    products::{parse_label, parse_quantity},
    users::Capability,
};
use tracing::warn;

use crate::{config::CredentialsConfig, context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct BuyArgs {
    /// Item to buy; repeat for more items
    #[arg(long = "item", value_name = "NAME=QTY", required = true, value_parser = parse_item)]
    items: Vec<(String, u32)>,

    /// Also save the receipt to the receipts directory
    #[arg(long)]
    receipt: bool,
}

fn parse_item(value: &str) -> Result<(String, u32), String> {
    let (name, quantity) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QTY, got {value:?}"))?;

    let name = parse_label("name", name).map_err(|error| error.to_string())?;
    let quantity = parse_quantity(quantity).map_err(|error| error.to_string())?;

    Ok((name, quantity))
}

pub(crate) fn run(
    args: &BuyArgs,
    context: &AppContext,
    credentials: &CredentialsConfig,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let user = context.sign_in(credentials)?;
    user.require(Capability::Purchase)?;

    let mut till = context.open_till()?;

    for (name, quantity) in &args.items {
        let added = till.add_item(name, *quantity).map(|_line| ());

        if let Err(error) = added {
            if let Err(restock_error) = till.abandon() {
                warn!(error = %restock_error, "failed to return cart to stock");
            }

            return Err(error.into());
        }
    }

    let receipt = till.checkout()?;

    receipt.write_to(&mut *out, context.currency())?;

    if args.receipt {
        let path = context.receipts().write(&receipt, context.currency())?;

        writeln!(out, "Receipt saved to {}", path.display())?;
    }

    Ok(())
}
