use std::io::Write;

use clap::Args;
use till::products::Product;

use crate::{context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct AddProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price, greater than zero
    #[arg(long)]
    price: String,

    /// Units in stock
    #[arg(long)]
    quantity: String,

    /// Product category
    #[arg(long)]
    category: String,
}

pub(crate) fn run(
    args: &AddProductArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let product = Product::parse(&args.name, &args.price, &args.quantity, &args.category)?;
    let (mut catalogue, _) = context.open_catalogue()?;

    let name = product.name.clone();
    catalogue.add(product)?;

    writeln!(out, "Added {name}")?;

    Ok(())
}
