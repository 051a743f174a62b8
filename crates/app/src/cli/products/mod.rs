use std::io::Write;

use clap::{Args, Subcommand};
use till::users::{Capability, User};

use crate::{config::CredentialsConfig, context::AppContext, errors::AppError};

mod add;
mod categories;
mod clear;
mod edit;
mod list;
mod remove;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products, optionally filtered
    List(list::ListProductsArgs),

    /// List product categories
    Categories,

    /// Add a product
    Add(add::AddProductArgs),

    /// Change a product's name, price, stock or category
    Edit(edit::EditProductArgs),

    /// Remove a product
    Remove(remove::RemoveProductArgs),

    /// Remove every product
    Clear(clear::ClearProductsArgs),
}

pub(crate) fn run(
    command: ProductsCommand,
    context: &AppContext,
    credentials: &CredentialsConfig,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let user = context.sign_in(credentials)?;

    match command.command {
        ProductsSubcommand::List(args) => {
            user.require(Capability::Browse)?;
            list::run(&args, context, out)
        }
        ProductsSubcommand::Categories => {
            user.require(Capability::Browse)?;
            categories::run(context, out)
        }
        ProductsSubcommand::Add(args) => manage(&user, || add::run(&args, context, out)),
        ProductsSubcommand::Edit(args) => manage(&user, || edit::run(&args, context, out)),
        ProductsSubcommand::Remove(args) => manage(&user, || remove::run(&args, context, out)),
        ProductsSubcommand::Clear(args) => manage(&user, || clear::run(&args, context, out)),
    }
}

fn manage(user: &User, action: impl FnOnce() -> Result<(), AppError>) -> Result<(), AppError> {
    user.require(Capability::ManageInventory)?;

    action()
}
