use std::io::Write;

use clap::Args;
use till::products::ProductUpdate;

use crate::{context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct EditProductArgs {
    /// Product to edit
    product: String,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New unit price
    #[arg(long)]
    price: Option<String>,

    /// New stock level
    #[arg(long)]
    quantity: Option<String>,

    /// New category
    #[arg(long)]
    category: Option<String>,
}

pub(crate) fn run(
    args: &EditProductArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let update = ProductUpdate::parse(
        args.name.as_deref(),
        args.price.as_deref(),
        args.quantity.as_deref(),
        args.category.as_deref(),
    )?;

    if update.is_empty() {
        return Err(AppError::EmptyUpdate);
    }

    let (mut catalogue, _) = context.open_catalogue()?;
    let product = catalogue.update(&args.product, &update)?;

    writeln!(out, "Updated {}", product.name)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;
    use till::catalogue::CatalogueError;

    use crate::{
        cli::tests::{run_in, seeded_dir},
        errors::AppError,
    };

    #[test]
    fn edits_price_and_stock() -> TestResult {
        let dir = seeded_dir()?;

        let out = run_in(
            &dir,
            &[
                "products", "edit", "milk", "--price", "2.10", "--quantity", "20", "-u",
                "worker1", "-p", "1111",
            ],
        )?;

        assert_eq!(out, "Updated Milk\n");
        let contents = fs::read_to_string(dir.path().join("products.csv"))?;

        assert!(contents.starts_with("Milk,2.10,20,Dairy\n"));

        Ok(())
    }

    #[test]
    fn requires_a_change() -> TestResult {
        let dir = seeded_dir()?;

        assert!(matches!(
            run_in(&dir, &["products", "edit", "Milk", "-u", "worker1", "-p", "1111"]),
            Err(AppError::EmptyUpdate)
        ));

        Ok(())
    }

    #[test]
    fn unknown_product_is_not_found() -> TestResult {
        let dir = seeded_dir()?;

        assert!(matches!(
            run_in(
                &dir,
                &["products", "edit", "Eggs", "--quantity", "1", "-u", "worker1", "-p", "1111"]
            ),
            Err(AppError::Catalogue(CatalogueError::NotFound(_)))
        ));

        Ok(())
    }
}
