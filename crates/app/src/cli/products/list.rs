use std::io::Write;

use clap::Args;
use serde::Serialize;
use till::{products::Product, table::products_table};

use crate::{cli::write_load_report, context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// Only products whose name contains this keyword
    #[arg(long)]
    search: Option<String>,

    /// Only products in this category
    #[arg(long)]
    category: Option<String>,

    /// Only products with stock below N (defaults to the low-stock threshold)
    #[arg(long, value_name = "N", num_args = 0..=1)]
    low_stock: Option<Option<u32>>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ProductsView<'a> {
    products: &'a [&'a Product],
    skipped_rows: usize,
}

pub(crate) fn run(
    args: &ListProductsArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let (catalogue, report) = context.open_catalogue()?;

    let mut products: Vec<&Product> = match &args.search {
        Some(keyword) => catalogue.search(keyword),
        None => catalogue.products().iter().collect(),
    };

    if let Some(category) = &args.category {
        let wanted = catalogue.in_category(category);
        products.retain(|product| wanted.contains(product));
    }

    if let Some(threshold) = args.low_stock {
        let wanted = catalogue.low_stock(threshold.unwrap_or(context.low_stock_threshold()));
        products.retain(|product| wanted.contains(product));
    }

    if args.json {
        let view = ProductsView {
            products: &products,
            skipped_rows: report.skipped().len(),
        };

        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;

        return Ok(());
    }

    if products.is_empty() {
        writeln!(out, "No products found.")?;
    } else {
        writeln!(out, "{}", products_table(products, context.currency()))?;
    }

    write_load_report(out, "products.csv", &report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;
    use testresult::TestResult;

    use crate::cli::tests::{run_in, seeded_dir};

    #[test]
    fn lists_every_product() -> TestResult {
        let dir = seeded_dir()?;

        let out = run_in(&dir, &["products", "list", "-u", "alice", "-p", "pw"])?;

        assert!(out.contains("Milk"));
        assert!(out.contains("Bread"));
        assert!(out.contains("Cheese"));

        Ok(())
    }

    #[test]
    fn filters_combine() -> TestResult {
        let dir = seeded_dir()?;

        let out = run_in(
            &dir,
            &[
                "products", "list", "--category", "dairy", "--low-stock", "-u", "alice", "-p",
                "pw",
            ],
        )?;

        assert!(out.contains("Cheese"));
        assert!(!out.contains("Milk"));
        assert!(!out.contains("Bread"));

        Ok(())
    }

    #[test]
    fn json_output_lists_matching_products() -> TestResult {
        let dir = seeded_dir()?;

        let out = run_in(
            &dir,
            &["products", "list", "--search", "BRE", "--json", "-u", "alice", "-p", "pw"],
        )?;

        let value: Value = serde_json::from_str(&out)?;

        assert_eq!(value["products"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["products"][0]["name"], "Bread");
        assert_eq!(value["products"][0]["quantity"], 3);
        assert_eq!(value["skipped_rows"], 0);

        Ok(())
    }

    #[test]
    fn malformed_rows_are_noted() -> TestResult {
        let dir = seeded_dir()?;
        fs::write(dir.path().join("products.csv"), "Milk,2.00,10,Dairy\nMilk,free,1,Dairy\n")?;

        let out = run_in(&dir, &["products", "list", "-u", "alice", "-p", "pw"])?;

        assert!(out.contains("skipped 1 malformed row(s)"));

        Ok(())
    }

    #[test]
    fn json_output_counts_malformed_rows() -> TestResult {
        let dir = seeded_dir()?;
        fs::write(dir.path().join("products.csv"), "Milk,2.00,10,Dairy\nMilk,free,1,Dairy\n")?;

        let out = run_in(&dir, &["products", "list", "--json", "-u", "alice", "-p", "pw"])?;

        let value: Value = serde_json::from_str(&out)?;

        assert_eq!(value["products"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["skipped_rows"], 1);

        Ok(())
    }
}
