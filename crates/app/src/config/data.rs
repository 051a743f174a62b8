//! Data & Presentation Config

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::Currency;
use till::{catalogue::DEFAULT_LOW_STOCK_THRESHOLD, money::parse_currency};

/// Where data lives and how amounts are shown.
#[derive(Debug, Clone, Args)]
pub struct DataConfig {
    /// Directory holding products.csv, users.csv, sales.csv and sales_log.csv
    #[arg(long, global = true, env = "TILL_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory receipts are saved in
    #[arg(
        long,
        global = true,
        env = "TILL_RECEIPTS_DIR",
        default_value = "receipts"
    )]
    pub receipts_dir: PathBuf,

    /// Display currency (GBP, USD, EUR)
    #[arg(
        long,
        global = true,
        env = "TILL_CURRENCY",
        default_value = "GBP",
        value_parser = parse_currency
    )]
    pub currency: &'static Currency,

    /// Stock level below which a product counts as low stock
    #[arg(
        long,
        global = true,
        env = "TILL_LOW_STOCK_THRESHOLD",
        default_value_t = DEFAULT_LOW_STOCK_THRESHOLD
    )]
    pub low_stock_threshold: u32,
}
