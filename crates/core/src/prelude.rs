//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    catalogue::{
        Catalogue, CatalogueError, CsvProductsRepository, DEFAULT_LOW_STOCK_THRESHOLD,
        ProductsRepository,
    },
    ledger::{CsvSalesRepository, LedgerError, SaleRecord, SalesLedger, SalesRepository},
    money::{AmountOverflow, MoneyError, format_amount, parse_currency},
    products::{Product, ProductInputError, ProductUpdate},
    receipt::{Receipt, ReceiptError, ReceiptWriter},
    report::{ProductSales, SalesReport},
    rows::{LoadReport, Loaded, RowError, SkippedRow},
    storage::StorageError,
    till::{Till, TillError, TillState},
    users::{
        AuthError, Capability, CsvUsersRepository, Dashboard, Role, User, UserDirectory,
        UsersRepository,
    },
};
