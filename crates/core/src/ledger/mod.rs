//! Sales Ledger

pub mod errors;
pub mod records;
pub mod repository;
pub mod service;

pub use errors::LedgerError;
pub use records::SaleRecord;
pub use repository::{CsvSalesRepository, MockSalesRepository, SalesRepository};
pub use service::*;
