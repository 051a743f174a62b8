//! Catalogue

pub mod errors;
pub mod repository;
pub mod service;

pub use errors::CatalogueError;
pub use repository::{CsvProductsRepository, MockProductsRepository, ProductsRepository};
pub use service::*;
