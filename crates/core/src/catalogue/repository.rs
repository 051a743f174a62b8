//! Products Repository

use std::path::{Path, PathBuf};

use mockall::automock;
use tracing::debug;

use crate::{
    products::Product,
    rows::{Loaded, parse_rows},
    storage::{self, StorageError},
};

/// Persistence for the product catalogue.
#[automock]
pub trait ProductsRepository {
    /// Load every product, skipping malformed rows.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store exists but cannot be read.
    fn load(&self) -> Result<Loaded<Vec<Product>>, StorageError>;

    /// Replace the stored catalogue with `products`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn save(&self, products: &[Product]) -> Result<(), StorageError>;
}

/// Products stored one per line as `name,price,quantity,category`.
#[derive(Debug, Clone)]
pub struct CsvProductsRepository {
    path: PathBuf,
}

impl CsvProductsRepository {
    /// Default file name inside a data directory.
    pub const FILE_NAME: &'static str = "products.csv";

    /// Repository backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository backed by `products.csv` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductsRepository for CsvProductsRepository {
    fn load(&self) -> Result<Loaded<Vec<Product>>, StorageError> {
        let Some(contents) = storage::read_optional(&self.path)? else {
            return Ok(Loaded::clean(Vec::new()));
        };

        let source = self.path.display().to_string();
        let loaded = parse_rows(&source, &contents, false, Product::from_fields);

        debug!(
            path = %source,
            products = loaded.value.len(),
            skipped = loaded.report.skipped().len(),
            "loaded products"
        );

        Ok(loaded)
    }

    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        let contents: String = products
            .iter()
            .map(|product| product.to_row() + "\n")
            .collect();

        storage::replace(&self.path, &contents)
    }
}
