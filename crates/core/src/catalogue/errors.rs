//! Catalogue errors.

use thiserror::Error;

use crate::{products::ProductInputError, storage::StorageError};

/// Errors raised by catalogue operations.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// No product with this name exists.
    #[error("product not found: {0}")]
    NotFound(String),

    /// A product with this name already exists.
    #[error("product already exists: {0}")]
    AlreadyExists(String),

    /// More units were requested than are in stock.
    #[error("not enough stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product name
        name: String,

        /// Units requested
        requested: u32,

        /// Units in stock
        available: u32,
    },

    /// Worker input failed validation.
    #[error(transparent)]
    InvalidInput(#[from] ProductInputError),

    /// The catalogue file could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
