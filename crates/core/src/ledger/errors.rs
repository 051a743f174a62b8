//! Ledger errors.

use thiserror::Error;

use crate::{money::AmountOverflow, storage::StorageError};

/// Errors raised by the sales ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The total or the sales log could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A sale or report total is too large to represent.
    #[error(transparent)]
    Overflow(#[from] AmountOverflow),
}
