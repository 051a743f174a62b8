//! Application errors

use std::io;

use thiserror::Error;
use till::{
    catalogue::CatalogueError, ledger::LedgerError, products::ProductInputError,
    receipt::ReceiptError, till::TillError, users::AuthError,
};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum AppError {
    /// A credential was not supplied by flag or environment.
    #[error("missing {flag}: pass --{flag} or set {env}")]
    MissingCredential {
        /// Flag name
        flag: &'static str,

        /// Environment variable name
        env: &'static str,
    },

    /// A destructive command was run without confirmation.
    #[error("refusing to {0} without --yes")]
    ConfirmationRequired(&'static str),

    /// An edit was requested with no fields to change.
    #[error("nothing to change; pass at least one of --name, --price, --quantity, --category")]
    EmptyUpdate,

    /// An interactive command could not be understood.
    #[error("{0}")]
    InvalidCommand(String),

    /// Sign-in or permission failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Catalogue failure.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Sales ledger failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Cart or checkout failure.
    #[error(transparent)]
    Till(#[from] TillError),

    /// Receipt could not be saved.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Rejected product input.
    #[error(transparent)]
    ProductInput(#[from] ProductInputError),

    /// JSON output could not be encoded.
    #[error("failed to encode JSON output")]
    Json(#[from] serde_json::Error),

    /// Writing command output failed.
    #[error("failed to write output")]
    Output(#[from] io::Error),
}
