//! App Context

use std::path::Path;

use rusty_money::iso::Currency;
use till::{
    catalogue::{Catalogue, CsvProductsRepository},
    ledger::{CsvSalesRepository, SalesLedger},
    receipt::ReceiptWriter,
    rows::LoadReport,
    till::Till,
    users::{CsvUsersRepository, User, UserDirectory},
};

use crate::{
    config::{CredentialsConfig, DataConfig},
    errors::AppError,
};

/// Builds the stores a command works on from the data settings.
#[derive(Debug, Clone)]
pub struct AppContext {
    data: DataConfig,
}

impl AppContext {
    /// Create a context over `data`.
    pub fn new(data: DataConfig) -> Self {
        Self { data }
    }

    /// Data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data.data_dir
    }

    /// Display currency.
    pub fn currency(&self) -> &'static Currency {
        self.data.currency
    }

    /// Default low-stock threshold.
    pub fn low_stock_threshold(&self) -> u32 {
        self.data.low_stock_threshold
    }

    /// Sign in with the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingCredential`] if a username or password was not given, or
    /// [`AppError::Auth`] if they do not match a user.
    pub fn sign_in(&self, credentials: &CredentialsConfig) -> Result<User, AppError> {
        let username = credentials
            .username
            .as_deref()
            .ok_or(AppError::MissingCredential {
                flag: "username",
                env: "TILL_USERNAME",
            })?;

        let password = credentials
            .password
            .as_deref()
            .ok_or(AppError::MissingCredential {
                flag: "password",
                env: "TILL_PASSWORD",
            })?;

        let directory = UserDirectory::new(CsvUsersRepository::in_dir(self.data_dir()));

        Ok(directory.authenticate(username, password)?)
    }

    /// Load the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Catalogue`] if the product file cannot be read.
    pub fn open_catalogue(&self) -> Result<(Catalogue, LoadReport), AppError> {
        Ok(Catalogue::open(CsvProductsRepository::in_dir(
            self.data_dir(),
        ))?)
    }

    /// Load the sales ledger.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ledger`] if the total cannot be read.
    pub fn open_ledger(&self) -> Result<(SalesLedger, LoadReport), AppError> {
        Ok(SalesLedger::open(CsvSalesRepository::in_dir(
            self.data_dir(),
        ))?)
    }

    /// Start a till session over the catalogue and ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be read.
    pub fn open_till(&self) -> Result<Till, AppError> {
        let (catalogue, _) = self.open_catalogue()?;
        let (ledger, _) = self.open_ledger()?;

        Ok(Till::new(catalogue, ledger))
    }

    /// Writer for the receipts directory.
    pub fn receipts(&self) -> ReceiptWriter {
        ReceiptWriter::new(&self.data.receipts_dir)
    }
}
