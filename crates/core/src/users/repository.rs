//! Users Repository

use std::path::{Path, PathBuf};

use mockall::automock;
use tracing::debug;

use crate::{
    rows::{Loaded, parse_rows},
    storage::{self, StorageError},
    users::models::User,
};

/// Read-only source of users.
#[automock]
pub trait UsersRepository {
    /// Load every user, skipping malformed rows.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store exists but cannot be read.
    fn load_users(&self) -> Result<Loaded<Vec<User>>, StorageError>;
}

/// Users stored as a header line followed by `username,password,role` rows.
#[derive(Debug, Clone)]
pub struct CsvUsersRepository {
    path: PathBuf,
}

impl CsvUsersRepository {
    /// Default file name inside a data directory.
    pub const FILE_NAME: &'static str = "users.csv";

    /// Repository backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository backed by `users.csv` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UsersRepository for CsvUsersRepository {
    fn load_users(&self) -> Result<Loaded<Vec<User>>, StorageError> {
        let Some(contents) = storage::read_optional(&self.path)? else {
            return Ok(Loaded::clean(Vec::new()));
        };

        let source = self.path.display().to_string();
        let loaded = parse_rows(&source, &contents, true, User::from_fields);

        debug!(
            path = %source,
            users = loaded.value.len(),
            skipped = loaded.report.skipped().len(),
            "loaded users"
        );

        Ok(loaded)
    }
}
