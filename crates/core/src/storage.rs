//! Storage
//!
//! Flat-file helpers shared by every store. Full rewrites go through a temporary file in the
//! target's directory which is then renamed over the target, so a crash mid-write leaves the
//! previous contents in place.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or writing a data file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The file could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// File that failed
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Read a whole file, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns [`StorageError::Read`] for any failure other than the file being absent.
pub fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file not found, using defaults");

            Ok(None)
        }
        Err(source) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replace the contents of `path` atomically.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`StorageError::Write`] if the temporary file cannot be created, written or
/// renamed over the target.
pub fn replace(path: &Path, contents: &str) -> Result<(), StorageError> {
    let write_error = |source: io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);

    fs::create_dir_all(dir).map_err(write_error)?;

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;

    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|error| write_error(error.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "replaced data file");

    Ok(())
}

/// Append lines to `path`, creating it if needed.
///
/// # Errors
///
/// Returns [`StorageError::Write`] if the file cannot be opened or written.
pub fn append_lines<I, S>(path: &Path, lines: I) -> Result<(), StorageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let write_error = |source: io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(parent_dir(path)).map_err(write_error)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;

    let mut buffer = String::new();

    for line in lines {
        buffer.push_str(line.as_ref());
        buffer.push('\n');
    }

    file.write_all(buffer.as_bytes()).map_err(write_error)?;

    debug!(path = %path.display(), bytes = buffer.len(), "appended to data file");

    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn read_optional_missing_file_is_none() -> TestResult {
        let dir = TempDir::new()?;

        assert!(read_optional(&dir.path().join("missing.csv"))?.is_none());

        Ok(())
    }

    #[test]
    fn read_optional_directory_is_read_error() -> TestResult {
        let dir = TempDir::new()?;

        let result = read_optional(dir.path());

        assert!(matches!(result, Err(StorageError::Read { .. })));

        Ok(())
    }

    #[test]
    fn replace_overwrites_existing_contents() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("products.csv");

        replace(&path, "first\nsecond\n")?;
        replace(&path, "third\n")?;

        assert_eq!(fs::read_to_string(&path)?, "third\n");

        Ok(())
    }

    #[test]
    fn replace_creates_missing_directories() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("data").join("sales.csv");

        replace(&path, "12.50")?;

        assert_eq!(fs::read_to_string(&path)?, "12.50");

        Ok(())
    }

    #[test]
    fn replace_leaves_no_temporary_files_behind() -> TestResult {
        let dir = TempDir::new()?;

        replace(&dir.path().join("products.csv"), "milk,2.00,3,Dairy\n")?;

        let entries = fs::read_dir(dir.path())?.count();

        assert_eq!(entries, 1);

        Ok(())
    }

    #[test]
    fn append_lines_keeps_previous_lines() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("sales_log.csv");

        append_lines(&path, ["milk,2,4.00"])?;
        append_lines(&path, ["bread,1,1.20", "eggs,12,3.60"])?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "milk,2,4.00\nbread,1,1.20\neggs,12,3.60\n"
        );

        Ok(())
    }
}
