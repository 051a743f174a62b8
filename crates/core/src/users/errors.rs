//! Authentication errors

use thiserror::Error;

use crate::{
    storage::StorageError,
    users::models::{Capability, Role},
};

/// Errors returned when signing in or checking permissions.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user matches the username and password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The user's role does not grant the capability.
    #[error("{role} users cannot {capability}")]
    PermissionDenied {
        /// Role of the signed-in user
        role: Role,

        /// Capability that was required
        capability: Capability,
    },

    /// The user file could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
