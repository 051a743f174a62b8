//! User directory service.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use tracing::{info, warn};

use crate::users::{errors::AuthError, models::User, repository::UsersRepository};

/// Credential check against a [`UsersRepository`].
///
/// Users are read afresh on every attempt, so edits to the backing file apply to the next
/// sign-in.
pub struct UserDirectory {
    repository: Box<dyn UsersRepository>,
}

impl Debug for UserDirectory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UserDirectory").finish_non_exhaustive()
    }
}

impl UserDirectory {
    /// Create a directory reading from `repository`.
    pub fn new(repository: impl UsersRepository + 'static) -> Self {
        Self {
            repository: Box::new(repository),
        }
    }

    /// Find the first user whose username and password both match exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if nobody matches, or
    /// [`AuthError::Storage`] if the users cannot be read.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let loaded = self.repository.load_users()?;

        let user = loaded
            .value
            .into_iter()
            .find(|user| user.username == username && user.password == password);

        match user {
            Some(user) => {
                info!(username = %user.username, role = %user.role, "signed in");

                Ok(user)
            }
            None => {
                warn!(username, "failed sign-in");

                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        rows::Loaded,
        users::{
            models::{Dashboard, Role},
            repository::MockUsersRepository,
        },
    };

    use super::*;

    fn directory(users: Vec<User>) -> UserDirectory {
        let mut repository = MockUsersRepository::new();

        repository
            .expect_load_users()
            .return_once(move || Ok(Loaded::clean(users)));

        UserDirectory::new(repository)
    }

    #[test]
    fn worker_role_is_matched_case_insensitively() -> TestResult {
        let user = directory(vec![User::new("worker1", "1111", "Worker".parse()?)])
            .authenticate("worker1", "1111")?;

        assert_eq!(user.role, Role::Worker);
        assert_eq!(user.role.dashboard(), Dashboard::Inventory);

        Ok(())
    }

    #[test]
    fn credentials_are_case_sensitive() {
        let directory = directory(vec![User::new("alice", "Secret", Role::Buyer)]);

        assert!(matches!(
            directory.authenticate("Alice", "Secret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let directory = directory(vec![User::new("alice", "Secret", Role::Buyer)]);

        assert!(matches!(
            directory.authenticate("alice", "secret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn first_match_wins() -> TestResult {
        let directory = directory(vec![
            User::new("sam", "pw", Role::Buyer),
            User::new("sam", "pw", Role::Worker),
        ]);

        assert_eq!(directory.authenticate("sam", "pw")?.role, Role::Buyer);

        Ok(())
    }
}
