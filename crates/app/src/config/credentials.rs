//! Credentials Config

use std::fmt::{self, Debug, Formatter};

use clap::Args;

/// Who is signing in.
#[derive(Clone, Default, Args)]
pub struct CredentialsConfig {
    /// Username to sign in as
    #[arg(short, long, global = true, env = "TILL_USERNAME")]
    pub username: Option<String>,

    /// Password for the user
    #[arg(short, long, global = true, env = "TILL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Debug for CredentialsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_password| "<redacted>"))
            .finish()
    }
}
