//! Till CLI configuration
//!
//! Every setting can come from a flag, an environment variable, or a `.env` file in the
//! working directory.

pub mod credentials;
pub mod data;
pub mod logging;

pub use credentials::CredentialsConfig;
pub use data::DataConfig;
pub use logging::{LogFormat, LoggingConfig};
