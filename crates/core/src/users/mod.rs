//! Users

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::AuthError;
pub use models::*;
pub use repository::{CsvUsersRepository, MockUsersRepository, UsersRepository};
pub use service::*;
