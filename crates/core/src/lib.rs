//! Till
//!
//! Till is a small point-of-sale engine: a product catalogue, a sales ledger and a user
//! directory, each mirrored to flat CSV files, plus the cart and checkout logic that ties
//! them together.

pub mod cart;
pub mod catalogue;
pub mod ledger;
pub mod money;
pub mod prelude;
pub mod products;
pub mod receipt;
pub mod report;
pub mod rows;
pub mod storage;
pub mod table;
pub mod till;
pub mod users;
