//! External concerns: persistence, cryptography, delegate clients

pub mod crypto;
pub mod database;
pub mod delegates;

pub use database::{init_database, DatabaseConfig};
