//! Accounts module — registration, lookup, update, deletion,
//! authentication and password recovery

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
