//! # Account Service
//!
//! User-account microservice: registration, lookup, update, deletion,
//! authentication-token issuance and self-service password recovery.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the role-set codec, the
//!   repository contract and the error taxonomy
//! - **application**: The account service (lifecycle rules, password
//!   recovery protocol) and outbound ports for external collaborators
//! - **infrastructure**: External concerns (SeaORM persistence,
//!   credential hashing, HTTP delegate clients)
//! - **interfaces**: REST API with Swagger documentation
//!
//! Session tokens are minted by an external token service; email
//! delivery belongs to an external notification service. Both are
//! reached through injected traits so tests substitute deterministic
//! stubs.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::AppConfig;

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_router;
