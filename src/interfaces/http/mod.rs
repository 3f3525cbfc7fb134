//! HTTP REST API interfaces
//!
//! - `modules`: Request handlers, wire DTOs and HTTP middleware
//! - `router`: API router with Swagger documentation

pub mod modules;
pub mod router;

pub use router::create_router;
