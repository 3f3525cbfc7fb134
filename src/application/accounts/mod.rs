//! Accounts module — lifecycle, authentication and credential recovery
//!
//! Contains the `AccountService` which orchestrates every account
//! use-case: registration, lookup, update, deletion, authentication and
//! the password-reset handshake.

pub mod service;

pub use service::{AccountService, IssuedAccount};
