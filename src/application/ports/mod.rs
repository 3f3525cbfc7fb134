//! Outbound ports — capabilities the application layer consumes but does
//! not implement. Production implementations live in `infrastructure`,
//! tests substitute deterministic stubs.

pub mod outbound;

pub use outbound::{DelegateError, NotificationDispatcher, TokenAuthority, TokenClaims};
