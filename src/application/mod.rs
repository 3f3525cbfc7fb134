pub mod accounts;
pub mod ports;

pub use accounts::{AccountService, IssuedAccount};
pub use ports::{DelegateError, NotificationDispatcher, TokenAuthority, TokenClaims};
