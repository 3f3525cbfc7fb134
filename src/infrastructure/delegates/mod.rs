//! HTTP clients for the external collaborators

pub mod notifications;
pub mod token_authority;

pub use notifications::HttpNotificationDispatcher;
pub use token_authority::HttpTokenAuthority;
