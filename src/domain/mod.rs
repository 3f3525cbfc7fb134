pub mod account;
pub mod error;

// Re-export commonly used types
pub use account::{
    Account, AccountPatch, AccountRepositoryInterface, AccountStatus, NewAccount, ProvidedId,
    RegisterAccountDto, UpdateAccountDto,
};
pub use error::{DomainError, DomainResult};
