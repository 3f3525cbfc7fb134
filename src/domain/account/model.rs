//! Account entity and write models

use chrono::{DateTime, Utc};

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Inactive,
    Banned,
    Deleted,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Banned => "banned",
            Self::Deleted => "deleted",
        }
    }

    /// Parse a status value from its wire representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "banned" => Some(Self::Banned),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Account as loaded from the store.
///
/// `password` holds the bcrypt digest, never the plaintext. `roles` holds
/// the encoded storage string (see [`super::roles`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub status: AccountStatus,
    pub roles: String,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a new account. All normalization (hashing,
/// role encoding, status defaulting) happens before this is built.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub status: AccountStatus,
    pub roles: String,
}

/// Partial update applied by id.
///
/// The outer `Option` means "leave the column untouched"; for the reset
/// fields the inner `Option` distinguishes writing a value from clearing
/// the column to NULL.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<AccountStatus>,
    pub roles: Option<String>,
    pub password_reset_token: Option<Option<String>>,
    pub password_reset_expires: Option<Option<DateTime<Utc>>>,
}
