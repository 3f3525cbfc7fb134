//! Account wire DTOs
//!
//! Field names are camelCase on the wire (`userName`,
//! `passwordResetToken`). Required fields on inbound bodies stay
//! `Option` so validation can answer with the exact field-level message
//! instead of a deserialization rejection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::account::roles;
use crate::domain::{Account, ProvidedId, RegisterAccountDto, UpdateAccountDto};

/// Readable account representation.
///
/// Never carries the credential digest. `passwordResetToken` is present
/// only while a recovery window is open; otherwise the key is omitted
/// entirely rather than set to null.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: i32,
    pub user_name: String,
    pub email: String,
    pub status: String,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_reset_token: Option<String>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            user_name: account.user_name,
            email: account.email,
            status: account.status.as_str().to_string(),
            roles: roles::decode(&account.roles),
            password_reset_token: account.password_reset_token,
        }
    }
}

/// Registration request body
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Option<String>>>,
    pub status: Option<String>,
}

impl From<RegisterRequest> for RegisterAccountDto {
    fn from(request: RegisterRequest) -> Self {
        Self {
            user_name: request.user_name,
            email: request.email,
            password: request.password,
            roles: request.roles,
            status: request.status,
        }
    }
}

/// Update request body. The id may arrive as a number or a string and
/// is compared against the path id after integer coercion.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[schema(value_type = Option<String>)]
    pub id: Option<ProvidedId>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Option<String>>>,
    pub status: Option<String>,
}

impl From<UpdateRequest> for UpdateAccountDto {
    fn from(request: UpdateRequest) -> Self {
        Self {
            id: request.id,
            user_name: request.user_name,
            email: request.email,
            password: request.password,
            roles: request.roles,
            status: request.status,
        }
    }
}

/// Authentication request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthenticateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Reset-consumption request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub token: Option<String>,
    pub password: Option<String>,
}

/// Account plus freshly issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: AccountDto,
    pub token: String,
}

/// Error body shared by every non-success response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
