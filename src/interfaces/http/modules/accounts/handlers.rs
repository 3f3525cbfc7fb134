//! Account API handlers
//!
//! Thin wrappers over `AccountService`: deserialize, delegate, translate
//! the domain error into the wire contract. Business failures answer
//! 400 with the exact domain message; server faults answer 500 with an
//! operation-specific body while the cause goes to the log.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, warn};

use super::dto::{
    AccountDto, AuthResponse, AuthenticateRequest, ErrorBody, RegisterRequest,
    ResetPasswordRequest, UpdateRequest,
};
use crate::application::AccountService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::AccountRepository;

/// Account handler state — concrete over `AccountRepository` for Axum
/// compatibility.
#[derive(Clone)]
pub struct AccountsState {
    pub service: Arc<AccountService<AccountRepository>>,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn reject(operation: &'static str, fallback: String, err: DomainError) -> ErrorResponse {
    if err.is_internal() {
        error!(operation, error = %err, "request failed unexpectedly");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { error: fallback }),
        )
    } else {
        warn!(operation, error = %err, "request rejected");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/users",
    tag = "Accounts",
    responses(
        (status = 200, description = "All accounts", body = Vec<AccountDto>),
        (status = 500, description = "Retrieval failure", body = ErrorBody)
    )
)]
pub async fn list_accounts(
    State(state): State<AccountsState>,
) -> Result<Json<Vec<AccountDto>>, ErrorResponse> {
    match state.service.find_all().await {
        Ok(accounts) => Ok(Json(accounts.into_iter().map(AccountDto::from).collect())),
        Err(err) => {
            let fallback = err.to_string();
            Err(reject("findAll", fallback, err))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v0/users/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation, duplicate identity or token issuance failure", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AccountsState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ErrorResponse> {
    match state.service.register(request.into()).await {
        Ok(issued) => Ok(Json(AuthResponse {
            user: issued.account.into(),
            token: issued.token,
        })),
        Err(err) => Err(reject(
            "register",
            "Some error occurred while creating the a new user.".to_string(),
            err,
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v0/users/authenticate",
    tag = "Accounts",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 400, description = "Unknown account, bad credentials or token issuance failure", body = ErrorBody)
    )
)]
pub async fn authenticate(
    State(state): State<AccountsState>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<Json<AuthResponse>, ErrorResponse> {
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    match state.service.authenticate(&email, &password).await {
        Ok(issued) => Ok(Json(AuthResponse {
            user: issued.account.into(),
            token: issued.token,
        })),
        Err(err) => Err(reject(
            "authenticate",
            "Internal server error".to_string(),
            err,
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/users/{userNameOrEmail}",
    tag = "Accounts",
    params(("userNameOrEmail" = String, Path, description = "User name or email")),
    responses(
        (status = 200, description = "Account found", body = AccountDto),
        (status = 400, description = "Account not found", body = ErrorBody)
    )
)]
pub async fn find_account(
    State(state): State<AccountsState>,
    Path(identifier): Path<String>,
) -> Result<Json<AccountDto>, ErrorResponse> {
    match state.service.find_one(&identifier).await {
        Ok(account) => Ok(Json(account.into())),
        Err(err) => Err(reject(
            "findOne",
            format!("Error retrieving user with (email|userName) = {}", identifier),
            err,
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/users/forgotPassword/{userNameOrEmail}",
    tag = "Accounts",
    params(("userNameOrEmail" = String, Path, description = "User name or email")),
    responses(
        (status = 200, description = "Recovery window opened; the representation carries the token", body = AccountDto),
        (status = 400, description = "Account not found or notification handoff failed", body = ErrorBody)
    )
)]
pub async fn forgot_password(
    State(state): State<AccountsState>,
    Path(identifier): Path<String>,
) -> Result<Json<AccountDto>, ErrorResponse> {
    match state.service.forgot_password(&identifier).await {
        Ok(account) => Ok(Json(account.into())),
        Err(err) => Err(reject(
            "forgotPassword",
            format!("Error retrieving user with (email|userName) = {}", identifier),
            err,
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v0/users/resetPassword",
    tag = "Accounts",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced, recovery window closed", body = AccountDto),
        (status = 400, description = "Missing, unknown, mismatched or expired token", body = ErrorBody)
    )
)]
pub async fn reset_password(
    State(state): State<AccountsState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<AccountDto>, ErrorResponse> {
    let email = request.email.unwrap_or_default();

    match state
        .service
        .reset_password(&email, request.token.as_deref(), request.password.as_deref())
        .await
    {
        Ok(account) => Ok(Json(account.into())),
        Err(err) => Err(reject(
            "resetPassword",
            "Cannot reset password, try again.".to_string(),
            err,
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v0/users/{id}",
    tag = "Accounts",
    params(("id" = String, Path, description = "Account ID")),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Account updated"),
        (status = 400, description = "Validation failure, id mismatch or no row affected", body = ErrorBody)
    )
)]
pub async fn update_account(
    State(state): State<AccountsState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRequest>,
) -> Result<StatusCode, ErrorResponse> {
    match state.service.update(&id, request.into()).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(reject("update", "Invalid user body".to_string(), err)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v0/users/{id}",
    tag = "Accounts",
    params(("id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 400, description = "Account not found", body = ErrorBody)
    )
)]
pub async fn delete_account(
    State(state): State<AccountsState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    match state.service.delete(&id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(reject("delete", "User does not exists".to_string(), err)),
    }
}
