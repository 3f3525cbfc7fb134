//! Account service — application-layer orchestration
//!
//! All account business logic lives here. HTTP handlers are thin
//! wrappers that delegate to this service; persistence and the external
//! token/notification collaborators are injected, so every rule in this
//! file is testable with in-memory stand-ins.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info};

use crate::domain::account::parse_leading_int;
use crate::domain::account::roles;
use crate::domain::{
    Account, AccountPatch, AccountRepositoryInterface, AccountStatus, DomainError, DomainResult,
    NewAccount, RegisterAccountDto, UpdateAccountDto,
};
use crate::application::ports::{NotificationDispatcher, TokenAuthority, TokenClaims};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::crypto::reset_token::generate_reset_token;

/// Recovery tokens are honored for exactly one hour after issuance.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// An account paired with a freshly minted bearer token, returned by
/// registration and authentication.
#[derive(Debug, Clone)]
pub struct IssuedAccount {
    pub account: Account,
    pub token: String,
}

/// Account service — generic over `R: AccountRepositoryInterface` so it
/// stays decoupled from the concrete persistence layer.
pub struct AccountService<R: AccountRepositoryInterface> {
    repo: Arc<R>,
    token_authority: Arc<dyn TokenAuthority>,
    notifier: Arc<dyn NotificationDispatcher>,
    bcrypt_cost: u32,
    send_email: bool,
}

impl<R: AccountRepositoryInterface> AccountService<R> {
    pub fn new(
        repo: Arc<R>,
        token_authority: Arc<dyn TokenAuthority>,
        notifier: Arc<dyn NotificationDispatcher>,
        bcrypt_cost: u32,
        send_email: bool,
    ) -> Self {
        Self {
            repo,
            token_authority,
            notifier,
            bcrypt_cost,
            send_email,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account and mint a session token for it.
    ///
    /// Required fields are checked in order (user name, email, password)
    /// and the first missing one wins. A collision on either identifier
    /// is reported as a single duplicate error without revealing which
    /// field collided. The account is persisted before token issuance;
    /// an issuance failure therefore leaves the account in place.
    pub async fn register(&self, dto: RegisterAccountDto) -> DomainResult<IssuedAccount> {
        let user_name = required(dto.user_name.as_deref(), "User name can not be empty!")?;
        let email = required(dto.email.as_deref(), "Email can not be empty!")?;
        let password = required(dto.password.as_deref(), "Password can not be empty!")?;

        if self
            .repo
            .find_by_user_name_or_email(user_name, email)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyExists);
        }

        let record = NewAccount {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: self.hash(password)?,
            status: parse_status(dto.status.as_deref())?,
            roles: roles::encode_or_default(dto.roles.as_deref()),
        };

        let account = self.repo.create(record).await?;
        info!(account_id = account.id, user_name = %account.user_name, "account registered");

        let token = self
            .issue_token(&account, "Some error occurred while creating the a new user.")
            .await?;

        Ok(IssuedAccount { account, token })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Verify credentials for an identifier (user name or email) and
    /// mint a session token.
    pub async fn authenticate(&self, identifier: &str, password: &str) -> DomainResult<IssuedAccount> {
        let account = self
            .repo
            .find_by_user_name_or_email(identifier, identifier)
            .await?
            .ok_or(DomainError::NotFound)?;

        let valid = verify_password(password, &account.password)
            .map_err(|e| DomainError::Internal(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return Err(DomainError::BadCredentials);
        }

        let token = self
            .issue_token(&account, "Authentication token failed")
            .await?;

        Ok(IssuedAccount { account, token })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn find_all(&self) -> DomainResult<Vec<Account>> {
        self.repo.find_all().await
    }

    /// Single lookup where one value may match either identifier field.
    pub async fn find_one(&self, identifier: &str) -> DomainResult<Account> {
        self.repo
            .find_by_user_name_or_email(identifier, identifier)
            .await?
            .ok_or(DomainError::NotFound)
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update an account addressed by the path id.
    ///
    /// Gates run in order and short-circuit: body id present, roles
    /// effectively non-empty, status non-empty, body id equal to the
    /// path id after integer coercion, then target existence. Success
    /// requires the store to report exactly one affected row.
    pub async fn update(&self, path_id: &str, dto: UpdateAccountDto) -> DomainResult<()> {
        let body_id = match &dto.id {
            Some(id) if !id.is_falsy() => id,
            _ => return Err(DomainError::Validation("Invalid user body")),
        };

        if roles::is_effectively_empty(dto.roles.as_deref()) {
            return Err(DomainError::Validation("User roles can not be empty!"));
        }

        let status = match dto.status.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => return Err(DomainError::Validation("User status can not be empty!")),
        };

        let target = match (body_id.coerce(), parse_leading_int(path_id)) {
            (Some(body), Some(path)) if body == path => body,
            _ => {
                return Err(DomainError::Validation(
                    "User does not have enough permissions to access.",
                ))
            }
        };
        let id = i32::try_from(target).map_err(|_| DomainError::NotFound)?;

        if self.repo.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let patch = AccountPatch {
            user_name: dto.user_name.clone(),
            email: dto.email.clone(),
            password: dto
                .password
                .as_deref()
                .map(|plaintext| self.hash(plaintext))
                .transpose()?,
            status: Some(parse_status(Some(status))?),
            roles: Some(roles::encode_or_default(dto.roles.as_deref())),
            ..Default::default()
        };

        match self.repo.update(id, patch).await? {
            1 => {
                info!(account_id = id, "account updated");
                Ok(())
            }
            _ => Err(DomainError::NothingUpdated),
        }
    }

    /// Soft-delete an account by path id. Success requires exactly one
    /// affected row; an unparseable id behaves like a miss.
    pub async fn delete(&self, path_id: &str) -> DomainResult<()> {
        let id = parse_leading_int(path_id).and_then(|v| i32::try_from(v).ok());
        let affected = match id {
            Some(id) => self.repo.delete(id).await?,
            None => 0,
        };
        match affected {
            1 => {
                info!(account_id = ?id, "account deleted");
                Ok(())
            }
            _ => Err(DomainError::NotFound),
        }
    }

    // ── Password recovery ───────────────────────────────────────

    /// Open a recovery window: store a fresh single-use token with a
    /// one-hour expiry and hand the token to the notification
    /// dispatcher. Re-issuing replaces any prior token.
    pub async fn forgot_password(&self, identifier: &str) -> DomainResult<Account> {
        let account = self
            .repo
            .find_by_user_name_or_email(identifier, identifier)
            .await?
            .ok_or(DomainError::NotFound)?;

        let token = generate_reset_token();
        let expires = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        let patch = AccountPatch {
            password_reset_token: Some(Some(token.clone())),
            password_reset_expires: Some(Some(expires)),
            ..Default::default()
        };
        self.repo.update(account.id, patch).await?;

        self.dispatch_recovery_email(&account.email, &token).await?;
        info!(account_id = account.id, "password reset token issued");

        Ok(Account {
            password_reset_token: Some(token),
            password_reset_expires: Some(expires),
            ..account
        })
    }

    /// Close a recovery window: validate the submitted token against the
    /// stored one, replace the credential and clear both token fields.
    ///
    /// The case order is part of the API contract: a missing submitted
    /// token is rejected before any lookup, and an account without an
    /// open window reports the same message afterwards.
    pub async fn reset_password(
        &self,
        email: &str,
        token: Option<&str>,
        password: Option<&str>,
    ) -> DomainResult<Account> {
        let submitted = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(DomainError::ResetTokenMissing),
        };

        let account = self
            .repo
            .find_by_user_name_or_email(email, email)
            .await?
            .ok_or(DomainError::NotFound)?;

        // A half-set window counts as no window at all.
        let (stored, expires) = match (&account.password_reset_token, account.password_reset_expires)
        {
            (Some(stored), Some(expires)) => (stored.clone(), expires),
            _ => return Err(DomainError::ResetTokenMissing),
        };

        if submitted != stored {
            return Err(DomainError::ResetTokenMismatch);
        }

        if Utc::now() > expires {
            return Err(DomainError::ResetTokenExpired);
        }

        let plaintext = password
            .ok_or_else(|| DomainError::Internal("no replacement password supplied".into()))?;
        let digest = self.hash(plaintext)?;

        let patch = AccountPatch {
            password: Some(digest.clone()),
            password_reset_token: Some(None),
            password_reset_expires: Some(None),
            ..Default::default()
        };
        self.repo.update(account.id, patch).await?;
        info!(account_id = account.id, "password reset completed");

        Ok(Account {
            password: digest,
            password_reset_token: None,
            password_reset_expires: None,
            ..account
        })
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        hash_password(plaintext, self.bcrypt_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }

    async fn issue_token(
        &self,
        account: &Account,
        failure_message: &'static str,
    ) -> DomainResult<String> {
        let claims = TokenClaims {
            id: account.id,
            status: account.status.as_str().to_string(),
            roles: roles::decode(&account.roles),
        };
        match self.token_authority.issue(&claims).await {
            Ok(token) => Ok(token),
            Err(cause) => {
                error!(account_id = account.id, %cause, "token authority failed to issue a token");
                Err(DomainError::Delegate(failure_message))
            }
        }
    }

    async fn dispatch_recovery_email(&self, address: &str, token: &str) -> DomainResult<()> {
        if !self.send_email {
            return Ok(());
        }
        let body = format!(
            "Hey, you forgot your password and we are here to help you. \
             Please, use this password to change it: {}",
            token
        );
        match self.notifier.send_email(address, "Change password", &body).await {
            Ok(()) => Ok(()),
            Err(cause) => {
                error!(address, %cause, "failed to hand off recovery email");
                Err(DomainError::Delegate("Error sending recovery email"))
            }
        }
    }
}

fn required<'a>(value: Option<&'a str>, message: &'static str) -> DomainResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::Validation(message)),
    }
}

/// Status for the persist step: absent or empty defaults to `active`,
/// anything unrecognized is a bad body.
fn parse_status(value: Option<&str>) -> DomainResult<AccountStatus> {
    match value {
        None => Ok(AccountStatus::Active),
        Some("") => Ok(AccountStatus::Active),
        Some(v) => {
            AccountStatus::parse(v).ok_or(DomainError::Validation("Invalid user body"))
        }
    }
}
