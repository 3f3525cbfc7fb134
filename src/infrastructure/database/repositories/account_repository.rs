use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use crate::domain::{
    Account, AccountPatch, AccountRepositoryInterface, AccountStatus, DomainError, DomainResult,
    NewAccount,
};
use crate::infrastructure::database::entities::account;

pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: account::AccountStatus) -> AccountStatus {
    match status {
        account::AccountStatus::Active => AccountStatus::Active,
        account::AccountStatus::Inactive => AccountStatus::Inactive,
        account::AccountStatus::Banned => AccountStatus::Banned,
        account::AccountStatus::Deleted => AccountStatus::Deleted,
    }
}

fn domain_status_to_entity(status: AccountStatus) -> account::AccountStatus {
    match status {
        AccountStatus::Active => account::AccountStatus::Active,
        AccountStatus::Inactive => account::AccountStatus::Inactive,
        AccountStatus::Banned => account::AccountStatus::Banned,
        AccountStatus::Deleted => account::AccountStatus::Deleted,
    }
}

fn account_model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        user_name: model.user_name,
        email: model.email,
        password: model.password,
        status: entity_status_to_domain(model.status),
        roles: model.roles,
        password_reset_token: model.password_reset_token,
        password_reset_expires: model.password_reset_expires,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AccountRepositoryInterface for AccountRepository {
    async fn find_all(&self) -> DomainResult<Vec<Account>> {
        let models = account::Entity::find()
            .filter(account::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(account_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Id.eq(id))
            .filter(account::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn find_by_user_name_or_email(
        &self,
        user_name: &str,
        email: &str,
    ) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(
                account::Column::UserName
                    .eq(user_name)
                    .or(account::Column::Email.eq(email)),
            )
            .filter(account::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn create(&self, record: NewAccount) -> DomainResult<Account> {
        let now = Utc::now();

        let new_account = account::ActiveModel {
            id: NotSet,
            user_name: Set(record.user_name),
            email: Set(record.email),
            password: Set(record.password),
            status: Set(domain_status_to_entity(record.status)),
            roles: Set(record.roles),
            password_reset_token: Set(None),
            password_reset_expires: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = new_account.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::AlreadyExists
            } else {
                db_err(e)
            }
        })?;

        Ok(account_model_to_domain(model))
    }

    async fn update(&self, id: i32, patch: AccountPatch) -> DomainResult<u64> {
        let mut changes = account::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(v) = patch.user_name {
            changes.user_name = Set(v);
        }
        if let Some(v) = patch.email {
            changes.email = Set(v);
        }
        if let Some(v) = patch.password {
            changes.password = Set(v);
        }
        if let Some(v) = patch.status {
            changes.status = Set(domain_status_to_entity(v));
        }
        if let Some(v) = patch.roles {
            changes.roles = Set(v);
        }
        if let Some(v) = patch.password_reset_token {
            changes.password_reset_token = Set(v);
        }
        if let Some(v) = patch.password_reset_expires {
            changes.password_reset_expires = Set(v);
        }

        let result = account::Entity::update_many()
            .set(changes)
            .filter(account::Column::Id.eq(id))
            .filter(account::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                    DomainError::AlreadyExists
                } else {
                    db_err(e)
                }
            })?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> DomainResult<u64> {
        // Soft delete: stamp deleted_at, leave the row in place.
        let changes = account::ActiveModel {
            deleted_at: Set(Some(Utc::now())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = account::Entity::update_many()
            .set(changes)
            .filter(account::Column::Id.eq(id))
            .filter(account::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }
}
