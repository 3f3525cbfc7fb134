use async_trait::async_trait;

use super::{Account, AccountPatch, NewAccount};
use crate::domain::DomainResult;

/// Store contract for accounts.
///
/// Lookups either match on id or on `user_name OR email` against the
/// supplied values; implementations must exclude soft-deleted rows from
/// every method. `update` and `delete` report the affected row count so
/// callers can apply the exactly-one-row success rule.
#[async_trait]
pub trait AccountRepositoryInterface: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Account>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Account>>;

    /// OR-disjunction lookup: any account whose `user_name` matches
    /// `user_name` or whose `email` matches `email`. Passing the same
    /// value twice treats a single identifier as satisfying either field.
    async fn find_by_user_name_or_email(
        &self,
        user_name: &str,
        email: &str,
    ) -> DomainResult<Option<Account>>;

    async fn create(&self, account: NewAccount) -> DomainResult<Account>;
    async fn update(&self, id: i32, patch: AccountPatch) -> DomainResult<u64>;
    async fn delete(&self, id: i32) -> DomainResult<u64>;
}
