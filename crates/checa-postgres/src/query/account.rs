//! Accounts repository for portal user lookups.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::Account;
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for account database operations.
///
/// Accounts are provisioned by the identity layer; this crate only reads
/// them for authorization checks and display names.
pub trait AccountRepository {
    /// Finds an account by its unique identifier.
    fn find_account_by_id(
        &self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds multiple accounts by their IDs in a single query.
    fn find_accounts_by_ids(
        &self,
        account_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    /// Finds an account by email address.
    fn find_account_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;
}

impl AccountRepository for PgClient {
    async fn find_account_by_id(&self, account_id: Uuid) -> PgResult<Option<Account>> {
        let mut conn = self.get_connection().await?;

        use schema::accounts::{self, dsl};

        let account = accounts::table
            .filter(dsl::id.eq(account_id))
            .select(Account::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn find_accounts_by_ids(&self, account_ids: &[Uuid]) -> PgResult<Vec<Account>> {
        if account_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;

        use schema::accounts::{self, dsl};

        let accounts = accounts::table
            .filter(dsl::id.eq_any(account_ids))
            .select(Account::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(accounts)
    }

    async fn find_account_by_email(&self, email: &str) -> PgResult<Option<Account>> {
        let mut conn = self.get_connection().await?;

        use schema::accounts::{self, dsl};

        let account = accounts::table
            .filter(dsl::email.eq(email))
            .select(Account::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(account)
    }
}
