use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::account::models::{
    Account, InsertOutcome, Permission, ProfilePatch, Role, DEFAULT_ROLE_IDS,
};

use super::traits::BaseAccountStore;

/// Postgres-backed account store
///
/// Thin adapter over the model queries; the SQL itself lives with the
/// models in domains/account/models.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAccountStore for PgAccountStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>> {
        Account::find_by_id(id, &self.pool).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>> {
        Account::find_by_phone(phone, &self.pool).await
    }

    async fn insert(&self, account: &Account) -> Result<InsertOutcome> {
        account.insert(&self.pool).await
    }

    /// Overrides the sequential default: the account row and its default
    /// role edges commit or roll back together
    async fn insert_with_default_roles(&self, account: &Account) -> Result<InsertOutcome> {
        let mut tx = self.pool.begin().await?;

        match account.insert(&mut *tx).await? {
            InsertOutcome::Inserted => {
                for role_id in DEFAULT_ROLE_IDS {
                    Role::attach_to_user(&account.id, role_id, &mut *tx).await?;
                }
                tx.commit().await?;
                Ok(InsertOutcome::Inserted)
            }
            outcome => {
                // The failed INSERT aborted the transaction; nothing to keep
                tx.rollback().await?;
                Ok(outcome)
            }
        }
    }

    async fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<()> {
        Account::update_profile(id, patch, &self.pool).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        Account::delete_by_id(id, &self.pool).await
    }

    async fn list_role_ids_for_user(&self, id: &str) -> Result<Vec<String>> {
        Role::ids_for_user(id, &self.pool).await
    }

    async fn roles_by_ids(&self, role_ids: &[String]) -> Result<Vec<Role>> {
        Role::find_by_ids(role_ids, &self.pool).await
    }

    async fn permission_ids_for_roles(&self, role_ids: &[String]) -> Result<Vec<i32>> {
        Permission::ids_for_roles(role_ids, &self.pool).await
    }

    async fn permissions_by_ids(&self, permission_ids: &[i32]) -> Result<Vec<Permission>> {
        Permission::find_by_ids(permission_ids, &self.pool).await
    }

    async fn assign_default_roles(&self, id: &str) -> Result<()> {
        for role_id in DEFAULT_ROLE_IDS {
            Role::attach_to_user(id, role_id, &self.pool).await?;
        }
        Ok(())
    }

    async fn remove_role_edge(&self, account_id: &str, role_id: &str) -> Result<()> {
        Role::detach_from_user(account_id, role_id, &self.pool).await
    }
}
