// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business rules (like "register verifies the code before inserting") live
// in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAccountStore, BaseCodeCache)

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::domains::account::models::{Account, InsertOutcome, Permission, ProfilePatch, Role};

// =============================================================================
// Account Store Trait (Infrastructure - durable account records)
// =============================================================================

#[async_trait]
pub trait BaseAccountStore: Send + Sync {
    /// Fetch an account by its stable id
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>>;

    /// Fetch an account by phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>>;

    /// Insert a new account; reports `DuplicateId` instead of failing when
    /// the id or phone is already taken
    async fn insert(&self, account: &Account) -> Result<InsertOutcome>;

    /// Insert a new account and attach the default role bundle.
    ///
    /// The default body runs the two steps sequentially. Stores that can
    /// should override this with a single transaction so an account never
    /// lands without its default roles.
    async fn insert_with_default_roles(&self, account: &Account) -> Result<InsertOutcome> {
        match self.insert(account).await? {
            InsertOutcome::Inserted => {
                self.assign_default_roles(&account.id).await?;
                Ok(InsertOutcome::Inserted)
            }
            outcome => Ok(outcome),
        }
    }

    /// Apply the present fields of the patch; absent fields stay untouched
    async fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<()>;

    /// Delete the account record; no-op if it does not exist
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    /// Role ids attached to an account (the user->role edges)
    async fn list_role_ids_for_user(&self, id: &str) -> Result<Vec<String>>;

    /// Bulk role lookup by id set
    async fn roles_by_ids(&self, role_ids: &[String]) -> Result<Vec<Role>>;

    /// Permission ids granted by the given roles (raw edges, duplicates possible)
    async fn permission_ids_for_roles(&self, role_ids: &[String]) -> Result<Vec<i32>>;

    /// Bulk permission lookup by id set
    async fn permissions_by_ids(&self, permission_ids: &[i32]) -> Result<Vec<Permission>>;

    /// Attach the default role bundle to an account
    async fn assign_default_roles(&self, id: &str) -> Result<()>;

    /// Detach one role from one account; never touches other accounts' edges
    async fn remove_role_edge(&self, account_id: &str, role_id: &str) -> Result<()>;
}

// =============================================================================
// Code Cache Trait (Infrastructure - ephemeral TTL'd strings)
// =============================================================================

#[async_trait]
pub trait BaseCodeCache: Send + Sync {
    /// Store value under key, replacing any existing value, expiring after ttl
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Fetch the live value; None when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete key only if it currently holds exactly `value`; true if deleted.
    ///
    /// Must be atomic with respect to concurrent callers: when several race
    /// on the same key/value, at most one observes `true`.
    async fn remove_if_equals(&self, key: &str, value: &str) -> Result<bool>;
}

// =============================================================================
// SMS Service Trait (Infrastructure - verification code delivery)
// =============================================================================

#[async_trait]
pub trait BaseSmsService: Send + Sync {
    /// Send a verification code via SMS to a phone number
    async fn send_code(&self, phone: &str, code: &str) -> Result<()>;
}

// =============================================================================
// Mail Service Trait (Infrastructure - outbound email)
// =============================================================================

#[async_trait]
pub trait BaseMailService: Send + Sync {
    /// Send a plain-text email
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

// =============================================================================
// Code Generator Trait (Infrastructure - verification code source)
// =============================================================================

/// Source of fresh verification codes. Synchronous on purpose; production
/// uses thread-local randomness, tests substitute fixed sequences.
pub trait BaseCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}
