//! Permission resolution - the user -> role -> permission graph walk

use serde::Serialize;
use std::collections::HashSet;

use crate::domains::account::models::{Account, Permission, Role};
use crate::domains::auth::errors::AuthError;
use crate::kernel::BaseAccountStore;

/// An account together with everything it may do. The "current user" view.
#[derive(Debug, Clone, Serialize)]
pub struct AccountIdentity {
    pub account: Account,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

/// Roles attached to an account.
///
/// No edges resolves to an empty set, not an error; an account can
/// legitimately be role-less mid-registration.
pub async fn resolve_roles(
    store: &dyn BaseAccountStore,
    account_id: &str,
) -> Result<Vec<Role>, AuthError> {
    let role_ids = store.list_role_ids_for_user(account_id).await?;
    if role_ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(store.roles_by_ids(&role_ids).await?)
}

/// Permissions granted by a set of roles, deduplicated by permission id.
///
/// Pure set union: a permission reachable through two roles appears once.
/// Result order is first-seen lookup order and carries no meaning.
pub async fn resolve_permissions(
    store: &dyn BaseAccountStore,
    role_ids: &[String],
) -> Result<Vec<Permission>, AuthError> {
    if role_ids.is_empty() {
        return Ok(Vec::new());
    }

    let raw_ids = store.permission_ids_for_roles(role_ids).await?;
    if raw_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let deduped: Vec<i32> = raw_ids.into_iter().filter(|id| seen.insert(*id)).collect();

    Ok(store.permissions_by_ids(&deduped).await?)
}

/// Compose the full identity view for an already-loaded account
pub async fn resolve_identity(
    store: &dyn BaseAccountStore,
    account: Account,
) -> Result<AccountIdentity, AuthError> {
    let roles = resolve_roles(store, &account.id).await?;
    let role_ids: Vec<String> = roles.iter().map(|r| r.role_id.clone()).collect();
    let permissions = resolve_permissions(store, &role_ids).await?;

    Ok(AccountIdentity {
        account,
        roles,
        permissions,
    })
}
