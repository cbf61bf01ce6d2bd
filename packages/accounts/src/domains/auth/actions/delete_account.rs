//! Delete account action

use tracing::info;

use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

/// Delete an account and detach its role edges.
///
/// The account row goes first, then each of this account's user->role
/// edges; co-holders of a shared role keep theirs untouched. The two
/// steps are deliberately not atomic with each other: a crash in between
/// leaves orphaned edges, which nothing ever reads again once the account
/// row is gone. An account with no roles makes the second step a no-op.
pub async fn delete_account(account_id: &str, deps: &AccountDeps) -> Result<(), AuthError> {
    deps.store.delete_by_id(account_id).await?;

    let role_ids = deps.store.list_role_ids_for_user(account_id).await?;
    for role_id in &role_ids {
        deps.store.remove_role_edge(account_id, role_id).await?;
    }

    info!(
        "Account {} deleted, {} role edge(s) detached",
        account_id,
        role_ids.len()
    );
    Ok(())
}
