//! Get identity action

use tracing::debug;

use crate::domains::account::resolver::{resolve_identity, AccountIdentity};
use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

/// Assemble the "current user" view: the account plus its resolved roles
/// and permissions.
///
/// Tokens outlive deletions, so an account removed under a still-valid
/// token reports `AccountNotFound` here.
pub async fn get_identity(
    account_id: &str,
    deps: &AccountDeps,
) -> Result<AccountIdentity, AuthError> {
    let account = deps
        .store
        .find_by_id(account_id)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    debug!("Resolving identity for {}", account_id);
    resolve_identity(deps.store.as_ref(), account).await
}
