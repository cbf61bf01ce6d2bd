//! Update profile action

use tracing::info;

use crate::common::validate::is_valid_email;
use crate::domains::account::models::ProfilePatch;
use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

/// Apply a sparse profile patch to an account.
///
/// A present email must match the accepted shape (the unbound sentinel
/// counts as valid, so clients can unbind) or the whole update is
/// rejected before any field is written.
pub async fn update_profile(
    account_id: &str,
    patch: &ProfilePatch,
    deps: &AccountDeps,
) -> Result<(), AuthError> {
    if let Some(email) = &patch.email {
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
    }

    if patch.is_empty() {
        return Ok(());
    }

    deps.store.update_profile(account_id, patch).await?;

    info!("Profile updated for {}", account_id);
    Ok(())
}
