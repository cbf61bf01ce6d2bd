//! Login action

use tracing::info;

use crate::common::validate::is_valid_phone;
use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

/// Log an existing account in with a one-time code.
///
/// The account lookup runs before the code check, so an unregistered
/// phone cannot burn a still-valid code. No password path exists.
pub async fn login(phone: &str, code: &str, deps: &AccountDeps) -> Result<String, AuthError> {
    if !is_valid_phone(phone) {
        return Err(AuthError::InvalidPhone);
    }

    let account = deps
        .store
        .find_by_phone(phone)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    deps.code_service().verify_and_consume(phone, code).await?;

    info!("Account {} logged in", account.id);
    deps.jwt.create_token(&account.id)
}
