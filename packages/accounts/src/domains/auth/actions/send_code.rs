//! Send verification code action

use tracing::info;

use crate::common::validate::is_valid_phone;
use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

/// Issue a verification code for a phone and dispatch it via SMS.
///
/// Serves both registration and login; the phone does not need an account
/// yet. The shape check runs before any store access.
pub async fn send_code(phone: &str, deps: &AccountDeps) -> Result<(), AuthError> {
    if !is_valid_phone(phone) {
        return Err(AuthError::InvalidPhone);
    }

    info!("Issuing verification code for {}", phone);
    deps.code_service().issue(phone).await
}
