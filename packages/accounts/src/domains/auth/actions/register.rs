//! Register action

use tracing::{info, warn};

use crate::common::validate::is_valid_phone;
use crate::domains::account::models::{Account, InsertOutcome};
use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

/// Register a new account for a phone number; the one-time code is the
/// sole credential. Returns a session token for the fresh account.
pub async fn register(phone: &str, code: &str, deps: &AccountDeps) -> Result<String, AuthError> {
    if !is_valid_phone(phone) {
        return Err(AuthError::InvalidPhone);
    }

    // 1. Cheap existence check before burning the code
    if deps.store.find_by_phone(phone).await?.is_some() {
        return Err(AuthError::AccountAlreadyExists);
    }

    // 2. Consume the one-time code
    deps.code_service().verify_and_consume(phone, code).await?;

    // 3. Insert with the default role bundle. The unique constraint, not
    //    the check above, is the authoritative gate: two concurrent
    //    registrations can both pass step 1
    let account = Account::new_registration(phone);
    match deps.store.insert_with_default_roles(&account).await? {
        InsertOutcome::Inserted => {}
        InsertOutcome::DuplicateId => {
            warn!("Registration for {} lost the insert race", phone);
            return Err(AuthError::AccountAlreadyExists);
        }
    }

    // 4. Mint the session token
    info!("Account {} registered", account.id);
    deps.jwt.create_token(&account.id)
}
