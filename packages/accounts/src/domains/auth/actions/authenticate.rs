//! Authenticate action - the token boundary

use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

/// Resolve a session token to the account id it asserts.
///
/// This is the boundary step; every identity-bearing operation takes the
/// account id this returns, never ambient state.
pub fn authenticate(token: &str, deps: &AccountDeps) -> Result<String, AuthError> {
    let claims = deps.jwt.verify_token(token)?;
    Ok(claims.sub)
}
