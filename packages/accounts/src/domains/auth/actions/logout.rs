//! Logout action

use tracing::info;

/// Log an account out.
///
/// Session tokens are stateless and cannot be revoked before expiry, so
/// logout is a client-side contract: the client discards its token. The
/// server only records the event; this cannot fail.
pub async fn logout(account_id: &str) {
    info!("Account {} logged out", account_id);
}
