//! Feedback action

use tracing::{error, info};

use crate::domains::auth::errors::AuthError;
use crate::kernel::AccountDeps;

const FEEDBACK_SUBJECT: &str = "Thanks for your feedback";

/// Mail an account's feedback back to its bound address as a receipt.
///
/// Requires a bound email. Unlike code issuance, a delivery failure here
/// is a hard error; the send is the entire point of the call.
pub async fn send_feedback(
    account_id: &str,
    feedback: &str,
    deps: &AccountDeps,
) -> Result<(), AuthError> {
    let account = deps
        .store
        .find_by_id(account_id)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    if !account.has_bound_email() {
        return Err(AuthError::EmailNotBound);
    }

    if let Err(e) = deps
        .mail
        .send_email(&account.email, FEEDBACK_SUBJECT, feedback)
        .await
    {
        error!("Feedback mail to account {} failed: {}", account_id, e);
        return Err(AuthError::Delivery(e));
    }

    info!("Feedback mail sent for account {}", account_id);
    Ok(())
}
