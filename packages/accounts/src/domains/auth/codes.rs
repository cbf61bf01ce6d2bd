//! Verification code lifecycle: issue, deliver, consume exactly once.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::errors::AuthError;
use crate::kernel::{BaseCodeCache, BaseCodeGenerator, BaseSmsService};

/// Cache key namespace for live verification codes.
pub const CODE_KEY_PREFIX: &str = "verify:code:";

/// A code stays redeemable this long after issue.
pub const CODE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key holding the live code for a phone
pub fn code_key(phone: &str) -> String {
    format!("{}{}", CODE_KEY_PREFIX, phone)
}

/// Production code source: six random decimal digits
pub struct RandomCodeGenerator;

impl BaseCodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{:06}", n)
    }
}

/// Verification code service
///
/// At most one code is live per phone (issuing overwrites), and a code
/// can be consumed at most once.
pub struct CodeService {
    cache: Arc<dyn BaseCodeCache>,
    sms: Arc<dyn BaseSmsService>,
    generator: Arc<dyn BaseCodeGenerator>,
}

impl CodeService {
    pub fn new(
        cache: Arc<dyn BaseCodeCache>,
        sms: Arc<dyn BaseSmsService>,
        generator: Arc<dyn BaseCodeGenerator>,
    ) -> Self {
        Self {
            cache,
            sms,
            generator,
        }
    }

    /// Issue a fresh code for a phone and hand it to the SMS service.
    ///
    /// The code is stored before dispatch, so a delivery failure leaves it
    /// redeemable; the failure is still surfaced to the caller.
    pub async fn issue(&self, phone: &str) -> Result<(), AuthError> {
        let code = self.generator.generate();

        self.cache
            .set_with_ttl(&code_key(phone), &code, CODE_TTL)
            .await?;

        if let Err(e) = self.sms.send_code(phone, &code).await {
            warn!("Verification code SMS to {} failed: {}", phone, e);
            return Err(AuthError::Delivery(e));
        }

        info!("Verification code issued for {}", phone);
        Ok(())
    }

    /// Check a candidate against the live code and consume it on match.
    ///
    /// Absent (never issued, TTL lapsed, or already consumed) reports
    /// `CodeExpired`. A live non-matching code reports `CodeMismatch` and
    /// stays redeemable until its TTL.
    pub async fn verify_and_consume(&self, phone: &str, candidate: &str) -> Result<(), AuthError> {
        let key = code_key(phone);

        let stored = match self.cache.get(&key).await? {
            Some(stored) => stored,
            None => return Err(AuthError::CodeExpired),
        };

        if stored != candidate {
            return Err(AuthError::CodeMismatch);
        }

        // Matching is not enough: the conditional delete must win too, or
        // a concurrent caller already consumed this code
        if !self.cache.remove_if_equals(&key, candidate).await? {
            return Err(AuthError::CodeExpired);
        }

        info!("Verification code consumed for {}", phone);
        Ok(())
    }
}
