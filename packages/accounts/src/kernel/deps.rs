//! Account dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! domain action. All external collaborators sit behind trait abstractions
//! so tests can swap them out.

use std::sync::Arc;

use crate::domains::auth::codes::CodeService;
use crate::domains::auth::jwt::JwtService;
use crate::kernel::{
    BaseAccountStore, BaseCodeCache, BaseCodeGenerator, BaseMailService, BaseSmsService,
};

// =============================================================================
// AccountDeps
// =============================================================================

/// Dependencies accessible to account and auth actions
#[derive(Clone)]
pub struct AccountDeps {
    pub store: Arc<dyn BaseAccountStore>,
    pub code_cache: Arc<dyn BaseCodeCache>,
    pub sms: Arc<dyn BaseSmsService>,
    pub mail: Arc<dyn BaseMailService>,
    pub code_generator: Arc<dyn BaseCodeGenerator>,
    /// JWT service for session token creation and validation
    pub jwt: Arc<JwtService>,
}

impl AccountDeps {
    /// Create new AccountDeps with the given collaborators
    pub fn new(
        store: Arc<dyn BaseAccountStore>,
        code_cache: Arc<dyn BaseCodeCache>,
        sms: Arc<dyn BaseSmsService>,
        mail: Arc<dyn BaseMailService>,
        code_generator: Arc<dyn BaseCodeGenerator>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            store,
            code_cache,
            sms,
            mail,
            code_generator,
            jwt,
        }
    }

    /// Verification code service assembled over these dependencies
    pub fn code_service(&self) -> CodeService {
        CodeService::new(
            self.code_cache.clone(),
            self.sms.clone(),
            self.code_generator.clone(),
        )
    }
}
