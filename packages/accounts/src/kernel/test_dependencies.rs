// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into AccountDeps for
// tests, plus a HashMap-backed account store for unit-level flows.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::deps::AccountDeps;
use super::memory::MemoryCodeCache;
use super::traits::{
    BaseAccountStore, BaseCodeGenerator, BaseMailService, BaseSmsService,
};
use crate::domains::account::models::{
    Account, InsertOutcome, Permission, ProfilePatch, Role, DEFAULT_ROLE_IDS,
};
use crate::domains::auth::jwt::JwtService;

// =============================================================================
// Mock SMS Service
// =============================================================================

pub struct MockSmsService {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_sends: bool,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: false,
        }
    }

    /// A service whose every send fails, for delivery-failure paths
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: true,
        }
    }

    /// All (phone, code) pairs handed to the service
    pub fn sent_codes(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent code sent to a phone, if any
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == phone)
            .map(|(_, code)| code.clone())
    }

    /// Check whether anything was sent to a phone
    pub fn was_sent_to(&self, phone: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|(p, _)| p == phone)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSmsService for MockSmsService {
    async fn send_code(&self, phone: &str, code: &str) -> Result<()> {
        if self.fail_sends {
            return Err(anyhow!("sms gateway rejected the message"));
        }

        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        Ok(())
    }
}

// =============================================================================
// Mock Mail Service
// =============================================================================

pub struct MockMailService {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
    fail_sends: bool,
}

impl MockMailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: false,
        }
    }

    /// A service whose every send fails, for delivery-failure paths
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: true,
        }
    }

    /// All (to, subject, body) triples handed to the service
    pub fn sent_emails(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Check whether anything was sent to an address
    pub fn was_sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|(t, _, _)| t == to)
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailService for MockMailService {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if self.fail_sends {
            return Err(anyhow!("smtp relay refused the message"));
        }

        self.sent.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}

// =============================================================================
// Fixed Code Generator
// =============================================================================

/// Deterministic code source. Hands out queued codes in order, then falls
/// back to the fixed default.
pub struct FixedCodeGenerator {
    queued: Mutex<Vec<String>>,
    fallback: String,
}

impl FixedCodeGenerator {
    pub fn new(code: &str) -> Self {
        Self {
            queued: Mutex::new(Vec::new()),
            fallback: code.to_string(),
        }
    }

    /// Queue a code to be handed out before the fallback
    pub fn with_next(self, code: &str) -> Self {
        self.queued.lock().unwrap().push(code.to_string());
        self
    }
}

impl BaseCodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        let mut queued = self.queued.lock().unwrap();
        if queued.is_empty() {
            self.fallback.clone()
        } else {
            queued.remove(0)
        }
    }
}

// =============================================================================
// Memory Account Store
// =============================================================================

/// HashMap-backed account store for unit tests. Mirrors the Postgres
/// adapter's observable behavior, including duplicate detection and
/// COALESCE-style patches.
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<String, Account>>,
    roles: Mutex<HashMap<String, Role>>,
    permissions: Mutex<HashMap<i32, Permission>>,
    user_roles: Mutex<Vec<(String, String)>>,
    role_permissions: Mutex<Vec<(String, i32)>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            roles: Mutex::new(HashMap::new()),
            permissions: Mutex::new(HashMap::new()),
            user_roles: Mutex::new(Vec::new()),
            role_permissions: Mutex::new(Vec::new()),
        }
    }

    /// A store pre-seeded with the default role bundle
    pub fn with_default_roles() -> Self {
        Self::new()
            .with_role("USER", "Registered user")
            .with_role("USER_SELF", "Self-scoped account access")
    }

    pub fn with_role(self, role_id: &str, name: &str) -> Self {
        self.roles.lock().unwrap().insert(
            role_id.to_string(),
            Role {
                role_id: role_id.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_permission(self, permission_id: i32, name: &str) -> Self {
        self.permissions.lock().unwrap().insert(
            permission_id,
            Permission {
                permission_id,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_role_permission(self, role_id: &str, permission_id: i32) -> Self {
        self.role_permissions
            .lock()
            .unwrap()
            .push((role_id.to_string(), permission_id));
        self
    }

    pub fn with_account(self, account: Account) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.id.clone(), account);
        self
    }

    /// Attach an arbitrary role edge directly (test setup shortcut)
    pub fn with_user_role(self, user_id: &str, role_id: &str) -> Self {
        self.user_roles
            .lock()
            .unwrap()
            .push((user_id.to_string(), role_id.to_string()));
        self
    }

    /// All live (user_id, role_id) edges, for assertions
    pub fn role_edges(&self) -> Vec<(String, String)> {
        self.user_roles.lock().unwrap().clone()
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.phone == phone)
            .cloned())
    }

    async fn insert(&self, account: &Account) -> Result<InsertOutcome> {
        let mut accounts = self.accounts.lock().unwrap();

        let taken = accounts.contains_key(&account.id)
            || accounts.values().any(|a| a.phone == account.phone);
        if taken {
            return Ok(InsertOutcome::DuplicateId);
        }

        accounts.insert(account.id.clone(), account.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<()> {
        let mut accounts = self.accounts.lock().unwrap();

        // Zero rows affected is not an error, same as the SQL UPDATE
        if let Some(account) = accounts.get_mut(id) {
            if let Some(name) = &patch.name {
                account.name = Some(name.clone());
            }
            if let Some(gender) = &patch.gender {
                account.gender = Some(gender.clone());
            }
            if let Some(region) = &patch.region {
                account.region = Some(region.clone());
            }
            if let Some(profile) = &patch.profile {
                account.profile = Some(profile.clone());
            }
            if let Some(email) = &patch.email {
                account.email = email.clone();
            }
            if let Some(avatar) = &patch.avatar {
                account.avatar = avatar.clone();
            }
            if let Some(open_id) = &patch.open_id {
                account.open_id = Some(open_id.clone());
            }
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.accounts.lock().unwrap().remove(id);
        Ok(())
    }

    async fn list_role_ids_for_user(&self, id: &str) -> Result<Vec<String>> {
        Ok(self
            .user_roles
            .lock()
            .unwrap()
            .iter()
            .filter(|(user_id, _)| user_id == id)
            .map(|(_, role_id)| role_id.clone())
            .collect())
    }

    async fn roles_by_ids(&self, role_ids: &[String]) -> Result<Vec<Role>> {
        let roles = self.roles.lock().unwrap();
        Ok(role_ids
            .iter()
            .filter_map(|id| roles.get(id).cloned())
            .collect())
    }

    async fn permission_ids_for_roles(&self, role_ids: &[String]) -> Result<Vec<i32>> {
        Ok(self
            .role_permissions
            .lock()
            .unwrap()
            .iter()
            .filter(|(role_id, _)| role_ids.contains(role_id))
            .map(|(_, permission_id)| *permission_id)
            .collect())
    }

    async fn permissions_by_ids(&self, permission_ids: &[i32]) -> Result<Vec<Permission>> {
        let permissions = self.permissions.lock().unwrap();
        Ok(permission_ids
            .iter()
            .filter_map(|id| permissions.get(id).cloned())
            .collect())
    }

    async fn assign_default_roles(&self, id: &str) -> Result<()> {
        let mut user_roles = self.user_roles.lock().unwrap();
        for role_id in DEFAULT_ROLE_IDS {
            let edge = (id.to_string(), role_id.to_string());
            if !user_roles.contains(&edge) {
                user_roles.push(edge);
            }
        }
        Ok(())
    }

    async fn remove_role_edge(&self, account_id: &str, role_id: &str) -> Result<()> {
        self.user_roles
            .lock()
            .unwrap()
            .retain(|(user_id, rid)| !(user_id == account_id && rid == role_id));
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

pub struct TestDependencies {
    pub store: Arc<MemoryAccountStore>,
    pub code_cache: Arc<MemoryCodeCache>,
    pub sms: Arc<MockSmsService>,
    pub mail: Arc<MockMailService>,
    pub code_generator: Arc<FixedCodeGenerator>,
    pub jwt: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryAccountStore::with_default_roles()),
            code_cache: Arc::new(MemoryCodeCache::new()),
            sms: Arc::new(MockSmsService::new()),
            mail: Arc::new(MockMailService::new()),
            code_generator: Arc::new(FixedCodeGenerator::new("482913")),
            jwt: Arc::new(JwtService::new("test-secret-key", "tidings")),
        }
    }

    /// Swap in a pre-seeded account store
    pub fn with_store(mut self, store: MemoryAccountStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Swap in a different SMS mock
    pub fn with_sms(mut self, sms: MockSmsService) -> Self {
        self.sms = Arc::new(sms);
        self
    }

    /// Swap in a different mail mock
    pub fn with_mail(mut self, mail: MockMailService) -> Self {
        self.mail = Arc::new(mail);
        self
    }

    /// Swap in a different code generator
    pub fn with_code_generator(mut self, generator: FixedCodeGenerator) -> Self {
        self.code_generator = Arc::new(generator);
        self
    }

    /// Assemble an AccountDeps backed entirely by the mocks
    pub fn into_deps(self) -> AccountDeps {
        AccountDeps::new(
            self.store,
            self.code_cache,
            self.sms,
            self.mail,
            self.code_generator,
            self.jwt,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
