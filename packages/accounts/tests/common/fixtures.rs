//! Shared fixtures: dependency bundles and database seed helpers.

use std::sync::Arc;

use accounts_core::domains::auth::actions::{register, send_code};
use accounts_core::domains::auth::jwt::JwtService;
use accounts_core::kernel::test_dependencies::{
    FixedCodeGenerator, MockMailService, MockSmsService,
};
use accounts_core::kernel::{AccountDeps, PgAccountStore, RedisCodeCache};
use sqlx::PgPool;

use super::harness::TestHarness;

/// Assembled dependencies plus handles to the delivery mocks, so tests
/// can assert on what was dispatched.
pub struct DepsBundle {
    pub deps: AccountDeps,
    pub sms: Arc<MockSmsService>,
    pub mail: Arc<MockMailService>,
}

/// Production-shaped dependencies over the harness containers: Postgres
/// store, Redis code cache, mocked delivery, deterministic codes.
pub async fn build_deps(harness: &TestHarness, generator: FixedCodeGenerator) -> DepsBundle {
    build_deps_inner(harness, generator, MockMailService::new()).await
}

/// Same bundle, but every mail send fails.
pub async fn build_deps_with_failing_mail(
    harness: &TestHarness,
    generator: FixedCodeGenerator,
) -> DepsBundle {
    build_deps_inner(harness, generator, MockMailService::failing()).await
}

async fn build_deps_inner(
    harness: &TestHarness,
    generator: FixedCodeGenerator,
    mail: MockMailService,
) -> DepsBundle {
    let cache = RedisCodeCache::connect(&harness.redis_url)
        .await
        .expect("Failed to connect code cache to Redis container");

    let sms = Arc::new(MockSmsService::new());
    let mail = Arc::new(mail);

    let deps = AccountDeps::new(
        Arc::new(PgAccountStore::new(harness.db_pool.clone())),
        Arc::new(cache),
        sms.clone(),
        mail.clone(),
        Arc::new(generator),
        Arc::new(JwtService::new("integration-test-secret", "tidings")),
    );

    DepsBundle { deps, sms, mail }
}

/// Register an account end to end (issue code, redeem it) and hand back
/// its session token.
pub async fn register_account(deps: &AccountDeps, phone: &str, code: &str) -> String {
    send_code(phone, deps)
        .await
        .expect("code issuance should succeed");
    register(phone, code, deps)
        .await
        .expect("registration should succeed")
}

/// Seed a role and its permissions directly in the database.
pub async fn seed_role(pool: &PgPool, role_id: &str, name: &str, permissions: &[(i32, &str)]) {
    sqlx::query("INSERT INTO roles (role_id, name) VALUES ($1, $2)")
        .bind(role_id)
        .bind(name)
        .execute(pool)
        .await
        .expect("role insert should succeed");

    for (permission_id, permission_name) in permissions {
        sqlx::query(
            "INSERT INTO permissions (permission_id, name) VALUES ($1, $2)
             ON CONFLICT (permission_id) DO NOTHING",
        )
        .bind(permission_id)
        .bind(permission_name)
        .execute(pool)
        .await
        .expect("permission insert should succeed");

        sqlx::query("INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)")
            .bind(role_id)
            .bind(permission_id)
            .execute(pool)
            .await
            .expect("role permission insert should succeed");
    }
}

/// Attach an existing role to an account directly in the database.
pub async fn attach_role(pool: &PgPool, user_id: &str, role_id: &str) {
    sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await
        .expect("user role insert should succeed");
}
