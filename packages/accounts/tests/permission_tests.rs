//! Integration tests for role assignment and permission resolution.

mod common;

use accounts_core::domains::account::actions::get_identity;
use accounts_core::domains::account::models::Account;
use accounts_core::domains::account::AccountIdentity;
use accounts_core::domains::auth::actions::delete_account;
use accounts_core::domains::auth::errors::AuthError;
use accounts_core::kernel::test_dependencies::FixedCodeGenerator;
use accounts_core::kernel::traits::BaseAccountStore;
use common::{fixtures, TestHarness};
use test_context::test_context;

fn sorted_role_ids(identity: &AccountIdentity) -> Vec<String> {
    let mut ids: Vec<String> = identity.roles.iter().map(|r| r.role_id.clone()).collect();
    ids.sort();
    ids
}

fn sorted_permission_ids(identity: &AccountIdentity) -> Vec<i32> {
    let mut ids: Vec<i32> = identity
        .permissions
        .iter()
        .map(|p| p.permission_id)
        .collect();
    ids.sort();
    ids
}

// ============================================================================
// Default role bundle
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_fresh_registration_gets_default_bundle(ctx: &TestHarness) {
    let bundle = fixtures::build_deps(ctx, FixedCodeGenerator::new("482913")).await;
    let deps = &bundle.deps;

    fixtures::register_account(deps, "13100001111", "482913").await;

    let identity = get_identity("13100001111", deps).await.unwrap();
    assert_eq!(
        sorted_role_ids(&identity),
        vec!["USER", "USER_SELF"],
        "A fresh registration must carry exactly the default roles"
    );
    assert_eq!(
        sorted_permission_ids(&identity),
        vec![1, 2, 3, 4],
        "Default roles must grant the four seeded permissions"
    );

    let names: Vec<&str> = identity.permissions.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&"content:read"));
    assert!(names.contains(&"profile:write:self"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_account_without_roles_resolves_empty(ctx: &TestHarness) {
    let bundle = fixtures::build_deps(ctx, FixedCodeGenerator::new("482913")).await;
    let deps = &bundle.deps;

    // Insert the row directly, bypassing the default-role assignment
    let account = Account::new_registration("13100002222");
    deps.store.insert(&account).await.unwrap();

    let identity = get_identity("13100002222", deps).await.unwrap();
    assert!(
        identity.roles.is_empty(),
        "No edges means no roles, not an error"
    );
    assert!(identity.permissions.is_empty());
}

// ============================================================================
// Union semantics
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_permissions_union_across_roles(ctx: &TestHarness) {
    let bundle = fixtures::build_deps(ctx, FixedCodeGenerator::new("482913")).await;
    let deps = &bundle.deps;
    let pool = &ctx.db_pool;

    fixtures::register_account(deps, "13100003333", "482913").await;

    // Two extra roles overlapping on permission 7302
    fixtures::seed_role(
        pool,
        "EDITOR_UNION",
        "Editor",
        &[(7301, "article:edit"), (7302, "article:publish")],
    )
    .await;
    fixtures::seed_role(
        pool,
        "REVIEWER_UNION",
        "Reviewer",
        &[(7302, "article:publish"), (7303, "article:retract")],
    )
    .await;
    fixtures::attach_role(pool, "13100003333", "EDITOR_UNION").await;
    fixtures::attach_role(pool, "13100003333", "REVIEWER_UNION").await;

    let identity = get_identity("13100003333", deps).await.unwrap();
    assert_eq!(
        sorted_role_ids(&identity),
        vec!["EDITOR_UNION", "REVIEWER_UNION", "USER", "USER_SELF"]
    );
    assert_eq!(
        sorted_permission_ids(&identity),
        vec![1, 2, 3, 4, 7301, 7302, 7303],
        "Permissions are the set union over all held roles"
    );

    let shared_count = identity
        .permissions
        .iter()
        .filter(|p| p.permission_id == 7302)
        .count();
    assert_eq!(
        shared_count, 1,
        "A permission granted by several roles must appear once"
    );
}

// ============================================================================
// Deletion scope
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_delete_scopes_edges_to_one_account(ctx: &TestHarness) {
    let bundle = fixtures::build_deps(ctx, FixedCodeGenerator::new("482913")).await;
    let deps = &bundle.deps;
    let pool = &ctx.db_pool;

    fixtures::register_account(deps, "13100004444", "482913").await;
    fixtures::register_account(deps, "13100005555", "482913").await;

    fixtures::seed_role(pool, "SHARED_DELETE", "Shared role", &[(9401, "shared:perm")]).await;
    fixtures::attach_role(pool, "13100004444", "SHARED_DELETE").await;
    fixtures::attach_role(pool, "13100005555", "SHARED_DELETE").await;

    delete_account("13100004444", deps).await.unwrap();

    // The deleted account left no edges behind
    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_roles WHERE user_id = $1")
            .bind("13100004444")
            .fetch_one(pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0, "Deletion must detach all of the account's edges");

    let gone = get_identity("13100004444", deps).await;
    assert!(matches!(gone, Err(AuthError::AccountNotFound)));

    // The co-holder keeps the shared role and its permission
    let survivor = get_identity("13100005555", deps).await.unwrap();
    assert!(
        sorted_role_ids(&survivor).contains(&"SHARED_DELETE".to_string()),
        "Deleting one holder must not strip the role from another"
    );
    assert!(sorted_permission_ids(&survivor).contains(&9401));
}
