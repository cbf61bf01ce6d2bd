use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::validate::EMAIL_UNBOUND;

/// Avatar served for every account until the client uploads one.
pub const DEFAULT_AVATAR_URL: &str = "https://cdn.tidings.app/static/avatar-default.png";

/// Outcome of an account insert attempt.
///
/// `DuplicateId` is the unique-constraint path; registration treats the
/// insert itself as the authoritative uniqueness gate under concurrency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateId,
}

/// Account model - SQL persistence layer
///
/// The id doubles as the registered phone number and never changes.
/// Profile fields start unset and arrive later through `ProfilePatch`.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Account {
    pub id: String,
    pub phone: String,
    pub email: String,
    pub avatar: String,

    // Optional profile fields, unset at registration
    pub name: Option<String>,
    pub gender: Option<String>,
    pub region: Option<String>,
    pub profile: Option<String>,
    pub open_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Sparse profile update. A `Some` field is written, a `None` field leaves
/// the column untouched. The id, phone, and created_at are never patchable.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub region: Option<String>,
    pub profile: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub open_id: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.gender.is_none()
            && self.region.is_none()
            && self.profile.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.open_id.is_none()
    }
}

impl Account {
    /// Fresh account for a phone number, profile fields unset
    pub fn new_registration(phone: &str) -> Self {
        Self {
            id: phone.to_string(),
            phone: phone.to_string(),
            email: EMAIL_UNBOUND.to_string(),
            avatar: DEFAULT_AVATAR_URL.to_string(),
            name: None,
            gender: None,
            region: None,
            profile: None,
            open_id: None,
            created_at: Utc::now(),
        }
    }

    /// True when a real address is bound rather than the sentinel
    pub fn has_bound_email(&self) -> bool {
        self.email != EMAIL_UNBOUND
    }

    /// Find account by ID
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find account by phone number
    pub async fn find_by_phone(phone: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new account row.
    ///
    /// A unique violation (id or phone already taken) is an expected
    /// outcome, not an error; concurrent registrations race on it.
    pub async fn insert<'e, E>(&self, executor: E) -> Result<InsertOutcome>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO accounts (
                id,
                phone,
                email,
                avatar,
                name,
                gender,
                region,
                profile,
                open_id,
                created_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&self.id)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.avatar)
        .bind(&self.name)
        .bind(&self.gender)
        .bind(&self.region)
        .bind(&self.profile)
        .bind(&self.open_id)
        .bind(self.created_at)
        .execute(executor)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(InsertOutcome::DuplicateId)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply the present fields of a patch, leaving absent ones untouched
    pub async fn update_profile(id: &str, patch: &ProfilePatch, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "UPDATE accounts
             SET name = COALESCE($2, name),
                 gender = COALESCE($3, gender),
                 region = COALESCE($4, region),
                 profile = COALESCE($5, profile),
                 email = COALESCE($6, email),
                 avatar = COALESCE($7, avatar),
                 open_id = COALESCE($8, open_id)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.gender)
        .bind(&patch.region)
        .bind(&patch.profile)
        .bind(&patch.email)
        .bind(&patch.avatar)
        .bind(&patch.open_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Delete the account row; no-op when absent
    pub async fn delete_by_id(id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
