use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

/// Roles attached to every freshly registered account.
pub const DEFAULT_ROLE_IDS: [&str; 2] = ["USER", "USER_SELF"];

/// Role model - a named grant bundle (e.g. USER, USER_SELF)
#[derive(sqlx::FromRow, Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Role {
    pub role_id: String,
    pub name: String,
}

/// Permission model - a single capability referenced by roles
#[derive(sqlx::FromRow, Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Permission {
    pub permission_id: i32,
    pub name: String,
}

impl Role {
    /// Bulk role lookup by id set
    pub async fn find_by_ids(role_ids: &[String], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM roles WHERE role_id = ANY($1)")
            .bind(role_ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Role ids attached to an account via user_roles edges
    pub async fn ids_for_user(user_id: &str, pool: &PgPool) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT role_id FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Attach one role to one account
    pub async fn attach_to_user<'e, E>(user_id: &str, role_id: &str, executor: E) -> Result<()>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Detach one role from one account. Scoped to that single edge;
    /// other holders of the role keep theirs.
    pub async fn detach_from_user(user_id: &str, role_id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

impl Permission {
    /// Bulk permission lookup by id set
    pub async fn find_by_ids(permission_ids: &[i32], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM permissions WHERE permission_id = ANY($1)")
            .bind(permission_ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Permission ids granted by the given roles. Raw role_permissions
    /// edges; a permission held by two roles appears twice.
    pub async fn ids_for_roles(role_ids: &[String], pool: &PgPool) -> Result<Vec<i32>> {
        sqlx::query_scalar::<_, i32>(
            "SELECT permission_id FROM role_permissions WHERE role_id = ANY($1)",
        )
        .bind(role_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role_bundle() {
        assert!(DEFAULT_ROLE_IDS.contains(&"USER"));
        assert!(DEFAULT_ROLE_IDS.contains(&"USER_SELF"));
        assert_eq!(DEFAULT_ROLE_IDS.len(), 2);
    }
}
