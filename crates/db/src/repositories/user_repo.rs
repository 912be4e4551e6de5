//! Repository for the `users` table and its role lookups.

use async_trait::async_trait;
use curator_core::roles::{Role, RoleResolver};
use curator_core::types::{BoxError, DbId};
use sqlx::PgPool;

/// Provides the user lookups the workflow needs.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user with the named role, returning the generated ID.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        display_name: Option<&str>,
        role_name: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO users (email, display_name, role_id) \
             SELECT $1, $2, id FROM roles WHERE name = $3 \
             RETURNING id",
        )
        .bind(email)
        .bind(display_name)
        .bind(role_name)
        .fetch_one(pool)
        .await
    }

    /// Role name of an active user, or `None` if the user is unknown or inactive.
    pub async fn find_role_name(pool: &PgPool, user_id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT r.name FROM users u \
             JOIN roles r ON r.id = u.role_id \
             WHERE u.id = $1 AND u.is_active = true",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// IDs of active users holding any of the given roles.
    pub async fn list_active_ids_with_roles(
        pool: &PgPool,
        role_names: &[String],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.id FROM users u \
             JOIN roles r ON r.id = u.role_id \
             WHERE r.name = ANY($1) AND u.is_active = true \
             ORDER BY u.id ASC",
        )
        .bind(role_names)
        .fetch_all(pool)
        .await
    }
}

/// [`RoleResolver`] backed by the `users` and `roles` tables.
#[derive(Debug, Clone)]
pub struct PgRoleResolver {
    pool: PgPool,
}

impl PgRoleResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleResolver for PgRoleResolver {
    async fn get_role(&self, user_id: DbId) -> Result<Option<Role>, BoxError> {
        match UserRepo::find_role_name(&self.pool, user_id).await? {
            Some(name) => Ok(Some(name.parse::<Role>()?)),
            None => Ok(None),
        }
    }
}
