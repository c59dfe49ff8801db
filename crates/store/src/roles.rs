use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;

use crate::error::Result;
use crate::model::Role;

const ROLE_COLUMNS: &str = "id, name, permissions, created_at, deleted_at";

/// Repository for role rows.
#[derive(Clone)]
pub struct RoleRepo {
    pool: SqlitePool,
}

impl RoleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new role. Permissions are stored exactly as supplied.
    /// Name uniqueness rests on the store's unique index.
    pub async fn create(&self, name: &str, permissions: &[String]) -> Result<Role> {
        let sql = format!(
            "INSERT INTO roles (name, permissions, created_at) \
             VALUES (?1, ?2, ?3) RETURNING {ROLE_COLUMNS}"
        );
        let role = sqlx::query_as::<_, Role>(&sql)
            .bind(name)
            .bind(Json(permissions.to_vec()))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(role)
    }

    /// Find a non-deleted role by exact name match.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        let sql = format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE name = ?1 AND deleted_at IS NULL LIMIT 1"
        );
        let role = sqlx::query_as::<_, Role>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    async fn test_pool() -> SqlitePool {
        let pool = crate::connect("sqlite::memory:").await.unwrap();
        crate::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_find_by_name() {
        let repo = RoleRepo::new(test_pool().await);

        let created = repo
            .create("editor", &["READ".to_string(), "WRITE".to_string()])
            .await
            .unwrap();
        assert_eq!(created.name, "editor");

        let found = repo.find_by_name("editor").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.find_by_name("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let repo = RoleRepo::new(test_pool().await);

        repo.create("editor", &[]).await.unwrap();
        let err = repo.create("editor", &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_permissions_keep_order_and_duplicates() {
        let repo = RoleRepo::new(test_pool().await);

        let permissions = vec![
            "WRITE".to_string(),
            "READ".to_string(),
            "WRITE".to_string(),
        ];
        let created = repo.create("editor", &permissions).await.unwrap();
        assert_eq!(created.permissions.0, permissions);

        let found = repo.find_by_name("editor").await.unwrap().unwrap();
        assert_eq!(found.permissions.0, permissions);
    }
}
