use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::model::{NewUser, Role, User, UserWithRoles};

const USER_COLUMNS: &str = "id, email, first_name, last_name, password_hash, created_at, deleted_at";

/// Repository for user rows and the user-role association.
#[derive(Clone)]
pub struct UserRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct UserRoleRow {
    user_id: i64,
    #[sqlx(flatten)]
    role: Role,
}

impl UserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user row. Uniqueness of the email rests entirely on the
    /// store's unique index; there is no check-then-insert here.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let sql = format!(
            "INSERT INTO users (email, first_name, last_name, password_hash, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.email)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.password_hash)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a non-deleted user by exact email match.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1 AND deleted_at IS NULL LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a non-deleted user by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1 AND deleted_at IS NULL LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Names of the roles held by a user.
    pub async fn role_names_for(&self, user_id: i64) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT r.name FROM roles r \
             INNER JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = ?1 AND r.deleted_at IS NULL \
             ORDER BY r.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    /// All non-deleted users with their role records. The user-role relation
    /// is materialized by one explicit join query, never lazily.
    pub async fn list_with_roles(&self) -> Result<Vec<UserWithRoles>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id"
        );
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;

        let rows = sqlx::query_as::<_, UserRoleRow>(
            "SELECT ur.user_id AS user_id, r.id AS id, r.name AS name, \
                    r.permissions AS permissions, r.created_at AS created_at, \
                    r.deleted_at AS deleted_at \
             FROM user_roles ur \
             INNER JOIN roles r ON r.id = ur.role_id \
             WHERE r.deleted_at IS NULL \
             ORDER BY ur.user_id, r.id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut roles_by_user: HashMap<i64, Vec<Role>> = HashMap::new();
        for row in rows {
            roles_by_user.entry(row.user_id).or_default().push(row.role);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let roles = roles_by_user.remove(&user.id).unwrap_or_default();
                UserWithRoles::new(user, roles)
            })
            .collect())
    }

    /// Associate a role with a user. Re-assigning an already-held role is a
    /// no-op thanks to the join table's composite primary key.
    pub async fn assign_role(&self, user_id: i64, role_id: i64) -> Result<()> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES (?1, ?2) \
             ON CONFLICT (user_id, role_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a user row; associations cascade.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RoleRepo;

    async fn test_pool() -> SqlitePool {
        let pool = crate::connect("sqlite::memory:").await.unwrap();
        crate::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let repo = UserRepo::new(test_pool().await);

        let created = repo.create(&new_user("a@x.com")).await.unwrap();
        assert_eq!(created.email, "a@x.com");

        let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let repo = UserRepo::new(test_pool().await);

        repo.create(&new_user("a@x.com")).await.unwrap();
        let err = repo.create(&new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_assign_role_is_idempotent() {
        let pool = test_pool().await;
        let users = UserRepo::new(pool.clone());
        let roles = RoleRepo::new(pool);

        let user = users.create(&new_user("a@x.com")).await.unwrap();
        let role = roles.create("editor", &[]).await.unwrap();

        users.assign_role(user.id, role.id).await.unwrap();
        users.assign_role(user.id, role.id).await.unwrap();

        let names = users.role_names_for(user.id).await.unwrap();
        assert_eq!(names, vec!["editor".to_string()]);
    }

    #[tokio::test]
    async fn test_list_with_roles() {
        let pool = test_pool().await;
        let users = UserRepo::new(pool.clone());
        let roles = RoleRepo::new(pool);

        let a = users.create(&new_user("a@x.com")).await.unwrap();
        users.create(&new_user("b@x.com")).await.unwrap();
        let admin = roles.create("admin", &[]).await.unwrap();
        users.assign_role(a.id, admin.id).await.unwrap();

        let listed = users.list_with_roles().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].roles.len(), 1);
        assert_eq!(listed[0].roles[0].name, "admin");
        assert!(listed[1].roles.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let repo = UserRepo::new(test_pool().await);
        let err = repo.delete(999).await.unwrap_err();
        assert!(matches!(err, StoreError::RowNotFound));
    }

    #[tokio::test]
    async fn test_delete_cascades_associations() {
        let pool = test_pool().await;
        let users = UserRepo::new(pool.clone());
        let roles = RoleRepo::new(pool);

        let user = users.create(&new_user("a@x.com")).await.unwrap();
        let role = roles.create("editor", &[]).await.unwrap();
        users.assign_role(user.id, role.id).await.unwrap();

        users.delete(user.id).await.unwrap();
        assert!(users.find_by_id(user.id).await.unwrap().is_none());
        assert!(users.role_names_for(user.id).await.unwrap().is_empty());
    }
}
