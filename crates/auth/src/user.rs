use store::{RoleRepo, StoreError, UserRepo, UserWithRoles};

use crate::error::{AuthError, Result};

/// Thin orchestration for user administration: listing, role assignment,
/// removal.
#[derive(Clone)]
pub struct UserService {
    users: UserRepo,
    roles: RoleRepo,
}

impl UserService {
    pub fn new(users: UserRepo, roles: RoleRepo) -> Self {
        Self { users, roles }
    }

    /// All users with their roles.
    pub async fn find_all(&self) -> Result<Vec<UserWithRoles>> {
        Ok(self.users.list_with_roles().await?)
    }

    /// Add a role to a user's role set. Idempotent. The error does not say
    /// which of the two lookups failed.
    pub async fn assign_role(&self, user_id: i64, role_name: &str) -> Result<()> {
        let user = self.users.find_by_id(user_id).await?;
        let role = self.roles.find_by_name(role_name).await?;

        let (Some(user), Some(role)) = (user, role) else {
            return Err(AuthError::NotFound("User or role not found".to_string()));
        };

        self.users.assign_role(user.id, role.id).await?;
        Ok(())
    }

    /// Delete a user by id.
    pub async fn remove_user(&self, id: i64) -> Result<()> {
        self.users.delete(id).await.map_err(|e| match e {
            StoreError::RowNotFound => {
                AuthError::NotFound(format!("User with ID {} not found", id))
            }
            other => AuthError::Store(other),
        })
    }
}
