use store::{Role, RoleRepo, StoreError};

use crate::error::{AuthError, Result};

/// Orchestrates role creation against the data store.
#[derive(Clone)]
pub struct RoleService {
    roles: RoleRepo,
}

impl RoleService {
    pub fn new(roles: RoleRepo) -> Self {
        Self { roles }
    }

    /// Create a role with the permissions exactly as supplied: no
    /// normalization, no dedup, caller order preserved. Permissions may be
    /// empty; the name may not.
    pub async fn create_role(&self, name: &str, permissions: Vec<String>) -> Result<Role> {
        if name.is_empty() {
            return Err(AuthError::MissingRequiredField);
        }

        self.roles
            .create(name, &permissions)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => AuthError::DuplicateRole,
                other => AuthError::Store(other),
            })
    }
}
