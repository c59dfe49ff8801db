use store::{NewUser, PublicUser, StoreError, User, UserRepo};

use crate::error::{AuthError, Result};
use crate::password::{hash_password, verify_password};

/// Registration payload as received from the outside. Email and password
/// are required; the service rejects blank or missing values itself so the
/// caller can surface a uniform message.
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Canonical email form used at registration and login.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Orchestrates registration and credential verification.
#[derive(Clone)]
pub struct AccountService {
    users: UserRepo,
}

impl AccountService {
    pub fn new(users: UserRepo) -> Self {
        Self { users }
    }

    /// Hash the password and persist a new user. The returned representation
    /// never carries the password hash.
    pub async fn register_user(&self, new_user: RegisterUser) -> Result<PublicUser> {
        let email = new_user
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
            .ok_or(AuthError::MissingRequiredField)?;
        let password = new_user
            .password
            .filter(|password| !password.is_empty())
            .ok_or(AuthError::MissingRequiredField)?;

        let password_hash = hash_password(&password)?;

        let record = NewUser {
            email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash,
        };

        let user = self.users.create(&record).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => AuthError::DuplicateEmail,
            StoreError::NotNullViolation(_) => AuthError::MissingRequiredField,
            other => AuthError::Store(other),
        })?;

        Ok(PublicUser::from(user))
    }

    /// Verify credentials against the stored hash. Returns the user record
    /// and its role names on a match, `None` for an unknown email or a wrong
    /// password. Bad credentials are never an error.
    ///
    /// The email is matched exactly as given; callers normalize first.
    pub async fn validate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<(User, Vec<String>)>> {
        let Some(user) = self.users.find_by_email(email).await? else {
            // No hash comparison for unknown emails
            return Ok(None);
        };

        let roles = self.users.role_names_for(user.id).await?;

        if verify_password(password, &user.password_hash)? {
            Ok(Some((user, roles)))
        } else {
            Ok(None)
        }
    }
}
