use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use sqlx::types::Json;

/// A user row. Carries the password hash, so it deliberately does not
/// implement `Serialize`; outward-facing code goes through [`PublicUser`]
/// or [`UserWithRoles`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new user. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
}

/// A role row. Permissions are stored as a JSON array of strings, in the
/// order the caller supplied them, duplicates included.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub permissions: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Outward-facing user representation without the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// A user together with its materialized role records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRoles {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub roles: Vec<Role>,
}

impl UserWithRoles {
    pub fn new(user: User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_carries_no_hash_field() {
        let user = User {
            id: 1,
            email: "a@x.com".to_string(),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            deleted_at: None,
        };

        let json = serde_json::to_string(&PublicUser::from(user.clone())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$argon2id$"));

        let json = serde_json::to_string(&UserWithRoles::new(user, Vec::new())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$argon2id$"));
    }
}
