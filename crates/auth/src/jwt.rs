use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Names of the roles held by the subject at issue time. Tokens minted
    /// elsewhere may omit the claim entirely.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims with the given subject, role names, and expiration
    /// duration in seconds
    pub fn new(subject: String, roles: Vec<String>, expires_in_seconds: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expires_in_seconds);

        Self {
            sub: subject,
            roles: Some(roles),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issue a signed bearer token for a user
///
/// # Arguments
/// * `user_id` - The user identifier
/// * `roles` - Names of the user's roles
/// * `secret` - The secret key for signing the token
/// * `expires_in_seconds` - Token expiration time in seconds (e.g., 3600 for 1 hour)
pub fn issue_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expires_in_seconds: i64,
) -> Result<String> {
    let claims = Claims::new(user_id.to_string(), roles, expires_in_seconds);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
}

/// Verify a bearer token and return the claims
///
/// # Arguments
/// * `token` - The JWT token to verify
/// * `secret` - The secret key used to sign the token
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AuthError::TokenValidationError(e.to_string()))?;

    let claims = token_data.claims;

    if claims.is_expired() {
        return Err(AuthError::TokenExpired);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_issue_and_verify() {
        let secret = "test_secret";
        let user_id = "42";

        let token = issue_token(user_id, vec!["admin".to_string()], secret, 3600).unwrap();
        let claims = verify_token(&token, secret).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.roles, Some(vec!["admin".to_string()]));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_invalid_secret() {
        let secret = "correct_secret";
        let wrong_secret = "wrong_secret";

        let token = issue_token("42", Vec::new(), secret, 3600).unwrap();
        let result = verify_token(&token, wrong_secret);

        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let secret = "test_secret";

        // Create a token that expires in -1 seconds (already expired)
        let token = issue_token("42", Vec::new(), secret, -1).unwrap();

        // Wait a moment to ensure expiration
        std::thread::sleep(std::time::Duration::from_millis(100));

        let result = verify_token(&token, secret);
        assert!(result.is_err());
    }

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("7".to_string(), vec!["editor".to_string()], 3600);

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.roles, Some(vec!["editor".to_string()]));
        assert!(!claims.is_expired());
        assert!(claims.exp > claims.iat);
    }
}
