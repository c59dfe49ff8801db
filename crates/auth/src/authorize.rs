use crate::error::AuthError;

/// The authenticated identity attached to a request after token
/// verification. `roles` is `None` when the token carried no roles claim.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub roles: Option<Vec<String>>,
}

/// Decide whether a principal may perform an operation guarded by
/// `required_roles`. Pure function: no I/O, same inputs always produce the
/// same decision.
///
/// Holding any one of the required roles is enough; a principal does not
/// need all of them.
pub fn authorize(required_roles: &[&str], principal: Option<&Principal>) -> Result<(), AuthError> {
    if required_roles.is_empty() {
        return Ok(());
    }

    let Some(principal) = principal else {
        return Err(AuthError::Forbidden("No user found".to_string()));
    };

    let Some(roles) = principal.roles.as_ref() else {
        return Err(AuthError::Forbidden("User has no roles".to_string()));
    };

    let has_role = roles
        .iter()
        .any(|role| required_roles.contains(&role.as_str()));

    if !has_role {
        return Err(AuthError::Forbidden(
            "User does not have the required role".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: Option<&[&str]>) -> Principal {
        Principal {
            id: 1,
            roles: roles.map(|r| r.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn deny_reason(result: Result<(), AuthError>) -> String {
        match result {
            Err(AuthError::Forbidden(reason)) => reason,
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_no_required_roles_allows_anyone() {
        assert!(authorize(&[], None).is_ok());
        assert!(authorize(&[], Some(&principal(None))).is_ok());
    }

    #[test]
    fn test_missing_principal_is_denied() {
        let reason = deny_reason(authorize(&["admin"], None));
        assert_eq!(reason, "No user found");
    }

    #[test]
    fn test_principal_without_roles_collection_is_denied() {
        let reason = deny_reason(authorize(&["admin"], Some(&principal(None))));
        assert_eq!(reason, "User has no roles");
    }

    #[test]
    fn test_empty_roles_collection_is_denied() {
        let reason = deny_reason(authorize(&["admin"], Some(&principal(Some(&[])))));
        assert_eq!(reason, "User does not have the required role");
    }

    #[test]
    fn test_any_required_role_is_enough() {
        let editor = principal(Some(&["editor"]));
        assert!(authorize(&["admin", "editor"], Some(&editor)).is_ok());
    }

    #[test]
    fn test_unrelated_roles_are_denied() {
        let viewer = principal(Some(&["viewer"]));
        let reason = deny_reason(authorize(&["admin", "editor"], Some(&viewer)));
        assert_eq!(reason, "User does not have the required role");
    }
}
