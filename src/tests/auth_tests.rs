#[cfg(test)]
mod tests {
    use crate::auth::{create_jwt, verify_jwt};
    use crate::models::{User, UserRole};
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_jwt() {
        let user = create_test_user();
        let result = create_jwt(&user, "test_secret");
        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn test_verify_jwt_roundtrip() {
        let user = create_test_user();
        let token = create_jwt(&user, "test_secret").unwrap();

        let claims = verify_jwt(&token, "test_secret").unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.username);
    }

    #[test]
    fn test_verify_jwt_rejects_wrong_secret() {
        let user = create_test_user();
        let token = create_jwt(&user, "test_secret").unwrap();

        assert!(verify_jwt(&token, "other_secret").is_err());
    }

    #[test]
    fn test_verify_jwt_rejects_garbage() {
        assert!(verify_jwt("not.a.token", "test_secret").is_err());
    }

    #[test]
    fn test_user_role_string_roundtrip() {
        for role in [UserRole::Admin, UserRole::User] {
            let parsed: UserRole = role.to_string().try_into().unwrap();
            assert_eq!(parsed, role);
        }
    }
}
