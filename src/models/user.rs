//! User accounts.

use chrono::{DateTime, Utc};

use crate::error::{TaxError, AppResult};

/// A registered user. The password is only kept as a salted hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Output of [`hash_password`](crate::auth::hash_password).
    pub password_hash: String,
    /// Inactive users cannot authenticate.
    pub is_active: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// The fields needed to store a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Already-hashed password.
    pub password_hash: String,
}

impl NewUser {
    /// Builds the stored user under the given id.
    pub fn into_user(self, id: i64, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            is_active: true,
            created_at: now,
        }
    }
}

/// Usernames are 1 to 50 characters with no whitespace.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() || username.chars().count() > 50 {
        return Err(TaxError::invalid_field(
            "username",
            "Username must be between 1 and 50 characters",
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(TaxError::invalid_field(
            "username",
            "Username must not contain whitespace",
        ));
    }
    Ok(())
}

/// A minimal shape check: one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> AppResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').all(|label| !label.is_empty())
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid || email.len() > 100 {
        return Err(TaxError::invalid_field(
            "email",
            "Email must be a valid email address",
        ));
    }
    Ok(())
}

/// Passwords must be at least `min_length` characters.
pub fn validate_password(password: &str, min_length: usize) -> AppResult<()> {
    if password.chars().count() < min_length {
        return Err(TaxError::invalid_field(
            "password",
            format!("Password must be at least {min_length} characters long"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active() {
        let user = NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "salt$hash".to_string(),
        }
        .into_user(1, Utc::now());

        assert!(user.is_active);
        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("al ice").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b@mail.example.org").is_ok());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@example").is_err());
        assert!(validate_email("alice@@example.com").is_err());
        assert!(validate_email("alice@example..com").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("secret", 6).is_ok());
        match validate_password("short", 6) {
            Err(TaxError::InvalidField { message, .. }) => {
                assert_eq!(message, "Password must be at least 6 characters long");
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }
}
