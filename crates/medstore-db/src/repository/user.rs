//! # User Repository
//!
//! Operator accounts for the login screen.
//!
//! Passwords are stored as argon2 PHC strings, never in plain text.
//! Authentication answers a plain yes/no: an unknown user and a wrong
//! password look the same to the caller.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use medstore_core::validation::validate_credentials;

/// A stored operator account. The password hash never leaves this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates a user with an argon2-hashed password.
    ///
    /// ## Returns
    /// * `Ok(User)` - Created account
    /// * `Err(DbError::Validation)` - Blank username or password
    /// * `Err(DbError::UniqueViolation)` - Username taken
    pub async fn create(&self, username: &str, password: &str) -> DbResult<User> {
        validate_credentials(username, password)?;
        let username = username.trim();

        let hash = hash_password(password)?;
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(username)
        .bind(&hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("users.username", username),
            other => other,
        })?;

        info!(username = %username, "User created");

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            created_at: now,
        })
    }

    /// Checks a username/password pair.
    ///
    /// ## Returns
    /// * `Ok(true)` - Credentials match
    /// * `Ok(false)` - Unknown user or wrong password
    /// * `Err(DbError::Validation)` - A field was left blank
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<bool> {
        validate_credentials(username, password)?;
        let username = username.trim();

        debug!(username = %username, "Authenticating");

        let stored: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(stored.is_some_and(|hash| verify_password(password, &hash)))
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE username = ?1",
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Counts user accounts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Hashes a password for storage.
fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against its stored hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use medstore_core::ValidationError;
    use rstest::rstest;

    async fn setup() -> UserRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
    }

    #[tokio::test]
    async fn test_create_and_authenticate() {
        let repo = setup().await;
        let user = repo.create("admin", "s3cret").await.unwrap();
        assert_eq!(user.username, "admin");

        assert!(repo.authenticate("admin", "s3cret").await.unwrap());
        assert!(repo.authenticate("  admin ", "s3cret").await.unwrap());
        assert!(!repo.authenticate("admin", "wrong").await.unwrap());
        assert!(!repo.authenticate("ghost", "s3cret").await.unwrap());
    }

    #[tokio::test]
    async fn test_password_is_not_stored_in_plain_text() {
        let repo = setup().await;
        repo.create("admin", "s3cret").await.unwrap();

        let stored: String =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'admin'")
                .fetch_one(&repo.pool)
                .await
                .unwrap();

        assert_ne!(stored, "s3cret");
        assert!(stored.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = setup().await;
        repo.create("admin", "one").await.unwrap();

        let err = repo.create("admin", "two").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[rstest]
    #[case("", "pw", "username")]
    #[case("   ", "pw", "username")]
    #[case("admin", "", "password")]
    #[tokio::test]
    async fn test_blank_credentials_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let repo = setup().await;

        let err = repo.authenticate(username, password).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::Required { field: f }) if f == field
        ));
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let repo = setup().await;
        repo.create("cashier", "pw").await.unwrap();

        let user = repo.get_by_username("cashier").await.unwrap().unwrap();
        assert_eq!(user.username, "cashier");
        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }
}
