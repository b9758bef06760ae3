//! # Auth Commands
//!
//! Login check and operator account creation.

use serde_json::json;
use tracing::{info, warn};

use super::Reply;
use crate::cli::Credentials;
use crate::error::AppError;
use crate::state::DbState;

/// Checks a username/password pair.
///
/// Unknown user and wrong password produce the same error.
pub async fn login(db: &DbState, args: &Credentials) -> Result<Reply, AppError> {
    let authenticated = db
        .database()
        .await?
        .users()
        .authenticate(&args.username, &args.password)
        .await?;

    let username = args.username.trim();

    if !authenticated {
        warn!(username = %username, "Login rejected");
        return Err(AppError::unauthorized());
    }

    info!(username = %username, "Login successful");

    Reply::new(
        format!("Login successful. Welcome, {}!", username),
        &json!({ "authenticated": true, "username": username }),
    )
}

/// Creates an operator account.
pub async fn add_user(db: &DbState, args: &Credentials) -> Result<Reply, AppError> {
    let user = db
        .database()
        .await?
        .users()
        .create(&args.username, &args.password)
        .await?;

    Reply::new(format!("Created user '{}'", user.username), &user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use medstore_db::DbConfig;

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let db = DbState::new(DbConfig::in_memory());
        add_user(&db, &creds("admin", "pw")).await.unwrap();

        let reply = login(&db, &creds("admin", "pw")).await.unwrap();
        assert_eq!(reply.json["authenticated"], true);

        let err = login(&db, &creds("admin", "nope")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = login(&db, &creds("ghost", "pw")).await.unwrap_err();
        assert_eq!(err, AppError::unauthorized());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let db = DbState::new(DbConfig::in_memory());

        let err = login(&db, &creds("", "pw")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "username is required");
    }
}
