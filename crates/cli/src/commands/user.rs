//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! od-cli user create -n "Ada" -e ada@example.com -p s3cret
//! ```
//!
//! The password is stored as given; the API compares it verbatim on login.

use orderdesk_api::db::{self, StoreError, UserRepository};
use orderdesk_core::{Email, EmailError, UserId};

use super::{CommandError, database_url};

/// Errors that can occur during user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}

/// Create a new user.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `UserError` if the email is malformed, the database is
/// unreachable, or the insert fails (e.g. the email already exists).
pub async fn create(name: &str, email: &str, password: &str) -> Result<UserId, UserError> {
    let email = Email::parse(email)?;

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url)
        .await
        .map_err(CommandError::from)?;

    let id = UserRepository::new(&pool)
        .create(name, email.as_str(), password)
        .await?;

    tracing::info!(user_id = %id, %email, "User created");
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_rejects_malformed_email_before_connecting() {
        let err = create("Ada", "not-an-email", "pw").await.unwrap_err();
        assert!(matches!(
            err,
            UserError::InvalidEmail(EmailError::MissingAtSymbol)
        ));
    }
}
