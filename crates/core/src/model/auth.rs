use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthSessionError {
    #[error("access token cannot be empty")]
    EmptyToken,

    #[error("username cannot be empty")]
    EmptyUsername,
}

/// Bearer token and username kept between launches.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    token: String,
    username: String,
    saved_at: DateTime<Utc>,
}

impl AuthSession {
    /// # Errors
    ///
    /// Returns `AuthSessionError` if the token or username is blank.
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        saved_at: DateTime<Utc>,
    ) -> Result<Self, AuthSessionError> {
        let token = token.into();
        let username = username.into();
        if token.trim().is_empty() {
            return Err(AuthSessionError::EmptyToken);
        }
        if username.trim().is_empty() {
            return Err(AuthSessionError::EmptyUsername);
        }
        Ok(Self {
            token,
            username,
            saved_at,
        })
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("saved_at", &self.saved_at)
            .finish()
    }
}
