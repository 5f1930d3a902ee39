use std::sync::Arc;

use aula_core::Clock;
use aula_core::model::AuthSession;
use storage::repository::AuthSessionRepository;
use tracing::info;

use crate::api_client::ApiClient;
use crate::error::AuthError;

/// Sign-up, login and the locally remembered session.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    api: ApiClient,
    sessions: Arc<dyn AuthSessionRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, api: ApiClient, sessions: Arc<dyn AuthSessionRepository>) -> Self {
        Self {
            clock,
            api,
            sessions,
        }
    }

    /// Create an account and remember the returned token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input, or the API or
    /// storage error.
    pub async fn signup(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        let (username, password) = credentials(username, password)?;
        let token = self.api.signup(username, password).await?;
        self.remember(token, username).await
    }

    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input, or the API or
    /// storage error.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        let (username, password) = credentials(username, password)?;
        let token = self.api.login(username, password).await?;
        self.remember(token, username).await
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear_session().await?;
        info!("signed out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be read.
    pub async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.sessions.load_session().await?)
    }

    async fn remember(&self, token: String, username: &str) -> Result<AuthSession, AuthError> {
        let session = AuthSession::new(token, username, self.clock.now())?;
        self.sessions.save_session(&session).await?;
        info!(username, "signed in");
        Ok(session)
    }
}

fn credentials<'a>(username: &'a str, password: &'a str) -> Result<(&'a str, &'a str), AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok((username, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;
    use url::Url;

    fn service() -> AuthService {
        // Never contacted: credential checks fail before any request.
        let api = ApiClient::new(Url::parse("http://127.0.0.1:9/").unwrap());
        AuthService::new(fixed_clock(), api, Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn blank_credentials_are_rejected_locally() {
        let auth = service();
        assert!(matches!(
            auth.login("  ", "secret").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.signup("ana", "").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn remembered_session_survives_until_logout() {
        let auth = service();
        let session = auth.remember("tok".into(), "ana").await.unwrap();
        assert_eq!(session.saved_at(), fixed_now());
        assert_eq!(
            auth.current_session().await.unwrap().map(|s| s.username().to_owned()),
            Some("ana".to_owned())
        );
        auth.logout().await.unwrap();
        assert!(auth.current_session().await.unwrap().is_none());
    }
}
