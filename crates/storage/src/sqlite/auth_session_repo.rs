use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::repository::{AuthSessionRepository, StorageError};
use aula_core::model::AuthSession;

use super::SqliteRepository;

#[async_trait]
impl AuthSessionRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<AuthSession>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT token, username, saved_at
            FROM auth_session
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let token: String = row
            .try_get("token")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let username: String = row
            .try_get("username")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let saved_at: DateTime<Utc> = row
            .try_get("saved_at")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        AuthSession::new(token, username, saved_at)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_session(&self, session: &AuthSession) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO auth_session (id, token, username, saved_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                username = excluded.username,
                saved_at = excluded.saved_at
            ",
        )
        .bind(1_i64)
        .bind(session.token())
        .bind(session.username())
        .bind(session.saved_at())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM auth_session WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
