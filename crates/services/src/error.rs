//! Shared error types for the services crate.

use thiserror::Error;

use aula_core::model::{AuthSessionError, LessonId};
use aula_core::navigation::NavigationError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ApiClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not signed in")]
    Unauthorized,
    #[error("{detail}")]
    HttpStatus {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// The backend rejected the bearer token, or none was available.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Unauthorized => true,
            ApiError::HttpStatus { status, .. } => *status == reqwest::StatusCode::UNAUTHORIZED,
            _ => false,
        }
    }
}

/// Errors emitted by lesson loading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("lesson {0} not available")]
    NotFound(LessonId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while driving a `LessonRun`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonRunError {
    #[error("no exercise is waiting for an answer")]
    NothingToSubmit,
    #[error("the answer was already checked")]
    AlreadySubmitted,
    #[error("the answer has not been checked yet")]
    NotSubmitted,
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,
    #[error(transparent)]
    Session(#[from] AuthSessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CourseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base url {raw}: {source}")]
    InvalidApiUrl {
        raw: String,
        source: url::ParseError,
    },
    #[error("invalid database url: {0}")]
    InvalidDbUrl(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
