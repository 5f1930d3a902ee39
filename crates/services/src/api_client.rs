use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use aula_core::model::{Course, CourseId, LessonEntry};

use crate::error::ApiError;

/// Thin JSON client for the auth and course backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    nombre_usuario: &'a str,
    contrasena_hash: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiClient {
    /// `base_url` should end in `/` when it carries a path prefix.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Register a new account and return its access token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HttpStatus` with the server's `detail` on rejection.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.credentials("auth/signup", username, password).await
    }

    /// Exchange credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HttpStatus` with the server's `detail` on rejection.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.credentials("auth/login", username, password).await
    }

    async fn credentials(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let request = self
            .client
            .post(self.endpoint(path)?)
            .json(&Credentials {
                nombre_usuario: username,
                contrasena_hash: password,
            });
        let body: TokenResponse = send_json(request).await?;
        Ok(body.access_token)
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the token is rejected.
    #[instrument(skip_all)]
    pub async fn list_courses(&self, token: &str) -> Result<Vec<Course>, ApiError> {
        let request = self.client.get(self.endpoint("courses")?).bearer_auth(token);
        send_json(request).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the token is rejected.
    #[instrument(skip(self, token), fields(course = %course))]
    pub async fn join_course(&self, token: &str, course: &CourseId) -> Result<(), ApiError> {
        let path = format!("courses/{}/join", course.as_str());
        let request = self.client.post(self.endpoint(&path)?).bearer_auth(token);
        send_empty(request).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the token is rejected.
    #[instrument(skip(self, token), fields(course = %course))]
    pub async fn leave_course(&self, token: &str, course: &CourseId) -> Result<(), ApiError> {
        let path = format!("courses/{}/leave", course.as_str());
        let request = self.client.post(self.endpoint(&path)?).bearer_auth(token);
        send_empty(request).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the token is rejected.
    #[instrument(skip(self, token), fields(course = %course))]
    pub async fn course_lessons(
        &self,
        token: &str,
        course: &CourseId,
    ) -> Result<Vec<LessonEntry>, ApiError> {
        let path = format!("courses/{}/lessons", course.as_str());
        let request = self.client.get(self.endpoint(&path)?).bearer_auth(token);
        send_json(request).await
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = checked(request.send().await?).await?;
    Ok(response.json().await?)
}

async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
    checked(request.send().await?).await?;
    Ok(())
}

async fn checked(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });
    Err(ApiError::HttpStatus { status, detail })
}
