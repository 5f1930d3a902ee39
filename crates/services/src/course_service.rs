use std::sync::Arc;

use aula_core::model::{AuthSession, Course, CourseId, LessonEntry};
use storage::repository::LessonRepository;
use tracing::{debug, warn};

use crate::api_client::ApiClient;
use crate::auth_service::AuthService;
use crate::error::{ApiError, AuthError, CourseError};

/// Course catalogue and membership, plus each course's roadmap.
#[derive(Clone)]
pub struct CourseService {
    api: ApiClient,
    auth: Arc<AuthService>,
    lessons: Arc<dyn LessonRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(api: ApiClient, auth: Arc<AuthService>, lessons: Arc<dyn LessonRepository>) -> Self {
        Self { api, auth, lessons }
    }

    async fn session(&self) -> Result<AuthSession, CourseError> {
        self.auth
            .current_session()
            .await
            .map_err(|err| match err {
                AuthError::Storage(err) => CourseError::Storage(err),
                _ => CourseError::Api(ApiError::Unauthorized),
            })?
            .ok_or(CourseError::Api(ApiError::Unauthorized))
    }

    /// A rejected token is forgotten so the UI falls back to the login page.
    async fn forget_if_rejected(&self, err: ApiError) -> CourseError {
        if err.is_unauthorized() {
            warn!("token rejected; clearing session");
            if let Err(clear_err) = self.auth.logout().await {
                warn!(error = %clear_err, "could not clear session");
            }
        }
        CourseError::Api(err)
    }

    /// # Errors
    ///
    /// Returns `CourseError::Api(ApiError::Unauthorized)` when signed out, or
    /// the request error.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CourseError> {
        let session = self.session().await?;
        match self.api.list_courses(session.token()).await {
            Ok(courses) => Ok(courses),
            Err(err) => Err(self.forget_if_rejected(err).await),
        }
    }

    /// # Errors
    ///
    /// Same as [`CourseService::list_courses`].
    pub async fn joined_courses(&self) -> Result<Vec<Course>, CourseError> {
        let mut courses = self.list_courses().await?;
        courses.retain(|course| course.joined);
        Ok(courses)
    }

    /// # Errors
    ///
    /// Returns `CourseError` when signed out or the request fails.
    pub async fn join(&self, course: &CourseId) -> Result<(), CourseError> {
        let session = self.session().await?;
        match self.api.join_course(session.token(), course).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.forget_if_rejected(err).await),
        }
    }

    /// # Errors
    ///
    /// Returns `CourseError` when signed out or the request fails.
    pub async fn leave(&self, course: &CourseId) -> Result<(), CourseError> {
        let session = self.session().await?;
        match self.api.leave_course(session.token(), course).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.forget_if_rejected(err).await),
        }
    }

    /// Lessons of `course` from the local manifest, or from the backend when
    /// the manifest does not list the course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the manifest cannot be read, or the backend is
    /// needed and unreachable.
    pub async fn roadmap(&self, course: &CourseId) -> Result<Vec<LessonEntry>, CourseError> {
        let manifest = self.lessons.get_manifest().await?;
        let local = manifest.lessons(course);
        if !local.is_empty() {
            return Ok(local.to_vec());
        }
        debug!(%course, "course not in local manifest; asking backend");
        let session = self.session().await?;
        match self.api.course_lessons(session.token(), course).await {
            Ok(entries) => Ok(entries),
            Err(err) => Err(self.forget_if_rejected(err).await),
        }
    }
}
