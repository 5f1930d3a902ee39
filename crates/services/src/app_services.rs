use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api_client::ApiClient;
use crate::auth_service::AuthService;
use crate::config::AppConfig;
use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::exercise_validator::ExerciseValidator;
use crate::lessons::LessonLoopService;

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    lessons: Arc<LessonLoopService>,
    auth: Arc<AuthService>,
    courses: Arc<CourseService>,
}

impl AppServices {
    /// Build services from configuration: the content directory for lessons
    /// and answer keys, `SQLite` for the auth session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn from_config(config: &AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::open(config.content_dir.clone(), &config.db_url).await?;
        let api = ApiClient::new(config.api_base_url.clone());
        Ok(Self::new(storage, api, clock))
    }

    #[must_use]
    pub fn new(storage: Storage, api: ApiClient, clock: Clock) -> Self {
        let validator = ExerciseValidator::new(Arc::clone(&storage.answers));
        let lessons = Arc::new(LessonLoopService::new(
            Arc::clone(&storage.lessons),
            validator,
        ));
        let auth = Arc::new(AuthService::new(clock, api.clone(), Arc::clone(&storage.auth)));
        let courses = Arc::new(CourseService::new(
            api,
            Arc::clone(&auth),
            Arc::clone(&storage.lessons),
        ));
        Self {
            lessons,
            auth,
            courses,
        }
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonLoopService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }
}
