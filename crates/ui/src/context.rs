use std::sync::Arc;

use services::{AppServices, AuthService, CourseService, LessonLoopService};

pub trait UiApp: Send + Sync {
    fn lessons(&self) -> Arc<LessonLoopService>;
    fn auth(&self) -> Arc<AuthService>;
    fn courses(&self) -> Arc<CourseService>;
}

impl UiApp for AppServices {
    fn lessons(&self) -> Arc<LessonLoopService> {
        AppServices::lessons(self)
    }

    fn auth(&self) -> Arc<AuthService> {
        AppServices::auth(self)
    }

    fn courses(&self) -> Arc<CourseService> {
        AppServices::courses(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    lessons: Arc<LessonLoopService>,
    auth: Arc<AuthService>,
    courses: Arc<CourseService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            lessons: app.lessons(),
            auth: app.auth(),
            courses: app.courses(),
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
