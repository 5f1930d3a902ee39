#![forbid(unsafe_code)]

pub mod api_client;
pub mod app_services;
pub mod auth_service;
pub mod config;
pub mod course_service;
pub mod error;
pub mod exercise_validator;
pub mod lessons;

pub use aula_core::Clock;

pub use api_client::ApiClient;
pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use config::AppConfig;
pub use course_service::CourseService;
pub use error::{
    ApiError, AppServicesError, AuthError, ConfigError, CourseError, LessonRunError,
    LessonServiceError,
};
pub use exercise_validator::ExerciseValidator;
pub use lessons::{
    ExplanationState, Feedback, LessonLoopService, LessonMode, LessonProgress, LessonRun,
};
