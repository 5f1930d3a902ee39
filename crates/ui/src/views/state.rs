use dioxus::prelude::*;
use services::{AuthError, CourseError, LessonServiceError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    LessonNotAvailable,
    ResponseRequired,
    SignedOut,
    MissingCredentials,
    /// The backend refused the request; carries its explanation.
    Rejected(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::Unknown => "Algo salió mal. Inténtalo de nuevo.".to_owned(),
            ViewError::LessonNotAvailable => "Lesson not available".to_owned(),
            ViewError::ResponseRequired => "Responde el ejercicio para continuar.".to_owned(),
            ViewError::SignedOut => "Inicia sesión para continuar.".to_owned(),
            ViewError::MissingCredentials => {
                "Escribe tu nombre de usuario y contraseña.".to_owned()
            }
            ViewError::Rejected(detail) => detail.clone(),
        }
    }
}

impl From<LessonServiceError> for ViewError {
    fn from(err: LessonServiceError) -> Self {
        match err {
            LessonServiceError::NotFound(_) => ViewError::LessonNotAvailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<CourseError> for ViewError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::Api(api) if api.is_unauthorized() => ViewError::SignedOut,
            CourseError::Api(api) => ViewError::Rejected(api.to_string()),
            _ => ViewError::Unknown,
        }
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => ViewError::MissingCredentials,
            AuthError::Api(api) => ViewError::Rejected(api.to_string()),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
