use thiserror::Error;

use crate::model::{AnswerKeyError, AuthSessionError, IdError, LessonError, ResponseError};
use crate::navigation::NavigationError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    AnswerKey(#[from] AnswerKeyError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    AuthSession(#[from] AuthSessionError),
}
