mod answer_key;
mod auth;
mod block;
mod component;
mod course;
mod ids;
mod lesson;
mod payload;
mod response;

pub use answer_key::{AnswerFixture, AnswerKey, AnswerKeyError};
pub use auth::{AuthSession, AuthSessionError};
pub use block::{ComponentBlock, ContentBlock};
pub use component::ComponentKind;
pub use course::{Course, CourseManifest, LessonEntry};
pub use ids::{CourseId, ExerciseId, IdError, LessonId};
pub use lesson::{Exercise, Lesson, LessonError, Section};
pub use response::{ExerciseResponse, ResponseError, ResponseFamily};
