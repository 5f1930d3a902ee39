mod progress;
mod run;
mod workflow;

// Public API of the lesson subsystem.
pub use crate::error::{LessonRunError, LessonServiceError};
pub use progress::{LessonMode, LessonProgress};
pub use run::{ExplanationState, Feedback, LessonRun};
pub use workflow::LessonLoopService;
