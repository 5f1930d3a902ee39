use std::sync::Arc;

use aula_core::model::{CourseId, Lesson, LessonEntry, LessonId};
use storage::repository::{LessonRepository, StorageError};
use tracing::{debug, instrument};

use super::run::{Feedback, LessonRun};
use crate::error::{LessonRunError, LessonServiceError};
use crate::exercise_validator::ExerciseValidator;

/// Orchestrates lesson loading and checked answering.
#[derive(Clone)]
pub struct LessonLoopService {
    lessons: Arc<dyn LessonRepository>,
    validator: ExerciseValidator,
}

impl LessonLoopService {
    #[must_use]
    pub fn new(lessons: Arc<dyn LessonRepository>, validator: ExerciseValidator) -> Self {
        Self { lessons, validator }
    }

    #[must_use]
    pub fn validator(&self) -> &ExerciseValidator {
        &self.validator
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` if no lesson document exists, or
    /// the storage error when it cannot be read.
    #[instrument(skip_all, fields(lesson = %id))]
    pub async fn load_lesson(&self, id: &LessonId) -> Result<Lesson, LessonServiceError> {
        match self.lessons.get_lesson(id).await {
            Ok(lesson) => Ok(lesson),
            Err(StorageError::NotFound) => Err(LessonServiceError::NotFound(id.clone())),
            Err(err) => Err(err.into()),
        }
    }

    /// Load a lesson and begin a fresh run through it.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError` if the lesson cannot be loaded.
    pub async fn start_lesson(&self, id: &LessonId) -> Result<LessonRun, LessonServiceError> {
        let lesson = self.load_lesson(id).await?;
        Ok(LessonRun::new(id.clone(), lesson))
    }

    /// Validate the current answer and record the feedback on the run.
    ///
    /// # Errors
    ///
    /// Returns `LessonRunError` when there is nothing to submit.
    pub async fn submit(&self, run: &mut LessonRun) -> Result<Feedback, LessonRunError> {
        let (response, exercise_id) = {
            let (response, exercise_id) = run.submission()?;
            (response.clone(), exercise_id.cloned())
        };
        let correct = self
            .validator
            .validate(&response, exercise_id.as_ref())
            .await;
        debug!(lesson = %run.lesson_id(), correct, "exercise submitted");
        Ok(run.record_result(correct))
    }

    /// Lessons of a course in roadmap order.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if the manifest cannot be read.
    pub async fn roadmap(&self, course: &CourseId) -> Result<Vec<LessonEntry>, LessonServiceError> {
        let manifest = self.lessons.get_manifest().await?;
        Ok(manifest.lessons(course).to_vec())
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if the manifest cannot be read.
    pub async fn next_lesson(
        &self,
        course: &CourseId,
        lesson: &LessonId,
    ) -> Result<Option<LessonEntry>, LessonServiceError> {
        let manifest = self.lessons.get_manifest().await?;
        Ok(manifest.next_lesson(course, lesson).cloned())
    }
}
