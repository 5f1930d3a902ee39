use aula_core::model::{ExerciseId, ExerciseResponse, Lesson, LessonId, ResponseError, Section};
use aula_core::navigation::{
    ContinueGate, LessonNavigator, LessonPhase, NavigationEffect, NavigationError,
};
use aula_core::response_store::ResponseStore;
use serde_json::Value;

use super::progress::{LessonMode, LessonProgress};
use crate::error::LessonRunError;

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Result of the last submission for the exercise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

impl Feedback {
    #[must_use]
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    #[must_use]
    pub fn is_submitted(self) -> bool {
        self != Feedback::Pending
    }
}

/// What an explanation block tied to an exercise id should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationState {
    /// The exercise is still open.
    Locked,
    /// Finished; the learner may expand it.
    Available,
    /// Finished with the explanation requested; starts expanded.
    Open,
}

//
// ─── LESSON RUN ────────────────────────────────────────────────────────────────
//

/// One pass through a lesson: where the learner is, what they answered, and
/// which exercises are done.
#[derive(Debug, Clone)]
pub struct LessonRun {
    lesson_id: LessonId,
    lesson: Lesson,
    navigator: LessonNavigator,
    store: ResponseStore,
    feedback: Feedback,
    finished: Vec<ExerciseId>,
    explained: Option<ExerciseId>,
    exercise_active: bool,
    narrative_active: bool,
}

impl LessonRun {
    #[must_use]
    pub fn new(lesson_id: LessonId, lesson: Lesson) -> Self {
        let navigator = LessonNavigator::for_lesson(&lesson);
        let mut run = Self {
            lesson_id,
            lesson,
            navigator,
            store: ResponseStore::new(),
            feedback: Feedback::Pending,
            finished: Vec::new(),
            explained: None,
            exercise_active: false,
            narrative_active: false,
        };
        run.enter_page();
        run
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    #[must_use]
    pub fn phase(&self) -> LessonPhase {
        self.navigator.phase()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.navigator.is_finished()
    }

    /// Sections revealed so far; empty once exercises start.
    #[must_use]
    pub fn visible_sections(&self) -> &[Section] {
        let range = self.navigator.visible_sections();
        self.lesson.sections.get(range).unwrap_or(&[])
    }

    /// The page the footer acts on: the newest section, or the current exercise.
    #[must_use]
    pub fn current_page(&self) -> Option<&Section> {
        match self.navigator.phase() {
            LessonPhase::Browsing { section } => self.lesson.sections.get(section),
            LessonPhase::Exercises { exercise } => self.lesson.exercises.get(exercise),
            LessonPhase::Finished => None,
        }
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&Section> {
        self.navigator
            .current_exercise()
            .and_then(|index| self.lesson.exercises.get(index))
    }

    /// Id of the graded component on the current page.
    #[must_use]
    pub fn exercise_id(&self) -> Option<&ExerciseId> {
        self.current_page().and_then(Section::exercise_id)
    }

    /// The current page holds an exercise that has not been finished yet.
    #[must_use]
    pub fn is_exercise_active(&self) -> bool {
        self.exercise_active
    }

    #[must_use]
    pub fn is_narrative_active(&self) -> bool {
        self.narrative_active
    }

    /// Narrative questions switch themselves off once answered.
    pub fn set_narrative_active(&mut self, active: bool) {
        self.narrative_active = active;
    }

    #[must_use]
    pub fn response(&self) -> Option<&ExerciseResponse> {
        self.store.current()
    }

    pub fn set_response(&mut self, response: ExerciseResponse) {
        self.store.set(response);
    }

    /// # Errors
    ///
    /// Returns the decoding error; the slot is left empty.
    pub fn set_response_tagged(&mut self, raw: &Value) -> Result<(), ResponseError> {
        self.store.set_tagged(raw)
    }

    #[must_use]
    pub fn gate(&self) -> ContinueGate {
        ContinueGate::from_flags(self.exercise_active, self.store.is_empty())
    }

    /// An answer exists for an open exercise and has not been checked yet.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.exercise_active && !self.store.is_empty() && !self.feedback.is_submitted()
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn finished_exercises(&self) -> &[ExerciseId] {
        &self.finished
    }

    #[must_use]
    pub fn explanation_state(&self, id: Option<&ExerciseId>) -> ExplanationState {
        let Some(id) = id else {
            return ExplanationState::Available;
        };
        if self.explained.as_ref() == Some(id) {
            ExplanationState::Open
        } else if self.finished.contains(id) {
            ExplanationState::Available
        } else {
            ExplanationState::Locked
        }
    }

    /// The response and exercise id to validate.
    ///
    /// # Errors
    ///
    /// Returns `LessonRunError::NothingToSubmit` when no open exercise has an
    /// answer, and `LessonRunError::AlreadySubmitted` while feedback is shown.
    pub fn submission(&self) -> Result<(&ExerciseResponse, Option<&ExerciseId>), LessonRunError> {
        if self.feedback.is_submitted() {
            return Err(LessonRunError::AlreadySubmitted);
        }
        if !self.exercise_active {
            return Err(LessonRunError::NothingToSubmit);
        }
        let response = self.store.current().ok_or(LessonRunError::NothingToSubmit)?;
        Ok((response, self.exercise_id()))
    }

    pub fn record_result(&mut self, correct: bool) -> Feedback {
        self.feedback = Feedback::from_correct(correct);
        self.feedback
    }

    /// Dismiss feedback and try again with the same answer in place.
    pub fn retry(&mut self) {
        self.feedback = Feedback::Pending;
    }

    /// Close the exercise on screen, answered or revealed.
    ///
    /// Without an explanation request the run continues to the next page.
    ///
    /// # Errors
    ///
    /// Returns `LessonRunError::NotSubmitted` before the answer was checked, or
    /// the navigation error from continuing.
    pub fn finish_exercise(
        &mut self,
        show_explanation: bool,
    ) -> Result<Option<NavigationEffect>, LessonRunError> {
        if !self.feedback.is_submitted() {
            return Err(LessonRunError::NotSubmitted);
        }
        let id = self.exercise_id().cloned();
        if let Some(id) = &id {
            if !self.finished.contains(id) {
                self.finished.push(id.clone());
            }
        }
        self.explained = if show_explanation { id } else { None };
        self.store.clear();
        self.exercise_active = false;
        self.feedback = Feedback::Pending;

        if show_explanation {
            Ok(None)
        } else {
            self.advance().map(Some).map_err(LessonRunError::from)
        }
    }

    /// Apply Continue.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::ResponseRequired` while an open exercise has no
    /// answer, or `NavigationError::Finished` after the last page.
    pub fn advance(&mut self) -> Result<NavigationEffect, NavigationError> {
        let effect = self.navigator.advance(self.gate())?;
        self.explained = None;
        self.enter_page();
        Ok(effect)
    }

    fn enter_page(&mut self) {
        let page = self.current_page();
        let exercise_active = page.and_then(Section::exercise_block).is_some();
        let narrative_active = page.is_some_and(Section::has_narrative);
        self.exercise_active = exercise_active;
        self.narrative_active = narrative_active;
        self.feedback = Feedback::Pending;
    }

    #[must_use]
    pub fn progress(&self) -> LessonProgress {
        let total = self.navigator.exercise_count();
        match self.navigator.phase() {
            LessonPhase::Browsing { section } => LessonProgress {
                mode: LessonMode::Sections,
                current: section,
                total: self.lesson.section_count(),
                is_last_page: self.navigator.is_last_page(),
            },
            LessonPhase::Exercises { exercise } => LessonProgress {
                mode: LessonMode::Exercises,
                current: exercise,
                total,
                is_last_page: self.navigator.is_last_page(),
            },
            LessonPhase::Finished => LessonProgress {
                mode: LessonMode::Finished,
                current: total,
                total,
                is_last_page: true,
            },
        }
    }
}
