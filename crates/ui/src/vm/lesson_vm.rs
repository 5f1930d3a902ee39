use aula_core::model::{ExerciseId, ExerciseResponse, LessonId};
use aula_core::navigation::{NavigationEffect, NavigationError};
use services::{
    ExplanationState, Feedback, LessonLoopService, LessonMode, LessonRun, LessonRunError,
};
use tracing::debug;

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FooterAction {
    Continue,
    Submit,
}

/// The single footer button under a lesson page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FooterVm {
    pub label: &'static str,
    pub action: FooterAction,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackAction {
    /// Finish and open the explanation.
    Explain,
    /// Finish and move on.
    Finish,
    Retry,
}

/// Banner shown after an answer was checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub message: &'static str,
    pub actions: [(&'static str, FeedbackAction); 2],
}

impl FeedbackVm {
    fn for_feedback(feedback: Feedback) -> Option<Self> {
        match feedback {
            Feedback::Pending => None,
            Feedback::Correct => Some(Self {
                correct: true,
                message: "¡Correcto!",
                actions: [
                    ("¿Por qué?", FeedbackAction::Explain),
                    ("Continuar", FeedbackAction::Finish),
                ],
            }),
            Feedback::Incorrect => Some(Self {
                correct: false,
                message: "La respuesta no es correcta.",
                actions: [
                    ("Ver respuesta", FeedbackAction::Explain),
                    ("Intentar otra vez", FeedbackAction::Retry),
                ],
            }),
        }
    }
}

/// Screen state for one lesson: wraps the run and turns its state into
/// footer, banner and header text.
#[derive(Clone, Debug)]
pub struct LessonVm {
    run: LessonRun,
}

impl LessonVm {
    #[must_use]
    pub fn new(run: LessonRun) -> Self {
        Self { run }
    }

    #[must_use]
    pub fn run(&self) -> &LessonRun {
        &self.run
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.run.lesson().title
    }

    /// `Ejercicio i de n` while in exercise mode.
    #[must_use]
    pub fn header_label(&self) -> Option<String> {
        let progress = self.run.progress();
        (progress.mode == LessonMode::Exercises)
            .then(|| format!("Ejercicio {} de {}", progress.current + 1, progress.total))
    }

    /// Hidden while a narrative question is open, while feedback is shown and
    /// once the lesson is over.
    #[must_use]
    pub fn footer(&self) -> Option<FooterVm> {
        if self.run.is_finished()
            || self.run.is_narrative_active()
            || self.run.feedback().is_submitted()
        {
            return None;
        }
        let progress = self.run.progress();
        let exercise_active = self.run.is_exercise_active();
        let label = match progress.mode {
            LessonMode::Exercises if progress.current + 1 < progress.total => {
                "Siguiente ejercicio"
            }
            LessonMode::Exercises | LessonMode::Finished => "Finalizar lección",
            LessonMode::Sections if progress.is_last_page && !exercise_active => "Finalizar",
            LessonMode::Sections if exercise_active => "Revisar",
            LessonMode::Sections => "Continuar",
        };
        let action = if exercise_active {
            FooterAction::Submit
        } else {
            FooterAction::Continue
        };
        Some(FooterVm {
            label,
            action,
            enabled: !exercise_active || self.run.response().is_some(),
        })
    }

    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackVm> {
        FeedbackVm::for_feedback(self.run.feedback())
    }

    #[must_use]
    pub fn explanation_state(&self, id: Option<&ExerciseId>) -> ExplanationState {
        self.run.explanation_state(id)
    }

    #[must_use]
    pub fn is_exercise_active(&self) -> bool {
        self.run.is_exercise_active()
    }

    pub fn set_response(&mut self, response: ExerciseResponse) {
        self.run.set_response(response);
    }

    /// # Errors
    ///
    /// Returns `ViewError::ResponseRequired` while the open exercise is unanswered.
    pub fn continue_lesson(&mut self) -> Result<NavigationEffect, ViewError> {
        let effect = self.run.advance().map_err(navigation_error)?;
        debug!(lesson = %self.run.lesson_id(), ?effect, "continue");
        Ok(effect)
    }

    pub fn record_result(&mut self, correct: bool) -> Feedback {
        self.run.record_result(correct)
    }

    /// Owned copy of the response and exercise id to validate, so the run
    /// stays in place while the answer key loads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::ResponseRequired` when there is nothing to check.
    pub fn submission(&self) -> Result<(ExerciseResponse, Option<ExerciseId>), ViewError> {
        let (response, id) = self.run.submission().map_err(run_error)?;
        Ok((response.clone(), id.cloned()))
    }

    /// Apply a feedback banner button.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` when no answer was checked.
    pub fn apply_feedback(
        &mut self,
        action: FeedbackAction,
    ) -> Result<Option<NavigationEffect>, ViewError> {
        match action {
            FeedbackAction::Retry => {
                self.run.retry();
                Ok(None)
            }
            FeedbackAction::Explain => self.run.finish_exercise(true).map_err(run_error),
            FeedbackAction::Finish => self.run.finish_exercise(false).map_err(run_error),
        }
    }

    /// A narrative question was answered: its page closes and the lesson continues.
    ///
    /// # Errors
    ///
    /// Same as [`LessonVm::continue_lesson`].
    pub fn answer_narrative(&mut self) -> Result<NavigationEffect, ViewError> {
        if !self.run.is_narrative_active() {
            return Err(ViewError::Unknown);
        }
        self.run.set_narrative_active(false);
        self.continue_lesson()
    }
}

/// Load a lesson and wrap a fresh run.
///
/// # Errors
///
/// Returns `ViewError::LessonNotAvailable` when the lesson cannot be found.
pub async fn start_lesson(
    lessons: &LessonLoopService,
    lesson_id: &LessonId,
) -> Result<LessonVm, ViewError> {
    let run = lessons.start_lesson(lesson_id).await?;
    Ok(LessonVm::new(run))
}

fn navigation_error(err: NavigationError) -> ViewError {
    match err {
        NavigationError::ResponseRequired => ViewError::ResponseRequired,
        _ => ViewError::Unknown,
    }
}

fn run_error(err: LessonRunError) -> ViewError {
    match err {
        LessonRunError::NothingToSubmit => ViewError::ResponseRequired,
        LessonRunError::Navigation(err) => navigation_error(err),
        _ => ViewError::Unknown,
    }
}
