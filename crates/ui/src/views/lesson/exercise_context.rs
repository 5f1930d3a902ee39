use aula_core::model::{ExerciseId, ExerciseResponse};
use aula_core::navigation::NavigationEffect;
use dioxus::prelude::*;
use services::ExplanationState;
use tracing::debug;

use crate::vm::{AsideVm, LessonVm};

/// What widgets on a lesson page may read and change.
///
/// Provided once per lesson page; widgets reach it with
/// `use_context::<ExerciseContext>()`.
#[derive(Clone, Copy, PartialEq)]
pub struct ExerciseContext {
    lesson: Signal<Option<LessonVm>>,
    aside: Signal<Option<AsideVm>>,
    effect: Signal<Option<NavigationEffect>>,
}

impl ExerciseContext {
    #[must_use]
    pub fn new(
        lesson: Signal<Option<LessonVm>>,
        aside: Signal<Option<AsideVm>>,
        effect: Signal<Option<NavigationEffect>>,
    ) -> Self {
        Self {
            lesson,
            aside,
            effect,
        }
    }

    /// Overwrite the current answer.
    pub fn set_response(mut self, response: ExerciseResponse) {
        if let Some(vm) = self.lesson.write().as_mut() {
            vm.set_response(response);
        }
    }

    /// Close the open narrative question and continue the lesson.
    pub fn answer_narrative(mut self) {
        let result = self.lesson.write().as_mut().map(LessonVm::answer_narrative);
        match result {
            Some(Ok(effect)) => self.effect.set(Some(effect)),
            Some(Err(err)) => debug!(?err, "narrative answer ignored"),
            None => {}
        }
    }

    #[must_use]
    pub fn explanation_state(&self, id: Option<&ExerciseId>) -> ExplanationState {
        self.lesson
            .read()
            .as_ref()
            .map_or(ExplanationState::Locked, |vm| vm.explanation_state(id))
    }

    #[must_use]
    pub fn is_exercise_active(&self) -> bool {
        self.lesson
            .read()
            .as_ref()
            .is_some_and(LessonVm::is_exercise_active)
    }

    pub fn open_aside(mut self, aside: AsideVm) {
        self.aside.set(Some(aside));
    }

    pub fn close_aside(mut self) {
        self.aside.set(None);
    }

    #[must_use]
    pub fn aside(&self) -> Option<AsideVm> {
        self.aside.read().clone()
    }
}
