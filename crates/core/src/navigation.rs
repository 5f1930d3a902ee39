use std::ops::Range;

use thiserror::Error;

use crate::model::Lesson;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("an answer is required before continuing")]
    ResponseRequired,

    #[error("lesson already finished")]
    Finished,
}

/// Where the learner is inside a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonPhase {
    /// Teaching sections `0..=section` are visible.
    Browsing { section: usize },
    /// One exercise at a time.
    Exercises { exercise: usize },
    /// Terminal; the learner leaves the lesson.
    Finished,
}

/// Visual effect the UI should play for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEffect {
    /// Reveal the next section and scroll it into view.
    ScrollToSection(usize),
    /// Fade out the current page and fade in the exercise. `mode_changed` is
    /// set when leaving the teaching sections.
    FadeToExercise { index: usize, mode_changed: bool },
    /// Leave the lesson.
    Exit,
}

/// Whether Continue may fire from the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueGate {
    Open,
    /// The page holds an unfinished exercise and nothing has been answered yet.
    AwaitingResponse,
}

impl ContinueGate {
    #[must_use]
    pub fn from_flags(exercise_pending: bool, answer_empty: bool) -> Self {
        if exercise_pending && answer_empty {
            ContinueGate::AwaitingResponse
        } else {
            ContinueGate::Open
        }
    }
}

/// Pure transition function for Continue.
#[must_use]
pub fn next_phase(
    phase: LessonPhase,
    sections: usize,
    exercises: usize,
) -> (LessonPhase, NavigationEffect) {
    let first_exercise = || {
        if exercises > 0 {
            (
                LessonPhase::Exercises { exercise: 0 },
                NavigationEffect::FadeToExercise {
                    index: 0,
                    mode_changed: true,
                },
            )
        } else {
            (LessonPhase::Finished, NavigationEffect::Exit)
        }
    };

    match phase {
        LessonPhase::Browsing { section } if section + 1 < sections => (
            LessonPhase::Browsing {
                section: section + 1,
            },
            NavigationEffect::ScrollToSection(section + 1),
        ),
        LessonPhase::Browsing { .. } => first_exercise(),
        LessonPhase::Exercises { exercise } if exercise + 1 < exercises => (
            LessonPhase::Exercises {
                exercise: exercise + 1,
            },
            NavigationEffect::FadeToExercise {
                index: exercise + 1,
                mode_changed: false,
            },
        ),
        LessonPhase::Exercises { .. } | LessonPhase::Finished => {
            (LessonPhase::Finished, NavigationEffect::Exit)
        }
    }
}

/// Linear progress through a lesson's sections and then its exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonNavigator {
    phase: LessonPhase,
    sections: usize,
    exercises: usize,
}

impl LessonNavigator {
    #[must_use]
    pub fn new(sections: usize, exercises: usize) -> Self {
        let phase = if sections > 0 {
            LessonPhase::Browsing { section: 0 }
        } else if exercises > 0 {
            LessonPhase::Exercises { exercise: 0 }
        } else {
            LessonPhase::Finished
        };
        Self {
            phase,
            sections,
            exercises,
        }
    }

    #[must_use]
    pub fn for_lesson(lesson: &Lesson) -> Self {
        Self::new(lesson.section_count(), lesson.exercise_count())
    }

    #[must_use]
    pub fn phase(&self) -> LessonPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == LessonPhase::Finished
    }

    #[must_use]
    pub fn in_exercise_mode(&self) -> bool {
        matches!(self.phase, LessonPhase::Exercises { .. })
    }

    /// Sections currently on screen. Empty outside browsing mode.
    #[must_use]
    pub fn visible_sections(&self) -> Range<usize> {
        match self.phase {
            LessonPhase::Browsing { section } => 0..section + 1,
            _ => 0..0,
        }
    }

    #[must_use]
    pub fn current_section(&self) -> Option<usize> {
        match self.phase {
            LessonPhase::Browsing { section } => Some(section),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<usize> {
        match self.phase {
            LessonPhase::Exercises { exercise } => Some(exercise),
            _ => None,
        }
    }

    /// True while browsing the last section or working the last exercise.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        match self.phase {
            LessonPhase::Browsing { section } => section + 1 >= self.sections,
            LessonPhase::Exercises { exercise } => exercise + 1 >= self.exercises,
            LessonPhase::Finished => true,
        }
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.exercises
    }

    /// Apply Continue.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::ResponseRequired` when the gate is closed and
    /// `NavigationError::Finished` once the lesson is over.
    pub fn advance(&mut self, gate: ContinueGate) -> Result<NavigationEffect, NavigationError> {
        if self.is_finished() {
            return Err(NavigationError::Finished);
        }
        if gate == ContinueGate::AwaitingResponse {
            return Err(NavigationError::ResponseRequired);
        }
        let (phase, effect) = next_phase(self.phase, self.sections, self.exercises);
        self.phase = phase;
        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_sections_then_exercises_then_finishes() {
        let mut nav = LessonNavigator::new(2, 2);
        assert_eq!(nav.phase(), LessonPhase::Browsing { section: 0 });

        assert_eq!(
            nav.advance(ContinueGate::Open),
            Ok(NavigationEffect::ScrollToSection(1))
        );
        assert_eq!(nav.visible_sections(), 0..2);

        assert_eq!(
            nav.advance(ContinueGate::Open),
            Ok(NavigationEffect::FadeToExercise {
                index: 0,
                mode_changed: true
            })
        );
        assert!(nav.in_exercise_mode());
        assert!(nav.visible_sections().is_empty());

        assert_eq!(
            nav.advance(ContinueGate::Open),
            Ok(NavigationEffect::FadeToExercise {
                index: 1,
                mode_changed: false
            })
        );
        assert!(nav.is_last_page());
        assert_eq!(nav.advance(ContinueGate::Open), Ok(NavigationEffect::Exit));
        assert!(nav.is_finished());
        assert_eq!(
            nav.advance(ContinueGate::Open),
            Err(NavigationError::Finished)
        );
    }

    #[test]
    fn lesson_without_exercises_finishes_after_sections() {
        let mut nav = LessonNavigator::new(1, 0);
        assert!(nav.is_last_page());
        assert_eq!(nav.advance(ContinueGate::Open), Ok(NavigationEffect::Exit));
        assert!(nav.is_finished());
    }

    #[test]
    fn lesson_without_sections_starts_in_exercises() {
        let nav = LessonNavigator::new(0, 3);
        assert_eq!(nav.current_exercise(), Some(0));
        assert_eq!(LessonNavigator::new(0, 0).phase(), LessonPhase::Finished);
    }

    #[test]
    fn closed_gate_blocks_without_moving() {
        let mut nav = LessonNavigator::new(3, 0);
        assert_eq!(
            nav.advance(ContinueGate::AwaitingResponse),
            Err(NavigationError::ResponseRequired)
        );
        assert_eq!(nav.current_section(), Some(0));
    }

    #[test]
    fn gate_opens_as_soon_as_an_answer_exists() {
        assert_eq!(
            ContinueGate::from_flags(true, true),
            ContinueGate::AwaitingResponse
        );
        assert_eq!(ContinueGate::from_flags(true, false), ContinueGate::Open);
        assert_eq!(ContinueGate::from_flags(false, true), ContinueGate::Open);
    }
}
