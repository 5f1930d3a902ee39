use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ComponentBlock, ComponentKind, ContentBlock, ExerciseId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson document is malformed: {0}")]
    Malformed(String),

    #[error("lesson has no sections and no exercises")]
    Empty,
}

/// A page of lesson content. Teaching sections and assessment exercises share
/// this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

pub type Exercise = Section;

impl Section {
    #[must_use]
    pub fn new(content: Vec<ContentBlock>) -> Self {
        Self { content }
    }

    /// The first component flagged as the page's graded exercise.
    #[must_use]
    pub fn exercise_block(&self) -> Option<&ComponentBlock> {
        self.content
            .iter()
            .filter_map(ContentBlock::as_component)
            .find(|component| component.is_exercise)
    }

    #[must_use]
    pub fn exercise_id(&self) -> Option<&ExerciseId> {
        self.exercise_block().and_then(|block| block.id.as_ref())
    }

    /// Narrative questions carry their own answer buttons, so the footer hides.
    #[must_use]
    pub fn has_narrative(&self) -> bool {
        self.content
            .iter()
            .filter_map(ContentBlock::as_component)
            .any(|component| component.kind() == Some(ComponentKind::NarrativeQuestion))
    }
}

/// A lesson document: teaching sections followed by exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Lesson {
    /// Parse a lesson document.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Malformed` for invalid JSON and `LessonError::Empty`
    /// when the lesson has nothing to show.
    pub fn from_json(raw: &str) -> Result<Self, LessonError> {
        let lesson: Lesson =
            serde_json::from_str(raw).map_err(|err| LessonError::Malformed(err.to_string()))?;
        lesson.validate()
    }

    /// # Errors
    ///
    /// Returns `LessonError::Empty` when the lesson has neither sections nor exercises.
    pub fn validate(self) -> Result<Self, LessonError> {
        if self.sections.is_empty() && self.exercises.is_empty() {
            return Err(LessonError::Empty);
        }
        Ok(self)
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// Every component name in the document that the registry does not know.
    #[must_use]
    pub fn unknown_components(&self) -> Vec<&str> {
        self.sections
            .iter()
            .chain(self.exercises.iter())
            .flat_map(|page| page.content.iter())
            .filter_map(ContentBlock::as_component)
            .filter(|component| component.kind().is_none())
            .map(|component| component.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = r#"{
        "title": "Sample Spaces",
        "sections": [
            {"content": [{"type": "text", "value": "Flip a coin"}]},
            {"content": [
                {"type": "text", "value": "Which outcomes?"},
                {"type": "component", "name": "DiceSampleSpaceSelector", "isExercise": true, "id": "dice-gt-9"}
            ]}
        ],
        "exercises": [
            {"content": [{"type": "component", "name": "NarrativeQuestion", "props": {"options": ["a"]}}]}
        ]
    }"#;

    #[test]
    fn parses_sections_and_exercises() {
        let lesson = Lesson::from_json(LESSON).unwrap();
        assert_eq!(lesson.title, "Sample Spaces");
        assert_eq!(lesson.section_count(), 2);
        assert_eq!(lesson.exercise_count(), 1);
        assert!(lesson.sections[0].exercise_block().is_none());
        assert_eq!(
            lesson.sections[1].exercise_id().map(ExerciseId::as_str),
            Some("dice-gt-9")
        );
        assert!(lesson.exercises[0].has_narrative());
    }

    #[test]
    fn exercises_are_optional() {
        let lesson =
            Lesson::from_json(r#"{"title": "T", "sections": [{"content": []}]}"#).unwrap();
        assert_eq!(lesson.exercise_count(), 0);
    }

    #[test]
    fn empty_lesson_is_rejected() {
        let err = Lesson::from_json(r#"{"title": "T"}"#).unwrap_err();
        assert_eq!(err, LessonError::Empty);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = Lesson::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LessonError::Malformed(_)));
    }

    #[test]
    fn unknown_components_are_listed() {
        let lesson = Lesson::from_json(
            r#"{"title": "T", "sections": [{"content": [
                {"type": "component", "name": "PieChart"},
                {"type": "component", "name": "BasicTable"}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(lesson.unknown_components(), vec!["PieChart"]);
    }
}
