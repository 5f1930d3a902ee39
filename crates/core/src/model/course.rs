use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{CourseId, LessonId};

/// A course as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    /// Whether the signed-in learner has joined it.
    #[serde(default)]
    pub joined: bool,
}

/// One roadmap entry: the lesson document and its display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonEntry {
    pub file: LessonId,
    pub title: String,
}

/// Ordered lessons per course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseManifest {
    courses: BTreeMap<CourseId, Vec<LessonEntry>>,
}

impl CourseManifest {
    #[must_use]
    pub fn new(courses: BTreeMap<CourseId, Vec<LessonEntry>>) -> Self {
        Self { courses }
    }

    /// Roadmap for a course. Unknown courses have an empty roadmap.
    #[must_use]
    pub fn lessons(&self, course: &CourseId) -> &[LessonEntry] {
        self.courses.get(course).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn course_ids(&self) -> impl Iterator<Item = &CourseId> {
        self.courses.keys()
    }

    /// Lesson that follows `lesson` on the course roadmap, if any.
    #[must_use]
    pub fn next_lesson(&self, course: &CourseId, lesson: &LessonId) -> Option<&LessonEntry> {
        let lessons = self.lessons(course);
        let position = lessons.iter().position(|entry| &entry.file == lesson)?;
        lessons.get(position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "sets": [
            {"file": "SetIntro", "title": "What is a Set?"},
            {"file": "SetOperations", "title": "Set Builder Notation"}
        ],
        "probability": [
            {"file": "Probability", "title": "Probability of Events"}
        ]
    }"#;

    #[test]
    fn roadmap_preserves_document_order() {
        let manifest: CourseManifest = serde_json::from_str(MANIFEST).unwrap();
        let sets = CourseId::new("sets").unwrap();
        let titles: Vec<_> = manifest.lessons(&sets).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["What is a Set?", "Set Builder Notation"]);
        assert_eq!(manifest.course_ids().count(), 2);
    }

    #[test]
    fn unknown_course_has_empty_roadmap() {
        let manifest: CourseManifest = serde_json::from_str(MANIFEST).unwrap();
        assert!(manifest.lessons(&CourseId::new("calculus").unwrap()).is_empty());
    }

    #[test]
    fn next_lesson_follows_roadmap() {
        let manifest: CourseManifest = serde_json::from_str(MANIFEST).unwrap();
        let sets = CourseId::new("sets").unwrap();
        let next = manifest
            .next_lesson(&sets, &LessonId::new("SetIntro").unwrap())
            .unwrap();
        assert_eq!(next.file.as_str(), "SetOperations");
        assert!(
            manifest
                .next_lesson(&sets, &LessonId::new("SetOperations").unwrap())
                .is_none()
        );
    }
}
