//! Consistency report over a content set: every roadmap lesson parses, every
//! component name is registered and every graded exercise has an answer key.

use std::collections::BTreeMap;
use std::fmt;

use aula_core::model::{AnswerFixture, ExerciseId, LessonId, ResponseFamily};

use crate::repository::{AnswerKeyRepository, LessonRepository, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    UnreadableLesson { lesson: LessonId, reason: String },
    UnknownComponent { lesson: LessonId, name: String },
    ExerciseWithoutId { lesson: LessonId, index: usize },
    MissingAnswerKey {
        lesson: LessonId,
        family: ResponseFamily,
        id: ExerciseId,
    },
    UnreadableFixture { family: ResponseFamily, reason: String },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentIssue::UnreadableLesson { lesson, reason } => {
                write!(f, "{lesson}: cannot load lesson: {reason}")
            }
            ContentIssue::UnknownComponent { lesson, name } => {
                write!(f, "{lesson}: unknown component {name}")
            }
            ContentIssue::ExerciseWithoutId { lesson, index } => {
                write!(f, "{lesson}: exercise {index} has no id")
            }
            ContentIssue::MissingAnswerKey { lesson, family, id } => {
                write!(f, "{lesson}: no {family} answer key for {id}")
            }
            ContentIssue::UnreadableFixture { family, reason } => {
                write!(f, "{family}: cannot load fixture: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentReport {
    pub lessons_checked: usize,
    pub exercises_checked: usize,
    pub issues: Vec<ContentIssue>,
}

impl ContentReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every lesson named by the course manifest.
///
/// # Errors
///
/// Returns `StorageError` only when the manifest itself cannot be read;
/// per-lesson and per-fixture problems land in the report.
pub async fn audit_content(
    lessons: &dyn LessonRepository,
    answers: &dyn AnswerKeyRepository,
) -> Result<ContentReport, StorageError> {
    let manifest = lessons.get_manifest().await?;
    let mut report = ContentReport::default();
    let mut graded: Vec<(LessonId, ResponseFamily, ExerciseId)> = Vec::new();

    let mut ids: Vec<&LessonId> = manifest
        .course_ids()
        .flat_map(|course| manifest.lessons(course).iter().map(|entry| &entry.file))
        .collect();
    ids.sort();
    ids.dedup();

    for id in ids {
        let lesson = match lessons.get_lesson(id).await {
            Ok(lesson) => lesson,
            Err(err) => {
                report.issues.push(ContentIssue::UnreadableLesson {
                    lesson: id.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        report.lessons_checked += 1;

        for name in lesson.unknown_components() {
            report.issues.push(ContentIssue::UnknownComponent {
                lesson: id.clone(),
                name: name.to_owned(),
            });
        }

        for (index, exercise) in lesson.exercises.iter().enumerate() {
            report.exercises_checked += 1;
            let Some(block) = exercise.exercise_block() else {
                continue;
            };
            let Some(family) = block.kind().and_then(|kind| kind.response_family()) else {
                continue;
            };
            match &block.id {
                Some(exercise_id) => graded.push((id.clone(), family, exercise_id.clone())),
                None => report.issues.push(ContentIssue::ExerciseWithoutId {
                    lesson: id.clone(),
                    index,
                }),
            }
        }
    }

    let mut fixtures: BTreeMap<ResponseFamily, Option<AnswerFixture>> = BTreeMap::new();
    for (lesson, family, id) in graded {
        if !fixtures.contains_key(&family) {
            let fixture = match answers.get_fixture(family).await {
                Ok(fixture) => Some(fixture),
                Err(err) => {
                    report.issues.push(ContentIssue::UnreadableFixture {
                        family,
                        reason: err.to_string(),
                    });
                    None
                }
            };
            fixtures.insert(family, fixture);
        }
        let known = fixtures
            .get(&family)
            .and_then(Option::as_ref)
            .is_some_and(|fixture| fixture.contains(&id));
        if !known {
            report
                .issues
                .push(ContentIssue::MissingAnswerKey { lesson, family, id });
        }
    }

    Ok(report)
}
