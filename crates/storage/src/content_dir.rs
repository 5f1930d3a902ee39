use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use aula_core::model::{AnswerFixture, CourseManifest, Lesson, LessonId, ResponseFamily};

use crate::repository::{
    AnswerKeyRepository, AuthSessionRepository, LessonRepository, Storage, StorageError,
};

/// Reads lesson content from a directory laid out as
///
/// ```text
/// <root>/courses.json
/// <root>/lessons/<lesson-id>.json
/// <root>/answers/<Family>.json
/// ```
#[derive(Debug, Clone)]
pub struct ContentDirRepository {
    root: PathBuf,
}

impl ContentDirRepository {
    pub const MANIFEST_FILE: &'static str = "courses.json";
    pub const LESSONS_DIR: &'static str = "lessons";
    pub const ANSWERS_DIR: &'static str = "answers";

    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn lesson_path(&self, id: &LessonId) -> PathBuf {
        self.root
            .join(Self::LESSONS_DIR)
            .join(format!("{}.json", id.as_str()))
    }

    #[must_use]
    pub fn fixture_path(&self, family: ResponseFamily) -> PathBuf {
        self.root
            .join(Self::ANSWERS_DIR)
            .join(format!("{}.json", family.fixture_name()))
    }

    async fn read(path: &Path) -> Result<String, StorageError> {
        tokio::fs::read_to_string(path).await.map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound
            } else {
                StorageError::Connection(format!("{}: {err}", path.display()))
            }
        })
    }
}

#[async_trait]
impl LessonRepository for ContentDirRepository {
    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError> {
        let raw = Self::read(&self.lesson_path(id)).await?;
        Lesson::from_json(&raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn get_manifest(&self) -> Result<CourseManifest, StorageError> {
        match Self::read(&self.root.join(Self::MANIFEST_FILE)).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|err| StorageError::Serialization(err.to_string())),
            Err(StorageError::NotFound) => Ok(CourseManifest::default()),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl AnswerKeyRepository for ContentDirRepository {
    async fn get_fixture(&self, family: ResponseFamily) -> Result<AnswerFixture, StorageError> {
        let raw = Self::read(&self.fixture_path(family)).await?;
        AnswerFixture::from_json(family, &raw)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

impl Storage {
    /// Content from a directory, sessions from the given repository.
    #[must_use]
    pub fn content_dir(root: impl Into<PathBuf>, auth: Arc<dyn AuthSessionRepository>) -> Self {
        let repo = ContentDirRepository::new(root);
        let lessons: Arc<dyn LessonRepository> = Arc::new(repo.clone());
        let answers: Arc<dyn AnswerKeyRepository> = Arc::new(repo);
        Self {
            lessons,
            answers,
            auth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::model::{CourseId, ExerciseId};
    use std::fs;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[tokio::test]
    async fn reads_lessons_fixtures_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lessons/sets-1.json",
            r#"{"title":"Conjuntos","sections":[{"content":[{"type":"formula","value":"A \\cup B"}]}]}"#,
        );
        write(
            dir.path(),
            "answers/FreeResponse.json",
            r#"{"P1":"0.17"}"#,
        );
        write(
            dir.path(),
            "courses.json",
            r#"{"probabilidad":[{"file":"sets-1","title":"Conjuntos"}]}"#,
        );
        let repo = ContentDirRepository::new(dir.path());

        let lesson = repo
            .get_lesson(&LessonId::new("sets-1").unwrap())
            .await
            .unwrap();
        assert_eq!(lesson.section_count(), 1);

        let fixture = repo.get_fixture(ResponseFamily::FreeResponse).await.unwrap();
        assert!(fixture.contains(&ExerciseId::new("P1").unwrap()));

        let manifest = repo.get_manifest().await.unwrap();
        let course = CourseId::new("probabilidad").unwrap();
        assert_eq!(manifest.lessons(&course)[0].title, "Conjuntos");
    }

    #[tokio::test]
    async fn missing_files_map_to_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ContentDirRepository::new(dir.path());
        assert!(matches!(
            repo.get_lesson(&LessonId::new("ghost").unwrap()).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.get_fixture(ResponseFamily::DiceSampleSpace).await,
            Err(StorageError::NotFound)
        ));
        assert!(repo.get_manifest().await.unwrap().course_ids().next().is_none());
    }

    #[tokio::test]
    async fn malformed_lesson_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lessons/bad.json", "{ not json");
        let repo = ContentDirRepository::new(dir.path());
        assert!(matches!(
            repo.get_lesson(&LessonId::new("bad").unwrap()).await,
            Err(StorageError::Serialization(_))
        ));
    }
}
