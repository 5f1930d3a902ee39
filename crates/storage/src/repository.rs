use async_trait::async_trait;
use aula_core::model::{
    AnswerFixture, AuthSession, CourseManifest, Lesson, LessonId, ResponseFamily,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read access to lesson documents and the course roadmap.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Fetch and parse a lesson document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no document exists for `id`, or
    /// `StorageError::Serialization` if it cannot be parsed.
    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError>;

    /// Fetch the course manifest. A missing manifest is an empty one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the manifest exists but cannot be read.
    async fn get_manifest(&self) -> Result<CourseManifest, StorageError>;
}

/// Read access to the per-family answer-key fixtures.
#[async_trait]
pub trait AnswerKeyRepository: Send + Sync {
    /// Fetch the fixture holding every answer key of `family`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the family has no fixture.
    async fn get_fixture(&self, family: ResponseFamily) -> Result<AnswerFixture, StorageError>;
}

/// The locally remembered login.
#[async_trait]
pub trait AuthSessionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the stored session cannot be read.
    async fn load_session(&self) -> Result<Option<AuthSession>, StorageError>;

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be written.
    async fn save_session(&self, session: &AuthSession) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be removed.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    lessons: Arc<Mutex<HashMap<LessonId, Lesson>>>,
    fixtures: Arc<Mutex<HashMap<ResponseFamily, AnswerFixture>>>,
    manifest: Arc<Mutex<CourseManifest>>,
    session: Arc<Mutex<Option<AuthSession>>>,
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Connection(err.to_string())
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_lesson(&self, id: LessonId, lesson: Lesson) -> Result<(), StorageError> {
        self.lessons.lock().map_err(poisoned)?.insert(id, lesson);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_fixture(&self, fixture: AnswerFixture) -> Result<(), StorageError> {
        self.fixtures
            .lock()
            .map_err(poisoned)?
            .insert(fixture.family(), fixture);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn set_manifest(&self, manifest: CourseManifest) -> Result<(), StorageError> {
        *self.manifest.lock().map_err(poisoned)? = manifest;
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError> {
        let guard = self.lessons.lock().map_err(poisoned)?;
        guard.get(id).cloned().ok_or(StorageError::NotFound)
    }

    async fn get_manifest(&self) -> Result<CourseManifest, StorageError> {
        Ok(self.manifest.lock().map_err(poisoned)?.clone())
    }
}

#[async_trait]
impl AnswerKeyRepository for InMemoryRepository {
    async fn get_fixture(&self, family: ResponseFamily) -> Result<AnswerFixture, StorageError> {
        let guard = self.fixtures.lock().map_err(poisoned)?;
        guard.get(&family).cloned().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl AuthSessionRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<AuthSession>, StorageError> {
        Ok(self.session.lock().map_err(poisoned)?.clone())
    }

    async fn save_session(&self, session: &AuthSession) -> Result<(), StorageError> {
        *self.session.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        *self.session.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

/// Aggregates content and session repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub lessons: Arc<dyn LessonRepository>,
    pub answers: Arc<dyn AnswerKeyRepository>,
    pub auth: Arc<dyn AuthSessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Share one in-memory repository across every role, so tests can seed it.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let lessons: Arc<dyn LessonRepository> = Arc::new(repo.clone());
        let answers: Arc<dyn AnswerKeyRepository> = Arc::new(repo.clone());
        let auth: Arc<dyn AuthSessionRepository> = Arc::new(repo);
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
    use aula_core::model::{CourseId, ExerciseId, LessonEntry};
    use aula_core::time::fixed_now;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn lesson() -> Lesson {
        Lesson::from_json(
            r#"{"title":"Conjuntos","sections":[{"content":[{"type":"text","value":"Hola"}]}]}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn round_trips_lessons() {
        let repo = InMemoryRepository::new();
        let id = LessonId::new("sets-1").unwrap();
        repo.insert_lesson(id.clone(), lesson()).unwrap();

        let fetched = repo.get_lesson(&id).await.unwrap();
        assert_eq!(fetched.title, "Conjuntos");

        let missing = LessonId::new("nope").unwrap();
        assert!(matches!(
            repo.get_lesson(&missing).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn fixtures_are_keyed_by_family() {
        let repo = InMemoryRepository::new();
        let fixture = AnswerFixture::from_value(
            ResponseFamily::FreeResponse,
            json!({"P1": "0.17"}),
        )
        .unwrap();
        repo.insert_fixture(fixture).unwrap();

        let fetched = repo.get_fixture(ResponseFamily::FreeResponse).await.unwrap();
        assert!(fetched.contains(&ExerciseId::new("P1").unwrap()));
        assert!(repo.get_fixture(ResponseFamily::MultiSelect).await.is_err());
    }

    #[tokio::test]
    async fn manifest_defaults_to_empty() {
        let repo = InMemoryRepository::new();
        let course = CourseId::new("probabilidad").unwrap();
        assert!(repo.get_manifest().await.unwrap().lessons(&course).is_empty());

        let mut courses = BTreeMap::new();
        courses.insert(
            course.clone(),
            vec![LessonEntry {
                file: LessonId::new("sets-1").unwrap(),
                title: "Conjuntos".into(),
            }],
        );
        repo.set_manifest(CourseManifest::new(courses)).unwrap();
        assert_eq!(repo.get_manifest().await.unwrap().lessons(&course).len(), 1);
    }

    #[tokio::test]
    async fn session_save_and_clear() {
        let storage = Storage::in_memory();
        assert!(storage.auth.load_session().await.unwrap().is_none());

        let session = AuthSession::new("tok", "ana", fixed_now()).unwrap();
        storage.auth.save_session(&session).await.unwrap();
        assert_eq!(
            storage.auth.load_session().await.unwrap().unwrap().username(),
            "ana"
        );

        storage.auth.clear_session().await.unwrap();
        assert!(storage.auth.load_session().await.unwrap().is_none());
    }
}
