pub mod audit;
pub mod content_dir;
pub mod repository;
pub mod sqlite;

pub use content_dir::ContentDirRepository;
pub use repository::{
    AnswerKeyRepository, AuthSessionRepository, InMemoryRepository, LessonRepository, Storage,
    StorageError,
};
