/// Which half of the lesson the learner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonMode {
    Sections,
    Exercises,
    Finished,
}

/// Aggregated view of lesson progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonProgress {
    pub mode: LessonMode,
    /// Zero-based index within the current mode.
    pub current: usize,
    pub total: usize,
    pub is_last_page: bool,
}
