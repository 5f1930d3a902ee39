use serde_json::Value;

use crate::model::{ExerciseResponse, ResponseError};

/// Single slot holding the learner's answer for the active exercise.
///
/// Every interaction overwrites the slot. It is cleared when the exercise is
/// finished, whether it was answered correctly or the answer was revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseStore {
    current: Option<ExerciseResponse>,
}

impl ResponseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, response: ExerciseResponse) {
        self.current = Some(response);
    }

    /// Store a response given in tagged wire form.
    ///
    /// A value without exactly one known discriminator leaves the slot empty,
    /// which keeps submission blocked.
    ///
    /// # Errors
    ///
    /// Returns the decoding error after clearing the slot.
    pub fn set_tagged(&mut self, raw: &Value) -> Result<(), ResponseError> {
        match ExerciseResponse::from_tagged(raw) {
            Ok(response) => {
                self.current = Some(response);
                Ok(())
            }
            Err(err) => {
                self.current = None;
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&ExerciseResponse> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_answer_empty(self.current.as_ref())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn take(&mut self) -> Option<ExerciseResponse> {
        self.current.take()
    }
}

/// A response counts as given once any discriminator is populated, even if
/// its payload is still an empty selection.
#[must_use]
pub fn is_answer_empty(response: Option<&ExerciseResponse>) -> bool {
    response.is_none()
}
