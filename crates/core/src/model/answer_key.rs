use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::model::payload;
use crate::model::{ExerciseId, ResponseFamily};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerKeyError {
    #[error("answer fixture for {family} is malformed: {reason}")]
    MalformedFixture {
        family: ResponseFamily,
        reason: String,
    },

    #[error("no answer key for exercise {id} in {family}")]
    Missing {
        family: ResponseFamily,
        id: ExerciseId,
    },

    #[error("answer key for exercise {id} in {family} has the wrong shape: {reason}")]
    MalformedKey {
        family: ResponseFamily,
        id: ExerciseId,
        reason: String,
    },
}

/// The expected value for one exercise, shaped like its family's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKey {
    /// Unordered members: multi-select, Venn region selection, sample spaces.
    Members(Vec<String>),
    /// Items sorted into named bins: set classifier, Venn drag-and-drop.
    Bins(BTreeMap<String, Vec<String>>),
    /// A single typed answer.
    Text(String),
    /// A numeric answer, kept as its JSON text; compared by value.
    Number(String),
    /// Cardinality per region.
    Counts(BTreeMap<String, String>),
}

/// One family's answer-key fixture, keyed by exercise id.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFixture {
    family: ResponseFamily,
    entries: BTreeMap<String, Value>,
}

impl AnswerFixture {
    #[must_use]
    pub fn new(family: ResponseFamily, entries: BTreeMap<String, Value>) -> Self {
        Self { family, entries }
    }

    /// Parse a fixture document: a JSON object from exercise id to expected value.
    ///
    /// # Errors
    ///
    /// Returns `AnswerKeyError::MalformedFixture` when the document is not a JSON object.
    pub fn from_json(family: ResponseFamily, raw: &str) -> Result<Self, AnswerKeyError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| AnswerKeyError::MalformedFixture {
                family,
                reason: err.to_string(),
            })?;
        Self::from_value(family, value)
    }

    /// # Errors
    ///
    /// Returns `AnswerKeyError::MalformedFixture` when `value` is not a JSON object.
    pub fn from_value(family: ResponseFamily, value: Value) -> Result<Self, AnswerKeyError> {
        match value {
            Value::Object(map) => Ok(Self {
                family,
                entries: map.into_iter().collect(),
            }),
            other => Err(AnswerKeyError::MalformedFixture {
                family,
                reason: format!("expected an object keyed by exercise id, got {other}"),
            }),
        }
    }

    #[must_use]
    pub fn family(&self) -> ResponseFamily {
        self.family
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ExerciseId) -> bool {
        self.entries.contains_key(id.as_str())
    }

    /// Typed answer key for one exercise.
    ///
    /// # Errors
    ///
    /// Returns `AnswerKeyError::Missing` if the id is absent, or
    /// `AnswerKeyError::MalformedKey` if the stored value has the wrong shape.
    pub fn key_for(&self, id: &ExerciseId) -> Result<AnswerKey, AnswerKeyError> {
        let family = self.family;
        let value = self
            .entries
            .get(id.as_str())
            .ok_or_else(|| AnswerKeyError::Missing {
                family,
                id: id.clone(),
            })?;
        let malformed = |reason: String| AnswerKeyError::MalformedKey {
            family,
            id: id.clone(),
            reason,
        };

        let key = match family {
            ResponseFamily::MultiSelect
            | ResponseFamily::VennDiagramSelect
            | ResponseFamily::CoinSampleSpace
            | ResponseFamily::DiceSampleSpace => {
                AnswerKey::Members(payload::string_list(Some(value)).map_err(malformed)?)
            }
            ResponseFamily::SetClassifier | ResponseFamily::VennDiagramDnd => {
                AnswerKey::Bins(payload::bins(Some(value)).map_err(malformed)?)
            }
            ResponseFamily::FreeResponse => match value {
                Value::Number(n) => AnswerKey::Number(n.to_string()),
                Value::String(text) => AnswerKey::Text(text.clone()),
                other => return Err(malformed(format!("expected a string or number, got {other}"))),
            },
            ResponseFamily::VennCardinality => {
                AnswerKey::Counts(payload::counts(Some(value)).map_err(malformed)?)
            }
        };
        Ok(key)
    }
}
