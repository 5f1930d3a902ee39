use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::ExerciseId;
use crate::model::payload;

/// Exercise families, one per response discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResponseFamily {
    MultiSelect,
    SetClassifier,
    VennDiagramDnd,
    VennDiagramSelect,
    FreeResponse,
    CoinSampleSpace,
    DiceSampleSpace,
    VennCardinality,
}

impl ResponseFamily {
    pub const ALL: [ResponseFamily; 8] = [
        ResponseFamily::MultiSelect,
        ResponseFamily::SetClassifier,
        ResponseFamily::VennDiagramDnd,
        ResponseFamily::VennDiagramSelect,
        ResponseFamily::FreeResponse,
        ResponseFamily::CoinSampleSpace,
        ResponseFamily::DiceSampleSpace,
        ResponseFamily::VennCardinality,
    ];

    /// The boolean discriminator key in the tagged wire form.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ResponseFamily::MultiSelect => "multiSelect",
            ResponseFamily::SetClassifier => "setClassifier",
            ResponseFamily::VennDiagramDnd => "vennDiagramDND",
            ResponseFamily::VennDiagramSelect => "vennDiagramSelect",
            ResponseFamily::FreeResponse => "freeResponse",
            ResponseFamily::CoinSampleSpace => "coinSampleSpace",
            ResponseFamily::DiceSampleSpace => "diceSampleSpace",
            ResponseFamily::VennCardinality => "vennCardinality",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.tag() == tag)
    }

    /// File stem of the answer-key fixture for this family.
    #[must_use]
    pub const fn fixture_name(self) -> &'static str {
        match self {
            ResponseFamily::MultiSelect => "MultiSelectAnswer",
            ResponseFamily::SetClassifier => "SetClassifierDNDAnswer",
            ResponseFamily::VennDiagramDnd => "VennDiagramDND",
            ResponseFamily::VennDiagramSelect => "VennDiagramSelect",
            ResponseFamily::FreeResponse => "FreeResponse",
            ResponseFamily::CoinSampleSpace => "CoinSampleSpace",
            ResponseFamily::DiceSampleSpace => "DiceSampleSpace",
            ResponseFamily::VennCardinality => "VennDiagramCardinality",
        }
    }
}

impl fmt::Display for ResponseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResponseError {
    #[error("response must be a JSON object")]
    NotAnObject,

    #[error("response has no discriminator set")]
    MissingDiscriminator,

    #[error("unknown response discriminator: {0}")]
    UnknownDiscriminator(String),

    #[error("response sets several discriminators: {0:?}")]
    AmbiguousDiscriminator(Vec<String>),

    #[error("invalid {family} payload: {reason}")]
    InvalidPayload {
        family: ResponseFamily,
        reason: String,
    },
}

/// The learner's in-progress answer, tagged by exercise family.
///
/// On the wire this is `{"<discriminator>": true, "id"?: .., "response": ..}`,
/// exactly one discriminator set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ExerciseResponse {
    /// Multi-select carries its own question id.
    MultiSelect {
        id: Option<ExerciseId>,
        selected: Vec<String>,
    },
    SetClassifier(BTreeMap<String, Vec<String>>),
    VennDiagramDnd(BTreeMap<String, Vec<String>>),
    VennDiagramSelect(Vec<String>),
    FreeResponse(String),
    CoinSampleSpace(Vec<String>),
    DiceSampleSpace(Vec<String>),
    VennCardinality(BTreeMap<String, String>),
}

impl ExerciseResponse {
    #[must_use]
    pub fn family(&self) -> ResponseFamily {
        match self {
            ExerciseResponse::MultiSelect { .. } => ResponseFamily::MultiSelect,
            ExerciseResponse::SetClassifier(_) => ResponseFamily::SetClassifier,
            ExerciseResponse::VennDiagramDnd(_) => ResponseFamily::VennDiagramDnd,
            ExerciseResponse::VennDiagramSelect(_) => ResponseFamily::VennDiagramSelect,
            ExerciseResponse::FreeResponse(_) => ResponseFamily::FreeResponse,
            ExerciseResponse::CoinSampleSpace(_) => ResponseFamily::CoinSampleSpace,
            ExerciseResponse::DiceSampleSpace(_) => ResponseFamily::DiceSampleSpace,
            ExerciseResponse::VennCardinality(_) => ResponseFamily::VennCardinality,
        }
    }

    /// Id embedded in the response itself. Only multi-select carries one.
    #[must_use]
    pub fn embedded_id(&self) -> Option<&ExerciseId> {
        match self {
            ExerciseResponse::MultiSelect { id, .. } => id.as_ref(),
            _ => None,
        }
    }

    /// Decode the tagged wire form.
    ///
    /// # Errors
    ///
    /// Returns `ResponseError` when zero or several discriminators are set, the
    /// discriminator is unknown, or the payload has the wrong shape.
    pub fn from_tagged(raw: &Value) -> Result<Self, ResponseError> {
        let object = raw.as_object().ok_or(ResponseError::NotAnObject)?;
        let family = discriminator(object)?;
        let payload = object.get("response");
        let invalid = |reason: String| ResponseError::InvalidPayload { family, reason };

        let response = match family {
            ResponseFamily::MultiSelect => {
                let id = match object.get("id") {
                    None | Some(Value::Null) => None,
                    Some(value) => {
                        let text = payload::scalar_text(value)
                            .ok_or_else(|| invalid(format!("unexpected id {value}")))?;
                        Some(ExerciseId::new(text).map_err(|err| invalid(err.to_string()))?)
                    }
                };
                ExerciseResponse::MultiSelect {
                    id,
                    selected: payload::string_list(payload).map_err(invalid)?,
                }
            }
            ResponseFamily::SetClassifier => {
                ExerciseResponse::SetClassifier(payload::bins(payload).map_err(invalid)?)
            }
            ResponseFamily::VennDiagramDnd => {
                ExerciseResponse::VennDiagramDnd(payload::bins(payload).map_err(invalid)?)
            }
            ResponseFamily::VennDiagramSelect => {
                ExerciseResponse::VennDiagramSelect(payload::string_list(payload).map_err(invalid)?)
            }
            ResponseFamily::FreeResponse => {
                let text = payload
                    .and_then(payload::scalar_text)
                    .ok_or_else(|| invalid("expected a string or number".into()))?;
                ExerciseResponse::FreeResponse(text)
            }
            ResponseFamily::CoinSampleSpace => {
                ExerciseResponse::CoinSampleSpace(payload::string_list(payload).map_err(invalid)?)
            }
            ResponseFamily::DiceSampleSpace => {
                ExerciseResponse::DiceSampleSpace(payload::string_list(payload).map_err(invalid)?)
            }
            ResponseFamily::VennCardinality => {
                ExerciseResponse::VennCardinality(payload::counts(payload).map_err(invalid)?)
            }
        };
        Ok(response)
    }

    /// Encode into the tagged wire form.
    #[must_use]
    pub fn to_tagged(&self) -> Value {
        let mut object = Map::new();
        object.insert(self.family().tag().to_owned(), Value::Bool(true));
        let payload = match self {
            ExerciseResponse::MultiSelect { id, selected } => {
                if let Some(id) = id {
                    object.insert("id".into(), Value::String(id.as_str().to_owned()));
                }
                payload::list_value(selected)
            }
            ExerciseResponse::SetClassifier(bins) | ExerciseResponse::VennDiagramDnd(bins) => {
                payload::bins_value(bins)
            }
            ExerciseResponse::VennDiagramSelect(items)
            | ExerciseResponse::CoinSampleSpace(items)
            | ExerciseResponse::DiceSampleSpace(items) => payload::list_value(items),
            ExerciseResponse::FreeResponse(text) => Value::String(text.clone()),
            ExerciseResponse::VennCardinality(counts) => payload::counts_value(counts),
        };
        object.insert("response".into(), payload);
        Value::Object(object)
    }
}

/// Exactly one known boolean discriminator must be `true`.
fn discriminator(object: &Map<String, Value>) -> Result<ResponseFamily, ResponseError> {
    let flagged: Vec<&String> = object
        .iter()
        .filter(|(_, value)| value.as_bool() == Some(true))
        .map(|(key, _)| key)
        .collect();

    let known: Vec<ResponseFamily> = flagged
        .iter()
        .filter_map(|key| ResponseFamily::from_tag(key))
        .collect();

    match known.as_slice() {
        [family] => Ok(*family),
        [] => match flagged.first() {
            Some(unknown) => Err(ResponseError::UnknownDiscriminator((*unknown).clone())),
            None => Err(ResponseError::MissingDiscriminator),
        },
        several => Err(ResponseError::AmbiguousDiscriminator(
            several.iter().map(|family| family.tag().to_owned()).collect(),
        )),
    }
}

impl TryFrom<Value> for ExerciseResponse {
    type Error = ResponseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_tagged(&value)
    }
}

impl From<ExerciseResponse> for Value {
    fn from(response: ExerciseResponse) -> Self {
        response.to_tagged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_multi_select_with_id() {
        let response =
            ExerciseResponse::from_tagged(&json!({"multiSelect": true, "id": "Q", "response": ["A", "C"]}))
                .unwrap();
        assert_eq!(response.family(), ResponseFamily::MultiSelect);
        assert_eq!(response.embedded_id().map(ExerciseId::as_str), Some("Q"));
        assert!(matches!(
            response,
            ExerciseResponse::MultiSelect { ref selected, .. } if selected == &["A", "C"]
        ));
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        let err = ExerciseResponse::from_tagged(&json!({"fooBar": true})).unwrap_err();
        assert_eq!(err, ResponseError::UnknownDiscriminator("fooBar".into()));
    }

    #[test]
    fn empty_object_has_no_discriminator() {
        let err = ExerciseResponse::from_tagged(&json!({})).unwrap_err();
        assert_eq!(err, ResponseError::MissingDiscriminator);
        assert_eq!(
            ExerciseResponse::from_tagged(&json!(["A"])).unwrap_err(),
            ResponseError::NotAnObject
        );
    }

    #[test]
    fn several_discriminators_are_ambiguous() {
        let err = ExerciseResponse::from_tagged(
            &json!({"multiSelect": true, "diceSampleSpace": true, "response": []}),
        )
        .unwrap_err();
        assert!(matches!(err, ResponseError::AmbiguousDiscriminator(tags) if tags.len() == 2));
    }

    #[test]
    fn false_discriminators_are_ignored() {
        let response = ExerciseResponse::from_tagged(
            &json!({"multiSelect": false, "freeResponse": true, "response": 0.17}),
        )
        .unwrap();
        assert_eq!(response, ExerciseResponse::FreeResponse("0.17".into()));
    }

    #[test]
    fn missing_list_payload_is_empty_selection() {
        let response =
            ExerciseResponse::from_tagged(&json!({"coinSampleSpace": true})).unwrap();
        assert_eq!(response, ExerciseResponse::CoinSampleSpace(Vec::new()));
    }

    #[test]
    fn wrong_payload_shape_is_reported() {
        let err = ExerciseResponse::from_tagged(&json!({"vennCardinality": true, "response": [1]}))
            .unwrap_err();
        assert!(matches!(
            err,
            ResponseError::InvalidPayload { family: ResponseFamily::VennCardinality, .. }
        ));
    }

    #[test]
    fn serde_uses_tagged_form() {
        let response = ExerciseResponse::VennCardinality(BTreeMap::from([
            ("AiB".to_string(), "3".to_string()),
        ]));
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded, json!({"vennCardinality": true, "response": {"AiB": "3"}}));
        let decoded: ExerciseResponse = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, response);
    }
}
