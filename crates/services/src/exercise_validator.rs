use std::sync::Arc;

use aula_core::model::{ExerciseId, ExerciseResponse};
use aula_core::validation::response_matches;
use serde_json::Value;
use storage::repository::AnswerKeyRepository;
use tracing::{debug, warn};

/// Checks responses against the stored answer keys.
///
/// Every failure along the way (no id, no fixture, no key, malformed key)
/// counts as an incorrect answer; the UI only ever sees a bool.
#[derive(Clone)]
pub struct ExerciseValidator {
    answers: Arc<dyn AnswerKeyRepository>,
}

impl ExerciseValidator {
    #[must_use]
    pub fn new(answers: Arc<dyn AnswerKeyRepository>) -> Self {
        Self { answers }
    }

    /// Validate a typed response for the exercise on screen.
    ///
    /// multiSelect responses carry their own id, which wins over `exercise_id`.
    pub async fn validate(
        &self,
        response: &ExerciseResponse,
        exercise_id: Option<&ExerciseId>,
    ) -> bool {
        let family = response.family();
        let Some(id) = response.embedded_id().or(exercise_id) else {
            warn!(%family, "response has no exercise id");
            return false;
        };

        let fixture = match self.answers.get_fixture(family).await {
            Ok(fixture) => fixture,
            Err(err) => {
                warn!(%family, error = %err, "answer key fixture unavailable");
                return false;
            }
        };

        match fixture.key_for(id) {
            Ok(key) => {
                let correct = response_matches(response, &key);
                debug!(%family, exercise = %id, correct, "validated response");
                correct
            }
            Err(err) => {
                warn!(%family, exercise = %id, error = %err, "no usable answer key");
                false
            }
        }
    }

    /// Validate a response still in its tagged wire form. An unknown or
    /// ambiguous discriminator is incorrect.
    pub async fn validate_tagged(&self, raw: &Value, exercise_id: Option<&ExerciseId>) -> bool {
        match ExerciseResponse::from_tagged(raw) {
            Ok(response) => self.validate(&response, exercise_id).await,
            Err(err) => {
                warn!(error = %err, "unrecognised response");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::model::{AnswerFixture, ResponseFamily};
    use serde_json::json;
    use storage::repository::InMemoryRepository;

    fn validator() -> ExerciseValidator {
        let repo = InMemoryRepository::new();
        let fixtures = [
            (ResponseFamily::MultiSelect, json!({"Q": ["A", "C"]})),
            (
                ResponseFamily::SetClassifier,
                json!({"S1": {"ge10": ["a", "b"], "le10": ["c"]}}),
            ),
            (
                ResponseFamily::VennDiagramDnd,
                json!({"V1": {"AiB": ["2"], "AdB": ["1"]}}),
            ),
            (ResponseFamily::VennDiagramSelect, json!({"V2": ["AiB"]})),
            (ResponseFamily::FreeResponse, json!({"P1": "0.17", "P2": 3})),
            (ResponseFamily::CoinSampleSpace, json!({"C1": ["EE", "EC", "CE", "CC"]})),
            (ResponseFamily::DiceSampleSpace, json!({"D1": ["4-6", "5-5"]})),
            (ResponseFamily::VennCardinality, json!({"K1": {"AdB": "2", "AiB": 3}})),
        ];
        for (family, value) in fixtures {
            repo.insert_fixture(AnswerFixture::from_value(family, value).unwrap())
                .unwrap();
        }
        ExerciseValidator::new(Arc::new(repo))
    }

    fn id(raw: &str) -> ExerciseId {
        ExerciseId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn every_family_accepts_its_answer() {
        let v = validator();
        let cases = [
            (json!({"multiSelect": true, "id": "Q", "response": ["C", "A"]}), None),
            (
                json!({"setClassifier": true, "response": {"le10": ["c"], "ge10": ["b", "a"]}}),
                Some("S1"),
            ),
            (
                json!({"vennDiagramDND": true, "response": {"AdB": ["1"], "AiB": ["2"]}}),
                Some("V1"),
            ),
            (json!({"vennDiagramSelect": true, "response": ["AiB"]}), Some("V2")),
            (json!({"freeResponse": true, "response": "0.17"}), Some("P1")),
            (json!({"freeResponse": true, "response": 3}), Some("P2")),
            (
                json!({"coinSampleSpace": true, "response": ["CC", "CE", "EC", "EE"]}),
                Some("C1"),
            ),
            (json!({"diceSampleSpace": true, "response": ["5-5", "4-6"]}), Some("D1")),
            (
                json!({"vennCardinality": true, "response": {"AiB": "3", "AdB": 2}}),
                Some("K1"),
            ),
        ];
        for (raw, exercise) in cases {
            let exercise = exercise.map(id);
            assert!(
                v.validate_tagged(&raw, exercise.as_ref()).await,
                "expected {raw} to be correct"
            );
        }
    }

    #[tokio::test]
    async fn wrong_id_or_payload_is_incorrect() {
        let v = validator();
        let raw = json!({"freeResponse": true, "response": "0.2"});
        assert!(!v.validate_tagged(&raw, Some(&id("P1"))).await);

        let raw = json!({"freeResponse": true, "response": "0.17"});
        assert!(!v.validate_tagged(&raw, Some(&id("P9"))).await);
        assert!(!v.validate_tagged(&raw, None).await);

        let raw = json!({"vennCardinality": true, "response": {"AiB": "3"}});
        assert!(!v.validate_tagged(&raw, Some(&id("K1"))).await);
    }

    #[tokio::test]
    async fn unknown_discriminator_is_incorrect() {
        let v = validator();
        assert!(!v.validate_tagged(&json!({"fooBar": true}), Some(&id("Q"))).await);
        assert!(!v.validate_tagged(&json!({}), None).await);
    }

    #[tokio::test]
    async fn missing_fixture_is_incorrect() {
        let v = ExerciseValidator::new(Arc::new(InMemoryRepository::new()));
        let response = ExerciseResponse::DiceSampleSpace(vec!["6-6".into()]);
        assert!(!v.validate(&response, Some(&id("D1"))).await);
    }
}
