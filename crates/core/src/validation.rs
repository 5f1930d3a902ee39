//! Comparison of learner responses against answer keys.
//!
//! Set-like families compare as sorted multisets, so order never matters but
//! duplicates do. Bin families additionally reject bins the key does not
//! name. Cardinality requires the exact same regions.

use std::collections::BTreeMap;

use crate::model::{AnswerKey, ExerciseResponse};

/// Whether `response` matches `key`. A family/key shape mismatch never matches.
#[must_use]
pub fn response_matches(response: &ExerciseResponse, key: &AnswerKey) -> bool {
    match (response, key) {
        (ExerciseResponse::MultiSelect { selected, .. }, AnswerKey::Members(expected))
        | (ExerciseResponse::VennDiagramSelect(selected), AnswerKey::Members(expected))
        | (ExerciseResponse::CoinSampleSpace(selected), AnswerKey::Members(expected))
        | (ExerciseResponse::DiceSampleSpace(selected), AnswerKey::Members(expected)) => {
            same_members(expected, selected)
        }
        (ExerciseResponse::SetClassifier(actual), AnswerKey::Bins(expected))
        | (ExerciseResponse::VennDiagramDnd(actual), AnswerKey::Bins(expected)) => {
            same_bins(expected, actual)
        }
        (ExerciseResponse::FreeResponse(actual), AnswerKey::Text(expected)) => {
            same_text(expected, actual)
        }
        (ExerciseResponse::FreeResponse(actual), AnswerKey::Number(expected)) => {
            same_number(expected, actual)
        }
        (ExerciseResponse::VennCardinality(actual), AnswerKey::Counts(expected)) => {
            same_counts(expected, actual)
        }
        _ => false,
    }
}

/// Sorted-array equality.
#[must_use]
pub fn same_members(expected: &[String], actual: &[String]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    let mut expected = expected.to_vec();
    let mut actual = actual.to_vec();
    expected.sort_unstable();
    actual.sort_unstable();
    expected == actual
}

/// Every expected bin must match; a bin missing from the response counts as
/// empty. A response bin the key does not name fails the comparison.
#[must_use]
pub fn same_bins(
    expected: &BTreeMap<String, Vec<String>>,
    actual: &BTreeMap<String, Vec<String>>,
) -> bool {
    let expected_bins_match = expected.iter().all(|(bin, items)| {
        let given = actual.get(bin).map(Vec::as_slice).unwrap_or(&[]);
        same_members(items, given)
    });
    let no_extra_bins = actual.keys().all(|bin| expected.contains_key(bin));
    expected_bins_match && no_extra_bins
}

/// Exact key-set parity and per-region text equality.
#[must_use]
pub fn same_counts(expected: &BTreeMap<String, String>, actual: &BTreeMap<String, String>) -> bool {
    expected.len() == actual.len()
        && expected.iter().all(|(region, count)| {
            actual
                .get(region)
                .is_some_and(|given| given.trim() == count.trim())
        })
}

/// Surrounding whitespace is ignored; otherwise the text must be identical.
#[must_use]
pub fn same_text(expected: &str, actual: &str) -> bool {
    expected.trim() == actual.trim()
}

/// Numeric keys accept any spelling of the same value (`0.50`, `.5`, `3.0`).
/// A response that does not parse as a number falls back to text equality.
#[must_use]
pub fn same_number(expected: &str, actual: &str) -> bool {
    match (expected.trim().parse::<f64>(), actual.trim().parse::<f64>()) {
        #[allow(clippy::float_cmp)]
        (Ok(expected), Ok(actual)) => expected == actual,
        _ => same_text(expected, actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExerciseId;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn bins(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(bin, items)| ((*bin).to_string(), strings(items)))
            .collect()
    }

    fn counts(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn multi_select_ignores_order() {
        let response = ExerciseResponse::MultiSelect {
            id: Some(ExerciseId::new("Q").unwrap()),
            selected: strings(&["A", "C"]),
        };
        assert!(response_matches(&response, &AnswerKey::Members(strings(&["C", "A"]))));
        assert!(!response_matches(&response, &AnswerKey::Members(strings(&["A"]))));
    }

    #[test]
    fn duplicates_are_counted() {
        assert!(!same_members(&strings(&["A", "B"]), &strings(&["A", "A"])));
        assert!(!same_members(&strings(&["A"]), &strings(&["A", "A"])));
        assert!(same_members(&strings(&["EE", "EC"]), &strings(&["EC", "EE"])));
    }

    #[test]
    fn permutations_never_change_set_results() {
        let key = AnswerKey::Members(strings(&["4-6", "5-5", "6-4", "5-6", "6-5", "6-6"]));
        let mut outcomes = strings(&["6-6", "6-5", "5-6", "6-4", "5-5", "4-6"]);
        for _ in 0..outcomes.len() {
            outcomes.rotate_left(1);
            let response = ExerciseResponse::DiceSampleSpace(outcomes.clone());
            assert!(response_matches(&response, &key));
        }
    }

    #[test]
    fn bins_treat_missing_as_empty_and_reject_extras() {
        let key = bins(&[("ge10", &["a", "b"]), ("le10", &["c"]), ("nonCrystal", &[])]);
        let good = bins(&[("le10", &["c"]), ("ge10", &["b", "a"])]);
        assert!(same_bins(&key, &good));

        let extra = bins(&[("ge10", &["a", "b"]), ("le10", &["c"]), ("other", &[])]);
        assert!(!same_bins(&key, &extra));

        let misplaced = bins(&[("ge10", &["a"]), ("le10", &["c", "b"])]);
        assert!(!same_bins(&key, &misplaced));
    }

    #[test]
    fn cardinality_requires_key_parity() {
        let key = counts(&[("AdB", "2"), ("AiB", "3")]);
        assert!(same_counts(&key, &counts(&[("AiB", "3"), ("AdB", "2")])));
        assert!(!same_counts(&key, &counts(&[("AiB", "3")])));
        assert!(!same_counts(
            &key,
            &counts(&[("AdB", "2"), ("AiB", "3"), ("BdA", "0")])
        ));
        assert!(!same_counts(&key, &counts(&[("AdB", "2"), ("AiB", "4")])));
    }

    #[test]
    fn free_response_compares_text() {
        let response = ExerciseResponse::FreeResponse("0.17".into());
        assert!(response_matches(&response, &AnswerKey::Text("0.17".into())));
        let wrong = ExerciseResponse::FreeResponse("0.2".into());
        assert!(!response_matches(&wrong, &AnswerKey::Text("0.17".into())));
        assert!(same_text("0.17", " 0.17 "));
    }

    #[test]
    fn numeric_keys_compare_by_value() {
        let fixture = crate::model::AnswerFixture::from_value(
            crate::model::ResponseFamily::FreeResponse,
            serde_json::json!({"P": 0.5, "N": 3}),
        )
        .unwrap();
        let half = fixture.key_for(&ExerciseId::new("P").unwrap()).unwrap();
        let three = fixture.key_for(&ExerciseId::new("N").unwrap()).unwrap();
        for given in ["0.5", "0.50", ".5", " 0.5 "] {
            let response = ExerciseResponse::FreeResponse(given.into());
            assert!(response_matches(&response, &half), "{given}");
        }
        for given in ["3", "3.0"] {
            let response = ExerciseResponse::FreeResponse(given.into());
            assert!(response_matches(&response, &three), "{given}");
        }
        for given in ["0.51", "1/2", ""] {
            let response = ExerciseResponse::FreeResponse(given.into());
            assert!(!response_matches(&response, &half), "{given}");
        }
    }

    #[test]
    fn text_keys_stay_textual() {
        let response = ExerciseResponse::FreeResponse("0.50".into());
        assert!(!response_matches(&response, &AnswerKey::Text("0.5".into())));
    }

    #[test]
    fn cardinality_trims_both_sides() {
        let key = counts(&[("AdB", " 2 "), ("AiB", "3")]);
        assert!(same_counts(&key, &counts(&[("AdB", "2"), ("AiB", " 3")])));
    }

    #[test]
    fn family_and_key_shape_mismatch_fails() {
        let response = ExerciseResponse::FreeResponse("A".into());
        assert!(!response_matches(&response, &AnswerKey::Members(strings(&["A"]))));
        let response = ExerciseResponse::VennDiagramSelect(strings(&["AiB"]));
        assert!(!response_matches(&response, &AnswerKey::Bins(BTreeMap::new())));
    }
}
