//! Shape decoding shared by learner responses and answer keys.
//!
//! Both sides arrive as loosely typed JSON: numbers where strings are expected,
//! missing arrays meaning "nothing selected". These helpers normalize to text.

use std::collections::BTreeMap;

use serde_json::Value;

pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `null` or a missing payload is an empty list.
pub(crate) fn string_list(value: Option<&Value>) -> Result<Vec<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(|| format!("unexpected list item {item}")))
            .collect(),
        Some(other) => Err(format!("expected a list, got {other}")),
    }
}

pub(crate) fn bins(value: Option<&Value>) -> Result<BTreeMap<String, Vec<String>>, String> {
    match value {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(bin, items)| string_list(Some(items)).map(|items| (bin.clone(), items)))
            .collect(),
        Some(other) => Err(format!("expected an object of lists, got {other}")),
    }
}

pub(crate) fn counts(value: Option<&Value>) -> Result<BTreeMap<String, String>, String> {
    match value {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(region, count)| {
                scalar_text(count)
                    .map(|text| (region.clone(), text))
                    .ok_or_else(|| format!("unexpected value for {region}: {count}"))
            })
            .collect(),
        Some(other) => Err(format!("expected an object, got {other}")),
    }
}

pub(crate) fn list_value(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

pub(crate) fn bins_value(bins: &BTreeMap<String, Vec<String>>) -> Value {
    Value::Object(
        bins.iter()
            .map(|(bin, items)| (bin.clone(), list_value(items)))
            .collect(),
    )
}

pub(crate) fn counts_value(counts: &BTreeMap<String, String>) -> Value {
    Value::Object(
        counts
            .iter()
            .map(|(region, count)| (region.clone(), Value::String(count.clone())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_normalize_to_text() {
        assert_eq!(scalar_text(&json!(0.17)).as_deref(), Some("0.17"));
        assert_eq!(scalar_text(&json!(4)).as_deref(), Some("4"));
        assert_eq!(scalar_text(&json!(true)), None);
    }

    #[test]
    fn missing_list_is_empty() {
        assert_eq!(string_list(None).unwrap(), Vec::<String>::new());
        assert_eq!(string_list(Some(&Value::Null)).unwrap(), Vec::<String>::new());
        assert!(string_list(Some(&json!("A"))).is_err());
    }

    #[test]
    fn counts_accept_strings_and_numbers() {
        let parsed = counts(Some(&json!({"AiB": 3, "AdB": "2"}))).unwrap();
        assert_eq!(parsed["AiB"], "3");
        assert_eq!(parsed["AdB"], "2");
    }
}
