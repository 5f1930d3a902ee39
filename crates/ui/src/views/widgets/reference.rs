use std::collections::BTreeMap;

use aula_core::model::ExerciseResponse;
use dioxus::prelude::*;
use serde_json::Value;

use super::prop_str;
use crate::views::lesson::{ExerciseContext, InlineText};
use crate::vm::tokenize;

const SURVEY_HEADERS: [&str; 3] = [
    "Estudiantes",
    "Practica atletismo $(A)$",
    "Practica baloncesto $(B)$",
];

const SURVEY_ROWS: [[&str; 3]; 5] = [
    ["Lucas", "Sí", "Sí"],
    ["Mateo", "No", "No"],
    ["Carlos", "Sí", "Sí"],
    ["Felipe", "No", "Sí"],
    ["Luis", "Sí", "No"],
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labelled {
    pub id: String,
    pub label: String,
}

fn default_items() -> Vec<Labelled> {
    [
        ("amethyst8", "Amethyst crystal (8g)"),
        ("quartz5", "Quartz crystal (5g)"),
        ("topaz7", "Topaz crystal (7g)"),
        ("beryl12", "Beryl crystal (12g)"),
        ("ruby14", "Ruby crystal (14g)"),
        ("clayPebble", "Clay pebble (non crystaline, 3g)"),
    ]
    .into_iter()
    .map(|(id, label)| Labelled {
        id: id.to_string(),
        label: label.to_string(),
    })
    .collect()
}

fn default_containers() -> Vec<Labelled> {
    [
        ("ge10", "≥ 10 grams"),
        ("le10", "≤ 10 grams"),
        ("nonCrystal", "non crystaline objects"),
    ]
    .into_iter()
    .map(|(id, label)| Labelled {
        id: id.to_string(),
        label: label.to_string(),
    })
    .collect()
}

/// `[{id, label}]` list prop, or `fallback` when absent or empty.
fn labelled(props: &Value, key: &str, fallback: fn() -> Vec<Labelled>) -> Vec<Labelled> {
    let parsed: Vec<Labelled> = props
        .get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let id = entry.get("id")?.as_str()?.to_string();
                    let label = entry
                        .get("label")
                        .and_then(Value::as_str)
                        .unwrap_or(&id)
                        .to_string();
                    Some(Labelled { id, label })
                })
                .collect()
        })
        .unwrap_or_default();
    if parsed.is_empty() { fallback() } else { parsed }
}

/// Container id to item ids; empty containers are left out.
fn classification_bins(assigned: &BTreeMap<String, String>) -> BTreeMap<String, Vec<String>> {
    let mut bins: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (item, container) in assigned {
        bins.entry(container.clone()).or_default().push(item.clone());
    }
    bins
}

fn table_rows(props: &Value) -> (Vec<String>, Vec<Vec<String>>) {
    let strings = |row: &Value| -> Option<Vec<String>> {
        row.as_array().map(|cells| {
            cells
                .iter()
                .map(|cell| match cell {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
    };
    let headers = props.get("headers").and_then(strings);
    let rows = props
        .get("rows")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(strings).collect::<Vec<_>>());
    match (headers, rows) {
        (Some(headers), Some(rows)) => (headers, rows),
        _ => (
            SURVEY_HEADERS.iter().map(|h| (*h).to_string()).collect(),
            SURVEY_ROWS
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        ),
    }
}

/// Survey table; `headers` and `rows` props replace the built-in data.
#[component]
pub fn BasicTable(config: Value) -> Element {
    let (headers, rows) = table_rows(&config);

    rsx! {
        div { class: "table-wrap",
            table { class: "basic-table",
                thead {
                    tr {
                        for (index, header) in headers.into_iter().enumerate() {
                            th { key: "{index}", InlineText { tokens: tokenize(&header) } }
                        }
                    }
                }
                tbody {
                    for (index, row) in rows.into_iter().enumerate() {
                        tr { key: "{index}",
                            for (column, cell) in row.into_iter().enumerate() {
                                td { key: "{column}", "{cell}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn DefinitionCard(config: Value) -> Element {
    let text = prop_str(&config, "definition");
    rsx! {
        div { class: "definition", InlineText { tokens: tokenize(&text) } }
    }
}

/// Sort items into containers: pick an item, then click a container.
#[component]
pub fn SetClassifier(config: Value) -> Element {
    let ctx = use_context::<ExerciseContext>();
    let items = labelled(&config, "items", default_items);
    let containers = labelled(&config, "containers", default_containers);
    let mut assigned = use_signal(BTreeMap::<String, String>::new);
    let mut picked = use_signal(|| None::<String>);

    let publish = move || {
        ctx.set_response(ExerciseResponse::SetClassifier(classification_bins(&assigned.read())));
    };
    let on_container = use_callback(move |container: String| {
        if let Some(item) = picked.take() {
            assigned.write().insert(item, container);
            publish();
        }
    });
    let on_unassign = use_callback(move |item: String| {
        assigned.write().remove(&item);
        publish();
    });

    let unclassified = items
        .iter()
        .filter(|item| !assigned.read().contains_key(&item.id))
        .cloned()
        .collect::<Vec<_>>();
    let grouped = containers
        .into_iter()
        .map(|container| {
            let members = items
                .iter()
                .filter(|item| assigned.read().get(&item.id) == Some(&container.id))
                .cloned()
                .collect::<Vec<_>>();
            (container, members)
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "set-classifier",
            div { class: "tray",
                for item in unclassified {
                    button {
                        key: "{item.id}",
                        r#type: "button",
                        class: if picked.read().as_deref() == Some(item.id.as_str()) { "chip chip--selected" } else { "chip" },
                        onclick: move |_| picked.set(Some(item.id.clone())),
                        "{item.label}"
                    }
                }
            }
            div { class: "containers",
                for (container, members) in grouped {
                    div {
                        key: "{container.id}",
                        class: "container",
                        onclick: move |_| on_container.call(container.id.clone()),
                        div { class: "container-label", "{container.label}" }
                        for item in members {
                            button {
                                key: "{item.id}",
                                r#type: "button",
                                class: "chip",
                                onclick: move |evt| {
                                    evt.stop_propagation();
                                    on_unassign.call(item.id.clone());
                                },
                                "{item.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
