use aula_core::model::{ExerciseId, ExerciseResponse};
use dioxus::prelude::*;
use serde_json::Value;

use crate::views::lesson::ExerciseContext;

pub(super) const DEMO_PROMPT: &str =
    "Selecciona todas las opciones que cumplan la condición (ejemplo).";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub img_src: Option<String>,
}

/// Options from `props.options`: objects with `id`/`label`/`imgSrc`, or bare
/// strings lettered A, B, C...
pub(super) fn options(props: &Value) -> Vec<ChoiceOption> {
    let Some(items) = props.get("options").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::String(label) => Some(ChoiceOption {
                id: letter(index),
                label: label.clone(),
                img_src: None,
            }),
            Value::Object(fields) => {
                let id = fields
                    .get("id")
                    .and_then(Value::as_str)
                    .map_or_else(|| letter(index), str::to_string);
                Some(ChoiceOption {
                    label: fields
                        .get("label")
                        .and_then(Value::as_str)
                        .unwrap_or(&id)
                        .to_string(),
                    img_src: fields
                        .get("imgSrc")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    id,
                })
            }
            _ => None,
        })
        .collect()
}

pub(super) fn demo_options(labels: &[&str]) -> Vec<ChoiceOption> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| ChoiceOption {
            id: letter(index),
            label: (*label).to_string(),
            img_src: None,
        })
        .collect()
}

pub(super) fn demo_id(id: &str) -> Option<ExerciseId> {
    ExerciseId::new(id).ok()
}

fn letter(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or_else(|| (index + 1).to_string(), |i| char::from(b'A' + i).to_string())
}

/// Selection after clicking `option`. Single-choice replaces, multi-choice toggles.
fn toggled(selected: &[String], option: &str, single: bool) -> Vec<String> {
    if single {
        return vec![option.to_string()];
    }
    if selected.iter().any(|s| s == option) {
        selected.iter().filter(|s| *s != option).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(option.to_string());
        next
    }
}

#[component]
pub fn MultiSelect(
    prompt: String,
    options: Vec<ChoiceOption>,
    id: Option<ExerciseId>,
    single: bool,
) -> Element {
    let ctx = use_context::<ExerciseContext>();
    let mut selected = use_signal(Vec::<String>::new);
    let has_images = options.iter().any(|o| o.img_src.is_some());

    let on_toggle = use_callback(move |option: String| {
        let next = toggled(&selected.read(), &option, single);
        selected.set(next.clone());
        ctx.set_response(ExerciseResponse::MultiSelect {
            id: id.clone(),
            selected: next,
        });
    });

    rsx! {
        div { class: "multi-select",
            if !prompt.is_empty() {
                div { class: "multi-select-prompt", "{prompt}" }
            }
            div {
                class: if has_images { "options options--grid" } else { "options" },
                role: if single { "radiogroup" } else { "group" },
                for option in options {
                    button {
                        key: "{option.id}",
                        r#type: "button",
                        class: if selected.read().contains(&option.id) { "option option--selected" } else { "option" },
                        onclick: move |_| on_toggle.call(option.id.clone()),
                        if let Some(src) = option.img_src.clone() {
                            img { src: "{src}", alt: "{option.label}" }
                        } else {
                            span { class: "option-letter", "{option.id}" }
                        }
                        span { "{option.label}" }
                    }
                }
            }
        }
    }
}

/// Story prompt whose buttons all continue the lesson.
#[component]
pub fn NarrativeQuestion(options: Vec<String>) -> Element {
    let ctx = use_context::<ExerciseContext>();
    let mut answered = use_signal(|| false);

    rsx! {
        div { class: "narrative",
            for (index, option) in options.into_iter().enumerate() {
                button {
                    key: "{index}",
                    r#type: "button",
                    class: "option",
                    disabled: answered(),
                    onclick: move |_| {
                        if !answered() {
                            answered.set(true);
                            ctx.answer_narrative();
                        }
                    },
                    "{option}"
                }
            }
        }
    }
}

#[component]
pub fn FreeResponse() -> Element {
    let ctx = use_context::<ExerciseContext>();
    let mut value = use_signal(String::new);

    rsx! {
        input {
            class: "free-response",
            r#type: "text",
            placeholder: "Respuesta",
            value: "{value}",
            oninput: move |evt| {
                let text = evt.value();
                value.set(text.clone());
                ctx.set_response(ExerciseResponse::FreeResponse(text));
            },
        }
    }
}
