use aula_core::model::ExerciseId;
use dioxus::prelude::*;
use services::ExplanationState;

use super::ExerciseContext;
use crate::views::widgets::ComponentWidget;
use crate::vm::{BlockVm, InlineToken};

#[component]
pub fn ContentBlocks(blocks: Vec<BlockVm>) -> Element {
    rsx! {
        for (index, block) in blocks.into_iter().enumerate() {
            BlockView { key: "{index}", block }
        }
    }
}

#[component]
pub fn BlockView(block: BlockVm) -> Element {
    let ctx = use_context::<ExerciseContext>();

    match block {
        BlockVm::Text(tokens) => rsx! {
            div { class: "text", InlineText { tokens } }
        },
        BlockVm::Widget(widget) => rsx! { ComponentWidget { widget } },
        BlockVm::Missing { name } => rsx! {
            div { class: "missing-component", "Missing component: {name}" }
        },
        BlockVm::Image { src } => rsx! {
            img { class: "lesson-image", src: "{src}", alt: "" }
        },
        BlockVm::AsideButton { label, aside } => rsx! {
            button {
                class: "aside-button",
                r#type: "button",
                onclick: move |_| ctx.open_aside(aside.clone()),
                "{label}"
            }
        },
        BlockVm::Formula(tex) => rsx! {
            span { class: "math math--block", "{tex}" }
        },
        BlockVm::Definition(tokens) => rsx! {
            div { class: "definition", InlineText { tokens } }
        },
        BlockVm::Explanation { tokens, src, id } => rsx! {
            ExplanationDropdown { tokens, src, id }
        },
        BlockVm::List(items) => rsx! {
            ul { class: "lesson-list",
                for (index, tokens) in items.into_iter().enumerate() {
                    li { key: "{index}", InlineText { tokens } }
                }
            }
        },
        BlockVm::Empty => rsx! {},
    }
}

#[component]
pub fn InlineText(tokens: Vec<InlineToken>) -> Element {
    rsx! {
        for (index, token) in tokens.into_iter().enumerate() {
            match token {
                InlineToken::Text(value) => rsx! { span { key: "{index}", "{value}" } },
                InlineToken::Bold(value) => rsx! { strong { key: "{index}", "{value}" } },
                InlineToken::InlineMath(tex) => rsx! {
                    span { key: "{index}", class: "math math--inline", "{tex}" }
                },
                InlineToken::BlockMath(tex) => rsx! {
                    span { key: "{index}", class: "math math--block", "{tex}" }
                },
            }
        }
    }
}

/// Hidden until its exercise is finished; opens by itself when the learner
/// asked for the explanation.
#[component]
fn ExplanationDropdown(
    tokens: Vec<InlineToken>,
    src: Option<String>,
    id: Option<ExerciseId>,
) -> Element {
    let ctx = use_context::<ExerciseContext>();
    let mut toggled = use_signal(|| None::<bool>);

    let state = ctx.explanation_state(id.as_ref());
    let unlocked = state != ExplanationState::Locked;
    let open = toggled().unwrap_or(state == ExplanationState::Open);

    rsx! {
        div { class: if unlocked { "explanation" } else { "explanation explanation--locked" },
            button {
                r#type: "button",
                disabled: !unlocked,
                onclick: move |_| toggled.set(Some(!open)),
                if open { "Esconder explicación" } else { "Mostrar explicación" }
            }
            if open && unlocked {
                div { class: "explanation-body",
                    p { strong { "Explicación" } }
                    if let Some(src) = src {
                        img { src: "{src}", alt: "" }
                    }
                    p { InlineText { tokens } }
                }
            }
        }
    }
}
