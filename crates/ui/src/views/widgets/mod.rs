//! Interactive lesson components, one per registered `ComponentKind`.
//!
//! Exercise widgets keep their own local state and write the learner's
//! answer through [`ExerciseContext`](crate::views::lesson::ExerciseContext).

mod choice;
mod reference;
mod sample_space;
mod simulators;
mod venn;

use aula_core::model::ComponentKind;
use dioxus::prelude::*;
use serde_json::Value;

use crate::vm::WidgetVm;

pub use choice::{FreeResponse, MultiSelect, NarrativeQuestion};
pub use reference::{BasicTable, DefinitionCard, SetClassifier};
pub use sample_space::{CoinSampleSpace, DiceSampleSpace};
pub use simulators::{CoinFlipSimulator, DiceThrowAnimation};
pub use venn::{
    VennCardinality, VennDiagram, VennDiagramDragNDrop, VennDiagramInfo,
    VennDiagramMutuallyExclusive, VennDiagramStatic,
};

#[component]
pub fn ComponentWidget(widget: WidgetVm) -> Element {
    let WidgetVm { kind, props, id, .. } = widget;
    match kind {
        ComponentKind::BasicTable => rsx! { BasicTable { config: props } },
        ComponentKind::VennDiagramDragNDrop => rsx! { VennDiagramDragNDrop { config: props } },
        ComponentKind::VennDiagramInfo => rsx! { VennDiagramInfo {} },
        ComponentKind::SetClassifier => rsx! { SetClassifier { config: props } },
        ComponentKind::CoinSampleSpace => rsx! { CoinSampleSpace {} },
        ComponentKind::DiceSampleSpace => rsx! { DiceSampleSpace { config: props } },
        ComponentKind::CoinFlipSimulator => rsx! { CoinFlipSimulator { config: props } },
        ComponentKind::VennCardinality => rsx! { VennCardinality {} },
        ComponentKind::MultipleChoice => rsx! {
            MultiSelect { prompt: prop_str(&props, "prompt"), options: choice::options(&props), id, single: true }
        },
        ComponentKind::DemoMultiSelectQ => rsx! {
            MultiSelect {
                prompt: choice::DEMO_PROMPT.to_string(),
                options: choice::demo_options(&["Cristal rojo", "Cristal rojo 2", "Cristal azul", "Cristal verde"]),
                id: choice::demo_id("Q"),
                single: false,
            }
        },
        ComponentKind::DemoMultiSelectR => rsx! {
            MultiSelect {
                prompt: choice::DEMO_PROMPT.to_string(),
                options: choice::demo_options(&["Cristal morado 2", "Cristal morado", "Cristal azul", "Cristal verde"]),
                id: choice::demo_id("R"),
                single: false,
            }
        },
        ComponentKind::MultiSelect => rsx! {
            MultiSelect { prompt: prop_str(&props, "prompt"), options: choice::options(&props), id, single: false }
        },
        ComponentKind::VennDiagram => rsx! { VennDiagram {} },
        ComponentKind::Definition => rsx! { DefinitionCard { config: props } },
        ComponentKind::NarrativeQuestion => rsx! {
            NarrativeQuestion { options: prop_strings(&props, "options") }
        },
        ComponentKind::FreeResponse => rsx! { FreeResponse {} },
        ComponentKind::VennDiagramStatic => rsx! { VennDiagramStatic { config: props } },
        ComponentKind::VennDiagramMutuallyExclusive => rsx! { VennDiagramMutuallyExclusive { config: props } },
        ComponentKind::DiceThrowAnimation => rsx! { DiceThrowAnimation {} },
    }
}

/// String prop, empty when absent.
pub(crate) fn prop_str(props: &Value, key: &str) -> String {
    props
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String-list prop; non-string entries are skipped.
pub(crate) fn prop_strings(props: &Value, key: &str) -> Vec<String> {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
