use aula_core::model::{ComponentBlock, ComponentKind, ContentBlock, ExerciseId, Section};
use serde_json::Value;
use tracing::warn;

use crate::vm::inline_vm::{InlineToken, tokenize};
use crate::vm::markdown_vm::markdown_to_html;

/// Side panel content requested by an aside button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsideVm {
    pub title: String,
    pub info_html: String,
}

/// A registered component ready for widget dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetVm {
    pub kind: ComponentKind,
    pub props: Value,
    pub id: Option<ExerciseId>,
    pub is_exercise: bool,
}

/// Exactly one renderable unit per content block.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockVm {
    Text(Vec<InlineToken>),
    Widget(WidgetVm),
    /// Registry miss; rendered as a visible placeholder.
    Missing {
        name: String,
    },
    Image {
        src: String,
    },
    AsideButton {
        label: String,
        aside: AsideVm,
    },
    Formula(String),
    Definition(Vec<InlineToken>),
    Explanation {
        tokens: Vec<InlineToken>,
        src: Option<String>,
        id: Option<ExerciseId>,
    },
    List(Vec<Vec<InlineToken>>),
    /// Unknown block type.
    Empty,
}

#[must_use]
pub fn block_vm(block: &ContentBlock, index: usize) -> BlockVm {
    match block {
        ContentBlock::Text { value } => BlockVm::Text(tokenize(value)),
        ContentBlock::Component(component) => widget_vm(component, index),
        ContentBlock::Image { src } => BlockVm::Image { src: src.clone() },
        ContentBlock::Aside {
            title,
            info,
            button_text,
        } => BlockVm::AsideButton {
            label: button_text.clone(),
            aside: AsideVm {
                title: title.clone(),
                info_html: markdown_to_html(info),
            },
        },
        ContentBlock::Formula { value } => BlockVm::Formula(value.clone()),
        ContentBlock::Definition { value } => BlockVm::Definition(tokenize(value)),
        ContentBlock::Explanation {
            explanation,
            src,
            id,
        } => BlockVm::Explanation {
            tokens: tokenize(explanation),
            src: src.clone(),
            id: id.clone(),
        },
        ContentBlock::List { list_items } => {
            BlockVm::List(list_items.iter().map(|item| tokenize(item)).collect())
        }
        ContentBlock::Unknown => BlockVm::Empty,
    }
}

#[must_use]
pub fn section_vm(section: &Section) -> Vec<BlockVm> {
    section
        .content
        .iter()
        .enumerate()
        .map(|(index, block)| block_vm(block, index))
        .collect()
}

fn widget_vm(component: &ComponentBlock, index: usize) -> BlockVm {
    match component.kind() {
        Some(kind) => BlockVm::Widget(WidgetVm {
            kind,
            props: component.props.clone(),
            id: component.id.clone(),
            is_exercise: component.is_exercise,
        }),
        None => {
            warn!(name = %component.name, index, "unknown component");
            BlockVm::Missing {
                name: component.name.clone(),
            }
        }
    }
}
