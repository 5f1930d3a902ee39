use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{ComponentKind, ExerciseId};

//
// ─── CONTENT BLOCKS ────────────────────────────────────────────────────────────
//

/// One renderable unit of lesson content, tagged by `"type"` in lesson JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBlock {
    /// Prose with inline `$..$` math and `**bold**` runs.
    Text { value: String },

    Component(ComponentBlock),

    Image { src: String },

    /// A button that opens the side panel with `title` and `info`.
    #[serde(rename_all = "camelCase")]
    Aside {
        title: String,
        info: String,
        button_text: String,
    },

    /// Display math, kept as raw TeX.
    Formula { value: String },

    Definition { value: String },

    /// Collapsible explanation tied to an exercise id.
    Explanation {
        explanation: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<ExerciseId>,
    },

    #[serde(rename = "ul", alias = "list", rename_all = "camelCase")]
    List { list_items: Vec<String> },

    /// Any block type this build does not know about. Renders nothing.
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    #[must_use]
    pub fn as_component(&self) -> Option<&ComponentBlock> {
        match self {
            ContentBlock::Component(component) => Some(component),
            _ => None,
        }
    }
}

/// A reference to a registered interactive component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentBlock {
    pub name: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub props: Value,

    /// Marks the component as the graded exercise of its page.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_exercise: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExerciseId>,
}

impl ComponentBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: Value::Null,
            is_exercise: false,
            id: None,
        }
    }

    #[must_use]
    pub fn exercise(mut self, id: ExerciseId) -> Self {
        self.is_exercise = true;
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    /// Registry lookup for this block's name.
    #[must_use]
    pub fn kind(&self) -> Option<ComponentKind> {
        ComponentKind::from_name(&self.name)
    }

    /// String prop lookup, `None` when missing or not a string.
    #[must_use]
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
