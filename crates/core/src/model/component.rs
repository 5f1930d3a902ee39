use std::fmt;

use crate::model::ResponseFamily;

/// Closed set of interactive components a lesson document may reference by name.
///
/// Lookup is by the exact name used in lesson JSON. There is no runtime
/// registration: a name that is not listed here is a recoverable miss and the
/// renderer shows a placeholder instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    BasicTable,
    VennDiagramDragNDrop,
    VennDiagramInfo,
    SetClassifier,
    CoinSampleSpace,
    DiceSampleSpace,
    CoinFlipSimulator,
    VennCardinality,
    MultipleChoice,
    DemoMultiSelectQ,
    DemoMultiSelectR,
    MultiSelect,
    VennDiagram,
    Definition,
    NarrativeQuestion,
    FreeResponse,
    VennDiagramStatic,
    VennDiagramMutuallyExclusive,
    DiceThrowAnimation,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 19] = [
        ComponentKind::BasicTable,
        ComponentKind::VennDiagramDragNDrop,
        ComponentKind::VennDiagramInfo,
        ComponentKind::SetClassifier,
        ComponentKind::CoinSampleSpace,
        ComponentKind::DiceSampleSpace,
        ComponentKind::CoinFlipSimulator,
        ComponentKind::VennCardinality,
        ComponentKind::MultipleChoice,
        ComponentKind::DemoMultiSelectQ,
        ComponentKind::DemoMultiSelectR,
        ComponentKind::MultiSelect,
        ComponentKind::VennDiagram,
        ComponentKind::Definition,
        ComponentKind::NarrativeQuestion,
        ComponentKind::FreeResponse,
        ComponentKind::VennDiagramStatic,
        ComponentKind::VennDiagramMutuallyExclusive,
        ComponentKind::DiceThrowAnimation,
    ];

    /// Registered name as it appears in lesson documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::BasicTable => "BasicTable",
            ComponentKind::VennDiagramDragNDrop => "VennDiagramDragNDrop",
            ComponentKind::VennDiagramInfo => "VennDiagramInfo",
            ComponentKind::SetClassifier => "SetClassifierDndKit",
            ComponentKind::CoinSampleSpace => "CoinSampleSpaceDnD",
            ComponentKind::DiceSampleSpace => "DiceSampleSpaceSelector",
            ComponentKind::CoinFlipSimulator => "CoinFlipSimulator",
            ComponentKind::VennCardinality => "VennCardinality",
            ComponentKind::MultipleChoice => "MultipleChoiceExercise",
            ComponentKind::DemoMultiSelectQ => "DemoMultiSelectTextQ",
            ComponentKind::DemoMultiSelectR => "DemoMultiSelectTextR",
            ComponentKind::MultiSelect => "MultiSelectExercise",
            ComponentKind::VennDiagram => "VennDiagram",
            ComponentKind::Definition => "Definition",
            ComponentKind::NarrativeQuestion => "NarrativeQuestion",
            ComponentKind::FreeResponse => "FreeResponse",
            ComponentKind::VennDiagramStatic => "VennDiagramStatic",
            ComponentKind::VennDiagramMutuallyExclusive => "VennDiagramMutuallyExclusive",
            ComponentKind::DiceThrowAnimation => "DiceThrowAnimation",
        }
    }

    /// Resolve a registered name. Returns `None` on a registry miss.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The response family this component writes into the response store, if any.
    #[must_use]
    pub const fn response_family(self) -> Option<ResponseFamily> {
        match self {
            ComponentKind::VennDiagramDragNDrop => Some(ResponseFamily::VennDiagramDnd),
            ComponentKind::SetClassifier => Some(ResponseFamily::SetClassifier),
            ComponentKind::CoinSampleSpace => Some(ResponseFamily::CoinSampleSpace),
            ComponentKind::DiceSampleSpace => Some(ResponseFamily::DiceSampleSpace),
            ComponentKind::VennCardinality => Some(ResponseFamily::VennCardinality),
            ComponentKind::MultipleChoice
            | ComponentKind::DemoMultiSelectQ
            | ComponentKind::DemoMultiSelectR
            | ComponentKind::MultiSelect => Some(ResponseFamily::MultiSelect),
            ComponentKind::VennDiagram => Some(ResponseFamily::VennDiagramSelect),
            ComponentKind::FreeResponse => Some(ResponseFamily::FreeResponse),
            ComponentKind::BasicTable
            | ComponentKind::VennDiagramInfo
            | ComponentKind::CoinFlipSimulator
            | ComponentKind::Definition
            | ComponentKind::NarrativeQuestion
            | ComponentKind::VennDiagramStatic
            | ComponentKind::VennDiagramMutuallyExclusive
            | ComponentKind::DiceThrowAnimation => None,
        }
    }

    #[must_use]
    pub const fn produces_response(self) -> bool {
        self.response_family().is_some()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = ComponentKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), ComponentKind::ALL.len());
    }

    #[test]
    fn unknown_name_is_a_miss() {
        assert_eq!(ComponentKind::from_name("PieChart"), None);
        assert_eq!(ComponentKind::from_name("basictable"), None);
    }

    #[test]
    fn multi_select_variants_share_a_family() {
        for kind in [
            ComponentKind::MultipleChoice,
            ComponentKind::DemoMultiSelectQ,
            ComponentKind::DemoMultiSelectR,
            ComponentKind::MultiSelect,
        ] {
            assert_eq!(kind.response_family(), Some(ResponseFamily::MultiSelect));
        }
        assert!(!ComponentKind::BasicTable.produces_response());
    }
}
