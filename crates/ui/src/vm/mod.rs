mod content_vm;
mod inline_vm;
mod lesson_vm;
mod markdown_vm;
mod venn_vm;

pub use content_vm::{AsideVm, BlockVm, WidgetVm, block_vm, section_vm};
pub use inline_vm::{InlineToken, plain_text, tokenize};
pub use lesson_vm::{
    FeedbackAction, FeedbackVm, FooterAction, FooterVm, LessonVm, start_lesson,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use venn_vm::{
    CardinalityTotals, RegionInfo, cardinality_totals, combine_regions, label_anchor,
    placement_bins, region_info, toggle_region,
};
