//! Form events for reactive UI updates

use crate::models::{FilterType, TreeNodeId};
use crate::state::status::Tip;

/// Events emitted by `ReportForm` for the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    // Field tree
    TreeExpanded(TreeNodeId),
    TreeCollapsed(TreeNodeId),
    TreeExpandFailed {
        node: TreeNodeId,
        error: String,
    },
    FieldsLoaded {
        node: TreeNodeId,
        count: usize,
    },
    ChoicesLoaded {
        name: String,
    },

    // Formset rows
    DisplayRowAdded {
        index: usize,
    },
    FormatsLoaded {
        index: usize,
    },
    FilterRowAdded {
        index: usize,
    },
    FilterTypeChanged {
        index: usize,
        filter_type: FilterType,
    },
    DisplayRowsReordered,
    FilterRowsReordered,
    TipShown(Tip),

    // Preview
    PreviewLoaded,
    PreviewFailed {
        error: String,
    },

    // Async report job
    ReportJobStarted {
        task_id: String,
    },
    ReportReady {
        link: String,
    },
}
