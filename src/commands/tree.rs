use crate::api::ReportBackend;
use crate::state::{FormEvent, SharedForm, ToggleAction, TreeNode};

use super::ReportCommands;

impl ReportCommands {
    /// Expand or collapse a relation node of the field tree.
    pub async fn expand_or_collapse<B: ReportBackend>(
        form: &SharedForm,
        backend: &B,
        node: &TreeNode,
    ) -> ToggleAction {
        let action = form.lock().tree.toggle(node);
        let query = match &action {
            ToggleAction::Fetch(query) => query.clone(),
            ToggleAction::Collapsed => {
                form.lock().emit(FormEvent::TreeCollapsed(node.id.clone()));
                return ToggleAction::Collapsed;
            }
            ToggleAction::Ignored => return ToggleAction::Ignored,
        };

        let result = backend.related_fields(&query).await;

        let mut form = form.lock();
        match result {
            Ok(fragment) => {
                if form.tree.finish_expand::<()>(&node.id, Ok(fragment)) {
                    form.emit(FormEvent::TreeExpanded(node.id.clone()));
                }
            }
            Err(e) => {
                log::warn!("Failed to load related fields for {}: {}", node.id, e);
                if form.tree.finish_expand(&node.id, Err(())) {
                    form.emit(FormEvent::TreeExpandFailed {
                        node: node.id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        action
    }
}
