//! Expandable model-field tree.
//!
//! Expanding a node fetches the related-model fragment once and splices it
//! below the node; collapsing drops that fragment together with every node that
//! was expanded inside it.

use std::collections::{BTreeSet, HashMap};

use crate::models::TreeNodeId;

/// A clicked tree node and the relation trail leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: TreeNodeId,
    /// Identifier of the related model, reported in the expansion set.
    pub model_id: String,
    pub path_verbose: String,
    /// Node whose fragment contains this node; `None` for top-level nodes.
    pub parent: Option<TreeNodeId>,
}

impl TreeNode {
    pub fn new(
        id: TreeNodeId,
        model_id: impl Into<String>,
        path_verbose: impl Into<String>,
    ) -> Self {
        Self { id, model_id: model_id.into(), path_verbose: path_verbose.into(), parent: None }
    }

    pub fn with_parent(mut self, parent: TreeNodeId) -> Self {
        self.parent = Some(parent);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeState {
    #[default]
    Closed,
    /// Related fields requested, response not yet delivered.
    Loading,
    /// Fragment spliced in right after the node.
    Expanded { fragment: String },
}

/// Parameters of the related-fields request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedQuery {
    pub model: String,
    pub field: String,
    pub path: String,
    pub path_verbose: String,
    /// Model ids already expanded elsewhere in the tree.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Node was closed; fetch the related fields.
    Fetch(RelatedQuery),
    /// Node was expanded and is now closed.
    Collapsed,
    /// A fetch for this node is already in flight.
    Ignored,
}

#[derive(Debug, Clone)]
struct NodeEntry {
    model_id: String,
    parent: Option<TreeNodeId>,
    state: NodeState,
}

#[derive(Debug, Default)]
pub struct TreeNavigator {
    nodes: HashMap<TreeNodeId, NodeEntry>,
}

impl TreeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: &TreeNodeId) -> NodeState {
        self.nodes.get(id).map(|entry| entry.state.clone()).unwrap_or_default()
    }

    pub fn is_expanded(&self, id: &TreeNodeId) -> bool {
        matches!(self.nodes.get(id).map(|e| &e.state), Some(NodeState::Expanded { .. }))
    }

    /// Fragment inserted after `id`, if expanded.
    pub fn fragment(&self, id: &TreeNodeId) -> Option<&str> {
        match self.nodes.get(id).map(|e| &e.state) {
            Some(NodeState::Expanded { fragment }) => Some(fragment),
            _ => None,
        }
    }

    /// Model ids of every expanded node.
    pub fn expansion_set(&self) -> BTreeSet<String> {
        self.nodes
            .values()
            .filter(|entry| matches!(entry.state, NodeState::Expanded { .. }))
            .map(|entry| entry.model_id.clone())
            .collect()
    }

    /// React to a click on `node`.
    pub fn toggle(&mut self, node: &TreeNode) -> ToggleAction {
        match self.state(&node.id) {
            NodeState::Closed => {
                let exclude = self.expansion_set().into_iter().collect();
                self.nodes.insert(
                    node.id.clone(),
                    NodeEntry {
                        model_id: node.model_id.clone(),
                        parent: node.parent.clone(),
                        state: NodeState::Loading,
                    },
                );
                ToggleAction::Fetch(RelatedQuery {
                    model: node.id.model.clone(),
                    field: node.id.field.clone(),
                    path: node.id.path.clone(),
                    path_verbose: node.path_verbose.clone(),
                    exclude,
                })
            }
            NodeState::Loading => ToggleAction::Ignored,
            NodeState::Expanded { .. } => {
                self.remove_descendants(&node.id);
                if let Some(entry) = self.nodes.get_mut(&node.id) {
                    entry.state = NodeState::Closed;
                }
                ToggleAction::Collapsed
            }
        }
    }

    /// Deliver the related-fields response for `id`.
    ///
    /// A failure puts the node back to `Closed` so a later click retries.
    /// Returns false when the node is no longer waiting for a response.
    pub fn finish_expand<E>(&mut self, id: &TreeNodeId, result: Result<String, E>) -> bool {
        let Some(entry) = self.nodes.get_mut(id) else {
            return false;
        };
        if entry.state != NodeState::Loading {
            return false;
        }
        entry.state = match result {
            Ok(fragment) => NodeState::Expanded { fragment },
            Err(_) => NodeState::Closed,
        };
        true
    }

    fn remove_descendants(&mut self, id: &TreeNodeId) {
        let children: Vec<TreeNodeId> = self
            .nodes
            .iter()
            .filter(|(_, entry)| entry.parent.as_ref() == Some(id))
            .map(|(child, _)| child.clone())
            .collect();
        for child in children {
            self.remove_descendants(&child);
            self.nodes.remove(&child);
        }
    }
}
