//! Type-safe identifiers for nodes in the model-field tree.

/// Identifies one relation node in the field tree.
///
/// A node is reached from the report's root model by following `path`, and
/// expands the relation `field` declared on `model`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeNodeId {
    pub model: String,
    pub field: String,
    pub path: String,
}

impl TreeNodeId {
    pub fn new(
        model: impl Into<String>,
        field: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self { model: model.into(), field: field.into(), path: path.into() }
    }

    /// Root node of a report: the root model itself, no relation field.
    pub fn root(model: impl Into<String>) -> Self {
        Self::new(model, "", "")
    }

    pub fn is_root(&self) -> bool {
        self.field.is_empty() && self.path.is_empty()
    }

    /// Convert to a string representation for use as an element id.
    /// Format: "node:{model}:{field}:{path}"
    pub fn to_tree_id(&self) -> String {
        format!("node:{}:{}:{}", self.model, self.field, self.path)
    }

    /// Parse from a tree id string.
    /// Returns None if the format is invalid.
    pub fn from_tree_id(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.splitn(4, ':').collect();

        match parts.as_slice() {
            ["node", model, field, path] if !model.is_empty() => {
                Some(Self::new(*model, *field, *path))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for TreeNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_tree_id())
    }
}
