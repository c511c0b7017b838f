//! Field list of the currently selected tree node.

use crate::models::{FieldToken, TreeNodeId, parse_field_tokens};

/// Parameters of the field-list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsQuery {
    pub model: String,
    pub field: String,
    pub path: String,
    pub path_verbose: String,
}

/// Parameters of the choices request for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicesQuery {
    pub path_verbose: String,
    pub path: String,
    pub app_label: String,
    pub label: String,
    pub root_model: String,
}

impl ChoicesQuery {
    pub fn for_token(token: &FieldToken) -> Self {
        Self {
            path_verbose: token.path_verbose.clone(),
            path: token.path.clone(),
            app_label: token.app_label.clone().unwrap_or_default(),
            label: token.label.clone(),
            root_model: token.root_model.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FieldPanel {
    highlighted: Option<TreeNodeId>,
    html: String,
    tokens: Vec<FieldToken>,
    search: String,
}

impl FieldPanel {
    /// Highlight `node` and build the request for its field list.
    pub fn select(&mut self, node: &TreeNodeId, path_verbose: &str) -> FieldsQuery {
        self.highlighted = Some(node.clone());
        FieldsQuery {
            model: node.model.clone(),
            field: node.field.clone(),
            path: node.path.clone(),
            path_verbose: path_verbose.to_string(),
        }
    }

    /// Replace the panel with a freshly fetched fragment. Earlier tokens go away.
    pub fn load(&mut self, html: String) -> usize {
        self.tokens = parse_field_tokens(&html);
        self.html = html;
        self.tokens.len()
    }

    pub fn highlighted(&self) -> Option<&TreeNodeId> {
        self.highlighted.as_ref()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn tokens(&self) -> &[FieldToken] {
        &self.tokens
    }

    pub fn token(&self, name: &str) -> Option<&FieldToken> {
        self.tokens.iter().find(|t| t.name == name)
    }

    /// Store loaded choice markup on the tokens that requested it.
    pub fn set_choices(&mut self, query: &ChoicesQuery, choices: String) -> bool {
        let mut updated = false;
        for token in self.tokens.iter_mut().filter(|t| t.has_choices) {
            if ChoicesQuery::for_token(token) == *query {
                token.choices = Some(choices.clone());
                updated = true;
            }
        }
        updated
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Tokens whose text contains the search string, ignoring case.
    pub fn visible_tokens(&self) -> impl Iterator<Item = &FieldToken> {
        let needle = self.search.to_uppercase();
        self.tokens.iter().filter(move |t| t.field.to_uppercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
        <li class="draggable"><span data-name="amount" data-label="amount">Amount [DecimalField]</span></li>
        <li class="draggable"><span data-name="status" data-label="status" data-choices="true"
            data-app_label="shop" data-root_model="sale">Status [CharField]</span></li>
        <li class="draggable"><span data-name="created" data-label="created">Created [DateField]</span></li>"#;

    #[test]
    fn select_builds_fields_query() {
        let mut panel = FieldPanel::default();
        let node = TreeNodeId::new("sale", "customer", "customer__");
        let query = panel.select(&node, "Customer");
        assert_eq!(panel.highlighted(), Some(&node));
        assert_eq!(query.path, "customer__");
        assert_eq!(query.path_verbose, "Customer");
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut panel = FieldPanel::default();
        assert_eq!(panel.load(FRAGMENT.to_string()), 3);
        panel.set_search("decimal");
        let names: Vec<_> = panel.visible_tokens().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["amount"]);
        panel.set_search("");
        assert_eq!(panel.visible_tokens().count(), 3);
    }

    #[test]
    fn choices_attach_to_matching_token() {
        let mut panel = FieldPanel::default();
        panel.load(FRAGMENT.to_string());
        let query = ChoicesQuery::for_token(panel.token("status").unwrap());
        assert_eq!(query.app_label, "shop");
        assert!(panel.set_choices(&query, "<option>open</option>".into()));
        assert_eq!(
            panel.token("status").unwrap().choice_options(),
            Some("<option>open</option>")
        );
        assert_eq!(panel.token("amount").unwrap().choices, None);
    }
}
