//! Draggable field tokens rendered by the field-list endpoint.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::render::html::{text_content, unescape_html};

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<li\b[^>]*\bclass="[^"]*\bdraggable\b[^"]*"[^>]*>(.*?)</li>"#).unwrap()
});
static OPEN_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[a-zA-Z][a-zA-Z0-9]*\b([^>]*)>").unwrap());
static DATA_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdata-([a-zA-Z0-9_-]+)\s*=\s*"([^"]*)""#).unwrap());

/// One model-reachable field the user can drag into the report.
///
/// `field` is the token's visible text, which carries the bracketed field kind
/// the server appends (e.g. `"Amount [DecimalField]"`, `"Age [property]"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldToken {
    pub field: String,
    pub name: String,
    pub label: String,
    pub path: String,
    pub path_verbose: String,
    /// `<option>` markup for fields with a fixed choice list.
    pub choices: Option<String>,
    pub pk: Option<String>,
    pub app_label: Option<String>,
    pub root_model: Option<String>,
    /// Whether the choice list has to be fetched before a filter drop.
    pub has_choices: bool,
}

impl FieldToken {
    /// Build a token from its visible text and `data-*` attributes.
    /// Every value is trimmed, blank optional values become `None`.
    pub fn from_data_attributes(text: &str, data: &HashMap<String, String>) -> Self {
        let get = |key: &str| data.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
        let optional = |key: &str| Some(get(key)).filter(|v| !v.is_empty());

        Self {
            field: text.trim().to_string(),
            name: get("name"),
            label: get("label"),
            path: get("path"),
            path_verbose: get("path_verbose"),
            choices: optional("choices"),
            pk: optional("pk"),
            app_label: optional("app_label"),
            root_model: optional("root_model"),
            has_choices: get("choices") == "true",
        }
    }

    /// Computed `[custom ...]` field, never backed by a column.
    pub fn is_custom(&self) -> bool {
        self.field.contains("[custom")
    }

    /// Python `@property` on the model.
    pub fn is_property(&self) -> bool {
        self.field.contains("[property")
    }

    /// Whether dropping this into the filters should show the slow-filter tip.
    pub fn needs_property_tip(&self) -> bool {
        self.field.contains("[property]")
    }

    /// Aggregates only apply to database columns.
    pub fn supports_aggregate(&self) -> bool {
        !self.is_custom() && !self.is_property()
    }

    /// Date fields get a pair of date pickers as their filter inputs.
    /// The kind marker always follows the field name, so a match at 0 is not a kind.
    pub fn is_date(&self) -> bool {
        self.field.find("DateField").is_some_and(|pos| pos > 0)
    }

    /// Choice options, ignoring the `"true"` marker left before they are loaded.
    pub fn choice_options(&self) -> Option<&str> {
        self.choices.as_deref().filter(|c| *c != "true" && !c.trim().is_empty())
    }

    /// Empty-name tokens are decorative list items and never produce rows.
    pub fn is_droppable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Parse every `li.draggable` token out of a field-list fragment.
///
/// The first element inside the item carrying a `data-name` attribute supplies
/// the token metadata; the item's text content supplies `field`.
pub fn parse_field_tokens(fragment: &str) -> Vec<FieldToken> {
    TOKEN_REGEX
        .captures_iter(fragment)
        .filter_map(|item| {
            let inner = item.get(1)?.as_str();
            let data = OPEN_TAG_REGEX
                .captures_iter(inner)
                .map(|tag| parse_data_attributes(tag.get(1).map_or("", |m| m.as_str())))
                .find(|attrs| attrs.contains_key("name"))
                .unwrap_or_default();
            Some(FieldToken::from_data_attributes(&text_content(inner), &data))
        })
        .collect()
}

fn parse_data_attributes(attrs: &str) -> HashMap<String, String> {
    DATA_ATTR_REGEX
        .captures_iter(attrs)
        .map(|cap| (cap[1].to_string(), unescape_html(&cap[2])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(field: &str) -> FieldToken {
        FieldToken { field: field.into(), name: "x".into(), ..Default::default() }
    }

    #[test]
    fn classifies_field_kinds() {
        assert!(token("Total [custom field]").is_custom());
        assert!(!token("Total [custom field]").supports_aggregate());
        assert!(token("Age [property]").is_property());
        assert!(token("Age [property]").needs_property_tip());
        assert!(token("Amount [DecimalField]").supports_aggregate());
        assert!(token("Created [DateField]").is_date());
        assert!(!token("DateField").is_date());
        assert!(!token("Created [DateTimeField]").is_date());
    }

    #[test]
    fn trims_attribute_values() {
        let data = HashMap::from([
            ("name".to_string(), "  amount ".to_string()),
            ("label".to_string(), "amount".to_string()),
            ("choices".to_string(), "   ".to_string()),
        ]);
        let token = FieldToken::from_data_attributes("  Amount [DecimalField]\n", &data);
        assert_eq!(token.name, "amount");
        assert_eq!(token.field, "Amount [DecimalField]");
        assert_eq!(token.choices, None);
        assert!(!token.has_choices);
        assert!(token.is_droppable());
    }

    #[test]
    fn parses_tokens_from_fragment() {
        let fragment = r#"
            <ul id="field_list">
              <li class="draggable ui-widget"><span class="button" data-name="amount"
                  data-label="amount" data-path="" data-path_verbose="">Amount [DecimalField]</span></li>
              <li class="draggable"><span class="button" data-choices="true" data-name="status"
                  data-label="status" data-path="order__" data-path_verbose="Order"
                  data-app_label="shop" data-root_model="sale">Status [CharField]</span></li>
              <li class="heading">Not a token</li>
            </ul>"#;
        let tokens = parse_field_tokens(fragment);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].name, "amount");
        assert_eq!(tokens[0].field, "Amount [DecimalField]");
        assert_eq!(tokens[1].path, "order__");
        assert_eq!(tokens[1].app_label.as_deref(), Some("shop"));
        assert!(tokens[1].has_choices);
        assert_eq!(tokens[1].choice_options(), None);
    }

    #[test]
    fn token_without_metadata_is_not_droppable() {
        let tokens = parse_field_tokens(r#"<li class="draggable"><b>Decoration</b></li>"#);
        assert_eq!(tokens.len(), 1);
        assert!(!tokens[0].is_droppable());
    }
}
