//! `<option>` lists returned by the formats and choices endpoints.

use std::sync::LazyLock;

use regex::Regex;

use crate::render::html::{escape_html, text_content, unescape_html};

static OPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<option\b([^>]*)>(.*?)</option>").unwrap());
static VALUE_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bvalue\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
static SELECTED_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bselected\b").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into(), selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn to_html(&self) -> String {
        let selected = if self.selected { r#" selected="selected""# } else { "" };
        format!(
            r#"<option value="{}"{selected}>{}</option>"#,
            escape_html(&self.value),
            escape_html(&self.label)
        )
    }
}

/// Parse an `<option>` fragment. An option without a `value` attribute takes its
/// label as value, as browsers do.
pub fn parse_options(fragment: &str) -> Vec<SelectOption> {
    OPTION_REGEX
        .captures_iter(fragment)
        .map(|cap| {
            let attrs = cap.get(1).map_or("", |m| m.as_str());
            let label = text_content(cap.get(2).map_or("", |m| m.as_str()));
            let value = VALUE_ATTR_REGEX
                .captures(attrs)
                .and_then(|v| v.get(1).or_else(|| v.get(2)))
                .map(|m| unescape_html(m.as_str()))
                .unwrap_or_else(|| label.clone());
            let selected = SELECTED_ATTR_REGEX.is_match(attrs);
            SelectOption { value, label, selected }
        })
        .collect()
}

pub fn options_to_html(options: &[SelectOption]) -> String {
    options.iter().map(SelectOption::to_html).collect()
}
