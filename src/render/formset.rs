//! Formset naming: `{prefix}-{index}-{attribute}` input names.
//!
//! The server-side formset processor binds submitted inputs by these names, and
//! reads the row count from `{prefix}-TOTAL_FORMS`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formset {
    prefix: &'static str,
}

/// Display fields formset.
pub const DISPLAY_FIELDS: Formset = Formset { prefix: "displayfield_set" };
/// Filters formset.
pub const FILTERS: Formset = Formset { prefix: "fil" };

impl Formset {
    pub const fn prefix(self) -> &'static str {
        self.prefix
    }

    /// `name` attribute of an input in row `index`.
    pub fn name(self, index: usize, attribute: &str) -> String {
        format!("{}-{index}-{attribute}", self.prefix)
    }

    /// `id` attribute of an input in row `index`.
    pub fn id(self, index: usize, attribute: &str) -> String {
        format!("id_{}", self.name(index, attribute))
    }

    pub fn total_forms_name(self) -> String {
        format!("{}-TOTAL_FORMS", self.prefix)
    }

    pub fn total_forms_id(self) -> String {
        format!("id_{}", self.total_forms_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_prefix_index_suffix() {
        assert_eq!(DISPLAY_FIELDS.name(3, "aggregate"), "displayfield_set-3-aggregate");
        assert_eq!(DISPLAY_FIELDS.id(3, "aggregate"), "id_displayfield_set-3-aggregate");
        assert_eq!(FILTERS.name(0, "filter_value2"), "fil-0-filter_value2");
        assert_eq!(FILTERS.total_forms_id(), "id_fil-TOTAL_FORMS");
        assert_eq!(DISPLAY_FIELDS.total_forms_name(), "displayfield_set-TOTAL_FORMS");
    }
}
