//! Filter-type dependent value widgets.
//!
//! Each filter row carries a [`FilterWidget`] derived from its operator. The
//! widget decides which value inputs are shown and, for `isnull`, owns the
//! boolean that is written back into the (hidden) first value input.

use crate::models::{FilterRow, FilterType};

/// Value written for a checked `isnull` box.
pub const NULL_CHECKED: &str = "1";
/// Value written for an unchecked `isnull` box.
pub const NULL_UNCHECKED: &str = "0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterWidget {
    /// First value input only.
    #[default]
    Single,
    /// Both value inputs.
    Range,
    /// Value inputs hidden, auxiliary checkbox shown in their place.
    NullCheck { checked: bool },
}

/// Which parts of a filter row's value cell are rendered visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetVisibility {
    pub value: bool,
    pub value2: bool,
    /// `Some(checked)` when the auxiliary checkbox is present.
    pub null_check: Option<bool>,
}

impl FilterWidget {
    /// Widget for `filter_type`, reading the null-check state from `value`.
    pub fn for_type(filter_type: FilterType, value: &str) -> Self {
        match filter_type {
            FilterType::Isnull => {
                FilterWidget::NullCheck { checked: !value.is_empty() && value != NULL_UNCHECKED }
            }
            FilterType::Range => FilterWidget::Range,
            _ => FilterWidget::Single,
        }
    }

    pub fn visibility(self) -> WidgetVisibility {
        match self {
            FilterWidget::Single => {
                WidgetVisibility { value: true, value2: false, null_check: None }
            }
            FilterWidget::Range => WidgetVisibility { value: true, value2: true, null_check: None },
            FilterWidget::NullCheck { checked } => {
                WidgetVisibility { value: false, value2: false, null_check: Some(checked) }
            }
        }
    }
}

impl FilterRow {
    /// Switch the row's operator and re-derive its widget.
    ///
    /// Re-applying the current operator yields the same state. An empty value
    /// under `isnull` is coerced to `"0"` so the server still gets a boolean.
    pub fn apply_filter_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
        self.widget = FilterWidget::for_type(filter_type, &self.filter_value);
        if filter_type == FilterType::Isnull && self.filter_value.is_empty() {
            self.filter_value = NULL_UNCHECKED.to_string();
        }
    }

    /// Toggle the auxiliary `isnull` checkbox. Returns false when the row has none.
    pub fn set_null_checked(&mut self, checked: bool) -> bool {
        let FilterWidget::NullCheck { .. } = self.widget else {
            return false;
        };
        self.widget = FilterWidget::NullCheck { checked };
        let value = if checked { NULL_CHECKED } else { NULL_UNCHECKED };
        self.filter_value = value.to_string();
        true
    }

    /// Typed edit of the value inputs. The widget is re-derived, so an `isnull`
    /// checkbox always matches the submitted value.
    pub fn set_values(&mut self, value: &str, value2: &str) {
        self.filter_value = value.to_string();
        self.filter_value2 = value2.to_string();
        self.apply_filter_type(self.filter_type);
    }

    pub fn visibility(&self) -> WidgetVisibility {
        self.widget.visibility()
    }
}
