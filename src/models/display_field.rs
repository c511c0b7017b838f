//! Rows of the "selected fields" formset.

use crate::models::{FieldToken, SelectOption};

/// Default column width, in spreadsheet character units.
pub const DEFAULT_WIDTH: u32 = 15;

/// Aggregate function applied to a display column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Aggregate {
    #[default]
    None,
    Sum,
    Count,
    Avg,
    Max,
    Min,
}

impl Aggregate {
    pub fn all() -> &'static [Aggregate] {
        &[
            Aggregate::None,
            Aggregate::Sum,
            Aggregate::Count,
            Aggregate::Avg,
            Aggregate::Max,
            Aggregate::Min,
        ]
    }

    /// Value submitted to the formset.
    pub fn value(self) -> &'static str {
        match self {
            Aggregate::None => "",
            Aggregate::Sum => "Sum",
            Aggregate::Count => "Count",
            Aggregate::Avg => "Avg",
            Aggregate::Max => "Max",
            Aggregate::Min => "Min",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Aggregate::None => "---------",
            other => other.value(),
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|a| a.value() == value)
    }
}

/// One configured output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFieldRow {
    /// Formset index; fixed for the lifetime of the row.
    pub index: usize,
    pub field_verbose: String,
    /// Model attribute name (the token's `label`).
    pub field: String,
    pub path: String,
    pub path_verbose: String,
    /// Column heading, editable by the user.
    pub name: String,
    pub sort: Option<u32>,
    pub sort_reverse: bool,
    pub width: u32,
    pub aggregate: Aggregate,
    /// False for computed fields, which render an empty aggregate cell.
    pub aggregate_enabled: bool,
    pub display_format: Option<String>,
    pub format_options: Vec<SelectOption>,
    pub total: bool,
    pub group: bool,
    pub position: Option<u32>,
    pub deleted: bool,
}

impl DisplayFieldRow {
    /// Row created by dropping `token`, before format options arrive.
    pub fn from_token(index: usize, token: &FieldToken, position: u32) -> Self {
        Self {
            index,
            field_verbose: token.field.clone(),
            field: token.label.clone(),
            path: token.path.clone(),
            path_verbose: token.path_verbose.clone(),
            name: token.name.clone(),
            sort: None,
            sort_reverse: false,
            width: DEFAULT_WIDTH,
            aggregate: Aggregate::None,
            aggregate_enabled: token.supports_aggregate(),
            display_format: None,
            format_options: Vec::new(),
            total: false,
            group: false,
            position: Some(position),
            deleted: false,
        }
    }

    /// Attach the display-format options, keeping the current selection when
    /// it is still offered and otherwise taking the server's `selected` option.
    pub fn set_format_options(&mut self, options: Vec<SelectOption>) {
        let keep = self
            .display_format
            .as_ref()
            .is_some_and(|current| options.iter().any(|o| &o.value == current));
        if !keep {
            self.display_format = options
                .iter()
                .find(|o| o.selected)
                .map(|o| o.value.clone())
                .filter(|v| !v.is_empty());
        }
        self.format_options = options;
    }

    pub fn set_aggregate(&mut self, aggregate: Aggregate) {
        if self.aggregate_enabled {
            self.aggregate = aggregate;
        }
    }
}
