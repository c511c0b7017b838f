//! Rows of the "filters" formset.

use chrono::NaiveDate;

use crate::models::FieldToken;
use crate::state::filter_widget::FilterWidget;

/// Comparison operator of a filter row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Blank choice ("---------").
    Unset,
    Exact,
    Iexact,
    Contains,
    #[default]
    Icontains,
    In,
    Gt,
    Gte,
    Lt,
    Lte,
    Startswith,
    Istartswith,
    Endswith,
    Iendswith,
    Range,
    WeekDay,
    Isnull,
    Regex,
    Iregex,
}

impl FilterType {
    /// All operators in the order the select lists them.
    pub fn all() -> &'static [FilterType] {
        use FilterType::*;
        &[
            Unset,
            Exact,
            Iexact,
            Contains,
            Icontains,
            In,
            Gt,
            Gte,
            Lt,
            Lte,
            Startswith,
            Istartswith,
            Endswith,
            Iendswith,
            Range,
            WeekDay,
            Isnull,
            Regex,
            Iregex,
        ]
    }

    /// Lookup suffix submitted to the formset.
    pub fn value(self) -> &'static str {
        match self {
            FilterType::Unset => "",
            FilterType::Exact => "exact",
            FilterType::Iexact => "iexact",
            FilterType::Contains => "contains",
            FilterType::Icontains => "icontains",
            FilterType::In => "in",
            FilterType::Gt => "gt",
            FilterType::Gte => "gte",
            FilterType::Lt => "lt",
            FilterType::Lte => "lte",
            FilterType::Startswith => "startswith",
            FilterType::Istartswith => "istartswith",
            FilterType::Endswith => "endswith",
            FilterType::Iendswith => "iendswith",
            FilterType::Range => "range",
            FilterType::WeekDay => "week_day",
            FilterType::Isnull => "isnull",
            FilterType::Regex => "regex",
            FilterType::Iregex => "iregex",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterType::Unset => "---------",
            FilterType::Exact => "Equals",
            FilterType::Iexact => "Equals (case-insensitive)",
            FilterType::Contains => "Contains",
            FilterType::Icontains => "Contains (case-insensitive)",
            FilterType::In => "in (comma seperated 1,2,3)",
            FilterType::Gt => "Greater than",
            FilterType::Gte => "Greater than equals",
            FilterType::Lt => "Less than",
            FilterType::Lte => "Less than equals",
            FilterType::Startswith => "Starts with",
            FilterType::Istartswith => "Starts with (case-insensitive)",
            FilterType::Endswith => "Ends with",
            FilterType::Iendswith => "Ends with  (case-insensitive)",
            FilterType::Range => "range",
            FilterType::WeekDay => "Week day",
            FilterType::Isnull => "Is null",
            FilterType::Regex => "Regular Expression",
            FilterType::Iregex => "Reg. Exp. (case-insensitive)",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.value() == value)
    }
}

/// Shape of the value input(s), fixed when the row is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueInput {
    /// Two free-text inputs, the second one used by `range`.
    Text,
    /// Two date pickers.
    DateRange,
    /// A single select over the field's choices (`<option>` markup).
    Choices(String),
}

impl ValueInput {
    pub fn for_token(token: &FieldToken) -> Self {
        if token.is_date() {
            ValueInput::DateRange
        } else if let Some(choices) = token.choice_options() {
            ValueInput::Choices(choices.to_string())
        } else {
            ValueInput::Text
        }
    }

    /// Choice selects have no second value input.
    pub fn has_second_value(&self) -> bool {
        !matches!(self, ValueInput::Choices(_))
    }
}

/// Client-side validation failures of a filter row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRowError {
    /// `range` without a second value.
    MissingRangeEnd,
    /// A date picker value that does not parse with the configured format.
    InvalidDate(String),
}

impl std::fmt::Display for FilterRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterRowError::MissingRangeEnd => write!(f, "Range filters must have two values"),
            FilterRowError::InvalidDate(value) => write!(f, "Invalid date: {value}"),
        }
    }
}

/// One configured filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    /// Formset index; fixed for the lifetime of the row.
    pub index: usize,
    pub field_verbose: String,
    pub field: String,
    pub path: String,
    pub path_verbose: String,
    pub filter_type: FilterType,
    pub filter_value: String,
    pub filter_value2: String,
    pub exclude: bool,
    pub position: u32,
    pub deleted: bool,
    pub input: ValueInput,
    pub widget: FilterWidget,
}

impl FilterRow {
    /// Row created by dropping `token`: `icontains`, empty values, position 0.
    pub fn from_token(index: usize, token: &FieldToken) -> Self {
        let filter_type = FilterType::default();
        Self {
            index,
            field_verbose: token.field.clone(),
            field: token.label.clone(),
            path: token.path.clone(),
            path_verbose: token.path_verbose.clone(),
            filter_type,
            filter_value: String::new(),
            filter_value2: String::new(),
            exclude: false,
            position: 0,
            deleted: false,
            input: ValueInput::for_token(token),
            widget: FilterWidget::Single,
        }
    }

    /// Check the row before submission. `date_format` is a chrono format string.
    pub fn validate(&self, date_format: &str) -> Result<(), FilterRowError> {
        if self.deleted {
            return Ok(());
        }
        if self.filter_type == FilterType::Range
            && self.input.has_second_value()
            && self.filter_value2.trim().is_empty()
        {
            return Err(FilterRowError::MissingRangeEnd);
        }
        if self.input == ValueInput::DateRange && self.filter_type != FilterType::Isnull {
            let mut values = vec![&self.filter_value];
            if self.filter_type == FilterType::Range {
                values.push(&self.filter_value2);
            }
            for value in values {
                let value = value.trim();
                if !value.is_empty() && NaiveDate::parse_from_str(value, date_format).is_err() {
                    return Err(FilterRowError::InvalidDate(value.to_string()));
                }
            }
        }
        Ok(())
    }
}
