//! Status messages and tips for UI feedback.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Error, text: text.into() }
    }
}

/// Informational tips shown in the tip area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tip {
    /// Shown when the user clicks an aggregate cell.
    Aggregate,
    /// Shown when a `[property]` field is dropped into the filters.
    Property,
}

impl Tip {
    pub fn html(self) -> &'static str {
        match self {
            Tip::Aggregate => {
                "Aggregates can have unexpected behavior if used with sort order and the values in \
                 your search. To read more check out <a target=\"_blank\" \
                 href=\"https://docs.djangoproject.com/en/dev/topics/db/aggregation/\">Django \
                 Aggregation</a>"
            }
            Tip::Property => {
                "NOTE: Searching on properties can be <i>very</i> slow.  It's a good idea to add \
                 some fields to help speed up your report."
            }
        }
    }
}
