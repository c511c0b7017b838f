//! Report-builder endpoint paths and request parameters.

use crate::state::field_panel::{ChoicesQuery, FieldsQuery};
use crate::state::tree::RelatedQuery;

/// First path segment of every report-builder URL.
pub const APP_ROOT: &str = "/report_builder";

/// Everything in `current_path` before the first `/report_builder`, when that
/// segment is not at the very start; otherwise the empty prefix.
pub fn derive_path_prefix(current_path: &str) -> &str {
    match current_path.find(APP_ROOT) {
        Some(index) if index > 0 => &current_path[..index],
        _ => "",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    DownloadXlsx { report_id: &'a str },
    CheckStatus { report_id: &'a str, task_id: &'a str },
    Related,
    Fields,
    Choices,
    Formats,
    Preview,
}

impl Endpoint<'_> {
    /// Absolute path of the endpoint below `prefix`.
    pub fn path(&self, prefix: &str) -> String {
        let tail = match self {
            Endpoint::DownloadXlsx { report_id } => format!("report/{report_id}/download_xlsx/"),
            Endpoint::CheckStatus { report_id, task_id } => {
                format!("report/{report_id}/check_status/{task_id}/")
            }
            Endpoint::Related => "ajax_get_related/".to_string(),
            Endpoint::Fields => "ajax_get_fields/".to_string(),
            Endpoint::Choices => "ajax_get_choices/".to_string(),
            Endpoint::Formats => "ajax_get_formats/".to_string(),
            Endpoint::Preview => "ajax_preview/".to_string(),
        };
        format!("{prefix}{APP_ROOT}/{tail}")
    }
}

pub type Params = Vec<(&'static str, String)>;

impl RelatedQuery {
    /// Query parameters; the expansion set goes out as repeated `exclude[]`.
    pub fn params(&self) -> Params {
        let mut params = vec![
            ("model", self.model.clone()),
            ("field", self.field.clone()),
            ("path", self.path.clone()),
            ("path_verbose", self.path_verbose.clone()),
        ];
        params.extend(self.exclude.iter().map(|id| ("exclude[]", id.clone())));
        params
    }
}

impl FieldsQuery {
    pub fn params(&self) -> Params {
        vec![
            ("model", self.model.clone()),
            ("field", self.field.clone()),
            ("path", self.path.clone()),
            ("path_verbose", self.path_verbose.clone()),
        ]
    }
}

impl ChoicesQuery {
    pub fn params(&self) -> Params {
        vec![
            ("path_verbose", self.path_verbose.clone()),
            ("path", self.path.clone()),
            ("app_label", self.app_label.clone()),
            ("label", self.label.clone()),
            ("root_model", self.root_model.clone()),
        ]
    }
}

/// Body parameters of the preview POST.
pub fn preview_params(csrf_token: &str, report_id: &str) -> Params {
    vec![("csrfmiddlewaretoken", csrf_token.to_string()), ("report_id", report_id.to_string())]
}
