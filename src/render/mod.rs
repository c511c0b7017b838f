//! HTML fragments produced on the client side.

pub mod formset;
pub mod html;
pub mod rows;

pub use formset::{DISPLAY_FIELDS, FILTERS, Formset};
pub use rows::{render_display_row, render_filter_row};

/// Placeholder shown while the preview request is in flight.
pub const PREVIEW_SPINNER: &str = r#"<div style="height: 16px" id="preview_spinner"></div>"#;

/// Error block shown when the preview request fails. The raw response body is
/// shown as preformatted text.
pub fn preview_error_html(body: &str) -> String {
    format!(
        "<h3>Sorry, there was an error generating your report. Details appear below.</h3><pre>{}</pre>",
        html::escape_html(body)
    )
}
