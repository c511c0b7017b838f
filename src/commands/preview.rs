use crate::api::ReportBackend;
use crate::state::{SharedForm, Tab};

use super::ReportCommands;

impl ReportCommands {
    /// Replace the preview area with a freshly rendered preview.
    ///
    /// A failure shows the response body inside the error block.
    pub async fn refresh_preview<B: ReportBackend>(form: &SharedForm, backend: &B) {
        let (csrf_token, report_id) = {
            let mut form = form.lock();
            form.begin_preview();
            (form.csrf_token().to_string(), form.report_id().to_string())
        };

        let result = backend.preview(&csrf_token, &report_id).await;
        if let Err(e) = &result {
            log::warn!("Preview of report {} failed: {}", report_id, e);
        }
        form.lock().finish_preview(result);
    }

    /// Switch tabs; the preview tab refreshes the preview.
    pub async fn select_tab<B: ReportBackend>(form: &SharedForm, backend: &B, tab: Tab) {
        let refresh = form.lock().select_tab(tab);
        if refresh {
            Self::refresh_preview(form, backend).await;
        }
    }
}
