use futures::future::join_all;

use crate::api::ReportBackend;
use crate::models::{FieldToken, parse_options};
use crate::state::{ChoicesQuery, FormEvent, SharedForm, TreeNode};

use super::ReportCommands;

impl ReportCommands {
    /// Highlight `node` and load its field list into the field panel.
    ///
    /// A response for a node that is no longer highlighted is dropped.
    pub async fn show_fields<B: ReportBackend>(
        form: &SharedForm,
        backend: &B,
        node: &TreeNode,
    ) -> Option<usize> {
        let query = form.lock().panel.select(&node.id, &node.path_verbose);

        let result = backend.fields(&query).await;

        let mut form = form.lock();
        if form.panel.highlighted() != Some(&node.id) {
            log::debug!("Dropping stale field list for {}", node.id);
            return None;
        }
        match result {
            Ok(html) => {
                let count = form.panel.load(html);
                form.emit(FormEvent::FieldsLoaded { node: node.id.clone(), count });
                Some(count)
            }
            Err(e) => {
                log::warn!("Failed to load fields for {}: {}", node.id, e);
                None
            }
        }
    }

    /// Fetch the fixed choices of the field panel token `name`.
    pub async fn load_choices<B: ReportBackend>(
        form: &SharedForm,
        backend: &B,
        name: &str,
    ) -> bool {
        let query = {
            let form = form.lock();
            match form.panel.token(name) {
                Some(token) if token.has_choices => ChoicesQuery::for_token(token),
                _ => return false,
            }
        };

        let choices = match backend.choices(&query).await {
            Ok(choices) => choices,
            Err(e) => {
                log::warn!("Failed to load choices for {}: {}", name, e);
                return false;
            }
        };

        let mut form = form.lock();
        let updated = form.panel.set_choices(&query, choices);
        if updated {
            form.emit(FormEvent::ChoicesLoaded { name: name.to_string() });
        }
        updated
    }

    /// Drop `token` onto the report fields area and load the new row's formats.
    pub async fn drop_into_fields<B: ReportBackend>(
        form: &SharedForm,
        backend: &B,
        token: &FieldToken,
    ) -> Option<usize> {
        let index = form.lock().on_drop_into_fields(token)?;
        Self::load_formats(form, backend, index).await;
        Some(index)
    }

    /// Fill the display-format select of display row `index`.
    pub async fn load_formats<B: ReportBackend>(
        form: &SharedForm,
        backend: &B,
        index: usize,
    ) -> bool {
        let options = match backend.formats().await {
            Ok(html) => parse_options(&html),
            Err(e) => {
                log::warn!("Failed to load display formats for row {}: {}", index, e);
                return false;
            }
        };

        let mut form = form.lock();
        let updated = form.display.set_format_options(index, options);
        if updated {
            form.emit(FormEvent::FormatsLoaded { index });
        }
        updated
    }

    /// Page initialization: fill the format select of every rendered display row.
    pub async fn load_missing_formats<B: ReportBackend>(form: &SharedForm, backend: &B) -> usize {
        let indices = form.lock().display.rows_missing_formats();
        let results =
            join_all(indices.into_iter().map(|index| Self::load_formats(form, backend, index)))
                .await;
        results.into_iter().filter(|loaded| *loaded).count()
    }
}
