//! The "selected fields" table.

use crate::models::{DisplayFieldRow, FieldToken, SelectOption};
use crate::render::rows::render_display_row;

#[derive(Debug, Default)]
pub struct DisplayFieldTable {
    /// Mirrors `displayfield_set-TOTAL_FORMS`; the next row's index.
    total_forms: usize,
    /// Rows in display order.
    rows: Vec<DisplayFieldRow>,
}

impl DisplayFieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding rows the page was rendered with.
    pub fn with_rows(rows: Vec<DisplayFieldRow>, total_forms: usize) -> Self {
        let total_forms = rows.iter().map(|r| r.index + 1).max().unwrap_or(0).max(total_forms);
        Self { total_forms, rows }
    }

    pub fn total_forms(&self) -> usize {
        self.total_forms
    }

    pub fn rows(&self) -> &[DisplayFieldRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&DisplayFieldRow> {
        self.rows.iter().find(|r| r.index == index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut DisplayFieldRow> {
        self.rows.iter_mut().find(|r| r.index == index)
    }

    /// Append a row for `token`. Returns the new row's index, or `None` when the
    /// token has no field name.
    pub fn on_drop(&mut self, token: &FieldToken) -> Option<usize> {
        if !token.is_droppable() {
            return None;
        }
        let index = self.total_forms;
        self.total_forms += 1;
        self.rows.push(DisplayFieldRow::from_token(index, token, self.total_forms as u32));
        Some(index)
    }

    /// Move the row at display position `from` to `to` and renumber positions.
    /// Rows with an empty name keep their old position.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() || to >= self.rows.len() {
            return false;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        for (i, row) in self.rows.iter_mut().enumerate() {
            if !row.name.is_empty() {
                row.position = Some(i as u32 + 1);
            }
        }
        true
    }

    pub fn mark_deleted(&mut self, index: usize, deleted: bool) -> bool {
        self.row_mut(index).map(|row| row.deleted = deleted).is_some()
    }

    pub fn set_format_options(&mut self, index: usize, options: Vec<SelectOption>) -> bool {
        self.row_mut(index).map(|row| row.set_format_options(options)).is_some()
    }

    /// Indexes of rows whose format select is still empty.
    pub fn rows_missing_formats(&self) -> Vec<usize> {
        self.rows.iter().filter(|r| r.format_options.is_empty()).map(|r| r.index).collect()
    }

    pub fn render_body(&self) -> String {
        self.rows.iter().map(render_display_row).collect()
    }
}
