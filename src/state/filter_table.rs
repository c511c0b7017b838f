//! The "filters" table.

use crate::models::{FieldToken, FilterRow, FilterRowError, FilterType};
use crate::render::rows::render_filter_row;
use crate::state::status::Tip;

/// Outcome of a drop onto the filters area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterDrop {
    /// Index of the appended row, if any.
    pub index: Option<usize>,
    pub tip: Option<Tip>,
}

#[derive(Debug, Default)]
pub struct FilterTable {
    /// Mirrors `fil-TOTAL_FORMS`; the next row's index.
    total_forms: usize,
    /// Rows in display order.
    rows: Vec<FilterRow>,
}

impl FilterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding rows the page was rendered with.
    pub fn with_rows(rows: Vec<FilterRow>, total_forms: usize) -> Self {
        let total_forms = rows.iter().map(|r| r.index + 1).max().unwrap_or(0).max(total_forms);
        Self { total_forms, rows }
    }

    pub fn total_forms(&self) -> usize {
        self.total_forms
    }

    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&FilterRow> {
        self.rows.iter().find(|r| r.index == index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut FilterRow> {
        self.rows.iter_mut().find(|r| r.index == index)
    }

    /// Append a filter row for `token`.
    ///
    /// The property tip is raised for `[property]` fields even when the token
    /// turns out to have no name.
    pub fn on_drop(&mut self, token: &FieldToken) -> FilterDrop {
        let tip = token.needs_property_tip().then_some(Tip::Property);
        if !token.is_droppable() {
            return FilterDrop { index: None, tip };
        }
        let index = self.total_forms;
        self.total_forms += 1;
        let mut row = FilterRow::from_token(index, token);
        row.apply_filter_type(row.filter_type);
        self.rows.push(row);
        FilterDrop { index: Some(index), tip }
    }

    /// Re-derive every row's widget from its operator.
    pub fn initialize(&mut self) {
        for row in &mut self.rows {
            row.apply_filter_type(row.filter_type);
        }
    }

    pub fn set_filter_type(&mut self, index: usize, filter_type: FilterType) -> bool {
        self.row_mut(index).map(|row| row.apply_filter_type(filter_type)).is_some()
    }

    pub fn set_null_checked(&mut self, index: usize, checked: bool) -> bool {
        self.row_mut(index).is_some_and(|row| row.set_null_checked(checked))
    }

    /// Move the row at display position `from` to `to`; every row is renumbered.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() || to >= self.rows.len() {
            return false;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.position = i as u32 + 1;
        }
        true
    }

    pub fn mark_deleted(&mut self, index: usize, deleted: bool) -> bool {
        self.row_mut(index).map(|row| row.deleted = deleted).is_some()
    }

    /// Validation failures keyed by row index.
    pub fn validate(&self, date_format: &str) -> Vec<(usize, FilterRowError)> {
        self.rows
            .iter()
            .filter_map(|row| row.validate(date_format).err().map(|e| (row.index, e)))
            .collect()
    }

    pub fn render_body(&self, date_format: &str) -> String {
        self.rows.iter().map(|row| render_filter_row(row, date_format)).collect()
    }
}
