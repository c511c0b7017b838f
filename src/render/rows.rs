//! Row templates for the display-field and filter tables.
//!
//! Every generated input is named through [`Formset`], so the markup submitted
//! back to the server matches the formset the page was rendered with.

use crate::models::{
    Aggregate, DisplayFieldRow, FilterRow, FilterType, SelectOption, ValueInput, parse_options,
};
use crate::models::select_option::options_to_html;
use crate::render::formset::{DISPLAY_FIELDS, FILTERS, Formset};
use crate::render::html::escape_html;
use crate::state::filter_widget::WidgetVisibility;

const MOVE_HANDLE: &str =
    r#"<td><span style="cursor: move;" class="ui-icon ui-icon-arrowthick-2-n-s"></span></td>"#;
const HIDDEN_STYLE: &str = r#" style="display: none;""#;

/// Attribute list of one `<input>`; values are escaped on render.
struct Input<'a> {
    formset: Formset,
    index: usize,
    attribute: &'a str,
    kind: &'a str,
    value: Option<&'a str>,
    extra: String,
}

impl<'a> Input<'a> {
    fn new(formset: Formset, index: usize, attribute: &'a str, kind: &'a str) -> Self {
        Self { formset, index, attribute, kind, value: None, extra: String::new() }
    }

    fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    fn attr(mut self, raw: &str) -> Self {
        self.extra.push(' ');
        self.extra.push_str(raw);
        self
    }

    fn checked(self, checked: bool) -> Self {
        if checked { self.attr(r#"checked="checked""#) } else { self }
    }

    fn hidden(self, hidden: bool) -> Self {
        if hidden { self.attr(HIDDEN_STYLE.trim_start()) } else { self }
    }

    fn render(&self) -> String {
        let value = self
            .value
            .map(|v| format!(r#" value="{}""#, escape_html(v)))
            .unwrap_or_default();
        format!(
            r#"<input type="{}" name="{}" id="{}"{value}{}>"#,
            self.kind,
            self.formset.name(self.index, self.attribute),
            self.formset.id(self.index, self.attribute),
            self.extra
        )
    }
}

fn select(formset: Formset, index: usize, attribute: &str, extra: &str, options: &str) -> String {
    format!(
        r#"<select name="{}" id="{}"{extra}>{options}</select>"#,
        formset.name(index, attribute),
        formset.id(index, attribute)
    )
}

/// Aggregate select options with `selected` marking the current choice.
pub fn aggregate_options(selected: Aggregate) -> Vec<SelectOption> {
    Aggregate::all()
        .iter()
        .map(|a| SelectOption::new(a.value(), a.label()).selected(*a == selected))
        .collect()
}

/// Filter-type select options with `selected` marking the current operator.
pub fn filter_type_options(selected: FilterType) -> Vec<SelectOption> {
    FilterType::all()
        .iter()
        .map(|t| SelectOption::new(t.value(), t.label()).selected(*t == selected))
        .collect()
}

/// One `<tr>` of the selected-fields table.
pub fn render_display_row(row: &DisplayFieldRow) -> String {
    let f = DISPLAY_FIELDS;
    let i = row.index;
    let sort = row.sort.map(|s| s.to_string()).unwrap_or_default();
    let width = row.width.to_string();
    let position = row.position.map(|p| p.to_string()).unwrap_or_default();

    let mut html = String::from("<tr>");
    html.push_str(MOVE_HANDLE);
    html.push_str(&format!(
        "<td>{}</td>",
        Input::new(f, i, "DELETE", "checkbox").checked(row.deleted).render()
    ));
    html.push_str(&format!(
        "<td>{}{}{}{}</td>",
        escape_html(&row.field_verbose),
        Input::new(f, i, "path_verbose", "hidden")
            .value(&row.path_verbose)
            .attr(r#"readonly="readonly""#)
            .render(),
        Input::new(f, i, "field_verbose", "hidden")
            .value(&row.field_verbose)
            .attr(r#"readonly="readonly""#)
            .render(),
        Input::new(f, i, "path", "hidden").value(&row.path).render(),
    ));
    html.push_str(&format!(
        "<td>{}{}</td>",
        Input::new(f, i, "field", "hidden").value(&row.field).render(),
        Input::new(f, i, "name", "text").value(&row.name).render(),
    ));
    html.push_str(&format!(
        "<td>{}{}</td>",
        Input::new(f, i, "sort", "text").value(&sort).attr(r#"class="small_input""#).render(),
        Input::new(f, i, "sort_reverse", "checkbox").checked(row.sort_reverse).render(),
    ));
    html.push_str(&format!(
        "<td>{}</td>",
        Input::new(f, i, "width", "text").value(&width).attr(r#"class="small_input""#).render()
    ));
    if row.aggregate_enabled {
        html.push_str(&format!(
            r#"<td class="aggregate">{}</td>"#,
            select(f, i, "aggregate", "", &options_to_html(&aggregate_options(row.aggregate)))
        ));
    } else {
        html.push_str("<td></td>");
    }
    let formats: Vec<SelectOption> = row
        .format_options
        .iter()
        .map(|o| {
            let selected = row.display_format.as_deref() == Some(o.value.as_str());
            o.clone().selected(selected)
        })
        .collect();
    html.push_str(&format!(
        "<td>{}</td>",
        select(f, i, "display_format", "", &options_to_html(&formats))
    ));
    html.push_str(&format!(
        "<td>{}</td>",
        Input::new(f, i, "total", "checkbox")
            .checked(row.total)
            .attr(r#"class="small_input""#)
            .render()
    ));
    html.push_str(&format!(
        r#"<td>{}<span class="hide_me">{}</span></td>"#,
        Input::new(f, i, "group", "checkbox").checked(row.group).render(),
        Input::new(f, i, "position", "text").value(&position).render(),
    ));
    html.push_str("</tr>");
    html
}

/// One `<tr>` of the filters table. `date_format` is the date-picker format
/// (e.g. `yyyy-mm-dd`) attached to date inputs.
pub fn render_filter_row(row: &FilterRow, date_format: &str) -> String {
    let f = FILTERS;
    let i = row.index;
    let position = row.position.to_string();

    let mut html = String::from("<tr>");
    html.push_str(MOVE_HANDLE);
    html.push_str(&format!(
        r#"<td>{}<span class="hide_me">{}</span>{}</td>"#,
        Input::new(f, i, "DELETE", "checkbox").checked(row.deleted).render(),
        Input::new(f, i, "position", "text").value(&position).render(),
        Input::new(f, i, "path_verbose", "hidden")
            .value(&row.path_verbose)
            .attr(r#"readonly="readonly" maxlength="2000""#)
            .render(),
    ));
    html.push_str(&format!(
        "<td>{}{}{}</td>",
        Input::new(f, i, "field", "hidden").value(&row.field).render(),
        Input::new(f, i, "field_verbose", "text")
            .value(&row.field_verbose)
            .attr(r#"readonly="readonly" maxlength="2000""#)
            .render(),
        Input::new(f, i, "path", "hidden").value(&row.path).render(),
    ));
    html.push_str(&format!(
        "<td>{}</td>",
        select(
            f,
            i,
            "filter_type",
            r#" class="filter_type""#,
            &options_to_html(&filter_type_options(row.filter_type))
        )
    ));
    html.push_str(&format!("<td>{}</td>", render_value_cell(row, date_format)));
    html.push_str(&format!(
        "<td>{}</td>",
        Input::new(f, i, "exclude", "checkbox").checked(row.exclude).render()
    ));
    html.push_str("</tr>");
    html
}

fn render_value_cell(row: &FilterRow, date_format: &str) -> String {
    let f = FILTERS;
    let i = row.index;
    let vis = row.visibility();

    let mut cell = match &row.input {
        // Under `isnull` the submitted value is the 0/1 flag, not a choice.
        ValueInput::Choices(_) if vis.null_check.is_some() => {
            Input::new(f, i, "filter_value", "hidden").value(&row.filter_value).render()
        }
        ValueInput::Choices(markup) => {
            let mut options = parse_options(markup);
            if !row.filter_value.is_empty() {
                for option in &mut options {
                    option.selected = option.value == row.filter_value;
                }
            }
            let style = if vis.value { "" } else { HIDDEN_STYLE };
            select(f, i, "filter_value", style, &options_to_html(&options))
        }
        ValueInput::Text => text_value_inputs(row, vis, None),
        ValueInput::DateRange => {
            let picker = format!(
                r#"class="datepicker" data-date-format="{}""#,
                escape_html(date_format)
            );
            text_value_inputs(row, vis, Some(&picker))
        }
    };

    if let Some(checked) = vis.null_check {
        let check = if checked { r#" checked="checked""# } else { "" };
        let check_box = format!(r#"<input name="check_value" type="checkbox"{check}>"#);
        // The checkbox sits right after the first value input.
        match cell.find('>') {
            Some(end) => cell.insert_str(end + 1, &check_box),
            None => cell.push_str(&check_box),
        }
    }
    cell
}

fn text_value_inputs(row: &FilterRow, vis: WidgetVisibility, extra: Option<&str>) -> String {
    let mut first = Input::new(FILTERS, row.index, "filter_value", "text")
        .value(&row.filter_value)
        .attr(r#"maxlength="2000""#);
    let mut second = Input::new(FILTERS, row.index, "filter_value2", "text")
        .value(&row.filter_value2)
        .attr(r#"maxlength="2000""#);
    if let Some(extra) = extra {
        first = first.attr(extra);
        second = second.attr(extra);
    }
    format!("{}{}", first.hidden(!vis.value).render(), second.hidden(!vis.value2).render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldToken;

    fn token(field: &str) -> FieldToken {
        FieldToken {
            field: field.into(),
            name: "amount".into(),
            label: "amount".into(),
            path_verbose: "Amount".into(),
            ..Default::default()
        }
    }

    #[test]
    fn display_row_names_every_input() {
        let row = DisplayFieldRow::from_token(2, &token("Amount [DecimalField]"), 3);
        let html = render_display_row(&row);
        for attribute in [
            "DELETE",
            "path_verbose",
            "field_verbose",
            "path",
            "field",
            "name",
            "sort",
            "sort_reverse",
            "width",
            "aggregate",
            "display_format",
            "total",
            "group",
            "position",
        ] {
            let name = format!(r#"name="displayfield_set-2-{attribute}""#);
            assert!(html.contains(&name), "missing {attribute}");
        }
        assert!(html.contains(r#"name="displayfield_set-2-width" id="id_displayfield_set-2-width" value="15""#));
        assert!(html.contains(r#"name="displayfield_set-2-position" id="id_displayfield_set-2-position" value="3""#));
        assert!(html.contains(r#"<option value="" selected="selected">---------</option>"#));
        for aggregate in ["Sum", "Count", "Avg", "Max", "Min"] {
            assert!(html.contains(&format!(r#"<option value="{aggregate}">{aggregate}</option>"#)));
        }
    }

    #[test]
    fn computed_display_row_has_empty_aggregate_cell() {
        let row = DisplayFieldRow::from_token(0, &token("Total [custom field]"), 1);
        let html = render_display_row(&row);
        assert!(!html.contains("displayfield_set-0-aggregate"));
        assert!(html.contains("<td></td>"));
    }

    #[test]
    fn display_row_escapes_values() {
        let mut row = DisplayFieldRow::from_token(0, &token("Amount [DecimalField]"), 1);
        row.name = r#"Amount "USD""#.into();
        let html = render_display_row(&row);
        assert!(html.contains(r#"value="Amount &quot;USD&quot;""#));
    }

    #[test]
    fn filter_row_defaults_to_icontains_with_hidden_second_value() {
        let row = FilterRow::from_token(0, &token("Name [CharField]"));
        let html = render_filter_row(&row, "yyyy-mm-dd");
        assert!(html.contains(
            r#"<option value="icontains" selected="selected">Contains (case-insensitive)</option>"#
        ));
        assert!(html.contains(r#"name="fil-0-filter_value2" id="id_fil-0-filter_value2" value="" maxlength="2000" style="display: none;">"#));
        assert!(!html.contains("check_value"));
        assert!(!html.contains("datepicker"));
    }

    #[test]
    fn date_filter_row_uses_pickers() {
        let row = FilterRow::from_token(1, &token("Created [DateField]"));
        let html = render_filter_row(&row, "yyyy-mm-dd");
        assert_eq!(html.matches(r#"class="datepicker" data-date-format="yyyy-mm-dd""#).count(), 2);
    }

    #[test]
    fn choice_filter_row_selects_current_value() {
        let mut row = FilterRow::from_token(
            0,
            &FieldToken {
                choices: Some(r#"<option value="a">A</option><option value="b">B</option>"#.into()),
                ..token("Status [CharField]")
            },
        );
        row.filter_value = "b".into();
        let html = render_filter_row(&row, "yyyy-mm-dd");
        assert!(html.contains(r#"<select name="fil-0-filter_value" id="id_fil-0-filter_value">"#));
        assert!(html.contains(r#"<option value="b" selected="selected">B</option>"#));
        assert!(!html.contains("filter_value2"));
    }

    #[test]
    fn isnull_row_renders_one_checkbox_after_hidden_value() {
        let mut row = FilterRow::from_token(0, &token("Name [CharField]"));
        row.filter_value = "1".into();
        row.apply_filter_type(FilterType::Isnull);
        row.apply_filter_type(FilterType::Isnull);
        let html = render_filter_row(&row, "yyyy-mm-dd");
        assert_eq!(html.matches(r#"name="check_value""#).count(), 1);
        assert!(html.contains(
            r#"value="1" maxlength="2000" style="display: none;"><input name="check_value" type="checkbox" checked="checked">"#
        ));
    }

    #[test]
    fn choice_row_under_isnull_submits_the_flag() {
        let mut row = FilterRow::from_token(
            0,
            &FieldToken {
                choices: Some(r#"<option value="a">A</option><option value="b">B</option>"#.into()),
                ..token("Status [CharField]")
            },
        );
        row.apply_filter_type(FilterType::Isnull);
        row.set_null_checked(true);
        let html = render_filter_row(&row, "yyyy-mm-dd");
        assert!(!html.contains(r#"<select name="fil-0-filter_value""#));
        assert!(!html.contains(r#"<option value="a">"#));
        assert!(html.contains(
            r#"<input type="hidden" name="fil-0-filter_value" id="id_fil-0-filter_value" value="1"><input name="check_value" type="checkbox" checked="checked">"#
        ));

        row.set_null_checked(false);
        let html = render_filter_row(&row, "yyyy-mm-dd");
        assert!(html.contains(
            r#"<input type="hidden" name="fil-0-filter_value" id="id_fil-0-filter_value" value="0"><input name="check_value" type="checkbox">"#
        ));
    }
}
