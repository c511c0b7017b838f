//! Test fixtures for integration tests.

#![allow(dead_code)]

use report_builder_ui::models::{FieldToken, TreeNodeId};
use report_builder_ui::state::TreeNode;

pub const RELATED_FRAGMENT: &str = r#"<ul><li class="expandable">Line items</li></ul>"#;

pub const FIELDS_FRAGMENT: &str = r#"
<ul>
  <li class="draggable"><span class="button" data-name="amount" data-label="amount"
      data-path="" data-path_verbose="">Amount [DecimalField]</span></li>
  <li class="draggable"><span class="button" data-name="status" data-label="status"
      data-choices="true" data-app_label="shop" data-root_model="sale"
      data-path="" data-path_verbose="">Status [CharField]</span></li>
  <li class="draggable"><span class="button" data-name="created" data-label="created"
      data-path="" data-path_verbose="">Created [DateField]</span></li>
</ul>"#;

pub const CHOICES_FRAGMENT: &str =
    r#"<option value="open">Open</option><option value="closed">Closed</option>"#;

pub const FORMATS_FRAGMENT: &str = r#"<option value="">---------</option>
<option value="1">$ currency</option>
<option value="2">Percent</option>"#;

pub const PREVIEW_TABLE: &str = "<table><tr><th>Amount</th></tr><tr><td>12.50</td></tr></table>";

fn token(field: &str, name: &str) -> FieldToken {
    FieldToken {
        field: field.to_string(),
        name: name.to_string(),
        label: name.to_string(),
        ..Default::default()
    }
}

/// Numeric column, eligible for aggregates.
pub fn amount() -> FieldToken {
    token("Amount [DecimalField]", "amount")
}

/// Model property; filtering on it raises the slow-filter tip.
pub fn age_property() -> FieldToken {
    token("Age [property]", "age")
}

/// Decorative list entry without a field name.
pub fn nameless_property() -> FieldToken {
    token("Notes [property]", "")
}

pub fn created() -> FieldToken {
    token("Created [DateField]", "created")
}

pub fn status_with_choices() -> FieldToken {
    FieldToken {
        choices: Some(CHOICES_FRAGMENT.to_string()),
        ..token("Status [CharField]", "status")
    }
}

pub fn customer_node() -> TreeNode {
    TreeNode::new(TreeNodeId::new("sale", "customer", "customer__"), "12", "Customer")
}

pub fn address_node() -> TreeNode {
    TreeNode::new(TreeNodeId::new("customer", "address", "customer__address__"), "15", "Address")
        .with_parent(customer_node().id)
}
