// Report form state management

pub mod config;
pub mod display_table;
pub mod events;
pub mod field_panel;
pub mod filter_table;
pub mod filter_widget;
pub mod form;
pub mod settings;
pub mod status;
pub mod tree;

pub use config::ConfigManager;
pub use display_table::DisplayFieldTable;
pub use events::FormEvent;
pub use field_panel::{ChoicesQuery, FieldPanel, FieldsQuery};
pub use filter_table::{FilterDrop, FilterTable};
pub use filter_widget::{FilterWidget, WidgetVisibility};
pub use form::{LEAVE_PROMPT, PreviewArea, ReportForm, SharedForm, Tab};
pub use settings::ClientSettings;
pub use status::{StatusLevel, StatusMessage, Tip};
pub use tree::{NodeState, RelatedQuery, ToggleAction, TreeNavigator, TreeNode};
