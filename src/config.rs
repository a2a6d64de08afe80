use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    html::Attributes,
};

/// The parts of an action column which can be written down declaratively,
/// for example in a TOML file:
///
/// ```toml
/// controller = "item"
/// template = "{view} {delete}"
///
/// [button_options]
/// class = "btn btn-sm"
///
/// [visible_buttons]
/// delete = false
/// ```
///
/// Buttons, predicates and URL builders are code, and are attached through
/// [`crate::widgets::actions::ActionColumnBuilder`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub controller: Option<String>,
    pub template: Option<String>,
    pub header: Option<String>,
    pub button_options: Attributes,
    /// Replaces the default `class="action-column"` when set.
    pub header_options: Option<Attributes>,
    pub content_options: Attributes,
    pub visible_buttons: IndexMap<String, bool>,
}

impl ColumnConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| {
            Error::Config(format!("invalid column configuration: {e}"))
        })
    }
}
