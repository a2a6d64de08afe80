use std::sync::Arc;

use crate::{
    error::BoxError,
    html::{self, Attributes, attrs},
    i18n::{CATEGORY, Translator},
    key::RowKey,
};

/// Renders the markup for one button, given the URL the button should point
/// at and the row it belongs to.
pub type Button<M> =
    Arc<dyn Fn(&str, &M, &RowKey) -> Result<String, BoxError> + Send + Sync>;

/// The buttons which are added automatically (when their token is in the
/// template), along with their icons.
pub const DEFAULT_BUTTONS: [(&str, &str); 3] =
    [("view", "eye-open"), ("update", "pencil"), ("delete", "trash")];

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this item?";

/// The untranslated label of a button.
pub fn default_label(name: &str) -> String {
    match name {
        "view" => "View".to_string(),
        "update" => "Update".to_string(),
        "delete" => "Delete".to_string(),
        _ => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Options which only some of the built-in buttons carry. Deleting asks for
/// confirmation and is submitted as a POST.
pub fn builtin_extra_options(
    name: &str,
    translator: &dyn Translator,
) -> Attributes {
    match name {
        "delete" => attrs([
            (
                "data-confirm",
                translator.translate(CATEGORY, DELETE_CONFIRMATION),
            ),
            ("data-method", "post".to_string()),
        ]),
        _ => Attributes::new(),
    }
}

/// Merges the options of a default button. Later sources take precedence:
/// the common options, then `extra`, then the column's `button_options`.
pub fn default_button_options(
    name: &str,
    extra: &Attributes,
    translator: &dyn Translator,
    button_options: &Attributes,
) -> Attributes {
    let title = translator.translate(CATEGORY, &default_label(name));
    let mut options = attrs([
        ("title", title.as_str()),
        ("aria-label", title.as_str()),
        ("data-pjax", "0"),
    ]);
    options.extend(extra.clone());
    options.extend(button_options.clone());
    options
}

/// A link wrapping a glyphicon.
pub fn glyph_button<M: 'static>(icon: &str, options: Attributes) -> Button<M> {
    let icon = html::icon(icon);
    Arc::new(
        move |url: &str, _: &M, _: &RowKey| -> Result<String, BoxError> {
            Ok(html::a(&icon, url, &options))
        },
    )
}

pub fn default_button<M: 'static>(
    name: &str,
    icon: &str,
    extra: &Attributes,
    translator: &dyn Translator,
    button_options: &Attributes,
) -> Button<M> {
    glyph_button(
        icon,
        default_button_options(name, extra, translator, button_options),
    )
}
