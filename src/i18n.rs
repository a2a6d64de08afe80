use std::collections::HashMap;

use crate::error::{Error, Result};

/// The message category used for the labels of the built-in buttons.
pub const CATEGORY: &str = "actions";

/// Supplies translated labels. Implementations should fall back to the
/// source message when they have no translation.
pub trait Translator: Send + Sync {
    fn translate(&self, category: &str, message: &str) -> String;
}

/// An in-memory message catalog for a single locale.
///
/// ```toml
/// [actions]
/// "View" = "Voir"
/// "Delete" = "Supprimer"
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    messages: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let messages: HashMap<String, HashMap<String, String>> =
            toml::from_str(source).map_err(|e| {
                Error::Config(format!("invalid message catalog: {e}"))
            })?;
        Ok(Self { messages })
    }

    pub fn insert(
        mut self,
        category: &str,
        message: &str,
        translation: &str,
    ) -> Self {
        self.messages
            .entry(category.to_string())
            .or_default()
            .insert(message.to_string(), translation.to_string());
        self
    }
}

impl Translator for Catalog {
    fn translate(&self, category: &str, message: &str) -> String {
        self.messages
            .get(category)
            .and_then(|messages| messages.get(message))
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}
