use std::sync::Arc;

use crate::{error::BoxError, key::RowKey};

pub type VisibilityPredicate<M> =
    Arc<dyn Fn(&M, &RowKey, usize) -> Result<bool, BoxError> + Send + Sync>;

/// Decides whether a button is shown for a given row.
///
/// Buttons without a rule are always shown.
pub enum VisibilityRule<M> {
    Static(bool),
    Predicate(VisibilityPredicate<M>),
}

impl<M> VisibilityRule<M> {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&M, &RowKey, usize) -> Result<bool, BoxError>
            + Send
            + Sync
            + 'static,
    {
        VisibilityRule::Predicate(Arc::new(f))
    }

    pub fn is_visible(
        &self,
        model: &M,
        key: &RowKey,
        index: usize,
    ) -> Result<bool, BoxError> {
        match self {
            VisibilityRule::Static(visible) => Ok(*visible),
            VisibilityRule::Predicate(f) => f(model, key, index),
        }
    }
}

impl<M> Clone for VisibilityRule<M> {
    fn clone(&self) -> Self {
        match self {
            VisibilityRule::Static(visible) => VisibilityRule::Static(*visible),
            VisibilityRule::Predicate(f) => VisibilityRule::Predicate(f.clone()),
        }
    }
}

impl<M> std::fmt::Debug for VisibilityRule<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisibilityRule::Static(visible) => {
                f.debug_tuple("Static").field(visible).finish()
            }
            VisibilityRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<M> From<bool> for VisibilityRule<M> {
    fn from(visible: bool) -> Self {
        VisibilityRule::Static(visible)
    }
}
