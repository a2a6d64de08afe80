//! Per-row action buttons for data grids.
//!
//! An [`ActionColumn`] takes a template such as `"{view} {update} {delete}"`
//! and, for every row of a grid, replaces each token with the markup of the
//! matching button. Whether a button is shown, and what URL it points to,
//! can be decided per row.
//!
//! ```
//! use rowactions::{ActionColumn, Catalog, PathRouter, RowKey};
//!
//! let column = ActionColumn::<()>::builder()
//!     .controller("item")
//!     .template("{view}")
//!     .router(PathRouter::new())
//!     .translator(Catalog::new())
//!     .build()
//!     .unwrap();
//!
//! let html = column.render_row(&(), &RowKey::from(5), 0).unwrap();
//! assert!(html.contains(r#"href="/item/view?id=5""#));
//! ```

pub mod config;
pub mod error;
pub mod html;
pub mod i18n;
pub mod key;
pub mod routing;
pub mod template;
pub mod visibility;
pub mod widgets;

#[cfg(test)]
mod test;

pub use config::ColumnConfig;
pub use error::{BoxError, Error, Result};
pub use i18n::{Catalog, Translator};
pub use key::RowKey;
pub use routing::{PathRouter, RouteParams, Router};
pub use template::Template;
pub use visibility::VisibilityRule;
pub use widgets::actions::{ActionColumn, ActionColumnBuilder, UrlBuilder};
