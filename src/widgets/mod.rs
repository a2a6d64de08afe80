//! Grid widgets.
//!
//! Currently this is just the [`actions`] column and the [`buttons`] it
//! renders.

pub mod actions;
pub mod buttons;
