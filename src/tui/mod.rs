//! Terminal user interface hosting the flag editor
//!
//! The TUI plays the part of the admin page: it owns the free-standing form
//! fields, draws both tables from the editor after every change, and turns
//! key presses into editor actions.

pub mod app;
pub mod components;
pub mod handlers;
pub mod traits;
pub mod ui;

pub use app::{App, Pane};
