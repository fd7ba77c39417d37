//! Editor for bug tracker flag metadata: allowed values and the
//! product/component rules that decide where a flag is visible.

pub mod config;
pub mod editor;
pub mod errors;
pub mod fields;
pub mod models;
pub mod submit;
pub mod tui;

pub use editor::{EditorAction, ListEditor, ValueField};
pub use errors::{EditorError, EditorResult};
