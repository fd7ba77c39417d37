//! Reusable UI components for the flag editor
//!
//! Small widgets and state holders shared by the editor panes.

pub mod form_field;
pub mod row_cursor;
pub mod status_display;

pub use form_field::{Form, FormField, FormFieldType};
pub use row_cursor::RowCursor;
pub use status_display::{StatusDisplay, StatusMessage, StatusType};
