//! Common event handlers for the editor panes

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::traits::{FormHandler, Navigable, ScreenAction};

/// Common keyboard event handling utilities
pub struct CommonKeyHandler;

impl CommonKeyHandler {
    /// Handle navigation keys for row-based panes
    pub fn handle_navigation_keys<T: Navigable>(
        navigable: &mut T,
        key: KeyEvent,
    ) -> Option<ScreenAction> {
        if key.modifiers.contains(KeyModifiers::SHIFT) {
            return None;
        }
        match key.code {
            KeyCode::Up => {
                navigable.navigate_up();
                Some(ScreenAction::None)
            }
            KeyCode::Down => {
                navigable.navigate_down();
                Some(ScreenAction::None)
            }
            KeyCode::Home => {
                navigable.navigate_to_first();
                Some(ScreenAction::SetStatus("First row".to_string()))
            }
            KeyCode::End => {
                navigable.navigate_to_last();
                Some(ScreenAction::SetStatus("Last row".to_string()))
            }
            _ => None,
        }
    }

    /// Handle form navigation and input
    pub fn handle_form_keys<T: FormHandler>(form: &mut T, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Down => {
                form.next_field();
                Some(ScreenAction::SetStatus(format!(
                    "Field {}/{}",
                    form.get_current_field() + 1,
                    form.get_field_count()
                )))
            }
            KeyCode::Up => {
                form.previous_field();
                Some(ScreenAction::SetStatus(format!(
                    "Field {}/{}",
                    form.get_current_field() + 1,
                    form.get_field_count()
                )))
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.handle_char_input(c);
                Some(ScreenAction::None)
            }
            KeyCode::Backspace => {
                form.handle_backspace();
                Some(ScreenAction::None)
            }
            KeyCode::Delete => {
                form.handle_delete();
                Some(ScreenAction::None)
            }
            KeyCode::Left => {
                form.handle_cursor(false);
                Some(ScreenAction::None)
            }
            KeyCode::Right => {
                form.handle_cursor(true);
                Some(ScreenAction::None)
            }
            _ => None,
        }
    }

    /// Handle global application keys
    pub fn handle_global_keys(key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(ScreenAction::Quit)
            }
            _ => None,
        }
    }
}
