//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::fields::{inc_value, int_value, trim_value};
use crate::tui::{traits::FormHandler, ui::Styles};

/// Type of form field, deciding what happens on blur
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    /// Trimmed on blur
    Text,
    /// Coerced to an integer on blur
    Integer,
    /// Value picked from `options`
    Select,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    /// Cursor position in chars
    pub cursor_position: usize,
    pub options: Vec<String>,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
            options: Vec::new(),
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.set_options(options);
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.value.chars().count();
    }

    /// Replace the options, keeping the value only if it is still offered
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        if !self.options.contains(&self.value) {
            let first = self.options.first().cloned().unwrap_or_default();
            self.set_value(&first);
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    /// Apply the blur behavior of the field type and return the new value
    pub fn blur(&mut self) -> String {
        self.is_focused = false;
        let value = match self.field_type {
            FormFieldType::Text => trim_value(&self.value),
            FormFieldType::Integer => int_value(&self.value),
            FormFieldType::Select => self.value.clone(),
        };
        self.set_value(&value);
        value
    }

    /// Add `amount` to an integer field
    pub fn increment(&mut self, amount: i64) {
        if self.field_type == FormFieldType::Integer {
            let value = inc_value(&self.value, amount);
            self.set_value(&value);
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if self.field_type == FormFieldType::Select {
            return;
        }
        let at = self.byte_index(self.cursor_position);
        self.value.insert(at, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.field_type == FormFieldType::Select || self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let at = self.byte_index(self.cursor_position);
        self.value.remove(at);
        self.validation_error = None;
    }

    pub fn delete_char_forward(&mut self) {
        if self.field_type == FormFieldType::Select {
            return;
        }
        if self.cursor_position < self.value.chars().count() {
            let at = self.byte_index(self.cursor_position);
            self.value.remove(at);
            self.validation_error = None;
        }
    }

    /// Terminal column of the cursor, counting wide chars as two
    pub fn cursor_column(&self) -> usize {
        self.value
            .chars()
            .take(self.cursor_position)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Move a select field to the next or previous option, wrapping.
    /// Returns true when the value changed.
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        if self.field_type != FormFieldType::Select || self.options.is_empty() {
            return false;
        }
        let len = self.options.len();
        let current = self.options.iter().position(|o| *o == self.value);
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, _) => 0,
        };
        let changed = self.options[next] != self.value;
        let value = self.options[next].clone();
        self.set_value(&value);
        if changed {
            self.validation_error = None;
        }
        changed
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.validation_error.is_some() {
            Styles::error()
        } else if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let title = if let Some(ref error) = self.validation_error {
            format!("{} - Error: {}", self.label, error)
        } else if self.field_type == FormFieldType::Select && self.is_focused {
            format!("{} (\u{2190}/\u{2192})", self.label)
        } else {
            self.label.clone()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);

        f.render_widget(paragraph, area);

        if self.is_focused && self.field_type != FormFieldType::Select {
            let column = u16::try_from(self.cursor_column()).unwrap_or(u16::MAX);
            let cursor_x = area.x.saturating_add(1).saturating_add(column);
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            current_field: 0,
        }
    }

    /// Give focus to the current field
    pub fn focus(&mut self) {
        let current = self.current_field;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == current);
        }
    }

    /// Blur the current field, returning its index and new value
    pub fn blur_current(&mut self) -> Option<(usize, String)> {
        let index = self.current_field;
        self.fields.get_mut(index).map(|field| (index, field.blur()))
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    /// Moving between fields blurs the field being left
    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() && field != self.current_field {
            self.blur_current();
            self.current_field = field;
            self.focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }

    fn handle_cursor(&mut self, forward: bool) {
        if let Some(field) = self.get_current_field_mut() {
            if forward {
                field.move_cursor_right();
            } else {
                field.move_cursor_left();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_trims_on_blur() {
        let mut field = FormField::new("Name", FormFieldType::Text).with_value("  foo  ");
        field.set_focus(true);
        assert_eq!(field.blur(), "foo");
        assert_eq!(field.value, "foo");
        assert_eq!(field.cursor_position, 3);
        assert!(!field.is_focused);
    }

    #[test]
    fn test_integer_field_coerces_on_blur() {
        let mut field = FormField::new("Sort", FormFieldType::Integer).with_value("12abc");
        assert_eq!(field.blur(), "12");
        field.set_value("abc");
        assert_eq!(field.blur(), "");
        field.increment(5);
        assert_eq!(field.value, "5");
    }

    #[test]
    fn test_editing_multibyte_text() {
        let mut field = FormField::new("Value", FormFieldType::Text).with_value("ü");
        field.insert_char('x');
        field.move_cursor_left();
        field.move_cursor_left();
        field.insert_char('é');
        assert_eq!(field.value, "éüx");
        field.delete_char_forward();
        assert_eq!(field.value, "éx");
        field.delete_char();
        assert_eq!(field.value, "x");
    }

    #[test]
    fn test_cursor_column_counts_wide_chars() {
        let mut field = FormField::new("Value", FormFieldType::Text).with_value("日本a");
        assert_eq!(field.cursor_position, 3);
        assert_eq!(field.cursor_column(), 5);
        field.move_cursor_left();
        field.move_cursor_left();
        assert_eq!(field.cursor_column(), 2);
    }

    #[test]
    fn test_changing_selection_clears_validation_error() {
        let mut field = FormField::new("Product", FormFieldType::Select)
            .with_options(vec![String::new(), "Firefox".into()]);
        field.validation_error = Some("Please select a product.".to_string());
        assert!(field.cycle_option(true));
        assert_eq!(field.value, "Firefox");
        assert!(field.validation_error.is_none());
    }

    #[test]
    fn test_select_field_cycles_and_ignores_typing() {
        let mut field = FormField::new("Product", FormFieldType::Select)
            .with_options(vec![String::new(), "Firefox".into(), "Core".into()]);
        field.insert_char('z');
        assert_eq!(field.value, "");
        assert!(field.cycle_option(true));
        assert_eq!(field.value, "Firefox");
        assert!(field.cycle_option(false));
        assert!(field.cycle_option(false));
        assert_eq!(field.value, "Core");

        field.set_options(vec!["Other".into()]);
        assert_eq!(field.value, "Other");
        assert!(!field.cycle_option(true));
    }

    #[test]
    fn test_form_blurs_field_when_leaving() {
        let mut form = Form::new(vec![
            FormField::new("Name", FormFieldType::Text).with_value(" a "),
            FormField::new("Sort", FormFieldType::Integer),
        ]);
        form.focus();
        form.next_field();
        assert_eq!(form.value(0), "a");
        assert!(form.get_field(1).unwrap().is_focused);
        form.handle_char_input('7');
        form.handle_char_input('x');
        form.previous_field();
        assert_eq!(form.value(1), "7");
    }
}
