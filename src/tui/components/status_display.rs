//! Status line showing the outcome of the last edit

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: chrono::Local::now(),
        }
    }
}

/// Status display component
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub message_history: Vec<StatusMessage>,
    pub max_history: usize,
    pub show_timestamp: bool,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current_message: None,
            message_history: Vec::new(),
            max_history: 50,
            show_timestamp: false,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamp = true;
        self
    }

    pub fn set_message(&mut self, message: StatusMessage) {
        if let Some(current) = self.current_message.take() {
            self.message_history.push(current);
            if self.message_history.len() > self.max_history {
                self.message_history.remove(0);
            }
        }
        self.current_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_warning(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Warning));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Error));
    }

    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    pub fn get_history(&self) -> &[StatusMessage] {
        &self.message_history
    }

    /// Up to `count` most recent messages, newest first, current included
    pub fn recent_lines(&self, count: usize) -> Vec<String> {
        self.current_message
            .iter()
            .chain(self.message_history.iter().rev())
            .take(count)
            .map(|message| self.format_message(message))
            .collect()
    }

    pub fn render_with_title(&self, f: &mut Frame, area: Rect, title: &str) {
        let (content, style) = match &self.current_message {
            Some(message) => {
                let style = match message.status_type {
                    StatusType::Info => Styles::info(),
                    StatusType::Success => Styles::success(),
                    StatusType::Warning => Styles::warning(),
                    StatusType::Error => Styles::error(),
                };
                (self.format_message(message), style)
            }
            None => ("Ready".to_string(), Styles::default()),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        f.render_widget(Paragraph::new(content).style(style).block(block), area);
    }

    fn format_message(&self, message: &StatusMessage) -> String {
        let prefix = match message.status_type {
            StatusType::Info => "\u{2139}",
            StatusType::Success => "\u{2713}",
            StatusType::Warning => "\u{26a0}",
            StatusType::Error => "\u{2717}",
        };

        if self.show_timestamp {
            format!(
                "{} [{}] {}",
                prefix,
                message.timestamp.format("%H:%M:%S"),
                message.message
            )
        } else {
            format!("{} {}", prefix, message.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut status = StatusDisplay::new();
        for i in 0..60 {
            status.set_info(format!("message {}", i));
        }
        assert_eq!(status.get_history().len(), 50);
        assert_eq!(status.get_current().unwrap().message, "message 59");
        assert_eq!(status.get_history()[0].message, "message 9");
    }

    #[test]
    fn test_format_message() {
        let status = StatusDisplay::new();
        let message = StatusMessage::new("Please select a product.".to_string(), StatusType::Error);
        assert_eq!(status.format_message(&message), "\u{2717} Please select a product.");
    }

    #[test]
    fn test_timestamps_and_recent_lines() {
        let mut status = StatusDisplay::new().with_timestamps();
        status.set_info("first".to_string());
        status.set_warning("second".to_string());
        status.set_success("third".to_string());

        let lines = status.recent_lines(2);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\u{2713} ["));
        assert!(lines[0].ends_with("] third"));
        assert!(lines[1].starts_with("\u{26a0} ["));
        assert!(lines[1].ends_with("] second"));
    }
}
