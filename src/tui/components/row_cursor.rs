//! Row selection over a table body whose length changes under it

use ratatui::widgets::ListState;

use crate::tui::traits::Navigable;

#[derive(Debug, Clone, Default)]
pub struct RowCursor {
    pub state: ListState,
    count: usize,
}

impl RowCursor {
    pub fn new(count: usize) -> Self {
        let mut cursor = Self::default();
        cursor.set_count(count);
        cursor
    }

    /// Update the row count and maintain selection if possible
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        let selected = match self.state.selected() {
            _ if count == 0 => None,
            Some(i) if i < count => Some(i),
            Some(_) => Some(count - 1),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn select(&mut self, index: usize) {
        if index < self.count {
            self.state.select(Some(index));
        }
    }
}

impl Navigable for RowCursor {
    fn navigate_up(&mut self) {
        if self.count == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.count - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn navigate_down(&mut self) {
        if self.count == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.count,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index.filter(|i| *i < self.count));
    }

    fn get_item_count(&self) -> usize {
        self.count
    }
}
