//! Common UI styles and table rendering for the flag editor

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::editor::{RowTable, TableRow, ValueRow, VisibilityRow};

use super::app::ValueColumn;
use super::components::FormField;

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }
}

const VALUE_WIDTH: usize = 24;
const SETTER_WIDTH: usize = 16;
const ACTIVE_WIDTH: usize = 8;
const PRODUCT_WIDTH: usize = 24;
const COMPONENT_WIDTH: usize = 24;

/// Truncate or pad `text` to exactly `width` terminal columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Field text with a caret inserted at the cursor
fn with_caret(field: &FormField) -> String {
    let mut text = field.value.clone();
    let at = field
        .value
        .char_indices()
        .nth(field.cursor_position)
        .map(|(i, _)| i)
        .unwrap_or(field.value.len());
    text.insert(at, '\u{258f}');
    text
}

fn fixed_cells(cells: &[String], widths: &[usize], style: Style) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", style));
        }
        let text = match widths.get(i) {
            Some(width) => fit(cell, *width),
            None => cell.clone(),
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

fn table_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        })
}

/// Render the flag values table.
///
/// `cursor` is the selected body row and column; `editing` replaces the
/// selected value cell while it is being typed into.
pub fn render_value_table(
    f: &mut Frame,
    area: Rect,
    table: &RowTable<ValueRow>,
    cursor: Option<(usize, ValueColumn)>,
    editing: Option<&FormField>,
    focused: bool,
) {
    let widths = [VALUE_WIDTH, SETTER_WIDTH, ACTIVE_WIDTH];
    let header_count = table.header().count();
    let mut body_index = 0;
    let mut items = Vec::with_capacity(table.len());

    for row in table.rows() {
        let line = match row {
            TableRow::Header(cells) => fixed_cells(cells, &widths, Styles::title()),
            TableRow::Footer(cells) => fixed_cells(cells, &widths, Styles::inactive()),
            TableRow::Body(row) => {
                let selected_column = cursor
                    .filter(|(i, _)| *i == body_index && focused)
                    .map(|(_, column)| column);
                let cell_style = |column: ValueColumn| {
                    if selected_column == Some(column) {
                        Styles::selected()
                    } else {
                        Style::default()
                    }
                };

                let value_text = match (editing, selected_column) {
                    (Some(field), Some(ValueColumn::Value)) => with_caret(field),
                    _ => row.value.value.clone(),
                };
                let setter_text = row
                    .setter
                    .selected_option()
                    .map(|o| o.label.clone())
                    .unwrap_or_default();
                let active_text = if row.active.checked { "[x]" } else { "[ ]" };

                body_index += 1;
                Line::from(vec![
                    Span::styled(fit(&value_text, VALUE_WIDTH), cell_style(ValueColumn::Value)),
                    Span::raw(" | "),
                    Span::styled(fit(&setter_text, SETTER_WIDTH), cell_style(ValueColumn::Setter)),
                    Span::raw(" | "),
                    Span::styled(fit(active_text, ACTIVE_WIDTH), cell_style(ValueColumn::Active)),
                    Span::raw(" | "),
                    Span::raw(row.actions_text()),
                ])
            }
        };
        items.push(ListItem::new(line));
    }

    let title = format!("Values ({})", table.body_len());
    let mut state = ListState::default();
    state.select(cursor.map(|(i, _)| i + header_count));

    let list = List::new(items).block(table_block(&title, focused));
    f.render_stateful_widget(list, area, &mut state);
}

/// Render the visibility rules table
pub fn render_visibility_table(
    f: &mut Frame,
    area: Rect,
    table: &RowTable<VisibilityRow>,
    selected: Option<usize>,
    focused: bool,
) {
    let widths = [PRODUCT_WIDTH, COMPONENT_WIDTH];
    let header_count = table.header().count();
    let mut body_index = 0;
    let mut items = Vec::with_capacity(table.len());

    for row in table.rows() {
        let line = match row {
            TableRow::Header(cells) => fixed_cells(cells, &widths, Styles::title()),
            TableRow::Footer(cells) => fixed_cells(cells, &widths, Styles::inactive()),
            TableRow::Body(row) => {
                let style = if focused && selected == Some(body_index) {
                    Styles::selected()
                } else {
                    Style::default()
                };
                body_index += 1;
                fixed_cells(
                    &[
                        row.product.clone(),
                        row.component.clone(),
                        format!("[ {} ]", row.remove.label),
                    ],
                    &widths,
                    style,
                )
            }
        };
        items.push(ListItem::new(line));
    }

    let title = format!("Visibility ({})", table.body_len());
    let mut state = ListState::default();
    state.select(selected.map(|i| i + header_count));

    let list = List::new(items).block(table_block(&title, focused));
    f.render_stateful_widget(list, area, &mut state);
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
