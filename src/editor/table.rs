//! Table model the editor renders into
//!
//! A `RowTable` keeps a fixed set of header and footer rows and a body that
//! is thrown away and regenerated on every render. Body rows carry their
//! controls, and every control is bound to the row index it was generated
//! for, so activating it yields a ready-to-dispatch `EditorAction`.

use crate::models::Group;

use super::{EditorAction, ValueField};

/// Placeholder shown for a visibility rule without a component
pub const ANY_COMPONENT: &str = "-- Any --";

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow<R> {
    Header(Vec<String>),
    Body(R),
    Footer(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct RowTable<R> {
    rows: Vec<TableRow<R>>,
    header_rows: usize,
    footer_rows: usize,
}

impl<R> RowTable<R> {
    pub fn new(header: Vec<Vec<String>>, footer: Vec<Vec<String>>) -> Self {
        let header_rows = header.len();
        let footer_rows = footer.len();
        let rows = header
            .into_iter()
            .map(TableRow::Header)
            .chain(footer.into_iter().map(TableRow::Footer))
            .collect();

        Self {
            rows,
            header_rows,
            footer_rows,
        }
    }

    /// Drop every generated row, keeping header and footer
    pub fn clear_body(&mut self) {
        let body_end = self.rows.len() - self.footer_rows;
        self.rows.drain(self.header_rows..body_end);
    }

    /// Insert a body row at body position `index` (clamped to the body end)
    pub fn insert_body(&mut self, index: usize, row: R) {
        let at = self.header_rows + index.min(self.body_len());
        self.rows.insert(at, TableRow::Body(row));
    }

    pub fn body_len(&self) -> usize {
        self.rows.len() - self.header_rows - self.footer_rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TableRow<R>] {
        &self.rows
    }

    pub fn header(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Header(cells) => Some(cells),
            _ => None,
        })
    }

    pub fn body(&self) -> impl Iterator<Item = &R> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Body(row) => Some(row),
            _ => None,
        })
    }

    pub fn footer(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Footer(cells) => Some(cells),
            _ => None,
        })
    }

    pub fn body_row(&self, index: usize) -> Option<&R> {
        self.body().nth(index)
    }
}

/// Text input bound to a value row
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub value: String,
    index: usize,
}

impl TextInput {
    /// Action for the input losing focus with `text` in it
    pub fn on_blur(&self, text: &str) -> EditorAction {
        EditorAction::UpdateValue(self.index, ValueField::Text(text.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Setter group selector bound to a value row
#[derive(Debug, Clone, PartialEq)]
pub struct SelectInput {
    pub options: Vec<SelectOption>,
    pub selected: usize,
    index: usize,
}

impl SelectInput {
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.get(self.selected)
    }

    pub fn on_change(&self, option: usize) -> Option<EditorAction> {
        self.options.get(option).map(|o| {
            EditorAction::UpdateValue(self.index, ValueField::Setter(o.value.clone()))
        })
    }

    /// Change to the option after (or before) the current one, wrapping
    pub fn on_cycle(&self, forward: bool) -> Option<EditorAction> {
        if self.options.is_empty() {
            return None;
        }
        let len = self.options.len();
        let next = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        self.on_change(next)
    }
}

/// Active checkbox bound to a value row
#[derive(Debug, Clone, PartialEq)]
pub struct Checkbox {
    pub checked: bool,
    index: usize,
}

impl Checkbox {
    pub fn on_change(&self, checked: bool) -> EditorAction {
        EditorAction::UpdateValue(self.index, ValueField::Active(checked))
    }

    pub fn on_toggle(&self) -> EditorAction {
        self.on_change(!self.checked)
    }
}

/// Inline action link
#[derive(Debug, Clone, PartialEq)]
pub struct ActionLink {
    pub label: &'static str,
    pub action: EditorAction,
}

impl ActionLink {
    fn new(label: &'static str, action: EditorAction) -> Self {
        Self { label, action }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueRow {
    pub value: TextInput,
    pub setter: SelectInput,
    pub active: Checkbox,
    pub move_up: Option<ActionLink>,
    pub move_down: Option<ActionLink>,
    pub remove: ActionLink,
}

impl ValueRow {
    pub(super) fn build(
        index: usize,
        count: usize,
        value: &crate::models::FlagValue,
        groups: &[Group],
    ) -> Self {
        // the empty option means "no restriction"
        let mut options = vec![SelectOption {
            value: String::new(),
            label: String::new(),
        }];
        options.extend(groups.iter().map(|g| SelectOption {
            value: g.id.clone(),
            label: g.name.clone(),
        }));
        let selected = options
            .iter()
            .position(|o| o.value == value.setter_group_id)
            .unwrap_or(0);

        Self {
            value: TextInput {
                value: value.value.clone(),
                index,
            },
            setter: SelectInput {
                options,
                selected,
                index,
            },
            active: Checkbox {
                checked: value.is_active,
                index,
            },
            move_up: (index > 0)
                .then(|| ActionLink::new("\u{0394}", EditorAction::MoveValueUp(index))),
            move_down: (index + 1 < count)
                .then(|| ActionLink::new("\u{2207}", EditorAction::MoveValueDown(index))),
            remove: ActionLink::new("Remove", EditorAction::RemoveValue(index)),
        }
    }

    /// Actions cell text, with blanks where a move is elided
    pub fn actions_text(&self) -> String {
        let up = self.move_up.as_ref().map_or(" ", |l| l.label);
        let down = self.move_down.as_ref().map_or(" ", |l| l.label);
        format!("[ {} | {} | {} ]", up, down, self.remove.label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityRow {
    pub product: String,
    pub component: String,
    pub remove: ActionLink,
}

impl VisibilityRow {
    pub(super) fn build(index: usize, visibility: &crate::models::FlagVisibility) -> Self {
        let component = if visibility.is_any_component() {
            ANY_COMPONENT.to_string()
        } else {
            visibility.component.clone()
        };

        Self {
            product: visibility.product.clone(),
            component,
            remove: ActionLink::new("Remove", EditorAction::RemoveVisibility(index)),
        }
    }
}
