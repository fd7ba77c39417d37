//! List editor for flag values and flag visibility
//!
//! The editor owns both lists. Every mutation goes through one of its
//! operations and is followed by a full re-render of the affected table.

pub mod table;

use tracing::{debug, info, warn};

use crate::errors::{EditorError, EditorResult};
use crate::fields::trim_value;
use crate::models::{FlagValue, FlagVisibility, Group, Seed};

pub use table::{
    ActionLink, Checkbox, RowTable, SelectInput, SelectOption, TableRow, TextInput, ValueRow,
    VisibilityRow, ANY_COMPONENT,
};

/// Field update of a single flag value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueField {
    /// Value label, trimmed before it is stored
    Text(String),
    /// Setter group id, empty for no restriction
    Setter(String),
    Active(bool),
}

/// Everything a rendered control can ask the editor to do
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    AddValue,
    RemoveValue(usize),
    MoveValueUp(usize),
    MoveValueDown(usize),
    UpdateValue(usize, ValueField),
    AddVisibility { product: String, component: String },
    RemoveVisibility(usize),
}

/// Control the host should focus after the last operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Value(usize),
}

pub struct ListEditor {
    values: Vec<FlagValue>,
    visibility: Vec<FlagVisibility>,
    groups: Vec<Group>,
    value_table: RowTable<ValueRow>,
    visibility_table: RowTable<VisibilityRow>,
    pending_focus: Option<FocusTarget>,
}

impl ListEditor {
    pub fn new(values: Vec<FlagValue>, visibility: Vec<FlagVisibility>, groups: Vec<Group>) -> Self {
        let mut editor = Self {
            values,
            visibility,
            groups,
            value_table: RowTable::new(
                vec![labels(&["Value", "Setter", "Active", "Actions"])],
                vec![labels(&["[ Add Value ]"])],
            ),
            visibility_table: RowTable::new(
                vec![labels(&["Product", "Component", "Actions"])],
                vec![labels(&["[ Add Visibility ]"])],
            ),
            pending_focus: None,
        };
        editor.render_values();
        editor.render_visibility();
        editor
    }

    pub fn from_seed(seed: &Seed) -> Self {
        info!(
            "Editor initialized with {} values, {} visibility rules, {} groups",
            seed.values.len(),
            seed.visibility.len(),
            seed.groups.len()
        );
        Self::new(seed.values.clone(), seed.visibility.clone(), seed.groups.clone())
    }

    pub fn values(&self) -> &[FlagValue] {
        &self.values
    }

    pub fn visibility(&self) -> &[FlagVisibility] {
        &self.visibility
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn value_table(&self) -> &RowTable<ValueRow> {
        &self.value_table
    }

    pub fn visibility_table(&self) -> &RowTable<VisibilityRow> {
        &self.visibility_table
    }

    /// Focus request left by the last operation, consumed by the caller
    pub fn take_focus(&mut self) -> Option<FocusTarget> {
        self.pending_focus.take()
    }

    /// Perform an action produced by a rendered control
    pub fn dispatch(&mut self, action: EditorAction) -> EditorResult<()> {
        debug!("Dispatching {:?}", action);
        match action {
            EditorAction::AddValue => self.add_value(),
            EditorAction::RemoveValue(index) => self.remove_value(index),
            EditorAction::MoveValueUp(index) => self.move_value_up(index),
            EditorAction::MoveValueDown(index) => self.move_value_down(index),
            EditorAction::UpdateValue(index, field) => self.update_value_field(index, field),
            EditorAction::AddVisibility { product, component } => {
                return self.add_visibility(&product, &component);
            }
            EditorAction::RemoveVisibility(index) => self.remove_visibility(index),
        }
        Ok(())
    }

    // values

    pub fn add_value(&mut self) {
        let index = self.values.len();
        self.values.push(FlagValue::new());
        self.render_values();
        self.pending_focus = Some(FocusTarget::Value(index));
    }

    pub fn remove_value(&mut self, index: usize) {
        if index >= self.values.len() {
            return;
        }
        let removed = self.values.remove(index);
        debug!("Removed value '{}' at {}", removed.value, index);
        self.render_values();
    }

    pub fn move_value_up(&mut self, index: usize) {
        if index == 0 || index >= self.values.len() {
            return;
        }
        self.values.swap(index, index - 1);
        self.render_values();
    }

    pub fn move_value_down(&mut self, index: usize) {
        if index + 1 >= self.values.len() {
            return;
        }
        self.values.swap(index, index + 1);
        self.render_values();
    }

    pub fn update_value_field(&mut self, index: usize, field: ValueField) {
        let Some(value) = self.values.get_mut(index) else {
            return;
        };
        match field {
            ValueField::Text(text) => value.value = trim_value(&text),
            ValueField::Setter(group_id) => value.setter_group_id = group_id,
            ValueField::Active(active) => value.is_active = active,
        }
        self.render_values();
    }

    /// Rebuild the values table body from the list
    pub fn render_values(&mut self) {
        self.value_table.clear_body();
        let count = self.values.len();
        for (i, value) in self.values.iter().enumerate() {
            self.value_table
                .insert_body(i, ValueRow::build(i, count, value, &self.groups));
        }
    }

    // visibility

    pub fn add_visibility(&mut self, product: &str, component: &str) -> EditorResult<()> {
        if product.is_empty() {
            return Err(EditorError::MissingProduct);
        }
        let visibility = FlagVisibility::new(product, component);
        if self.visibility.iter().any(|v| v.same_scope(&visibility)) {
            warn!(
                "Adding duplicate visibility rule for {} / {}",
                product,
                if component.is_empty() { ANY_COMPONENT } else { component }
            );
        }
        self.visibility.push(visibility);
        self.render_visibility();
        Ok(())
    }

    pub fn remove_visibility(&mut self, index: usize) {
        if index >= self.visibility.len() {
            return;
        }
        self.visibility.remove(index);
        self.render_visibility();
    }

    /// Rebuild the visibility table body from the list
    pub fn render_visibility(&mut self) {
        self.visibility_table.clear_body();
        for (i, visibility) in self.visibility.iter().enumerate() {
            self.visibility_table
                .insert_body(i, VisibilityRow::build(i, visibility));
        }
    }
}

fn labels(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(id: u64, label: &str) -> FlagValue {
        FlagValue {
            id,
            value: label.to_string(),
            setter_group_id: String::new(),
            is_active: true,
        }
    }

    fn editor() -> ListEditor {
        ListEditor::new(
            vec![value(1, "---"), value(2, "affected"), value(3, "fixed")],
            vec![FlagVisibility::new("Firefox", "General")],
            vec![Group::new("12", "editbugs"), Group::new("13", "qa")],
        )
    }

    fn labels_of(editor: &ListEditor) -> Vec<String> {
        editor.values().iter().map(|v| v.value.clone()).collect()
    }

    #[test]
    fn test_add_value_appends_default_and_requests_focus() {
        let mut editor = editor();
        editor.add_value();

        assert_eq!(editor.values().len(), 4);
        assert_eq!(editor.values()[3], FlagValue::new());
        assert_eq!(editor.take_focus(), Some(FocusTarget::Value(3)));
        assert_eq!(editor.take_focus(), None);
        assert_eq!(editor.value_table().body_len(), 4);
    }

    #[test]
    fn test_remove_value_preserves_order() {
        let mut editor = editor();
        editor.remove_value(1);
        assert_eq!(labels_of(&editor), vec!["---", "fixed"]);

        editor.remove_value(7);
        assert_eq!(editor.values().len(), 2);
    }

    #[test]
    fn test_move_up_and_down_are_inverse() {
        let mut editor = editor();
        let original = labels_of(&editor);

        editor.move_value_up(2);
        assert_eq!(labels_of(&editor), vec!["---", "fixed", "affected"]);
        editor.move_value_down(1);
        assert_eq!(labels_of(&editor), original);

        editor.move_value_down(0);
        editor.move_value_up(1);
        assert_eq!(labels_of(&editor), original);
    }

    #[test]
    fn test_moves_at_boundaries_are_noops() {
        let mut editor = editor();
        let original = labels_of(&editor);
        editor.move_value_up(0);
        editor.move_value_down(2);
        editor.move_value_up(9);
        editor.move_value_down(9);
        assert_eq!(labels_of(&editor), original);
    }

    #[test]
    fn test_update_value_field() {
        let mut editor = editor();
        editor.update_value_field(0, ValueField::Text("  foo  ".to_string()));
        editor.update_value_field(0, ValueField::Setter("13".to_string()));
        editor.update_value_field(0, ValueField::Active(false));
        editor.update_value_field(5, ValueField::Active(false));

        let first = &editor.values()[0];
        assert_eq!(first.value, "foo");
        assert_eq!(first.setter_group_id, "13");
        assert!(!first.is_active);

        let row = editor.value_table().body_row(0).unwrap();
        assert_eq!(row.value.value, "foo");
        assert_eq!(row.setter.selected_option().unwrap().label, "qa");
        assert!(!row.active.checked);
    }

    #[test]
    fn test_value_rows_elide_boundary_moves() {
        let editor = editor();
        let rows: Vec<&ValueRow> = editor.value_table().body().collect();

        assert!(rows[0].move_up.is_none());
        assert!(rows[0].move_down.is_some());
        assert!(rows[1].move_up.is_some() && rows[1].move_down.is_some());
        assert!(rows[2].move_down.is_none());
        assert_eq!(rows[2].actions_text(), "[ \u{0394} |   | Remove ]");
        assert_eq!(rows[0].setter.options.len(), 3);
        assert_eq!(rows[0].setter.selected, 0);
    }

    #[test]
    fn test_row_controls_dispatch_their_bound_index() {
        let mut editor = editor();
        let action = editor.value_table().body_row(2).unwrap().remove.action.clone();
        assert_eq!(action, EditorAction::RemoveValue(2));
        editor.dispatch(action).unwrap();
        assert_eq!(labels_of(&editor), vec!["---", "affected"]);

        let blur = editor.value_table().body_row(1).unwrap().value.on_blur(" gone ");
        editor.dispatch(blur).unwrap();
        assert_eq!(editor.values()[1].value, "gone");

        let toggle = editor.value_table().body_row(0).unwrap().active.on_toggle();
        editor.dispatch(toggle).unwrap();
        assert!(!editor.values()[0].is_active);
    }

    #[test]
    fn test_render_keeps_fixed_rows() {
        let mut editor = editor();
        assert_eq!(editor.value_table().len(), 5);
        editor.remove_value(0);
        editor.remove_value(0);
        editor.remove_value(0);
        assert_eq!(editor.value_table().len(), 2);
        assert_eq!(editor.value_table().header().count(), 1);
        assert_eq!(editor.value_table().footer().count(), 1);
    }

    #[test]
    fn test_add_visibility_requires_product() {
        let mut editor = editor();
        let err = editor.add_visibility("", "General").unwrap_err();
        assert!(matches!(err, EditorError::MissingProduct));
        assert_eq!(err.to_string(), "Please select a product.");
        assert_eq!(editor.visibility().len(), 1);
        assert_eq!(editor.visibility_table().body_len(), 1);
    }

    #[test]
    fn test_add_visibility_any_component() {
        let mut editor = editor();
        editor.add_visibility("Firefox", "").unwrap();

        assert_eq!(editor.visibility()[1], FlagVisibility::new("Firefox", ""));
        let row = editor.visibility_table().body_row(1).unwrap();
        assert_eq!(row.product, "Firefox");
        assert_eq!(row.component, ANY_COMPONENT);
        assert_eq!(row.remove.action, EditorAction::RemoveVisibility(1));
    }

    #[test]
    fn test_duplicate_visibility_is_kept() {
        let mut editor = editor();
        editor.add_visibility("Firefox", "General").unwrap();
        assert_eq!(editor.visibility().len(), 2);
    }

    #[test]
    fn test_remove_visibility() {
        let mut editor = editor();
        editor.remove_visibility(3);
        assert_eq!(editor.visibility().len(), 1);
        editor.remove_visibility(0);
        assert!(editor.visibility().is_empty());
        assert_eq!(editor.visibility_table().body_len(), 0);
    }

    #[test]
    fn test_dispatch_add_visibility_propagates_validation() {
        let mut editor = editor();
        let result = editor.dispatch(EditorAction::AddVisibility {
            product: String::new(),
            component: String::new(),
        });
        assert!(result.unwrap_err().is_validation());
    }
}
