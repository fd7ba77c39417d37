//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{error, info, warn};

use super::components::{Form, FormField, FormFieldType, RowCursor, StatusDisplay};
use super::handlers::CommonKeyHandler;
use super::traits::{FormHandler, Navigable, ScreenAction};
use super::ui::{centered_rect, render_value_table, render_visibility_table, Styles};
use crate::config::Config;
use crate::editor::{EditorAction, FocusTarget, ListEditor, TextInput, ValueRow};
use crate::errors::EditorError;
use crate::fields::ProductSelector;
use crate::models::{FlagProperties, FlagVisibility, Seed};
use crate::submit::encode_form;

const NAME_FIELD: usize = 0;
const DESC_FIELD: usize = 1;
const SORT_FIELD: usize = 2;

const PRODUCT_FIELD: usize = 0;
const COMPONENT_FIELD: usize = 1;

/// Editor panes, cycled with Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Properties,
    Values,
    Visibility,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Properties => Pane::Values,
            Pane::Values => Pane::Visibility,
            Pane::Visibility => Pane::Properties,
        }
    }

    fn previous(self) -> Self {
        match self {
            Pane::Properties => Pane::Visibility,
            Pane::Values => Pane::Properties,
            Pane::Visibility => Pane::Values,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Pane::Properties => "Properties",
            Pane::Values => "Values",
            Pane::Visibility => "Visibility",
        }
    }
}

/// Editable column of a value row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueColumn {
    Value,
    Setter,
    Active,
}

impl ValueColumn {
    fn next(self) -> Self {
        match self {
            ValueColumn::Value => ValueColumn::Setter,
            ValueColumn::Setter | ValueColumn::Active => ValueColumn::Active,
        }
    }

    fn previous(self) -> Self {
        match self {
            ValueColumn::Active => ValueColumn::Setter,
            ValueColumn::Setter | ValueColumn::Value => ValueColumn::Value,
        }
    }
}

/// Focus inside the visibility pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFocus {
    Product,
    Component,
    Rules,
}

/// Value cell being typed into, with the input it was opened from
pub struct InlineEdit {
    pub input: TextInput,
    pub field: FormField,
}

/// Main TUI application state
pub struct App {
    pub config: Config,
    pub pane: Pane,

    /// `None` when initialization failed; the app then only displays why
    pub editor: Option<ListEditor>,
    pub init_error: Option<String>,

    pub properties: Form,
    pub selector: ProductSelector,
    pub scope_form: Form,
    pub visibility_focus: VisibilityFocus,

    pub value_cursor: RowCursor,
    pub value_column: ValueColumn,
    pub rule_cursor: RowCursor,
    pub editing: Option<InlineEdit>,

    /// Blocking message, dismissed with Enter or Esc
    pub alert: Option<String>,
    pub status: StatusDisplay,
    pub show_help_popup: bool,
    pub should_quit: bool,
    /// Encoded form body once the user submitted
    pub submitted: Option<String>,
}

impl App {
    /// Create the application, loading the seed named by the configuration.
    ///
    /// A seed that cannot be loaded leaves the app running without an editor.
    pub fn new(config: Config) -> Self {
        match config.load_seed() {
            Ok(seed) => Self::with_seed(config, seed),
            Err(err) => Self::unavailable(config, err),
        }
    }

    pub fn with_seed(config: Config, seed: Seed) -> Self {
        let editor = ListEditor::from_seed(&seed);
        let mut app = Self::build(config, &seed, Some(editor));
        app.status.set_info("Ready".to_string());
        app
    }

    pub fn unavailable(config: Config, err: EditorError) -> Self {
        error!("Editor initialization failed: {}", err);
        let mut app = Self::build(config, &Seed::default(), None);
        app.status.set_error(format!("Editor unavailable: {}", err));
        app.init_error = Some(err.to_string());
        app
    }

    fn build(config: Config, seed: &Seed, editor: Option<ListEditor>) -> Self {
        let selector = ProductSelector::new(seed.catalog.clone());

        let properties = Form::new(vec![
            FormField::new("Name", FormFieldType::Text).with_value(&seed.properties.name),
            FormField::new("Description", FormFieldType::Text)
                .with_value(&seed.properties.description),
            FormField::new("Sort Key", FormFieldType::Integer)
                .with_value(&seed.properties.sortkey)
                .with_placeholder("0"),
        ]);

        let scope_form = Form::new(vec![
            FormField::new("Product", FormFieldType::Select)
                .with_options(selector.product_options())
                .with_placeholder("-- select a product --"),
            FormField::new("Component", FormFieldType::Select).with_placeholder(
                crate::editor::ANY_COMPONENT,
            ),
        ]);

        let value_count = editor.as_ref().map_or(0, |e| e.values().len());
        let rule_count = editor.as_ref().map_or(0, |e| e.visibility().len());

        let mut app = Self {
            config,
            pane: Pane::Values,
            editor,
            init_error: None,
            properties,
            selector,
            scope_form,
            visibility_focus: VisibilityFocus::Product,
            value_cursor: RowCursor::new(value_count),
            value_column: ValueColumn::Value,
            rule_cursor: RowCursor::new(rule_count),
            editing: None,
            alert: None,
            status: StatusDisplay::new().with_timestamps(),
            show_help_popup: false,
            should_quit: false,
            submitted: None,
        };
        app.sync_focus();
        app
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Current values of the free-standing flag fields
    pub fn flag_properties(&self) -> FlagProperties {
        FlagProperties {
            name: self.properties.value(NAME_FIELD).to_string(),
            description: self.properties.value(DESC_FIELD).to_string(),
            sortkey: self.properties.value(SORT_FIELD).to_string(),
        }
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(ScreenAction::Quit) = CommonKeyHandler::handle_global_keys(key) {
            self.should_quit = true;
            return Ok(());
        }

        // the alert blocks everything until acknowledged
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return Ok(());
        }

        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = true;
                return Ok(());
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit();
                return Ok(());
            }
            _ => {}
        }

        if self.editor.is_none() {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.should_quit = true;
            }
            return Ok(());
        }

        if self.editing.is_some() {
            self.handle_inline_edit(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.switch_pane(self.pane.next()),
            KeyCode::BackTab => self.switch_pane(self.pane.previous()),
            _ => match self.pane {
                Pane::Properties => self.handle_properties_key(key),
                Pane::Values => self.handle_values_key(key),
                Pane::Visibility => self.handle_visibility_key(key),
            },
        }

        Ok(())
    }

    fn switch_pane(&mut self, pane: Pane) {
        if self.pane == Pane::Properties {
            self.blur_property();
        }
        self.pane = pane;
        self.sync_focus();
    }

    /// Apply the blur behavior of the focused property field
    fn blur_property(&mut self) {
        if let Some((index, value)) = self.properties.blur_current() {
            info!("Property field {} set to '{}'", index, value);
        }
    }

    fn sync_focus(&mut self) {
        if self.pane == Pane::Properties {
            self.properties.focus();
        } else {
            for field in &mut self.properties.fields {
                field.set_focus(false);
            }
        }

        let scope_field = match (self.pane, self.visibility_focus) {
            (Pane::Visibility, VisibilityFocus::Product) => Some(PRODUCT_FIELD),
            (Pane::Visibility, VisibilityFocus::Component) => Some(COMPONENT_FIELD),
            _ => None,
        };
        for (i, field) in self.scope_form.fields.iter_mut().enumerate() {
            field.set_focus(Some(i) == scope_field);
        }
    }

    fn apply_screen_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::SetStatus(message) => self.status.set_info(message),
            ScreenAction::None => {}
        }
    }

    // properties pane

    fn handle_properties_key(&mut self, key: KeyEvent) {
        let step = self.config.sort_step;
        match key.code {
            KeyCode::PageUp | KeyCode::PageDown
                if self.properties.get_current_field() == SORT_FIELD =>
            {
                let amount = if key.code == KeyCode::PageUp {
                    step
                } else {
                    step.saturating_neg()
                };
                if let Some(field) = self.properties.get_field_mut(SORT_FIELD) {
                    field.increment(amount);
                }
            }
            KeyCode::Enter => self.blur_property(),
            _ => {
                if let Some(action) = CommonKeyHandler::handle_form_keys(&mut self.properties, key) {
                    self.apply_screen_action(action);
                }
            }
        }
    }

    // values pane

    fn selected_value_row(&self) -> Option<&ValueRow> {
        let index = self.value_cursor.selected()?;
        self.editor.as_ref()?.value_table().body_row(index)
    }

    fn handle_values_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('a') => self.dispatch(EditorAction::AddValue),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(action) = self.selected_value_row().map(|r| r.remove.action.clone()) {
                    self.dispatch(action);
                }
            }
            KeyCode::Char('K') => self.move_selected_value(true),
            KeyCode::Char('J') => self.move_selected_value(false),
            KeyCode::Up if shift => self.move_selected_value(true),
            KeyCode::Down if shift => self.move_selected_value(false),
            KeyCode::Left => self.value_column = self.value_column.previous(),
            KeyCode::Right => self.value_column = self.value_column.next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_value_cell(key.code == KeyCode::Enter),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help_popup = true,
            _ => {
                if let Some(action) =
                    CommonKeyHandler::handle_navigation_keys(&mut self.value_cursor, key)
                {
                    self.apply_screen_action(action);
                }
            }
        }
    }

    fn move_selected_value(&mut self, up: bool) {
        let Some(row) = self.selected_value_row() else {
            return;
        };
        let link = if up { &row.move_up } else { &row.move_down };
        let Some(action) = link.as_ref().map(|l| l.action.clone()) else {
            return;
        };
        let target = match action {
            EditorAction::MoveValueUp(i) => i.saturating_sub(1),
            EditorAction::MoveValueDown(i) => i + 1,
            _ => return,
        };
        self.dispatch(action);
        self.value_cursor.select(target);
    }

    fn activate_value_cell(&mut self, enter: bool) {
        let Some(row) = self.selected_value_row() else {
            return;
        };
        let action = match self.value_column {
            ValueColumn::Value if enter => {
                let input = row.value.clone();
                self.start_editing(input);
                return;
            }
            ValueColumn::Value => return,
            ValueColumn::Setter => row.setter.on_cycle(true),
            ValueColumn::Active => Some(row.active.on_toggle()),
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    fn start_editing(&mut self, input: TextInput) {
        let mut field = FormField::new("Value", FormFieldType::Text).with_value(&input.value);
        field.set_focus(true);
        self.editing = Some(InlineEdit { input, field });
    }

    fn handle_inline_edit(&mut self, key: KeyEvent) {
        let Some(edit) = self.editing.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.commit_inline_edit();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                edit.field.insert_char(c)
            }
            KeyCode::Backspace => edit.field.delete_char(),
            KeyCode::Delete => edit.field.delete_char_forward(),
            KeyCode::Left => edit.field.move_cursor_left(),
            KeyCode::Right => edit.field.move_cursor_right(),
            KeyCode::Home => edit.field.cursor_position = 0,
            KeyCode::End => edit.field.cursor_position = edit.field.value.chars().count(),
            _ => {}
        }
    }

    /// Blur of the inline value input
    fn commit_inline_edit(&mut self) {
        if let Some(mut edit) = self.editing.take() {
            let text = edit.field.blur();
            self.dispatch(edit.input.on_blur(&text));
        }
    }

    // visibility pane

    fn handle_visibility_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help_popup = true;
                return;
            }
            KeyCode::Char('a') => {
                self.add_visibility();
                return;
            }
            _ => {}
        }

        match self.visibility_focus {
            VisibilityFocus::Product | VisibilityFocus::Component => match key.code {
                KeyCode::Left => self.cycle_scope(false),
                KeyCode::Right => self.cycle_scope(true),
                KeyCode::Enter => self.add_visibility(),
                KeyCode::Up => self.focus_visibility(VisibilityFocus::Product),
                KeyCode::Down if self.visibility_focus == VisibilityFocus::Product => {
                    self.focus_visibility(VisibilityFocus::Component)
                }
                KeyCode::Down if self.rule_cursor.get_item_count() > 0 => {
                    self.focus_visibility(VisibilityFocus::Rules)
                }
                _ => {}
            },
            VisibilityFocus::Rules => match key.code {
                KeyCode::Up if self.rule_cursor.selected().unwrap_or(0) == 0 => {
                    self.focus_visibility(VisibilityFocus::Component)
                }
                KeyCode::Char('d') | KeyCode::Delete | KeyCode::Enter => {
                    let action = self.rule_cursor.selected().and_then(|i| {
                        self.editor
                            .as_ref()?
                            .visibility_table()
                            .body_row(i)
                            .map(|r| r.remove.action.clone())
                    });
                    if let Some(action) = action {
                        self.dispatch(action);
                    }
                    if self.rule_cursor.get_item_count() == 0 {
                        self.focus_visibility(VisibilityFocus::Component);
                    }
                }
                _ => {
                    if let Some(action) =
                        CommonKeyHandler::handle_navigation_keys(&mut self.rule_cursor, key)
                    {
                        self.apply_screen_action(action);
                    }
                }
            },
        }
    }

    fn focus_visibility(&mut self, focus: VisibilityFocus) {
        self.visibility_focus = focus;
        self.sync_focus();
    }

    /// Change handler of the product and component selectors
    fn cycle_scope(&mut self, forward: bool) {
        match self.visibility_focus {
            VisibilityFocus::Product => {
                let Some(field) = self.scope_form.get_field_mut(PRODUCT_FIELD) else {
                    return;
                };
                if field.cycle_option(forward) {
                    let product = field.value.clone();
                    self.selector.select_product(&product);
                    let options = self.selector.component_options().to_vec();
                    if let Some(component) = self.scope_form.get_field_mut(COMPONENT_FIELD) {
                        component.set_options(options);
                    }
                }
            }
            VisibilityFocus::Component => {
                let Some(field) = self.scope_form.get_field_mut(COMPONENT_FIELD) else {
                    return;
                };
                if field.cycle_option(forward) {
                    let component = field.value.clone();
                    self.selector.select_component(&component);
                }
            }
            VisibilityFocus::Rules => {}
        }
    }

    fn add_visibility(&mut self) {
        let rule = FlagVisibility::new(self.selector.product(), self.selector.component());
        let duplicate = self
            .editor
            .as_ref()
            .is_some_and(|e| e.visibility().iter().any(|v| v.same_scope(&rule)));

        self.dispatch(EditorAction::AddVisibility {
            product: rule.product.clone(),
            component: rule.component.clone(),
        });

        if duplicate && self.alert.is_none() {
            self.status
                .set_warning(format!("{} was already visible, rule added twice", rule.product));
        }
    }

    // editor plumbing

    /// Run an editor action and bring cursors, focus and messages up to date
    fn dispatch(&mut self, action: EditorAction) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let description = describe(&action);

        match editor.dispatch(action) {
            Ok(()) => self.status.set_success(description),
            Err(err) if err.is_validation() => {
                warn!("Validation failed: {}", err);
                if matches!(err, EditorError::MissingProduct) {
                    if let Some(field) = self.scope_form.get_field_mut(PRODUCT_FIELD) {
                        field.validation_error = Some(err.to_string());
                    }
                }
                self.alert = Some(err.to_string());
            }
            Err(err) => {
                error!("Editor action failed: {}", err);
                self.status.set_error(err.to_string());
            }
        }

        self.value_cursor.set_count(editor.values().len());
        self.rule_cursor.set_count(editor.visibility().len());
        let focus = editor.take_focus();

        if let Some(FocusTarget::Value(index)) = focus {
            self.pane = Pane::Values;
            self.value_column = ValueColumn::Value;
            self.value_cursor.select(index);
            self.sync_focus();
            let input = self
                .editor
                .as_ref()
                .and_then(|e| e.value_table().body_row(index))
                .map(|row| row.value.clone());
            if let Some(input) = input {
                self.start_editing(input);
            }
        }
    }

    fn submit(&mut self) {
        self.commit_inline_edit();
        if self.pane == Pane::Properties {
            self.blur_property();
        }

        let Some(editor) = self.editor.as_ref() else {
            self.status
                .set_error("Editor unavailable, nothing to submit".to_string());
            return;
        };

        match encode_form(&self.flag_properties(), editor) {
            Ok(body) => {
                info!("Form submitted");
                self.submitted = Some(body);
                self.should_quit = true;
            }
            Err(err) => {
                error!("Failed to encode form: {}", err);
                self.status.set_error(err.to_string());
            }
        }
    }

    // drawing

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(50),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_properties(f, chunks[0]);

        match self.editor.as_ref() {
            Some(editor) => {
                let cursor = self.value_cursor.selected().map(|i| (i, self.value_column));
                render_value_table(
                    f,
                    chunks[1],
                    editor.value_table(),
                    cursor,
                    self.editing.as_ref().map(|e| &e.field),
                    self.pane == Pane::Values,
                );
                self.draw_visibility(f, chunks[2], editor);
            }
            None => self.draw_unavailable(f, chunks[1].union(chunks[2])),
        }

        let title = format!(
            "flagedit - {} | Tab: Pane | Ctrl+S: Submit | Ctrl+C: Quit | F1: Help",
            self.pane.title()
        );
        self.status.render_with_title(f, chunks[3], &title);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
        if let Some(message) = &self.alert {
            draw_alert(f, size, message);
        }
    }

    fn draw_properties(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(45),
                Constraint::Percentage(20),
            ])
            .split(area);

        for (i, field) in self.properties.fields.iter().enumerate() {
            field.render(f, columns[i]);
        }
    }

    fn draw_visibility(&self, f: &mut Frame, area: Rect, editor: &ListEditor) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        let selectors = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        for (i, field) in self.scope_form.fields.iter().enumerate() {
            field.render(f, selectors[i]);
        }

        render_visibility_table(
            f,
            rows[1],
            editor.visibility_table(),
            self.rule_cursor.selected(),
            self.pane == Pane::Visibility && self.visibility_focus == VisibilityFocus::Rules,
        );
    }

    fn draw_unavailable(&self, f: &mut Frame, area: Rect) {
        let message = format!(
            "The editor could not be initialized.\n\n{}\n\nPress q to quit.",
            self.init_error.as_deref().unwrap_or("unknown error")
        );
        let paragraph = Paragraph::new(message)
            .style(Styles::error())
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Unavailable").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Tab / Shift+Tab - Next / previous pane\n\
            Ctrl+S - Submit\n\
            Ctrl+C - Quit\n\
            F1 - Toggle this help\n\n";

        let pane_help = match self.pane {
            Pane::Properties => {
                "Properties:\n\
                \u{2191}/\u{2193} - Previous / next field\n\
                Type to edit, Enter to apply\n\
                PgUp/PgDn - Increment / decrement sort key"
            }
            Pane::Values => {
                "Values:\n\
                \u{2191}/\u{2193} - Select row\n\
                \u{2190}/\u{2192} - Select column\n\
                Enter - Edit value / cycle setter / toggle active\n\
                Space - Cycle setter / toggle active\n\
                a - Add value\n\
                d - Remove value\n\
                K / Shift+\u{2191} - Move up\n\
                J / Shift+\u{2193} - Move down\n\
                q - Quit"
            }
            Pane::Visibility => {
                "Visibility:\n\
                \u{2190}/\u{2192} - Change product / component\n\
                Enter / a - Add rule\n\
                \u{2193} - Into the rule list\n\
                d - Remove rule\n\
                q - Quit"
            }
        };

        let recent = self.status.recent_lines(5);
        if recent.is_empty() {
            format!("{}{}", global_help, pane_help)
        } else {
            format!("{}{}\n\nRecent:\n{}", global_help, pane_help, recent.join("\n"))
        }
    }
}

fn draw_alert(f: &mut Frame, area: Rect, message: &str) {
    let popup_area = centered_rect(50, 25, area);
    f.render_widget(Clear, popup_area);

    let alert = Paragraph::new(format!("{}\n\n[ OK ] (Enter)", message))
        .style(Styles::error())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Alert")
                .borders(Borders::ALL)
                .border_style(Styles::error()),
        );
    f.render_widget(alert, popup_area);
}

fn describe(action: &EditorAction) -> String {
    match action {
        EditorAction::AddValue => "Added value".to_string(),
        EditorAction::RemoveValue(i) => format!("Removed value {}", i + 1),
        EditorAction::MoveValueUp(i) => format!("Moved value {} up", i + 1),
        EditorAction::MoveValueDown(i) => format!("Moved value {} down", i + 1),
        EditorAction::UpdateValue(i, _) => format!("Updated value {}", i + 1),
        EditorAction::AddVisibility { product, component } if component.is_empty() => {
            format!("Added visibility for {}", product)
        }
        EditorAction::AddVisibility { product, component } => {
            format!("Added visibility for {} / {}", product, component)
        }
        EditorAction::RemoveVisibility(i) => format!("Removed visibility rule {}", i + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, FlagValue, FlagVisibility, Group, Product};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn seed() -> Seed {
        Seed {
            properties: FlagProperties {
                name: "status-firefox".to_string(),
                description: "Status".to_string(),
                sortkey: "10".to_string(),
            },
            values: vec![
                FlagValue {
                    id: 1,
                    value: "---".to_string(),
                    setter_group_id: String::new(),
                    is_active: true,
                },
                FlagValue {
                    id: 2,
                    value: "fixed".to_string(),
                    setter_group_id: "12".to_string(),
                    is_active: true,
                },
            ],
            visibility: vec![FlagVisibility::new("Core", "DOM")],
            groups: vec![Group::new("12", "editbugs")],
            catalog: Catalog::new(vec![Product {
                name: "Firefox".to_string(),
                components: vec!["General".to_string()],
            }]),
        }
    }

    fn app() -> App {
        App::with_seed(Config::default(), seed())
    }

    async fn press(app: &mut App, keys: &[KeyEvent]) {
        for k in keys {
            app.handle_key_event(*k).await.unwrap();
        }
    }

    fn editor(app: &App) -> &ListEditor {
        app.editor.as_ref().unwrap()
    }

    #[tokio::test]
    async fn test_add_value_focuses_new_row_and_commits_trimmed() {
        let mut app = app();
        press(&mut app, &[key(KeyCode::Char('a'))]).await;
        assert_eq!(editor(&app).values().len(), 3);
        assert_eq!(app.value_cursor.selected(), Some(2));
        assert!(app.editing.is_some());

        for c in "  wontfix ".chars() {
            press(&mut app, &[key(KeyCode::Char(c))]).await;
        }
        press(&mut app, &[key(KeyCode::Enter)]).await;

        assert!(app.editing.is_none());
        assert_eq!(editor(&app).values()[2].value, "wontfix");
        assert_eq!(editor(&app).values()[2].id, 0);
    }

    #[tokio::test]
    async fn test_move_keys_follow_the_row() {
        let mut app = app();
        press(&mut app, &[key(KeyCode::Char('J'))]).await;
        assert_eq!(editor(&app).values()[1].value, "---");
        assert_eq!(app.value_cursor.selected(), Some(1));

        // bottom row has no move-down link
        press(&mut app, &[key(KeyCode::Char('J'))]).await;
        assert_eq!(editor(&app).values()[1].value, "---");

        press(&mut app, &[KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)]).await;
        assert_eq!(editor(&app).values()[0].value, "---");
        assert_eq!(app.value_cursor.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_setter_and_active_cells() {
        let mut app = app();
        press(&mut app, &[key(KeyCode::Right), key(KeyCode::Enter)]).await;
        assert_eq!(editor(&app).values()[0].setter_group_id, "12");

        press(&mut app, &[key(KeyCode::Right), key(KeyCode::Char(' '))]).await;
        assert!(!editor(&app).values()[0].is_active);
    }

    #[tokio::test]
    async fn test_remove_value() {
        let mut app = app();
        press(&mut app, &[key(KeyCode::Down), key(KeyCode::Char('d'))]).await;
        assert_eq!(editor(&app).values().len(), 1);
        assert_eq!(app.value_cursor.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_add_visibility_without_product_raises_alert() {
        let mut app = app();
        press(&mut app, &[key(KeyCode::Tab), key(KeyCode::Enter)]).await;
        assert_eq!(app.pane, Pane::Visibility);
        assert_eq!(app.alert.as_deref(), Some("Please select a product."));
        assert_eq!(editor(&app).visibility().len(), 1);

        // blocked until dismissed
        press(&mut app, &[key(KeyCode::Char('a'))]).await;
        assert_eq!(editor(&app).visibility().len(), 1);
        press(&mut app, &[key(KeyCode::Esc)]).await;
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_add_visibility_for_any_component() {
        let mut app = app();
        press(&mut app, &[key(KeyCode::Tab), key(KeyCode::Right)]).await;
        assert_eq!(app.selector.product(), "Firefox");
        assert_eq!(app.scope_form.get_field(COMPONENT_FIELD).unwrap().options, ["", "General"]);

        press(&mut app, &[key(KeyCode::Enter)]).await;
        assert_eq!(editor(&app).visibility()[1], FlagVisibility::new("Firefox", ""));
        let row = editor(&app).visibility_table().body_row(1).unwrap();
        assert_eq!(row.component, crate::editor::ANY_COMPONENT);

        // back to the empty product clears the component choices
        press(&mut app, &[key(KeyCode::Left)]).await;
        assert_eq!(app.selector.product(), "");
        assert!(app.scope_form.get_field(COMPONENT_FIELD).unwrap().options.is_empty());
    }

    #[tokio::test]
    async fn test_remove_visibility_rule() {
        let mut app = app();
        press(
            &mut app,
            &[
                key(KeyCode::Tab),
                key(KeyCode::Down),
                key(KeyCode::Down),
                key(KeyCode::Char('d')),
            ],
        )
        .await;
        assert!(editor(&app).visibility().is_empty());
        assert_eq!(app.visibility_focus, VisibilityFocus::Component);
    }

    #[tokio::test]
    async fn test_properties_blur_and_submit() {
        let mut app = app();
        press(
            &mut app,
            &[key(KeyCode::BackTab), key(KeyCode::Char(' ')), key(KeyCode::Down)],
        )
        .await;
        assert_eq!(app.flag_properties().name, "status-firefox");

        press(&mut app, &[key(KeyCode::Down)]).await;
        for c in "abc".chars() {
            press(&mut app, &[key(KeyCode::Char(c))]).await;
        }
        press(&mut app, &[ctrl('s')]).await;

        assert_eq!(app.flag_properties().sortkey, "10");
        assert!(app.should_quit);
        let body = app.submitted.as_deref().unwrap();
        assert!(body.contains("flag_sort=10&"));
        assert!(body.contains("flag_name=status-firefox&"));
    }

    #[tokio::test]
    async fn test_sort_key_increment() {
        let mut app = app();
        press(
            &mut app,
            &[
                key(KeyCode::BackTab),
                key(KeyCode::Down),
                key(KeyCode::Down),
                key(KeyCode::PageUp),
                key(KeyCode::PageUp),
                key(KeyCode::PageDown),
            ],
        )
        .await;
        assert_eq!(app.flag_properties().sortkey, "11");
    }

    #[tokio::test]
    async fn test_unavailable_editor_ignores_edits() {
        let err = EditorError::MissingProduct;
        let mut app = App::unavailable(Config::default(), err);
        assert!(app.init_error.is_some());

        press(&mut app, &[key(KeyCode::Char('a')), ctrl('s')]).await;
        assert!(app.editor.is_none());
        assert!(app.submitted.is_none());
        assert!(!app.should_quit);

        press(&mut app, &[key(KeyCode::Char('q'))]).await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_most_negative_sort_step_saturates() {
        let config = Config {
            sort_step: i64::MIN,
            ..Config::default()
        };
        let mut app = App::with_seed(config, seed());
        press(
            &mut app,
            &[
                key(KeyCode::BackTab),
                key(KeyCode::Down),
                key(KeyCode::Down),
                key(KeyCode::PageDown),
            ],
        )
        .await;
        assert_eq!(app.flag_properties().sortkey, i64::MAX.to_string());
    }

    #[test]
    fn test_new_with_missing_seed_degrades() {
        let config = Config::default().with_seed_path(Some("/nonexistent/flag.json".into()));
        let app = App::new(config);
        assert!(app.editor.is_none());
        assert!(app.init_error.as_deref().unwrap().contains("Failed to read seed file"));
    }

    #[test]
    fn test_new_with_malformed_seed_degrades() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "values": [ {{ "value": "---" "#).unwrap();
        let config = Config::default().with_seed_path(Some(file.path().to_path_buf()));

        let app = App::new(config);
        assert!(app.editor.is_none());
        assert!(app.init_error.as_deref().unwrap().contains("Failed to parse seed file"));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = app;
        terminal.draw(|f| app.draw(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("could not be initialized"));
    }

    #[test]
    fn test_new_with_valid_seed_starts_editor() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&seed()).unwrap()).unwrap();
        let config = Config::default().with_seed_path(Some(file.path().to_path_buf()));

        let app = App::new(config);
        assert!(app.init_error.is_none());
        assert_eq!(editor(&app).values().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_product_marks_selector_until_changed() {
        let mut app = app();
        press(&mut app, &[key(KeyCode::Tab), key(KeyCode::Enter), key(KeyCode::Esc)]).await;
        let product = app.scope_form.get_field(PRODUCT_FIELD).unwrap();
        assert_eq!(product.validation_error.as_deref(), Some("Please select a product."));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Product - Error: Please select a product."));

        press(&mut app, &[key(KeyCode::Right)]).await;
        assert!(app.scope_form.get_field(PRODUCT_FIELD).unwrap().validation_error.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_rule_warns_and_help_lists_recent_messages() {
        let mut app = app();
        press(
            &mut app,
            &[key(KeyCode::Tab), key(KeyCode::Right), key(KeyCode::Enter), key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(editor(&app).visibility().len(), 3);
        let current = app.status.get_current().unwrap();
        assert_eq!(current.status_type, crate::tui::components::StatusType::Warning);
        assert!(current.message.contains("Firefox was already visible"));

        let help = app.get_context_help();
        assert!(help.contains("Recent:"));
        assert!(help.contains("Firefox was already visible"));
        assert!(help.contains("Added visibility for Firefox"));
    }

    #[test]
    fn test_draw_smoke() {
        let mut app = app();
        app.alert = Some("Please select a product.".to_string());
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Values (2)"));
        assert!(text.contains("editbugs"));
        assert!(text.contains("Please select a product."));
    }
}
