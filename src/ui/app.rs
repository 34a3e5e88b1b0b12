use std::mem;
use std::path::{Path, PathBuf};

use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::db::{StoreError, UserStore};
use crate::export::{default_file_name, export_to_file};
use crate::validation::{parse_integer, RecordField, ValidationError};

use super::forms::{Alert, ConfirmDelete, ExportPrompt, FormState, UserForm};
use super::helpers::{centered_rect, cursor_column, key_hints, surface_error};
use super::screens::{RecordTable, StatisticsPanel};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const HEADER_HEIGHT: u16 = 3;
/// Rows skipped by PgUp/PgDn in the record table.
const PAGE_STEP: isize = 10;
const TABLE_HEADERS: [&str; 6] = ["ID", "Value", "First name", "Last name", "Category", "Mission"];

/// Top-level tabs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Screen {
    Records,
    Statistics,
}

/// What keyboard input is currently driving.
enum Mode {
    Normal,
    EditingForm,
    Searching(SearchState),
    ConfirmDelete(ConfirmDelete),
    Exporting(ExportPrompt),
    Alert(Alert),
}

/// State for an active search-as-you-type session.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Form-level commands reachable from plain keys and Ctrl shortcuts.
#[derive(Copy, Clone, Debug)]
enum Action {
    Add,
    Update,
    Delete,
    Refresh,
    Export,
    Clear,
}

/// How an action leaves the controller.
enum Outcome {
    /// Nothing changed; stay in whatever mode issued the action.
    Stay,
    /// The list and statistics were reloaded and the form cleared.
    Reloaded,
    /// Validation failed on this field.
    Focus(RecordField),
    /// A modal takes over.
    Open(Mode),
}

/// Central application state shared across the TUI.
pub struct App {
    store: UserStore,
    export_dir: PathBuf,
    table: RecordTable,
    stats: StatisticsPanel,
    form: UserForm,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the controller and perform the initial load. A failing load is
    /// shown as an alert rather than aborting start-up.
    pub fn new(store: UserStore, export_dir: impl Into<PathBuf>) -> Self {
        let mut app = Self {
            store,
            export_dir: export_dir.into(),
            table: RecordTable::default(),
            stats: StatisticsPanel::default(),
            form: UserForm::default(),
            screen: Screen::Records,
            mode: Mode::Normal,
            status: None,
        };
        if let Err(err) = app.reload_all() {
            app.mode = app.store_failure("Error loading data", &err);
        }
        app
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::EditingForm => self.handle_form_key(code),
            Mode::Searching(state) => self.handle_search(code, state),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::Exporting(prompt) => self.handle_export_prompt(code, prompt),
            Mode::Alert(alert) => self.handle_alert(code, alert),
        };

        exit
    }

    /// Ctrl shortcuts for the form commands. They work anywhere except inside
    /// a modal, including while typing in the form or the search bar.
    pub fn handle_ctrl(&mut self, ch: char) {
        if !matches!(
            self.mode,
            Mode::Normal | Mode::EditingForm | Mode::Searching(_)
        ) {
            return;
        }
        let action = match ch.to_ascii_lowercase() {
            'a' => Action::Add,
            'u' => Action::Update,
            'd' => Action::Delete,
            'r' => Action::Refresh,
            'x' => Action::Export,
            'l' => Action::Clear,
            _ => return,
        };
        let mut current = mem::replace(&mut self.mode, Mode::Normal);
        if matches!(action, Action::Clear) && matches!(current, Mode::Searching(_)) {
            // Clearing drops the search too, so the query being typed goes with it.
            current = Mode::Normal;
        }
        let outcome = self.perform(action);
        self.mode = self.resolve(outcome, current);
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match self.screen {
            Screen::Statistics => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => {
                        self.screen = Screen::Records;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        let outcome = self.perform(Action::Refresh);
                        return self.resolve(outcome, Mode::Normal);
                    }
                    _ => {}
                }
                Mode::Normal
            }
            Screen::Records => {
                let action = match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                        return Mode::Normal;
                    }
                    KeyCode::Tab | KeyCode::BackTab => {
                        self.screen = Screen::Statistics;
                        return Mode::Normal;
                    }
                    KeyCode::Up => {
                        self.table.move_selection(-1);
                        return Mode::Normal;
                    }
                    KeyCode::Down => {
                        self.table.move_selection(1);
                        return Mode::Normal;
                    }
                    KeyCode::PageUp => {
                        self.table.move_selection(-PAGE_STEP);
                        return Mode::Normal;
                    }
                    KeyCode::PageDown => {
                        self.table.move_selection(PAGE_STEP);
                        return Mode::Normal;
                    }
                    KeyCode::Home => {
                        self.table.select_first();
                        return Mode::Normal;
                    }
                    KeyCode::End => {
                        self.table.select_last();
                        return Mode::Normal;
                    }
                    KeyCode::Enter => {
                        self.load_selected_into_form();
                        return Mode::Normal;
                    }
                    KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('i') => {
                        self.clear_status();
                        return Mode::EditingForm;
                    }
                    KeyCode::Char('f') | KeyCode::Char('/') => {
                        self.clear_status();
                        return Mode::Searching(SearchState {
                            query: self.table.filter.clone().unwrap_or_default(),
                        });
                    }
                    KeyCode::Char('a') | KeyCode::Char('A') => Action::Add,
                    KeyCode::Char('u') | KeyCode::Char('U') => Action::Update,
                    KeyCode::Char('d') | KeyCode::Char('D') => Action::Delete,
                    KeyCode::Char('r') | KeyCode::Char('R') => Action::Refresh,
                    KeyCode::Char('x') | KeyCode::Char('X') => Action::Export,
                    KeyCode::Char('c') | KeyCode::Char('C') => Action::Clear,
                    _ => return Mode::Normal,
                };
                let outcome = self.perform(action);
                self.resolve(outcome, Mode::Normal)
            }
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_field();
                Mode::EditingForm
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.previous_field();
                Mode::EditingForm
            }
            KeyCode::Backspace => {
                self.form.backspace();
                Mode::EditingForm
            }
            KeyCode::Enter => {
                // A row loaded into the form is saved in place; anything else
                // is a new record.
                let action = match self.form.state() {
                    FormState::Editing { .. } => Action::Update,
                    FormState::Idle => Action::Add,
                };
                let outcome = self.perform(action);
                self.resolve(outcome, Mode::EditingForm)
            }
            KeyCode::Char(ch) => {
                if self.form.push_char(ch) {
                    self.form.error = None;
                }
                Mode::EditingForm
            }
            _ => Mode::EditingForm,
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => {
                state.query.clear();
            }
            KeyCode::Enter => return Mode::Normal,
            KeyCode::Up => {
                self.table.move_selection(-1);
                return Mode::Searching(state);
            }
            KeyCode::Down => {
                self.table.move_selection(1);
                return Mode::Searching(state);
            }
            KeyCode::PageUp => {
                self.table.move_selection(-PAGE_STEP);
                return Mode::Searching(state);
            }
            KeyCode::PageDown => {
                self.table.move_selection(PAGE_STEP);
                return Mode::Searching(state);
            }
            KeyCode::Home => {
                self.table.select_first();
                return Mode::Searching(state);
            }
            KeyCode::End => {
                self.table.select_last();
                return Mode::Searching(state);
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => return Mode::Searching(state),
        }

        if let Err(err) = self.run_search(&state.query) {
            return self.store_failure("Error searching", &err);
        }

        if matches!(code, KeyCode::Esc) {
            Mode::Normal
        } else {
            Mode::Searching(state)
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let outcome = self.perform_delete(confirm.id);
                self.resolve(outcome, Mode::Normal)
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_export_prompt(&mut self, code: KeyCode, mut prompt: ExportPrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Export cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Backspace => {
                prompt.backspace();
                Mode::Exporting(prompt)
            }
            KeyCode::Char(ch) => {
                prompt.push_char(ch);
                Mode::Exporting(prompt)
            }
            KeyCode::Enter => {
                let path = prompt.path.trim();
                if path.is_empty() {
                    prompt.error = Some("Please enter a file name.".to_string());
                    return Mode::Exporting(prompt);
                }
                self.export_rows(Path::new(path))
            }
            _ => Mode::Exporting(prompt),
        }
    }

    fn handle_alert(&mut self, code: KeyCode, alert: Alert) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(_) => Mode::Normal,
            _ => Mode::Alert(alert),
        }
    }

    fn perform(&mut self, action: Action) -> Outcome {
        match action {
            Action::Add => self.add_user(),
            Action::Update => self.update_user(),
            Action::Delete => self.request_delete(),
            Action::Refresh => {
                let outcome = self.reload_after_success("Data refreshed.");
                if matches!(outcome, Outcome::Reloaded) {
                    info!("refreshed records");
                }
                outcome
            }
            Action::Export => {
                let file_name = default_file_name(Local::now());
                let path = self.export_dir.join(file_name);
                Outcome::Open(Mode::Exporting(ExportPrompt::new(
                    path.to_string_lossy().into_owned(),
                )))
            }
            Action::Clear => {
                self.form.clear();
                self.clear_status();
                if self.table.filter.is_some() {
                    if let Err(err) = self.run_search("") {
                        return Outcome::Open(self.store_failure("Error loading data", &err));
                    }
                }
                Outcome::Stay
            }
        }
    }

    fn resolve(&mut self, outcome: Outcome, current: Mode) -> Mode {
        match outcome {
            Outcome::Stay => current,
            Outcome::Reloaded => Mode::Normal,
            Outcome::Focus(field) => {
                self.form.focus(field);
                Mode::EditingForm
            }
            Outcome::Open(mode) => mode,
        }
    }

    fn add_user(&mut self) -> Outcome {
        let user = match self.form.parse_inputs() {
            Ok(user) => user,
            Err(err) => return self.reject_form(err),
        };

        match self.store.exists(user.id) {
            Ok(false) => {}
            Ok(true) => {
                self.set_status(
                    format!(
                        "User ID {} already exists. Use a different ID or update instead.",
                        user.id
                    ),
                    StatusKind::Warning,
                );
                return Outcome::Stay;
            }
            Err(err) => return Outcome::Open(self.store_failure("Error adding user", &err)),
        }

        match self.store.add(&user) {
            Ok(true) => {
                info!(id = user.id, "user added from form");
                self.reload_after_success(format!("Added user {}.", user.id))
            }
            Ok(false) => {
                self.set_status("Failed to add user. Please try again.", StatusKind::Error);
                Outcome::Stay
            }
            Err(err) => Outcome::Open(self.store_failure("Error adding user", &err)),
        }
    }

    fn update_user(&mut self) -> Outcome {
        let user = match self.form.parse_inputs() {
            Ok(user) => user,
            Err(err) => return self.reject_form(err),
        };

        match self.store.exists(user.id) {
            Ok(true) => {}
            Ok(false) => {
                self.set_status(
                    format!(
                        "User ID {} does not exist. Use add to create it.",
                        user.id
                    ),
                    StatusKind::Warning,
                );
                return Outcome::Stay;
            }
            Err(err) => return Outcome::Open(self.store_failure("Error updating user", &err)),
        }

        match self.store.update(&user) {
            Ok(true) => {
                info!(id = user.id, "user updated from form");
                self.reload_after_success(format!("Updated user {}.", user.id))
            }
            Ok(false) => {
                self.set_status(
                    format!("User ID {} was not found.", user.id),
                    StatusKind::Warning,
                );
                Outcome::Stay
            }
            Err(err) => Outcome::Open(self.store_failure("Error updating user", &err)),
        }
    }

    /// Check the id field and open the confirmation dialog.
    fn request_delete(&mut self) -> Outcome {
        let raw = self.form.id.trim();
        if raw.is_empty() {
            return self.reject_delete("Please enter a user ID to delete.");
        }
        let Some(id) = parse_integer(raw) else {
            return self.reject_delete("Please enter a valid numeric user ID.");
        };

        self.clear_status();
        Outcome::Open(Mode::ConfirmDelete(ConfirmDelete {
            id,
            record: self.table.find(id).cloned(),
        }))
    }

    fn perform_delete(&mut self, id: i64) -> Outcome {
        match self.store.delete(id) {
            Ok(true) => {
                info!(id, "user deleted from form");
                self.reload_after_success(format!("Deleted user {id}."))
            }
            Ok(false) => {
                self.set_status(
                    format!("User ID {id} was not found."),
                    StatusKind::Warning,
                );
                Outcome::Stay
            }
            Err(err) => Outcome::Open(self.store_failure("Error deleting user", &err)),
        }
    }

    fn export_rows(&mut self, path: &Path) -> Mode {
        match export_to_file(path, &self.table.records) {
            Ok(count) => {
                self.set_status(
                    format!("Exported {count} users to {}.", path.display()),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                self.open_alert("Export error", surface_error(&*err))
            }
        }
    }

    fn load_selected_into_form(&mut self) {
        if let Some(record) = self.table.current_record() {
            self.form = UserForm::from_record(record);
            let message = format!("Loaded user {}.", record.id);
            self.set_status(message, StatusKind::Info);
        } else {
            self.set_status("No user selected.", StatusKind::Warning);
        }
    }

    fn run_search(&mut self, query: &str) -> Result<(), StoreError> {
        let term = query.trim();
        if term.is_empty() {
            let records = self.store.list_all()?;
            self.table.set_records(records, None);
        } else {
            let records = self.store.search(term)?;
            self.table.set_records(records, Some(term.to_string()));
        }
        Ok(())
    }

    /// Reload everything the screen shows from the store and drop back to an
    /// idle form with no search applied.
    fn reload_all(&mut self) -> Result<(), StoreError> {
        let records = self.store.list_all()?;
        let totals = self.store.statistics()?;
        let categories = self.store.category_summaries()?;

        self.table.set_records(records, None);
        self.stats = StatisticsPanel { totals, categories };
        self.form.clear();
        Ok(())
    }

    fn reload_after_success(&mut self, message: impl Into<String>) -> Outcome {
        match self.reload_all() {
            Ok(()) => {
                self.set_status(message, StatusKind::Info);
                Outcome::Reloaded
            }
            Err(err) => Outcome::Open(self.store_failure("Error loading data", &err)),
        }
    }

    fn reject_form(&mut self, err: ValidationError) -> Outcome {
        let message = err.to_string();
        self.form.error = Some(message.clone());
        self.set_status(message, StatusKind::Warning);
        Outcome::Focus(err.field())
    }

    fn reject_delete(&mut self, message: &str) -> Outcome {
        self.form.error = Some(message.to_string());
        self.set_status(message, StatusKind::Warning);
        Outcome::Focus(RecordField::Id)
    }

    fn store_failure(&mut self, context: &str, err: &StoreError) -> Mode {
        warn!(error = %err, "{context}");
        self.open_alert("Store error", format!("{context}: {}", surface_error(err)))
    }

    fn open_alert(&mut self, title: &str, message: String) -> Mode {
        self.set_status(message.clone(), StatusKind::Error);
        Mode::Alert(Alert {
            title: title.to_string(),
            message,
        })
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

impl App {
    /// Render the whole interface for one frame.
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_tabs(frame, chunks[0]);
        match self.screen {
            Screen::Records => self.draw_records(frame, chunks[1]),
            Screen::Statistics => self.draw_statistics(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Exporting(prompt) => self.draw_export_prompt(frame, area, prompt),
            Mode::Alert(alert) => self.draw_alert(frame, area, alert),
            Mode::Normal | Mode::EditingForm | Mode::Searching(_) => {}
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let selected = match self.screen {
            Screen::Records => 0,
            Screen::Statistics => 1,
        };
        let tabs = Tabs::new(vec!["Records", "Statistics"])
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("User Data Manager"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_records(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(columns[0]);

        self.draw_search_bar(frame, left[0]);
        self.draw_table(frame, left[1]);
        self.draw_form(frame, columns[1]);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match (&self.mode, &self.table.filter) {
            (Mode::Searching(state), _) => {
                (state.query.clone(), Style::default().fg(Color::Yellow))
            }
            (_, Some(filter)) => (filter.clone(), Style::default()),
            (_, None) => (
                "press f to search".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };

        let block = Block::default().borders(Borders::ALL).title("Search");
        let inner = block.inner(area);
        let paragraph = Paragraph::new(Line::from(vec![
            Span::raw("Search: "),
            Span::styled(text, style),
        ]))
        .block(block);
        frame.render_widget(paragraph, area);

        if let Mode::Searching(state) = &self.mode {
            let cursor_x = cursor_column(inner, "Search: ".len() + state.query.chars().count());
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let count = self.table.records.len();
        let title = match &self.table.filter {
            Some(filter) => format!("Users matching '{filter}' ({count})"),
            None => format!("Users ({count})"),
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.table.records.is_empty() {
            let text = if self.table.filter.is_some() {
                "No users match the current search."
            } else {
                "No users yet. Press 'e' to fill in the form, then 'a' to add."
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(TABLE_HEADERS.iter().map(|title| Cell::from(*title)))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self
            .table
            .records
            .iter()
            .map(|record| Row::new(record.to_row()));
        let widths = [
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = TableState::default().with_selected(Some(self.table.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let title = match self.form.state() {
            FormState::Idle => "Details • new".to_string(),
            FormState::Editing { id } => format!("Details • editing #{id}"),
        };
        let focused = matches!(self.mode, Mode::EditingForm);
        let mut block = Block::default().borders(Borders::ALL).title(title);
        if focused {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = RecordField::ALL
            .iter()
            .map(|field| self.form.build_line(*field, focused))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &self.form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            let hint = if focused {
                "Enter to save • Tab to switch • Esc when done"
            } else {
                "Enter on a row to load it • e to edit"
            };
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if focused {
            let active = self.form.active;
            let row = RecordField::ALL
                .iter()
                .position(|field| *field == active)
                .unwrap_or(0) as u16;
            let prefix = format!("{}: ", active.label()).len();
            frame.set_cursor_position((
                cursor_column(inner, prefix + self.form.value_len(active)),
                inner.y.saturating_add(row).min(inner.bottom().saturating_sub(1)),
            ));
        }
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(1)])
            .split(area);

        let lines: Vec<Line> = self
            .stats
            .summary_lines()
            .into_iter()
            .map(Line::from)
            .collect();
        let summary = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Database Statistics"),
        );
        frame.render_widget(summary, chunks[0]);

        let block = Block::default().borders(Borders::ALL).title("By Category");
        if self.stats.categories.is_empty() {
            let message = Paragraph::new("No categories yet.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, chunks[1]);
            return;
        }

        let header = Row::new(["Category", "Users", "Average value"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.stats.categories.iter().map(|summary| {
            Row::new([
                summary.category.clone(),
                summary.count.to_string(),
                format!("{:.2}", summary.average),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Length(8),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.screen, &self.mode) {
            (_, Mode::ConfirmDelete(_)) => key_hints(&[("[y]", "Delete"), ("[n/Esc]", "Cancel")]),
            (_, Mode::Exporting(_)) => key_hints(&[("[Enter]", "Save"), ("[Esc]", "Cancel")]),
            (_, Mode::Alert(_)) => key_hints(&[("[Enter]", "Dismiss")]),
            (_, Mode::Searching(_)) => key_hints(&[
                ("[type]", "Filter"),
                ("[↑↓]", "Select"),
                ("[Enter]", "Keep results"),
                ("[Esc]", "Clear search"),
            ]),
            (_, Mode::EditingForm) => key_hints(&[
                ("[Tab]", "Next field"),
                ("[Enter]", "Save"),
                ("[Ctrl-A]", "Add"),
                ("[Ctrl-U]", "Update"),
                ("[Ctrl-D]", "Delete"),
                ("[Ctrl-L]", "Clear"),
                ("[Esc]", "Done"),
            ]),
            (Screen::Statistics, _) => key_hints(&[
                ("[r]", "Refresh"),
                ("[Tab]", "Records"),
                ("[q]", "Quit"),
            ]),
            (Screen::Records, _) => key_hints(&[
                ("[↑↓]", "Select"),
                ("[Enter]", "Load"),
                ("[e]", "Edit"),
                ("[a]", "Add"),
                ("[u]", "Update"),
                ("[d]", "Delete"),
                ("[c]", "Clear"),
                ("[f]", "Search"),
                ("[r]", "Refresh"),
                ("[x]", "Export"),
                ("[Tab]", "Statistics"),
                ("[q]", "Quit"),
            ]),
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let question = match &confirm.record {
            Some(record) => format!("Delete user {} ({})?", confirm.id, record.full_name()),
            None => format!("Delete user {}?", confirm.id),
        };
        let lines = vec![
            Line::from(question),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_export_prompt(&self, frame: &mut Frame, area: Rect, prompt: &ExportPrompt) {
        let popup_area = centered_rect(70, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!("Export {} rows to CSV", self.table.records.len()))
            .borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Save as: "),
                Span::styled(prompt.path.clone(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
        ];
        if let Some(error) = &prompt.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
        let cursor_x = cursor_column(inner, "Save as: ".len() + prompt.path.chars().count());
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_alert(&self, frame: &mut Frame, area: Rect, alert: &Alert) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(alert.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let lines = vec![
            Line::from(alert.message.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to dismiss.",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}
