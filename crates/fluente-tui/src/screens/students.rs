//! Students screen — searchable student table.

use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use fluente_api::User;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct StudentsScreen {
    students: Vec<User>,
    filtered: Vec<User>,
    table_state: TableState,
    search: Input,
    searching: bool,
    focused: bool,
}

impl StudentsScreen {
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            filtered: Vec::new(),
            table_state: TableState::default(),
            search: Input::default(),
            searching: false,
            focused: false,
        }
    }

    fn recompute_filtered(&mut self) {
        let needle = self.search.value().to_lowercase();
        self.filtered = self
            .students
            .iter()
            .filter(|user| {
                needle.is_empty()
                    || user.full_name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        let max = self.filtered.len().saturating_sub(1);
        if let Some(selected) = self.table_state.selected() {
            self.table_state.select(Some(selected.min(max)));
        } else if !self.filtered.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, self.filtered.len() as isize - 1);
        self.table_state.select(Some(next as usize));
    }
}

impl Component for StudentsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                _ => {
                    self.search.handle_event(&CrosstermEvent::Key(key));
                    self.recompute_filtered();
                }
            }
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('/') => {
                self.searching = true;
                None
            }
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StudentsLoaded(students) = action {
            self.students = students.clone();
            self.recompute_filtered();
        }
        Ok(None)
    }

    fn capturing_input(&self) -> bool {
        self.searching
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, table_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);

        let search_line = if self.searching || !self.search.value().is_empty() {
            Line::from(vec![
                Span::styled("/ ", theme::key_hint_key()),
                Span::raw(self.search.value().to_owned()),
                if self.searching {
                    Span::styled("█", theme::border_focused())
                } else {
                    Span::raw("")
                },
            ])
        } else {
            Line::from(Span::styled(
                "/ search   j/k move   r refresh",
                theme::key_hint(),
            ))
        };
        frame.render_widget(Paragraph::new(search_line), search_area);

        let block = Block::default()
            .title(format!(" Students ({}) ", self.filtered.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(table_area);
        frame.render_widget(block, table_area);

        if self.filtered.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No students", theme::placeholder())),
                inner,
            );
            return;
        }

        let header =
            Row::new(["Name", "Email", "Phone", "Since"]).style(theme::table_header());
        let rows = self.filtered.iter().map(|user| {
            Row::new(vec![
                Cell::from(user.full_name.clone()),
                Cell::from(user.email.clone()),
                Cell::from(user.phone.clone().unwrap_or_default()),
                Cell::from(user.created_at.format("%Y-%m-%d").to_string()),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Min(24),
                Constraint::Length(16),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, inner, &mut self.table_state);
    }

    fn id(&self) -> &str {
        "students"
    }
}
