//! Rendered remote select widget.
//!
//! Thin presentation layer over `fluente_core`'s [`Picker`]: a search box
//! (backed by `tui-input`), the option list with loading / error / empty
//! states, and selection chips with resolved labels. All state lives in
//! the picker task; this widget renders the latest snapshot and translates
//! key events into picker commands.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::watch;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use fluente_core::{Picker, PickerSnapshot, SearchPhase, Selection};

use crate::theme;

/// Height the widget wants when its option list is closed.
pub const CLOSED_HEIGHT: u16 = 3;
/// Height the widget wants when its option list is open.
pub const OPEN_HEIGHT: u16 = 12;

pub struct QuerySelect<F> {
    title: String,
    placeholder: String,
    picker: Picker<F>,
    rx: watch::Receiver<PickerSnapshot>,
    snapshot: PickerSnapshot,
    input: Input,
    highlight: usize,
    focused: bool,
}

impl<F> QuerySelect<F> {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>, picker: Picker<F>) -> Self {
        let rx = picker.subscribe();
        let snapshot = picker.snapshot();
        Self {
            title: title.into(),
            placeholder: placeholder.into(),
            picker,
            rx,
            snapshot,
            input: Input::default(),
            highlight: 0,
            focused: false,
        }
    }

    /// Pull the latest snapshot if the picker task published one.
    fn sync(&mut self) {
        if self.rx.has_changed().unwrap_or(false) {
            self.snapshot = self.rx.borrow_and_update().clone();
            let max = self.snapshot.options.len().saturating_sub(1);
            self.highlight = self.highlight.min(max);
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_open(&self) -> bool {
        self.snapshot.open
    }

    /// Height this widget currently wants.
    pub fn desired_height(&self) -> u16 {
        if self.snapshot.open {
            OPEN_HEIGHT
        } else {
            CLOSED_HEIGHT
        }
    }

    /// Currently selected values.
    pub fn values(&self) -> Vec<String> {
        self.snapshot.values()
    }

    /// First selected value (the whole selection for single-select).
    pub fn first_value(&self) -> Option<String> {
        self.snapshot.values().into_iter().next()
    }

    pub fn clear(&self) {
        self.picker.clear();
    }

    /// Handle a key event. Returns true when the event was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.sync();

        if !self.snapshot.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ') => {
                    self.picker.open();
                    true
                }
                KeyCode::Backspace | KeyCode::Delete => {
                    if let Some(last) = self.snapshot.values().pop() {
                        self.picker.remove(last);
                    }
                    true
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.picker.close();
                self.input.reset();
            }
            KeyCode::Up => self.highlight = self.highlight.saturating_sub(1),
            KeyCode::Down => {
                let max = self.snapshot.options.len().saturating_sub(1);
                self.highlight = (self.highlight + 1).min(max);
            }
            KeyCode::Enter => {
                if let Some(option) = self.snapshot.options.get(self.highlight) {
                    self.picker.select(option.clone());
                    // Single-select closes the list; clear the search box
                    // so reopening starts from the default page.
                    if matches!(self.snapshot.selection, Selection::Single(_)) {
                        self.input.reset();
                    }
                }
            }
            _ => {
                // Everything else edits the search term.
                if self
                    .input
                    .handle_event(&CrosstermEvent::Key(key))
                    .is_some()
                {
                    self.picker.set_term(self.input.value());
                }
            }
        }
        // An open list owns the keyboard entirely.
        true
    }

    /// Selection chips (or the placeholder) as one line.
    fn chips_line(&self) -> Line<'_> {
        if self.snapshot.selected.is_empty() {
            return Line::from(Span::styled(
                self.placeholder.clone(),
                theme::placeholder(),
            ));
        }
        let mut spans = Vec::with_capacity(self.snapshot.selected.len() * 2);
        for entry in &self.snapshot.selected {
            let (text, style) = if entry.resolving {
                (format!(" {}… ", entry.value), theme::chip_resolving())
            } else {
                (format!(" {} ", entry.display_label()), theme::chip())
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.sync();

        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(self.title.clone())
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !self.snapshot.open {
            frame.render_widget(Paragraph::new(self.chips_line()), inner);
            return;
        }

        let mut lines = Vec::with_capacity(usize::from(inner.height));

        // Search row, with a block cursor while focused.
        let mut search = vec![
            Span::styled("⌕ ", theme::key_hint_key()),
            Span::raw(self.input.value().to_owned()),
        ];
        if self.focused {
            search.push(Span::styled("█", Style::default().fg(theme::WARM_AMBER)));
        }
        lines.push(Line::from(search));

        // Option list (or its loading / error / empty states).
        let list_rows = usize::from(inner.height).saturating_sub(1);
        match &self.snapshot.phase {
            SearchPhase::Idle | SearchPhase::Loading => {
                lines.push(Line::from(Span::styled("Searching…", theme::placeholder())));
            }
            SearchPhase::Failed(message) => {
                lines.push(Line::from(Span::styled(
                    format!("Error: {message}"),
                    theme::error_text(),
                )));
                lines.push(Line::from(Span::styled(
                    "Change the search to retry",
                    theme::placeholder(),
                )));
            }
            SearchPhase::Ready if self.snapshot.options.is_empty() => {
                lines.push(Line::from(Span::styled(
                    "No results",
                    theme::placeholder(),
                )));
            }
            SearchPhase::Ready => {
                let multi = matches!(self.snapshot.selection, Selection::Multi(_));
                // Keep the highlighted row visible in the window.
                let offset = self.highlight.saturating_sub(list_rows.saturating_sub(1));
                for (idx, option) in self
                    .snapshot
                    .options
                    .iter()
                    .enumerate()
                    .skip(offset)
                    .take(list_rows)
                {
                    let marker = if multi {
                        if self.snapshot.selection.contains(&option.value) {
                            "[x] "
                        } else {
                            "[ ] "
                        }
                    } else {
                        ""
                    };
                    let style = if idx == self.highlight {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    };
                    lines.push(Line::from(Span::styled(
                        format!("{marker}{}", option.label),
                        style,
                    )));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
