//! Payments screen — payment table plus the create-payment form.
//!
//! The form embeds two remote select widgets: a required student picker
//! and an optional class picker, both single-select over the backend.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use fluente_api::{ApiClient, CreatePaymentInput, Payment};
use fluente_core::{ClassFilters, ClassOptions, PickerBuilder, StudentOptions};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{QuerySelect, centered_rect};

// ── Create-payment form ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Student,
    Class,
    Amount,
    Description,
    Due,
    Notes,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        Self::Student,
        Self::Class,
        Self::Amount,
        Self::Description,
        Self::Due,
        Self::Notes,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What a form key event produced.
enum FormEvent {
    Handled,
    Cancel,
    Submit(Box<CreatePaymentInput>),
}

struct PaymentForm {
    student: QuerySelect<()>,
    class: QuerySelect<ClassFilters>,
    amount: Input,
    description: Input,
    due: Input,
    notes: Input,
    focus: FormField,
    error: Option<String>,
}

impl PaymentForm {
    fn new(api: &Arc<ApiClient>) -> Self {
        let student_picker = PickerBuilder::single(StudentOptions::new(Arc::clone(api))).spawn();
        let class_picker = PickerBuilder::single(ClassOptions::new(Arc::clone(api))).spawn();

        let mut student = QuerySelect::new("Student *", "Select a student", student_picker);
        student.set_focused(true);
        let class = QuerySelect::new("Class", "Optional", class_picker);

        Self {
            student,
            class,
            amount: Input::default(),
            description: Input::default(),
            due: Input::new(Utc::now().format("%Y-%m-%d").to_string()),
            notes: Input::default(),
            focus: FormField::Student,
            error: None,
        }
    }

    fn set_focus(&mut self, focus: FormField) {
        self.focus = focus;
        self.student.set_focused(focus == FormField::Student);
        self.class.set_focused(focus == FormField::Class);
    }

    fn focused_input(&mut self) -> Option<&mut Input> {
        match self.focus {
            FormField::Amount => Some(&mut self.amount),
            FormField::Description => Some(&mut self.description),
            FormField::Due => Some(&mut self.due),
            FormField::Notes => Some(&mut self.notes),
            FormField::Student | FormField::Class => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        // An open picker owns the keyboard until it closes.
        match self.focus {
            FormField::Student => {
                if self.student.handle_key(key) {
                    return FormEvent::Handled;
                }
            }
            FormField::Class => {
                if self.class.handle_key(key) {
                    return FormEvent::Handled;
                }
            }
            _ => {}
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => return FormEvent::Cancel,
            (KeyCode::Char('s'), KeyModifiers::CONTROL) | (KeyCode::F(2), _) => {
                match self.build_input() {
                    Ok(input) => return FormEvent::Submit(Box::new(input)),
                    Err(message) => self.error = Some(message),
                }
            }
            (KeyCode::Tab, _) => self.set_focus(self.focus.next()),
            (KeyCode::BackTab, _) => self.set_focus(self.focus.prev()),
            _ => {
                if let Some(input) = self.focused_input() {
                    input.handle_event(&CrosstermEvent::Key(key));
                }
            }
        }
        FormEvent::Handled
    }

    /// Validate the form into a create payload.
    fn build_input(&self) -> Result<CreatePaymentInput, String> {
        let student_id = self
            .student
            .first_value()
            .ok_or("select a student first")?;
        let amount: f64 = self
            .amount
            .value()
            .trim()
            .parse()
            .map_err(|_| "amount must be a number")?;
        if amount <= 0.0 {
            return Err("amount must be positive".into());
        }
        let description = self.description.value().trim();
        if description.is_empty() {
            return Err("description is required".into());
        }
        let due_date = chrono::NaiveDate::parse_from_str(self.due.value().trim(), "%Y-%m-%d")
            .map_err(|_| "due date must be YYYY-MM-DD")?
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        let now = Utc::now();
        let notes = self.notes.value().trim();

        Ok(CreatePaymentInput {
            student_id,
            class_id: self.class.first_value(),
            amount,
            description: description.to_owned(),
            due_date,
            reference_month: u8::try_from(chrono::Datelike::month(&now)).unwrap_or(1),
            reference_year: u16::try_from(chrono::Datelike::year(&now)).unwrap_or(2000),
            notes: (!notes.is_empty()).then(|| notes.to_owned()),
        })
    }

    fn text_field(&self, title: &str, input: &Input, field: FormField) -> Paragraph<'static> {
        let focused = self.focus == field;
        let mut spans = vec![Span::raw(input.value().to_owned())];
        if focused {
            spans.push(Span::styled("█", theme::border_focused()));
        }
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(title.to_owned())
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    theme::border_focused()
                } else {
                    theme::border_default()
                }),
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let height = self.student.desired_height()
            + self.class.desired_height()
            + 4 * 3 // text fields
            + 2 // hint + error
            + 2; // outer border
        let popup = centered_rect(area, 64, height);
        frame.render_widget(Clear, popup);

        let outer = Block::default()
            .title(" New Payment ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = outer.inner(popup);
        frame.render_widget(outer, popup);

        let rows = Layout::vertical([
            Constraint::Length(self.student.desired_height()),
            Constraint::Length(self.class.desired_height()),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        self.student.render(frame, rows[0]);
        self.class.render(frame, rows[1]);
        frame.render_widget(self.text_field("Amount *", &self.amount, FormField::Amount), rows[2]);
        frame.render_widget(
            self.text_field("Description *", &self.description, FormField::Description),
            rows[3],
        );
        frame.render_widget(self.text_field("Due (YYYY-MM-DD) *", &self.due, FormField::Due), rows[4]);
        frame.render_widget(self.text_field("Notes", &self.notes, FormField::Notes), rows[5]);

        if let Some(ref error) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.clone(), theme::error_text())),
                rows[6],
            );
        }
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Tab", theme::key_hint_key()),
                Span::styled(" next  ", theme::key_hint()),
                Span::styled("Ctrl-S", theme::key_hint_key()),
                Span::styled(" save  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" cancel", theme::key_hint()),
            ])),
            rows[7],
        );
    }
}

// ── Screen ──────────────────────────────────────────────────────────

pub struct PaymentsScreen {
    api: Arc<ApiClient>,
    action_tx: Option<UnboundedSender<Action>>,
    payments: Vec<Payment>,
    total: u64,
    table_state: TableState,
    form: Option<PaymentForm>,
    focused: bool,
}

impl PaymentsScreen {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            action_tx: None,
            payments: Vec::new(),
            total: 0,
            table_state: TableState::default(),
            form: None,
            focused: false,
        }
    }

    fn selected_payment(&self) -> Option<&Payment> {
        self.payments.get(self.table_state.selected().unwrap_or(0))
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        if self.payments.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, self.payments.len() as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    fn status_style(status: fluente_api::PaymentStatus) -> ratatui::style::Style {
        use fluente_api::PaymentStatus;
        match status {
            PaymentStatus::Paid => ratatui::style::Style::default().fg(theme::SUCCESS_GREEN),
            PaymentStatus::Pending => ratatui::style::Style::default().fg(theme::WARM_AMBER),
            PaymentStatus::Overdue => ratatui::style::Style::default().fg(theme::ERROR_RED),
            PaymentStatus::Cancelled => theme::placeholder(),
        }
    }
}

impl Component for PaymentsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = self.form.as_mut() {
            return Ok(match form.handle_key(key) {
                FormEvent::Handled => None,
                FormEvent::Cancel => {
                    self.form = None;
                    None
                }
                FormEvent::Submit(input) => Some(Action::SubmitPayment(input)),
            });
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
            KeyCode::Char('n') => {
                self.form = Some(PaymentForm::new(&self.api));
                None
            }
            KeyCode::Char('p') => self
                .selected_payment()
                .map(|payment| Action::MarkPaymentPaid(payment.id.clone())),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PaymentsLoaded(page) => {
                self.payments = page.payments.clone();
                self.total = page.total;
                if self.table_state.selected().is_none() && !self.payments.is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            Action::PaymentCreated(_) => {
                self.form = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn capturing_input(&self) -> bool {
        self.form.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Payments ({}) ", self.total))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.payments.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No payments loaded. Press r to refresh, n to create one.",
                    theme::placeholder(),
                )),
                inner,
            );
        } else {
            let header = Row::new(["Student", "Description", "Amount", "Due", "Status"])
                .style(theme::table_header());
            let rows = self.payments.iter().map(|payment| {
                Row::new(vec![
                    Cell::from(payment.student.full_name.clone()),
                    Cell::from(payment.description.clone()),
                    Cell::from(format!("{:.2}", payment.amount)),
                    Cell::from(payment.due_date.format("%Y-%m-%d").to_string()),
                    Cell::from(Span::styled(
                        payment.status.as_str(),
                        Self::status_style(payment.status),
                    )),
                ])
                .style(theme::table_row())
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Min(18),
                    Constraint::Min(20),
                    Constraint::Length(10),
                    Constraint::Length(12),
                    Constraint::Length(10),
                ],
            )
            .header(header)
            .row_highlight_style(theme::table_selected());
            frame.render_stateful_widget(table, inner, &mut self.table_state);
        }

        if let Some(form) = self.form.as_mut() {
            form.render(frame, area);
        }
    }

    fn id(&self) -> &str {
        "payments"
    }
}
