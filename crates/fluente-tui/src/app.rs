//! Application loop: routes terminal events and actions between the
//! event reader, the screens, and spawned API calls.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;
use tracing::debug;

use fluente_api::{ApiClient, PaymentQuery, PaymentSortBy, UserQuery, UserRole};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::{DashboardScreen, PaymentsScreen, StudentsScreen};
use crate::theme;
use crate::tui::Tui;

/// Notification lifetime in ticks (4 Hz → ~3 seconds).
const NOTIFICATION_TICKS: u8 = 12;

pub struct App {
    api: Arc<ApiClient>,
    action_tx: mpsc::UnboundedSender<Action>,
    /// Taken by `run()` so the select loop can own the receiver.
    action_rx: Option<mpsc::UnboundedReceiver<Action>>,
    dashboard: DashboardScreen,
    students: StudentsScreen,
    payments: PaymentsScreen,
    current: ScreenId,
    notification: Option<Notification>,
    notification_ticks: u8,
    should_quit: bool,
}

impl App {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            dashboard: DashboardScreen::new(),
            students: StudentsScreen::new(),
            payments: PaymentsScreen::new(Arc::clone(&api)),
            api,
            action_tx,
            action_rx: Some(action_rx),
            current: ScreenId::Dashboard,
            notification: None,
            notification_ticks: 0,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(Duration::from_millis(250), Duration::from_millis(33));
        let mut action_rx = self.action_rx.take().expect("app already running");

        self.dashboard.init(self.action_tx.clone())?;
        self.students.init(self.action_tx.clone())?;
        self.payments.init(self.action_tx.clone())?;
        self.set_screen(self.current);

        // Initial data load
        self.spawn_refresh();

        while !self.should_quit {
            tokio::select! {
                Some(event) = events.next() => self.handle_event(event, &mut tui)?,
                Some(action) = action_rx.recv() => self.handle_action(action)?,
            }
        }

        tui.exit()?;
        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────

    fn handle_event(&mut self, event: Event, tui: &mut Tui) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key)?,
            Event::Tick => self.handle_action(Action::Tick)?,
            Event::Render | Event::Resize(_, _) => {
                tui.draw(|frame| self.draw(frame))?;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // A screen with an open form/search owns the keyboard.
        if self.active_screen().capturing_input() {
            if let Some(action) = self.active_screen_mut().handle_key_event(key)? {
                self.handle_action(action)?;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => self.handle_action(Action::Quit)?,
            KeyCode::Tab => {
                let next = self.current.next();
                self.handle_action(Action::SwitchScreen(next))?;
            }
            KeyCode::BackTab => {
                let prev = self.current.prev();
                self.handle_action(Action::SwitchScreen(prev))?;
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(screen) = c.to_digit(10).and_then(|n| {
                    u8::try_from(n).ok().and_then(ScreenId::from_number)
                }) {
                    self.handle_action(Action::SwitchScreen(screen))?;
                }
            }
            _ => {
                if let Some(action) = self.active_screen_mut().handle_key_event(key)? {
                    self.handle_action(action)?;
                }
            }
        }
        Ok(())
    }

    // ── Action handling ─────────────────────────────────────────────

    fn handle_action(&mut self, action: Action) -> Result<()> {
        match &action {
            Action::Quit => self.should_quit = true,
            Action::SwitchScreen(screen) => self.set_screen(*screen),
            Action::Refresh => self.spawn_refresh(),
            Action::SubmitPayment(input) => self.spawn_create_payment((**input).clone()),
            Action::MarkPaymentPaid(id) => self.spawn_mark_paid(id.clone()),
            Action::Notify(notification) => {
                self.notification = Some(notification.clone());
                self.notification_ticks = NOTIFICATION_TICKS;
            }
            Action::DismissNotification => self.notification = None,
            Action::Tick => {
                if self.notification.is_some() {
                    self.notification_ticks = self.notification_ticks.saturating_sub(1);
                    if self.notification_ticks == 0 {
                        self.notification = None;
                    }
                }
            }
            _ => {}
        }

        // Forward to every screen; collect follow-up actions.
        let mut follow_ups = Vec::new();
        for screen in [
            &mut self.dashboard as &mut dyn Component,
            &mut self.students,
            &mut self.payments,
        ] {
            if let Some(follow_up) = screen.update(&action)? {
                follow_ups.push(follow_up);
            }
        }
        for follow_up in follow_ups {
            self.handle_action(follow_up)?;
        }
        Ok(())
    }

    fn set_screen(&mut self, screen: ScreenId) {
        self.active_screen_mut().set_focused(false);
        self.current = screen;
        self.active_screen_mut().set_focused(true);
    }

    fn active_screen(&self) -> &dyn Component {
        match self.current {
            ScreenId::Dashboard => &self.dashboard,
            ScreenId::Students => &self.students,
            ScreenId::Payments => &self.payments,
        }
    }

    fn active_screen_mut(&mut self) -> &mut dyn Component {
        match self.current {
            ScreenId::Dashboard => &mut self.dashboard,
            ScreenId::Students => &mut self.students,
            ScreenId::Payments => &mut self.payments,
        }
    }

    // ── Spawned API calls ───────────────────────────────────────────

    fn spawn_refresh(&self) {
        debug!("refreshing all data");

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.dashboard_stats().await {
                Ok(stats) => {
                    let _ = tx.send(Action::StatsLoaded(Box::new(stats)));
                }
                Err(err) => {
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "dashboard: {err}"
                    ))));
                }
            }
        });

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let query = UserQuery {
                role: Some(UserRole::Student),
                limit: Some(200),
                ..UserQuery::default()
            };
            match api.list_users(&query).await {
                Ok(page) => {
                    let _ = tx.send(Action::StudentsLoaded(page.users));
                }
                Err(err) => {
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "students: {err}"
                    ))));
                }
            }
        });

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let query = PaymentQuery {
                sort_by: Some(PaymentSortBy::DueDate),
                sort_descending: true,
                limit: Some(100),
                ..PaymentQuery::default()
            };
            match api.list_payments(&query).await {
                Ok(page) => {
                    let _ = tx.send(Action::PaymentsLoaded(Box::new(page)));
                }
                Err(err) => {
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "payments: {err}"
                    ))));
                }
            }
        });
    }

    fn spawn_create_payment(&self, input: fluente_api::CreatePaymentInput) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.create_payment(&input).await {
                Ok(payment) => {
                    let _ = tx.send(Action::Notify(Notification::success(format!(
                        "Payment created for {}",
                        payment.student.full_name
                    ))));
                    let _ = tx.send(Action::PaymentCreated(Box::new(payment)));
                    let _ = tx.send(Action::Refresh);
                }
                Err(err) => {
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "create failed: {err}"
                    ))));
                }
            }
        });
    }

    fn spawn_mark_paid(&self, id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api
                .mark_payment_paid(&id, &fluente_api::MarkPaidInput::default())
                .await
            {
                Ok(payment) => {
                    let _ = tx.send(Action::Notify(Notification::success(format!(
                        "Payment {} marked as paid",
                        payment.id
                    ))));
                    let _ = tx.send(Action::PaymentPaid(Box::new(payment)));
                    let _ = tx.send(Action::Refresh);
                }
                Err(err) => {
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "mark paid failed: {err}"
                    ))));
                }
            }
        });
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let [tab_bar, body, status_bar] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_tab_bar(frame, tab_bar);

        match self.current {
            ScreenId::Dashboard => self.dashboard.render(frame, body),
            ScreenId::Students => self.students.render(frame, body),
            ScreenId::Payments => self.payments.render(frame, body),
        }

        self.draw_status_bar(frame, status_bar);
    }

    fn draw_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" fluente ", theme::title_style())];
        for (idx, screen) in ScreenId::ALL.iter().enumerate() {
            spans.push(Span::raw("  "));
            let label = format!("{} {}", idx + 1, screen.label());
            if *screen == self.current {
                spans.push(Span::styled(format!("[{label}]"), theme::tab_active()));
            } else {
                spans.push(Span::styled(label, theme::tab_inactive()));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(ref notification) = self.notification {
            let style = match notification.level {
                NotificationLevel::Success => {
                    ratatui::style::Style::default().fg(theme::SUCCESS_GREEN)
                }
                NotificationLevel::Error => theme::error_text(),
                NotificationLevel::Info => theme::tab_inactive(),
            };
            Line::from(Span::styled(format!(" {}", notification.message), style))
        } else {
            Line::from(vec![
                Span::styled(" q", theme::key_hint_key()),
                Span::styled(" quit  ", theme::key_hint()),
                Span::styled("Tab", theme::key_hint_key()),
                Span::styled(" screens  ", theme::key_hint()),
                Span::styled("r", theme::key_hint_key()),
                Span::styled(" refresh  ", theme::key_hint()),
                Span::styled("n", theme::key_hint_key()),
                Span::styled(" new payment (Payments)", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
