//! All possible UI actions. Actions are the sole mechanism for state mutation.

use fluente_api::{CreatePaymentInput, DashboardStats, Payment, PaymentsPage, User};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification shown in the status bar.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Data loads (spawned fetches reporting back) ───────────────
    Refresh,
    StatsLoaded(Box<DashboardStats>),
    StudentsLoaded(Vec<User>),
    PaymentsLoaded(Box<PaymentsPage>),

    // ── Payment workflow ──────────────────────────────────────────
    SubmitPayment(Box<CreatePaymentInput>),
    PaymentCreated(Box<Payment>),
    MarkPaymentPaid(String),
    PaymentPaid(Box<Payment>),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
