//! Dashboard screen — server-computed aggregates, rendered as cards.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use fluente_api::DashboardStats;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DashboardScreen {
    stats: Option<DashboardStats>,
    focused: bool,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            stats: None,
            focused: false,
        }
    }

    fn card<'a>(title: &'a str, lines: Vec<Line<'a>>) -> Paragraph<'a> {
        Paragraph::new(lines).block(
            Block::default()
                .title(title)
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default()),
        )
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StatsLoaded(stats) = action {
            self.stats = Some(*stats.clone());
        }
        Ok(None)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(stats) = &self.stats else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Loading dashboard…  (r to retry)",
                    theme::placeholder(),
                )),
                area,
            );
            return;
        };

        let [top, bottom] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(4)]).areas(area);
        let [school, revenue] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);

        let value = |v: String| Span::styled(v, theme::tab_active());

        frame.render_widget(
            Self::card(
                " School ",
                vec![
                    Line::from(vec![
                        Span::raw("Students:     "),
                        value(stats.total_students.to_string()),
                    ]),
                    Line::from(vec![
                        Span::raw("Consultants:  "),
                        value(stats.total_consultants.to_string()),
                    ]),
                    Line::from(vec![
                        Span::raw("Classes:      "),
                        value(format!(
                            "{} ({} active)",
                            stats.total_classes, stats.active_classes
                        )),
                    ]),
                    Line::from(vec![
                        Span::raw("Enrollments:  "),
                        value(format!(
                            "{} ({} recent)",
                            stats.total_enrollments, stats.recent_enrollments
                        )),
                    ]),
                    Line::from(vec![
                        Span::raw("Attendance:   "),
                        value(format!("{:.0}%", stats.attendance_rate * 100.0)),
                    ]),
                ],
            ),
            school,
        );

        frame.render_widget(
            Self::card(
                " Revenue ",
                vec![
                    Line::from(vec![
                        Span::raw("Total:       "),
                        value(format!("{:.2}", stats.total_revenue)),
                    ]),
                    Line::from(vec![
                        Span::raw("This month:  "),
                        value(format!("{:.2}", stats.monthly_revenue)),
                    ]),
                    Line::from(vec![
                        Span::raw("Paid:        "),
                        Span::styled(
                            stats.paid_payments.to_string(),
                            ratatui::style::Style::default().fg(theme::SUCCESS_GREEN),
                        ),
                    ]),
                    Line::from(vec![
                        Span::raw("Pending:     "),
                        Span::styled(
                            stats.pending_payments.to_string(),
                            ratatui::style::Style::default().fg(theme::WARM_AMBER),
                        ),
                    ]),
                    Line::from(vec![
                        Span::raw("Overdue:     "),
                        Span::styled(
                            stats.overdue_payments.to_string(),
                            ratatui::style::Style::default().fg(theme::ERROR_RED),
                        ),
                    ]),
                ],
            ),
            revenue,
        );

        let activity: Vec<Line> = stats
            .recent_activity
            .iter()
            .take(usize::from(bottom.height.saturating_sub(2)))
            .map(|entry| {
                Line::from(vec![
                    Span::styled(entry.date.clone(), theme::key_hint()),
                    Span::raw("  "),
                    Span::styled(entry.description.clone(), theme::table_row()),
                ])
            })
            .collect();
        frame.render_widget(Self::card(" Recent activity ", activity), bottom);
    }

    fn id(&self) -> &str {
        "dashboard"
    }
}
