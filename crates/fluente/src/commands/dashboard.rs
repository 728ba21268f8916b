//! Dashboard summary handler.

use owo_colors::OwoColorize;

use fluente_api::ApiClient;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(api: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = api.dashboard_stats().await?;

    if !matches!(global.output, OutputFormat::Table) {
        let out = output::render_single(
            &global.output,
            &stats,
            |_| String::new(),
            |s| s.total_students.to_string(),
        );
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let color = output::should_color(&global.color);
    let heading = |text: &str| {
        if color {
            text.bold().to_string()
        } else {
            text.to_owned()
        }
    };

    let mut lines = vec![
        heading("School"),
        format!("  Students:     {}", stats.total_students),
        format!("  Consultants:  {}", stats.total_consultants),
        format!("  Contents:     {}", stats.total_contents),
        format!(
            "  Classes:      {} ({} active)",
            stats.total_classes, stats.active_classes
        ),
        format!(
            "  Enrollments:  {} ({} recent)",
            stats.total_enrollments, stats.recent_enrollments
        ),
        format!("  Attendance:   {:.0}%", stats.attendance_rate * 100.0),
        String::new(),
        heading("Revenue"),
        format!("  Total:        {:.2}", stats.total_revenue),
        format!("  This month:   {:.2}", stats.monthly_revenue),
        format!(
            "  Payments:     {} paid / {} pending / {} overdue",
            stats.paid_payments, stats.pending_payments, stats.overdue_payments
        ),
    ];

    if !stats.recent_activity.is_empty() {
        lines.push(String::new());
        lines.push(heading("Recent activity"));
        for entry in stats.recent_activity.iter().take(8) {
            lines.push(format!("  {} {}", entry.date, entry.description));
        }
    }

    output::print_output(&lines.join("\n"), global.quiet);
    Ok(())
}
