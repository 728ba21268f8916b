//! Payment command handlers.

use tabled::Tabled;

use fluente_api::{
    ApiClient, BulkCreatePaymentsInput, CreatePaymentInput, MarkPaidInput, Payment, PaymentQuery,
    PaymentSortBy, PaymentStatus, PaymentsPage,
};

use crate::cli::{GlobalOpts, PaymentStatusArg, PaymentsArgs, PaymentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Argument conversion ─────────────────────────────────────────────

impl From<PaymentStatusArg> for PaymentStatus {
    fn from(arg: PaymentStatusArg) -> Self {
        match arg {
            PaymentStatusArg::Pending => Self::Pending,
            PaymentStatusArg::Paid => Self::Paid,
            PaymentStatusArg::Overdue => Self::Overdue,
            PaymentStatusArg::Cancelled => Self::Cancelled,
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn payment_row(payment: &Payment, color: bool) -> PaymentRow {
    PaymentRow {
        id: payment.id.clone(),
        student: payment.student.full_name.clone(),
        description: payment.description.clone(),
        amount: format!("{:.2}", payment.amount),
        due: payment.due_date.format("%Y-%m-%d").to_string(),
        status: output::status_colored(payment.status.as_str(), color),
    }
}

fn detail(payment: &Payment) -> String {
    let mut lines = vec![
        format!("ID:          {}", payment.id),
        format!(
            "Student:     {} ({})",
            payment.student.full_name, payment.student.email
        ),
        format!("Description: {}", payment.description),
        format!("Amount:      {:.2}", payment.amount),
        format!("Status:      {}", payment.status.as_str()),
        format!("Due:         {}", payment.due_date.format("%Y-%m-%d")),
        format!(
            "Reference:   {:02}/{}",
            payment.reference_month, payment.reference_year
        ),
    ];
    if let Some(ref class) = payment.class {
        lines.push(format!("Class:       {}", class.name));
    }
    if let Some(paid) = payment.paid_date {
        lines.push(format!("Paid:        {}", paid.format("%Y-%m-%d")));
    }
    if let Some(ref notes) = payment.notes {
        lines.push(format!("Notes:       {notes}"));
    }
    lines.join("\n")
}

/// Shared renderer for payment pages (also used by `students payments`).
pub fn print_payments_page(page: &PaymentsPage, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &page.payments,
        |p| payment_row(p, color),
        |p| p.id.clone(),
    );
    output::print_output(&out, global.quiet);
    if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
        eprintln!(
            "{} of {} payments (page {})",
            page.payments.len(),
            page.total,
            page.page
        );
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    api: &ApiClient,
    args: PaymentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PaymentsCommand::List {
            list,
            status,
            student,
            class,
            month,
            year,
        } => {
            let query = PaymentQuery {
                status: status.map(Into::into),
                student_id: student,
                class_id: class,
                reference_month: month,
                reference_year: year,
                sort_by: Some(PaymentSortBy::DueDate),
                sort_descending: true,
                page: Some(list.page),
                limit: Some(list.limit),
            };
            let page = api.list_payments(&query).await?;
            print_payments_page(&page, global);
            Ok(())
        }

        PaymentsCommand::Get { id } => {
            let payment = api.get_payment(&id).await?;
            let out = output::render_single(&global.output, &payment, detail, |p| p.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Create {
            student,
            class,
            amount,
            description,
            due,
            month,
            year,
            notes,
        } => {
            let (default_month, default_year) = util::current_reference_period();
            let input = CreatePaymentInput {
                student_id: student,
                class_id: class,
                amount,
                description,
                due_date: util::parse_date("due", &due)?,
                reference_month: month.unwrap_or(default_month),
                reference_year: year.unwrap_or(default_year),
                notes,
            };
            let payment = api.create_payment(&input).await?;
            if !global.quiet {
                eprintln!(
                    "Payment created: {} {:.2} for {}",
                    payment.id, payment.amount, payment.student.full_name
                );
            }
            Ok(())
        }

        PaymentsCommand::Pay { id, date, notes } => {
            let input = MarkPaidInput {
                paid_date: date.as_deref().map(|d| util::parse_date("date", d)).transpose()?,
                notes,
            };
            let payment = api.mark_payment_paid(&id, &input).await?;
            if !global.quiet {
                eprintln!("Payment {} marked as paid", payment.id);
            }
            Ok(())
        }

        PaymentsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete payment {id}?"), global.yes)? {
                return Ok(());
            }
            api.delete_payment(&id).await?;
            if !global.quiet {
                eprintln!("Payment deleted");
            }
            Ok(())
        }

        PaymentsCommand::Stats => {
            let stats = api.payment_stats().await?;
            let out = output::render_single(
                &global.output,
                &stats,
                |s| {
                    [
                        format!("Total:    {} ({:.2})", s.total_payments, s.total_amount),
                        format!("Paid:     {} ({:.2})", s.paid_payments, s.paid_amount),
                        format!("Pending:  {} ({:.2})", s.pending_payments, s.pending_amount),
                        format!("Overdue:  {} ({:.2})", s.overdue_payments, s.overdue_amount),
                    ]
                    .join("\n")
                },
                |s| s.total_payments.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Bulk {
            class,
            amount,
            description,
            due,
            month,
            year,
        } => {
            if !util::confirm(
                &format!("Create a {amount:.2} payment for every active student of class {class}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let (default_month, default_year) = util::current_reference_period();
            let input = BulkCreatePaymentsInput {
                class_id: class,
                amount,
                description,
                due_date: util::parse_date("due", &due)?,
                reference_month: month.unwrap_or(default_month),
                reference_year: year.unwrap_or(default_year),
            };
            let result = api.create_bulk_payments(&input).await?;
            if !global.quiet {
                eprintln!(
                    "{} payment(s) created for {} student(s)",
                    result.payments_created,
                    result.students_affected.len()
                );
            }
            Ok(())
        }
    }
}
