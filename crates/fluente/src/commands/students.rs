//! Student command handlers.

use tabled::Tabled;

use fluente_api::{
    ApiClient, CreateUserInput, PaymentQuery, UpdateUserInput, User, UserQuery, UserRole,
};

use crate::cli::{GlobalOpts, StudentsArgs, StudentsCommand};
use crate::error::CliError;
use crate::output;

use super::{payments, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Since")]
    since: String,
}

impl From<&User> for StudentRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            since: user.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

fn detail(user: &User) -> String {
    let mut lines = vec![
        format!("ID:        {}", user.id),
        format!("Name:      {}", user.full_name),
        format!("Email:     {}", user.email),
        format!("Phone:     {}", user.phone.as_deref().unwrap_or("-")),
        format!("Birth:     {}", user.birth_date.as_deref().unwrap_or("-")),
        format!("Address:   {}", user.address.as_deref().unwrap_or("-")),
        format!(
            "Emergency: {}",
            user.emergency_contact.as_deref().unwrap_or("-")
        ),
        format!("Since:     {}", user.created_at.format("%Y-%m-%d")),
    ];
    if let Some(ref notes) = user.notes {
        lines.push(format!("Notes:     {notes}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: &ApiClient,
    args: StudentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StudentsCommand::List { list, search } => {
            let query = UserQuery {
                role: Some(UserRole::Student),
                search,
                page: Some(list.page),
                limit: Some(list.limit),
            };
            let page = api.list_users(&query).await?;
            let out = output::render_list(
                &global.output,
                &page.users,
                |r| StudentRow::from(r),
                |u| u.id.clone(),
            );
            output::print_output(&out, global.quiet);
            if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
                eprintln!("{} of {} students (page {})", page.users.len(), page.total, page.page);
            }
            Ok(())
        }

        StudentsCommand::Get { id } => {
            let user = api.get_user(&id).await?;
            let out = output::render_single(&global.output, &user, detail, |u| u.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Create {
            name,
            email,
            password,
            phone,
            birth_date,
            address,
            emergency_contact,
            notes,
        } => {
            let password = util::password_or_prompt(password, &email)?;
            let input = CreateUserInput {
                email,
                password,
                full_name: name,
                role: UserRole::Student,
                phone,
                birth_date,
                address,
                emergency_contact,
                notes,
            };
            let user = api.create_user(&input).await?;
            if !global.quiet {
                eprintln!("Student created: {} ({})", user.full_name, user.id);
            }
            Ok(())
        }

        StudentsCommand::Update {
            id,
            name,
            email,
            phone,
            notes,
        } => {
            let input = UpdateUserInput {
                full_name: name,
                email,
                phone,
                notes,
                ..UpdateUserInput::default()
            };
            let user = api.update_user(&id, &input).await?;
            if !global.quiet {
                eprintln!("Student updated: {}", user.full_name);
            }
            Ok(())
        }

        StudentsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete student {id}? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            api.delete_user(&id).await?;
            if !global.quiet {
                eprintln!("Student deleted");
            }
            Ok(())
        }

        StudentsCommand::Payments { id, list } => {
            let query = PaymentQuery {
                page: Some(list.page),
                limit: Some(list.limit),
                ..PaymentQuery::default()
            };
            let page = api.student_payments(&id, &query).await?;
            payments::print_payments_page(&page, global);
            Ok(())
        }
    }
}
