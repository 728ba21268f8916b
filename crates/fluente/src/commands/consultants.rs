//! Consultant command handlers.

use tabled::Tabled;

use fluente_api::{ApiClient, CreateUserInput, User, UserQuery, UserRole};

use crate::cli::{ConsultantsArgs, ConsultantsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ConsultantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl From<&User> for ConsultantRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }
}

fn detail(user: &User) -> String {
    [
        format!("ID:     {}", user.id),
        format!("Name:   {}", user.full_name),
        format!("Email:  {}", user.email),
        format!("Phone:  {}", user.phone.as_deref().unwrap_or("-")),
        format!("Notes:  {}", user.notes.as_deref().unwrap_or("-")),
        format!("Since:  {}", user.created_at.format("%Y-%m-%d")),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: &ApiClient,
    args: ConsultantsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConsultantsCommand::List { list, search } => {
            let query = UserQuery {
                role: Some(UserRole::Consultant),
                search,
                page: Some(list.page),
                limit: Some(list.limit),
            };
            let page = api.list_users(&query).await?;
            let out = output::render_list(
                &global.output,
                &page.users,
                |r| ConsultantRow::from(r),
                |u| u.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConsultantsCommand::Get { id } => {
            let user = api.get_user(&id).await?;
            let out = output::render_single(&global.output, &user, detail, |u| u.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConsultantsCommand::Create {
            name,
            email,
            password,
            phone,
            notes,
        } => {
            let password = util::password_or_prompt(password, &email)?;
            let input = CreateUserInput {
                email,
                password,
                full_name: name,
                role: UserRole::Consultant,
                phone,
                birth_date: None,
                address: None,
                emergency_contact: None,
                notes,
            };
            let user = api.create_user(&input).await?;
            if !global.quiet {
                eprintln!("Consultant created: {} ({})", user.full_name, user.id);
            }
            Ok(())
        }

        ConsultantsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete consultant {id}? Their classes keep running."),
                global.yes,
            )? {
                return Ok(());
            }
            api.delete_user(&id).await?;
            if !global.quiet {
                eprintln!("Consultant deleted");
            }
            Ok(())
        }
    }
}
