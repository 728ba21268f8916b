//! Course content command handlers.

use tabled::Tabled;

use fluente_api::{ApiClient, Content, CreateContentInput, UpdateContentInput};

use crate::cli::{ContentsArgs, ContentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ContentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "#")]
    order: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Content> for ContentRow {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id.clone(),
            module: content.module.clone(),
            order: content.order,
            title: content.title.clone(),
            active: if content.is_active { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(content: &Content) -> String {
    let mut lines = vec![
        format!("ID:           {}", content.id),
        format!("Title:        {}", content.title),
        format!("Module:       {} (#{})", content.module, content.order),
        format!(
            "Description:  {}",
            content.description.as_deref().unwrap_or("-")
        ),
        format!(
            "Presentation: {}",
            content.presentation_url.as_deref().unwrap_or("-")
        ),
        format!(
            "Students PDF: {}",
            content.students_pdf_url.as_deref().unwrap_or("-")
        ),
        format!(
            "Homework:     {}",
            content.homework_url.as_deref().unwrap_or("-")
        ),
        format!("Active:       {}", content.is_active),
    ];
    if let Some(ref lessons) = content.class_lessons {
        lines.push(format!("Used in {} lesson(s)", lessons.len()));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: &ApiClient,
    args: ContentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ContentsCommand::List(list) => {
            let page = api
                .list_contents(Some(list.page), Some(list.limit))
                .await?;
            let out = output::render_list(
                &global.output,
                &page.contents,
                |r| ContentRow::from(r),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContentsCommand::Module { module } => {
            let contents = api.contents_by_module(&module).await?;
            let out = output::render_list(
                &global.output,
                &contents,
                |r| ContentRow::from(r),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContentsCommand::Get { id } => {
            let content = api.get_content(&id).await?;
            let out = output::render_single(&global.output, &content, detail, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContentsCommand::Create {
            title,
            module,
            order,
            description,
            presentation_url,
            students_pdf_url,
            homework_url,
        } => {
            let input = CreateContentInput {
                title,
                description,
                module,
                order,
                presentation_url,
                students_pdf_url,
                homework_url,
                is_active: Some(true),
            };
            let content = api.create_content(&input).await?;
            if !global.quiet {
                eprintln!("Content created: {} ({})", content.title, content.id);
            }
            Ok(())
        }

        ContentsCommand::Update {
            id,
            title,
            module,
            order,
            active,
        } => {
            let input = UpdateContentInput {
                title,
                module,
                order,
                is_active: active,
                ..UpdateContentInput::default()
            };
            let content = api.update_content(&id, &input).await?;
            if !global.quiet {
                eprintln!("Content updated: {}", content.title);
            }
            Ok(())
        }

        ContentsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete content {id}?"), global.yes)? {
                return Ok(());
            }
            api.delete_content(&id).await?;
            if !global.quiet {
                eprintln!("Content deleted");
            }
            Ok(())
        }
    }
}
