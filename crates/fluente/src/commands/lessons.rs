//! Lesson command handlers.

use tabled::Tabled;

use fluente_api::{ApiClient, CreateLessonInput, Lesson, UpdateLessonInput};

use crate::cli::{GlobalOpts, LessonsArgs, LessonsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LessonRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Lesson> for LessonRow {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            date: lesson.lesson_date.format("%Y-%m-%d").to_string(),
            content: lesson
                .content
                .as_ref()
                .map_or_else(|| lesson.content_id.clone(), |c| c.title.clone()),
            done: if lesson.was_completed { "yes" } else { "no" }.into(),
            notes: lesson.notes.clone().unwrap_or_default(),
        }
    }
}

fn detail(lesson: &Lesson) -> String {
    let mut lines = vec![
        format!("ID:       {}", lesson.id),
        format!("Date:     {}", lesson.lesson_date.format("%Y-%m-%d")),
        format!("Done:     {}", lesson.was_completed),
    ];
    if let Some(ref class) = lesson.class {
        lines.push(format!("Class:    {} ({})", class.name, class.level));
    }
    if let Some(ref content) = lesson.content {
        lines.push(format!(
            "Content:  {} ({} #{})",
            content.title, content.module, content.order
        ));
    }
    if let Some(ref notes) = lesson.notes {
        lines.push(format!("Notes:    {notes}"));
    }
    if let Some(ref attendance) = lesson.attendance {
        lines.push(format!("Attendance ({}):", attendance.len()));
        for record in attendance {
            let name = record
                .student
                .as_ref()
                .map_or(record.student_id.as_str(), |s| s.full_name.as_str());
            lines.push(format!("  - {name}: {:?}", record.status));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: &ApiClient,
    args: LessonsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LessonsCommand::List { class } => {
            let lessons = api.class_lessons(&class).await?;
            let out = output::render_list(
                &global.output,
                &lessons,
                |r| LessonRow::from(r),
                |l| l.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LessonsCommand::Get { id } => {
            let lesson = api.get_lesson(&id).await?;
            let out = output::render_single(&global.output, &lesson, detail, |l| l.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LessonsCommand::Create {
            class,
            content,
            date,
            notes,
        } => {
            let input = CreateLessonInput {
                class_id: class,
                content_id: content,
                lesson_date: util::parse_date("date", &date)?,
                notes,
            };
            let lesson = api.create_lesson(&input).await?;
            if !global.quiet {
                eprintln!("Lesson scheduled: {}", lesson.id);
            }
            Ok(())
        }

        LessonsCommand::Complete { id } => {
            let input = UpdateLessonInput {
                was_completed: Some(true),
                ..UpdateLessonInput::default()
            };
            api.update_lesson(&id, &input).await?;
            if !global.quiet {
                eprintln!("Lesson marked as completed");
            }
            Ok(())
        }

        LessonsCommand::Update {
            id,
            content,
            date,
            notes,
        } => {
            let input = UpdateLessonInput {
                content_id: content,
                lesson_date: date.as_deref().map(|d| util::parse_date("date", d)).transpose()?,
                notes,
                was_completed: None,
            };
            api.update_lesson(&id, &input).await?;
            if !global.quiet {
                eprintln!("Lesson updated");
            }
            Ok(())
        }

        LessonsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete lesson {id}?"), global.yes)? {
                return Ok(());
            }
            api.delete_lesson(&id).await?;
            if !global.quiet {
                eprintln!("Lesson deleted");
            }
            Ok(())
        }
    }
}
