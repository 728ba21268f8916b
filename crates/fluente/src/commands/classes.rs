//! Class ("turma") command handlers.

use tabled::Tabled;

use fluente_api::{
    ApiClient, ClassGroup, ClassLevel, ClassQuery, ClassType, CreateClassInput, Enrollment,
    UpdateClassInput,
};

use crate::cli::{ClassTypeArg, ClassesArgs, ClassesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Argument conversion ─────────────────────────────────────────────

impl From<ClassTypeArg> for ClassType {
    fn from(arg: ClassTypeArg) -> Self {
        match arg {
            ClassTypeArg::Corporate => Self::Corporate,
            ClassTypeArg::Private => Self::Private,
        }
    }
}

/// Parse a level string (case-insensitive) into a `ClassLevel`.
fn parse_level(value: &str) -> Result<ClassLevel, CliError> {
    let normalized = value.to_uppercase();
    let level = match normalized.as_str() {
        "A1" => ClassLevel::A1,
        "A2" => ClassLevel::A2,
        "B1" => ClassLevel::B1,
        "B2" => ClassLevel::B2,
        "C1" => ClassLevel::C1,
        "C2" => ClassLevel::C2,
        "CONVERSATION_A1" => ClassLevel::ConversationA1,
        "CONVERSATION_A2" => ClassLevel::ConversationA2,
        "CONVERSATION_B1" => ClassLevel::ConversationB1,
        "CONVERSATION_B2" => ClassLevel::ConversationB2,
        "CONVERSATION_C1" => ClassLevel::ConversationC1,
        "CONVERSATION_C2" => ClassLevel::ConversationC2,
        _ => {
            return Err(CliError::Validation {
                field: "level".into(),
                reason: format!(
                    "expected A1..C2 or CONVERSATION_A1..CONVERSATION_C2, got '{value}'"
                ),
            });
        }
    };
    Ok(level)
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    class_type: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Consultant")]
    consultant: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&ClassGroup> for ClassRow {
    fn from(class: &ClassGroup) -> Self {
        Self {
            id: class.id.clone(),
            name: class.name.clone(),
            class_type: format!("{:?}", class.class_type),
            level: format!("{:?}", class.level),
            schedule: format!(
                "{} {}-{}",
                util::day_name(class.day_of_week),
                class.start_time,
                class.end_time
            ),
            consultant: class
                .consultant
                .as_ref()
                .map_or_else(|| class.consultant_id.clone(), |c| c.full_name.clone()),
            active: if class.is_active { "yes" } else { "no" }.into(),
        }
    }
}

#[derive(Tabled)]
struct EnrollmentRow {
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Enrolled")]
    enrolled: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Enrollment> for EnrollmentRow {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            student: enrollment.student.full_name.clone(),
            email: enrollment.student.email.clone(),
            enrolled: enrollment.enrolled_at.format("%Y-%m-%d").to_string(),
            active: if enrollment.is_active { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(class: &ClassGroup) -> String {
    let mut lines = vec![
        format!("ID:          {}", class.id),
        format!("Name:        {}", class.name),
        format!("Type:        {:?}", class.class_type),
        format!("Level:       {:?}", class.level),
        format!(
            "Schedule:    {} {}-{}",
            util::day_name(class.day_of_week),
            class.start_time,
            class.end_time
        ),
        format!("Max:         {}", class.max_students),
        format!("Active:      {}", class.is_active),
    ];
    if let Some(ref consultant) = class.consultant {
        lines.push(format!(
            "Consultant:  {} ({})",
            consultant.full_name, consultant.email
        ));
    }
    if let Some(ref description) = class.description {
        lines.push(format!("Description: {description}"));
    }
    if let Some(ref enrollments) = class.enrollments {
        lines.push(format!("Enrolled:    {}", enrollments.len()));
        for enrollment in enrollments {
            lines.push(format!(
                "  - {} ({})",
                enrollment.student.full_name, enrollment.student.email
            ));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    api: &ApiClient,
    args: ClassesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ClassesCommand::List {
            list,
            class_type,
            level,
            consultant,
            active,
        } => {
            let query = ClassQuery {
                class_type: class_type.map(Into::into),
                level: level.as_deref().map(parse_level).transpose()?,
                consultant_id: consultant,
                is_active: active.then_some(true),
                page: Some(list.page),
                limit: Some(list.limit),
            };
            let page = api.list_classes(&query).await?;
            let out = output::render_list(
                &global.output,
                &page.classes,
                |r| ClassRow::from(r),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClassesCommand::Get { id } => {
            let class = api.get_class(&id).await?;
            let out = output::render_single(&global.output, &class, detail, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClassesCommand::Create {
            name,
            class_type,
            level,
            consultant,
            start_time,
            end_time,
            day_of_week,
            max_students,
            description,
        } => {
            let input = CreateClassInput {
                name,
                description,
                class_type: class_type.into(),
                level: parse_level(&level)?,
                max_students,
                is_active: Some(true),
                start_time,
                end_time,
                day_of_week,
                consultant_id: consultant,
            };
            let class = api.create_class(&input).await?;
            if !global.quiet {
                eprintln!("Class created: {} ({})", class.name, class.id);
            }
            Ok(())
        }

        ClassesCommand::Update {
            id,
            name,
            level,
            consultant,
            active,
        } => {
            let input = UpdateClassInput {
                name,
                level: level.as_deref().map(parse_level).transpose()?,
                consultant_id: consultant,
                is_active: active,
                ..UpdateClassInput::default()
            };
            let class = api.update_class(&id, &input).await?;
            if !global.quiet {
                eprintln!("Class updated: {}", class.name);
            }
            Ok(())
        }

        ClassesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete class {id}? Enrollments and lessons go with it."),
                global.yes,
            )? {
                return Ok(());
            }
            api.delete_class(&id).await?;
            if !global.quiet {
                eprintln!("Class deleted");
            }
            Ok(())
        }

        ClassesCommand::Enroll { id, student } => {
            api.enroll_student(&id, &student).await?;
            if !global.quiet {
                eprintln!("Student enrolled");
            }
            Ok(())
        }

        ClassesCommand::Unenroll { id, student } => {
            if !util::confirm(&format!("Remove student {student} from class {id}?"), global.yes)? {
                return Ok(());
            }
            api.unenroll_student(&id, &student).await?;
            if !global.quiet {
                eprintln!("Student removed from class");
            }
            Ok(())
        }

        ClassesCommand::Enrollments { id } => {
            let enrollments = api.class_enrollments(&id).await?;
            let out = output::render_list(
                &global.output,
                &enrollments,
                |r| EnrollmentRow::from(r),
                |e| e.student_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_is_case_insensitive() {
        assert_eq!(parse_level("b2").unwrap(), ClassLevel::B2);
        assert_eq!(
            parse_level("conversation_c1").unwrap(),
            ClassLevel::ConversationC1
        );
    }

    #[test]
    fn unknown_level_is_a_validation_error() {
        assert!(matches!(
            parse_level("D1"),
            Err(CliError::Validation { .. })
        ));
    }
}
