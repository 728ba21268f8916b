// Lesson endpoints
//
// A lesson ties a class to a content unit on a date, and optionally
// carries per-student attendance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classes::StudentRef;
use crate::client::{ApiClient, MessageResponse};
use crate::error::Error;

/// Attendance status for one student at one lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

/// A student's attendance record for a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub student_id: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub student: Option<StudentRef>,
}

/// Class summary embedded in lesson responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonClassRef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub class_type: String,
    pub level: String,
}

/// Content summary embedded in lesson responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContentRef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub module: String,
    pub order: u32,
}

/// A scheduled (or delivered) lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub class_id: String,
    pub content_id: String,
    pub lesson_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    pub was_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub class: Option<LessonClassRef>,
    #[serde(default)]
    pub content: Option<LessonContentRef>,
    #[serde(default)]
    pub attendance: Option<Vec<Attendance>>,
}

/// Payload for creating a lesson.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonInput {
    pub class_id: String,
    pub content_id: String,
    pub lesson_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial payload for updating a lesson.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_completed: Option<bool>,
}

impl ApiClient {
    /// Create a lesson attaching a content unit to a class on a date.
    pub async fn create_lesson(&self, input: &CreateLessonInput) -> Result<Lesson, Error> {
        self.post("lessons", input).await
    }

    /// Fetch one lesson (includes class, content, and attendance).
    pub async fn get_lesson(&self, id: &str) -> Result<Lesson, Error> {
        self.get(&format!("lessons/{id}"), &[]).await
    }

    /// All lessons of a class, in date order.
    pub async fn class_lessons(&self, class_id: &str) -> Result<Vec<Lesson>, Error> {
        self.get(&format!("lessons/class/{class_id}"), &[]).await
    }

    /// Update a lesson.
    pub async fn update_lesson(&self, id: &str, input: &UpdateLessonInput) -> Result<Lesson, Error> {
        self.put(&format!("lessons/{id}"), input).await
    }

    /// Delete a lesson.
    pub async fn delete_lesson(&self, id: &str) -> Result<MessageResponse, Error> {
        self.delete(&format!("lessons/{id}")).await
    }
}
