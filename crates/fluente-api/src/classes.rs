// Class ("turma") endpoints
//
// Classes carry a consultant, a weekly schedule slot, and an enrollment
// list. Enrollment management lives under the class resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, MessageResponse};
use crate::error::Error;

/// Whether a class is billed to a company or an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassType {
    Corporate,
    Private,
}

/// CEFR level of a class, including the conversation variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    ConversationA1,
    ConversationA2,
    ConversationB1,
    ConversationB2,
    ConversationC1,
    ConversationC2,
}

/// Consultant summary embedded in class responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantRef {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// Student summary embedded in enrollment responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// A student's enrollment in a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub enrolled_at: DateTime<Utc>,
    pub is_active: bool,
    pub student: StudentRef,
}

/// A class group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub class_type: ClassType,
    pub level: ClassLevel,
    pub max_students: u32,
    pub is_active: bool,
    pub start_time: String,
    pub end_time: String,
    /// 0 = Sunday ... 6 = Saturday.
    pub day_of_week: u8,
    pub consultant_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub consultant: Option<ConsultantRef>,
    #[serde(default)]
    pub enrollments: Option<Vec<Enrollment>>,
}

/// Paginated `api/classes` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassesPage {
    pub classes: Vec<ClassGroup>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Filters for listing classes.
#[derive(Debug, Clone, Default)]
pub struct ClassQuery {
    pub class_type: Option<ClassType>,
    pub level: Option<ClassLevel>,
    pub consultant_id: Option<String>,
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ClassQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(class_type) = self.class_type {
            // serde knows the wire names; reuse them instead of a second mapping
            params.push(("type", enum_wire_name(&class_type)));
        }
        if let Some(level) = self.level {
            params.push(("level", enum_wire_name(&level)));
        }
        if let Some(ref consultant_id) = self.consultant_id {
            params.push(("consultantId", consultant_id.clone()));
        }
        if let Some(is_active) = self.is_active {
            params.push(("isActive", is_active.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Serialize a unit-variant enum to its wire (SCREAMING_SNAKE_CASE) name.
fn enum_wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(ToOwned::to_owned))
        .unwrap_or_default()
}

/// Payload for creating a class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub class_type: ClassType,
    pub level: ClassLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: u8,
    pub consultant_id: String,
}

/// Partial payload for updating a class.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub class_type: Option<ClassType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ClassLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultant_id: Option<String>,
}

impl ApiClient {
    /// List classes with optional filters.
    pub async fn list_classes(&self, query: &ClassQuery) -> Result<ClassesPage, Error> {
        self.get("classes", &query.to_params()).await
    }

    /// Fetch one class (includes consultant and enrollments when present).
    pub async fn get_class(&self, id: &str) -> Result<ClassGroup, Error> {
        self.get(&format!("classes/{id}"), &[]).await
    }

    /// Create a class.
    pub async fn create_class(&self, input: &CreateClassInput) -> Result<ClassGroup, Error> {
        self.post("classes", input).await
    }

    /// Update a class.
    pub async fn update_class(
        &self,
        id: &str,
        input: &UpdateClassInput,
    ) -> Result<ClassGroup, Error> {
        self.put(&format!("classes/{id}"), input).await
    }

    /// Delete a class.
    pub async fn delete_class(&self, id: &str) -> Result<MessageResponse, Error> {
        self.delete(&format!("classes/{id}")).await
    }

    /// Enroll a student in a class.
    pub async fn enroll_student(
        &self,
        class_id: &str,
        student_id: &str,
    ) -> Result<Enrollment, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct EnrollBody<'a> {
            student_id: &'a str,
        }
        self.post(
            &format!("classes/{class_id}/enroll"),
            &EnrollBody { student_id },
        )
        .await
    }

    /// Remove a student from a class.
    pub async fn unenroll_student(
        &self,
        class_id: &str,
        student_id: &str,
    ) -> Result<MessageResponse, Error> {
        self.delete(&format!("classes/{class_id}/students/{student_id}"))
            .await
    }

    /// List a class's enrollments.
    pub async fn class_enrollments(&self, class_id: &str) -> Result<Vec<Enrollment>, Error> {
        self.get(&format!("classes/{class_id}/enrollments"), &[])
            .await
    }
}
