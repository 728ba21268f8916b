// Course content endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, MessageResponse};
use crate::error::Error;

/// Class summary embedded in a content's lesson usages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    pub id: String,
    pub name: String,
}

/// A lesson that used this content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLessonUsage {
    pub id: String,
    pub class_id: String,
    pub lesson_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    pub was_completed: bool,
    pub class: ClassRef,
}

/// One unit of course material (slides, PDFs, homework).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub module: String,
    pub order: u32,
    #[serde(default)]
    pub presentation_url: Option<String>,
    #[serde(default)]
    pub students_pdf_url: Option<String>,
    #[serde(default)]
    pub homework_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub class_lessons: Option<Vec<ContentLessonUsage>>,
}

/// Paginated `api/contents` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsPage {
    pub contents: Vec<Content>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Payload for creating a content unit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub module: String,
    pub order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students_pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homework_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial payload for updating a content unit.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students_pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homework_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    /// List contents, paginated.
    pub async fn list_contents(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ContentsPage, Error> {
        let mut params = Vec::new();
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.get("contents", &params).await
    }

    /// All contents belonging to one module, in module order.
    pub async fn contents_by_module(&self, module: &str) -> Result<Vec<Content>, Error> {
        self.get(&format!("contents/module/{module}"), &[]).await
    }

    /// Fetch one content unit.
    pub async fn get_content(&self, id: &str) -> Result<Content, Error> {
        self.get(&format!("contents/{id}"), &[]).await
    }

    /// Create a content unit.
    pub async fn create_content(&self, input: &CreateContentInput) -> Result<Content, Error> {
        self.post("contents", input).await
    }

    /// Update a content unit.
    pub async fn update_content(
        &self,
        id: &str,
        input: &UpdateContentInput,
    ) -> Result<Content, Error> {
        self.put(&format!("contents/{id}"), input).await
    }

    /// Delete a content unit.
    pub async fn delete_content(&self, id: &str) -> Result<MessageResponse, Error> {
        self.delete(&format!("contents/{id}")).await
    }
}
