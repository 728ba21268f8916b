// User endpoints
//
// Students and consultants are both `User` records distinguished by role;
// the backend exposes them through `api/users?role=...`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, MessageResponse};
use crate::error::Error;

/// Account role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Consultant,
    Student,
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// Query-string value for role filtering.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Consultant => "CONSULTANT",
            Self::Student => "STUDENT",
            Self::Unknown => "",
        }
    }
}

/// A platform account (student, consultant, or admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paginated `api/users` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub role: Option<UserRole>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl UserQuery {
    /// Users with the given role.
    pub fn role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(role) = self.role {
            params.push(("role", role.as_query_value().to_owned()));
        }
        if let Some(ref search) = self.search {
            if !search.is_empty() {
                params.push(("search", search.clone()));
            }
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

/// Payload for creating a user (consultant or student registration).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial payload for updating a user.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApiClient {
    /// List users, optionally filtered by role / search term / page.
    pub async fn list_users(&self, query: &UserQuery) -> Result<UsersPage, Error> {
        self.get("users", &query.to_params()).await
    }

    /// Fetch a single user by id.
    pub async fn get_user(&self, id: &str) -> Result<User, Error> {
        self.get(&format!("users/{id}"), &[]).await
    }

    /// Create a user account.
    pub async fn create_user(&self, input: &CreateUserInput) -> Result<User, Error> {
        self.post("users", input).await
    }

    /// Update a user account.
    pub async fn update_user(&self, id: &str, input: &UpdateUserInput) -> Result<User, Error> {
        self.put(&format!("users/{id}"), input).await
    }

    /// Delete a user account.
    pub async fn delete_user(&self, id: &str) -> Result<MessageResponse, Error> {
        self.delete(&format!("users/{id}")).await
    }
}
