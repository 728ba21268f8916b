// ── API-backed option sources ──
//
// Adapters binding the picker's `OptionSource` contract to backend
// resources. Each adapter maps one resource to `{value, label}` pairs and
// implements the by-id fallback through the resource's GET endpoint.
//
// Malformed responses (the backend handing back something that does not
// decode as the expected list) are treated as zero options, never as a
// crash; genuine network/server failures surface as errors so the picker
// can show its distinct error state.

use std::sync::Arc;

use fluente_api::{ApiClient, ClassQuery, User, UserQuery, UserRole};

use crate::error::CoreError;
use crate::picker::{OptionItem, OptionSource, SearchQuery};

/// `User` as a picker option: "Full Name (email)".
fn user_option(user: &User) -> OptionItem {
    OptionItem::new(&user.id, format!("{} ({})", user.full_name, user.email))
}

/// Case-insensitive containment for client-side narrowing.
fn matches_term(haystack: &str, term: &str) -> bool {
    term.is_empty() || haystack.to_lowercase().contains(&term.to_lowercase())
}

// ── Students ────────────────────────────────────────────────────────

/// Options source over students (`role=STUDENT`), searched server-side.
#[derive(Clone)]
pub struct StudentOptions {
    api: Arc<ApiClient>,
}

impl StudentOptions {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl OptionSource for StudentOptions {
    type Filters = ();

    async fn search(&self, query: &SearchQuery<()>) -> Result<Vec<OptionItem>, CoreError> {
        let request = UserQuery {
            role: Some(UserRole::Student),
            search: (!query.term.is_empty()).then(|| query.term.clone()),
            limit: Some(u32::try_from(query.limit).unwrap_or(u32::MAX)),
            page: None,
        };
        match self.api.list_users(&request).await {
            Ok(page) => Ok(page.users.iter().map(user_option).collect()),
            Err(fluente_api::Error::Deserialization { .. }) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<OptionItem>, CoreError> {
        match self.api.get_user(id).await {
            Ok(user) => Ok(Some(user_option(&user))),
            Err(fluente_api::Error::Api { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn supports_find_by_id(&self) -> bool {
        true
    }
}

// ── Consultants ─────────────────────────────────────────────────────

/// Options source over consultants (`role=CONSULTANT`).
#[derive(Clone)]
pub struct ConsultantOptions {
    api: Arc<ApiClient>,
}

impl ConsultantOptions {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl OptionSource for ConsultantOptions {
    type Filters = ();

    async fn search(&self, query: &SearchQuery<()>) -> Result<Vec<OptionItem>, CoreError> {
        let request = UserQuery {
            role: Some(UserRole::Consultant),
            search: (!query.term.is_empty()).then(|| query.term.clone()),
            limit: Some(u32::try_from(query.limit).unwrap_or(u32::MAX)),
            page: None,
        };
        match self.api.list_users(&request).await {
            Ok(page) => Ok(page.users.iter().map(user_option).collect()),
            Err(fluente_api::Error::Deserialization { .. }) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<OptionItem>, CoreError> {
        match self.api.get_user(id).await {
            Ok(user) => Ok(Some(user_option(&user))),
            Err(fluente_api::Error::Api { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn supports_find_by_id(&self) -> bool {
        true
    }
}

// ── Classes ─────────────────────────────────────────────────────────

/// Filters for the class options source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFilters {
    /// Offer only active classes (the default for enrollment-style forms).
    pub active_only: bool,
}

impl Default for ClassFilters {
    fn default() -> Self {
        Self { active_only: true }
    }
}

/// Options source over classes. The listing endpoint has no search
/// parameter, so the term narrows client-side on the class name.
#[derive(Clone)]
pub struct ClassOptions {
    api: Arc<ApiClient>,
}

impl ClassOptions {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl OptionSource for ClassOptions {
    type Filters = ClassFilters;

    async fn search(
        &self,
        query: &SearchQuery<ClassFilters>,
    ) -> Result<Vec<OptionItem>, CoreError> {
        let request = ClassQuery {
            is_active: query.filters.active_only.then_some(true),
            limit: Some(u32::try_from(query.limit).unwrap_or(u32::MAX)),
            ..ClassQuery::default()
        };
        match self.api.list_classes(&request).await {
            Ok(page) => Ok(page
                .classes
                .iter()
                .filter(|class| matches_term(&class.name, &query.term))
                .map(|class| OptionItem::new(&class.id, &class.name))
                .collect()),
            Err(fluente_api::Error::Deserialization { .. }) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<OptionItem>, CoreError> {
        match self.api.get_class(id).await {
            Ok(class) => Ok(Some(OptionItem::new(&class.id, &class.name))),
            Err(fluente_api::Error::Api { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn supports_find_by_id(&self) -> bool {
        true
    }
}

// ── Contents ────────────────────────────────────────────────────────

/// Filters for the content options source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentFilters {
    /// Restrict to one module (e.g. when attaching a lesson for a class
    /// working through a specific book).
    pub module: Option<String>,
}

/// Options source over course contents, labeled "title (module)".
#[derive(Clone)]
pub struct ContentOptions {
    api: Arc<ApiClient>,
}

impl ContentOptions {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl OptionSource for ContentOptions {
    type Filters = ContentFilters;

    async fn search(
        &self,
        query: &SearchQuery<ContentFilters>,
    ) -> Result<Vec<OptionItem>, CoreError> {
        let contents = match &query.filters.module {
            Some(module) => self.api.contents_by_module(module).await,
            None => self
                .api
                .list_contents(None, Some(u32::try_from(query.limit).unwrap_or(u32::MAX)))
                .await
                .map(|page| page.contents),
        };
        match contents {
            Ok(contents) => Ok(contents
                .iter()
                .filter(|content| matches_term(&content.title, &query.term))
                .take(query.limit)
                .map(|content| {
                    OptionItem::new(&content.id, format!("{} ({})", content.title, content.module))
                })
                .collect()),
            Err(fluente_api::Error::Deserialization { .. }) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<OptionItem>, CoreError> {
        match self.api.get_content(id).await {
            Ok(content) => Ok(Some(OptionItem::new(
                &content.id,
                format!("{} ({})", content.title, content.module),
            ))),
            Err(fluente_api::Error::Api { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn supports_find_by_id(&self) -> bool {
        true
    }
}
