// ── Remote option source contract ──
//
// The picker's only external dependency: something that can search for
// `{value, label}` pairs and (optionally) look one up by id.

use std::future::Future;

use crate::error::CoreError;

/// A display-ready reference to a remote entity.
///
/// Immutable once fetched; unique by `value` within one result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One search request: the debounced term plus paging and source filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<F> {
    /// Debounced search term. Empty means "default page".
    pub term: String,
    /// Maximum number of options to return.
    pub limit: usize,
    /// Source-specific filters (e.g. "active classes only").
    pub filters: F,
}

/// Provider of options for a [`Picker`](crate::picker::Picker).
///
/// `search` is required; `find_by_id` is the optional fallback used to
/// resolve labels for selected ids absent from the current result page.
/// Sources that implement it must also override `supports_find_by_id`,
/// otherwise the picker will not issue lookups and unresolvable ids fall
/// back to their raw value.
pub trait OptionSource: Send + Sync + 'static {
    /// Source-specific filter type; compared to detect query changes.
    type Filters: Clone + PartialEq + Send + Sync + 'static;

    /// Search for options matching the query.
    fn search(
        &self,
        query: &SearchQuery<Self::Filters>,
    ) -> impl Future<Output = Result<Vec<OptionItem>, CoreError>> + Send;

    /// Look up a single option by id. The default never finds anything.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<OptionItem>, CoreError>> + Send {
        let _ = id;
        async { Ok(None) }
    }

    /// Whether `find_by_id` is implemented.
    fn supports_find_by_id(&self) -> bool {
        false
    }
}

// Shared sources (`Arc<S>`) are sources themselves.
impl<S: OptionSource> OptionSource for std::sync::Arc<S> {
    type Filters = S::Filters;

    fn search(
        &self,
        query: &SearchQuery<Self::Filters>,
    ) -> impl Future<Output = Result<Vec<OptionItem>, CoreError>> + Send {
        self.as_ref().search(query)
    }

    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<OptionItem>, CoreError>> + Send {
        self.as_ref().find_by_id(id)
    }

    fn supports_find_by_id(&self) -> bool {
        self.as_ref().supports_find_by_id()
    }
}
