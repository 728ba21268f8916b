//! Domain layer between `fluente-api` and UI consumers (CLI / TUI).
//!
//! - **[`picker`]** — the remote select picker: a headless, reusable
//!   search-and-select controller with debounced search, stale-response
//!   discarding, and selection label resolution. UI crates render its
//!   snapshots; forms read its selection.
//! - **[`lookup`]** — `OptionSource` adapters binding the picker to
//!   backend resources (students, consultants, classes, contents).
//! - **[`CoreError`]** — domain-appropriate error type; transport errors
//!   from `fluente-api` are translated, never exposed raw.

pub mod error;
pub mod lookup;
pub mod picker;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use lookup::{
    ClassFilters, ClassOptions, ConsultantOptions, ContentFilters, ContentOptions, StudentOptions,
};
pub use picker::{
    OptionItem, OptionSource, Picker, PickerBuilder, PickerSnapshot, SearchPhase, SearchQuery,
    SelectedEntry, Selection, SelectionMode,
};
