//! Remote select picker — a reusable search-and-select control.
//!
//! The composed flow: keystroke → debounce timer → source search → option
//! list → pick → selection update → label resolution → snapshot publish.
//!
//! - **[`OptionSource`]** — the collaborator contract: search for
//!   `{value, label}` pairs, optionally look one up by id.
//! - **[`Selection`]** — single/multi selection as a tagged union with one
//!   shared mutation surface (select / remove / clear).
//! - **[`Picker`]** — handle to the running controller task. Commands go
//!   in over an mpsc channel; [`PickerSnapshot`]s come out over a watch
//!   channel, the same reactive shape the rest of the workspace uses.
//!
//! Stale fetch handling: every search is tagged with an epoch and the
//! query it was issued for; a completion that no longer matches the
//! authoritative query is discarded on arrival, so a rapidly retyped term
//! can never be overwritten by an earlier, slower response.

mod controller;
mod resolve;
mod selection;
mod source;

pub use controller::{
    DEFAULT_DEBOUNCE, DEFAULT_LIMIT, Picker, PickerBuilder, PickerSnapshot, SearchPhase,
};
pub use resolve::SelectedEntry;
pub use selection::{SelectOutcome, Selection, SelectionMode};
pub use source::{OptionItem, OptionSource, SearchQuery};
