// ── Picker controller task ──
//
// One task owns all widget state. Inputs arrive as commands over an mpsc
// channel; state goes out as snapshots over a watch channel. Search and
// by-id lookups run as spawned sub-tasks reporting back through an
// internal event channel, tagged with the epoch of the query they were
// issued for -- a completion that no longer matches the authoritative
// query is discarded on arrival (last query wins, not last response).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::error::CoreError;

use super::resolve::{LabelResolver, SelectedEntry};
use super::selection::{SelectOutcome, Selection, SelectionMode};
use super::source::{OptionItem, OptionSource, SearchQuery};

/// Default debounce delay between keystroke and search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default page size requested from the source.
pub const DEFAULT_LIMIT: usize = 50;

/// Lifecycle of the option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search issued yet.
    Idle,
    /// A search for the current query is in flight.
    Loading,
    /// `options` reflect the current query.
    Ready,
    /// The last search failed. Distinct from an empty result; the widget
    /// stays usable and recovers on the next query change.
    Failed(String),
}

/// Point-in-time state of a picker, published after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSnapshot {
    /// Whether the option list is open.
    pub open: bool,
    /// Raw (un-debounced) search term, echoing keystrokes.
    pub term: String,
    pub phase: SearchPhase,
    /// Options for the current query, sorted case-insensitively by label.
    pub options: Arc<Vec<OptionItem>>,
    pub selection: Selection,
    /// Selected values with their resolved display labels, in display order.
    pub selected: Vec<SelectedEntry>,
}

impl PickerSnapshot {
    /// Convenience: selected values only.
    pub fn values(&self) -> Vec<String> {
        self.selection.values()
    }
}

enum PickerCommand<F> {
    SetTerm(String),
    Open,
    Close,
    Select(OptionItem),
    Remove(String),
    Clear,
    SetFilters(F),
    SetLimit(usize),
}

enum TaskEvent {
    SearchDone {
        epoch: u64,
        term: String,
        result: Result<Vec<OptionItem>, CoreError>,
    },
    LookupDone {
        value: String,
        result: Result<Option<OptionItem>, CoreError>,
    },
}

// ── Handle ──────────────────────────────────────────────────────────

/// Handle to a running picker task.
///
/// Cheaply cloneable. Dropping every handle ends the task; results of
/// fetches still in flight at that point are ignored.
#[derive(Debug)]
pub struct Picker<F> {
    commands: mpsc::UnboundedSender<PickerCommand<F>>,
    snapshot: watch::Receiver<PickerSnapshot>,
}

impl<F> Clone for Picker<F> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<F> Picker<F> {
    /// Feed a keystroke's worth of raw input. The search itself fires
    /// only once the input has been stable for the debounce delay.
    pub fn set_term(&self, term: impl Into<String>) {
        let _ = self.commands.send(PickerCommand::SetTerm(term.into()));
    }

    /// Open the option list.
    pub fn open(&self) {
        let _ = self.commands.send(PickerCommand::Open);
    }

    /// Close the option list and reset the search term.
    pub fn close(&self) {
        let _ = self.commands.send(PickerCommand::Close);
    }

    /// Pick an option from the list. Single-select replaces the value and
    /// closes the list; multi-select toggles membership and keeps it open.
    pub fn select(&self, item: OptionItem) {
        let _ = self.commands.send(PickerCommand::Select(item));
    }

    /// Remove one value from the selection (no-op if absent).
    pub fn remove(&self, value: impl Into<String>) {
        let _ = self.commands.send(PickerCommand::Remove(value.into()));
    }

    /// Empty the selection.
    pub fn clear(&self) {
        let _ = self.commands.send(PickerCommand::Clear);
    }

    /// Replace the source filters; re-issues the search immediately.
    pub fn set_filters(&self, filters: F) {
        let _ = self.commands.send(PickerCommand::SetFilters(filters));
    }

    /// Replace the page limit; re-issues the search immediately.
    pub fn set_limit(&self, limit: usize) {
        let _ = self.commands.send(PickerCommand::SetLimit(limit));
    }

    /// Current snapshot (cheap clone).
    pub fn snapshot(&self) -> PickerSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<PickerSnapshot> {
        self.snapshot.clone()
    }

    /// Wait for the next snapshot change. Returns `None` once the task
    /// has ended.
    pub async fn changed(&mut self) -> Option<PickerSnapshot> {
        self.snapshot.changed().await.ok()?;
        Some(self.snapshot.borrow_and_update().clone())
    }
}

// ── Builder ─────────────────────────────────────────────────────────

/// Configures and spawns a [`Picker`].
pub struct PickerBuilder<S: OptionSource> {
    source: Arc<S>,
    mode: SelectionMode,
    debounce: Duration,
    limit: usize,
    filters: S::Filters,
    seeds: Vec<OptionItem>,
    selected: Vec<String>,
}

impl<S: OptionSource> PickerBuilder<S>
where
    S::Filters: Default,
{
    /// Single-select picker over the given source.
    pub fn single(source: S) -> Self {
        Self::new(source, SelectionMode::Single)
    }

    /// Multi-select picker over the given source.
    pub fn multi(source: S) -> Self {
        Self::new(source, SelectionMode::Multi)
    }

    fn new(source: S, mode: SelectionMode) -> Self {
        Self {
            source: Arc::new(source),
            mode,
            debounce: DEFAULT_DEBOUNCE,
            limit: DEFAULT_LIMIT,
            filters: S::Filters::default(),
            seeds: Vec::new(),
            selected: Vec::new(),
        }
    }
}

impl<S: OptionSource> PickerBuilder<S> {
    /// Override the debounce delay.
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Override the page limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Initial source filters.
    pub fn filters(mut self, filters: S::Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Pre-seeded options: resolution source (a), and auto-selected when
    /// no initial selection is given.
    pub fn seeds(mut self, seeds: Vec<OptionItem>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Initial selection owned by the parent form.
    pub fn selected(mut self, values: Vec<String>) -> Self {
        self.selected = values;
        self
    }

    /// Spawn the picker task. Must be called from within a tokio runtime.
    pub fn spawn(self) -> Picker<S::Filters> {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let (snapshot_tx, snapshot_rx) = watch::channel(PickerSnapshot {
            open: false,
            term: String::new(),
            phase: SearchPhase::Idle,
            options: Arc::new(Vec::new()),
            selection: Selection::empty(self.mode),
            selected: Vec::new(),
        });

        // Seeds are consumed once at mount: they auto-select only when the
        // parent supplied no selection of its own.
        let selection = if self.selected.is_empty() {
            Selection::from_values(
                self.mode,
                self.seeds.iter().map(|s| s.value.clone()).collect(),
            )
        } else {
            Selection::from_values(self.mode, self.selected)
        };
        let resolver = LabelResolver::with_seeds(&self.seeds);

        let mut task = PickerTask {
            source: self.source,
            debounce: self.debounce,
            limit: self.limit,
            filters: self.filters,
            raw_term: String::new(),
            debounced_term: String::new(),
            debounce_deadline: None,
            epoch: 0,
            open: false,
            phase: SearchPhase::Idle,
            options: Arc::new(Vec::new()),
            selection,
            resolver,
            pending_lookups: HashSet::new(),
            events_tx,
            snapshot_tx,
        };

        // Establish the resolution invariant and kick off the initial
        // (default page) search before the first snapshot is published.
        task.reconcile_selection();
        task.issue_search();
        task.publish();
        tokio::spawn(task.run(commands_rx, events_rx));

        Picker {
            commands: commands_tx,
            snapshot: snapshot_rx,
        }
    }
}

// ── Task ────────────────────────────────────────────────────────────

struct PickerTask<S: OptionSource> {
    source: Arc<S>,
    debounce: Duration,
    limit: usize,
    filters: S::Filters,

    /// Raw term, updated on every keystroke.
    raw_term: String,
    /// Term the current search was issued for.
    debounced_term: String,
    /// When the debounce timer fires next, if armed.
    debounce_deadline: Option<Instant>,

    /// Bumped on every issued search; stale completions carry old values.
    epoch: u64,

    open: bool,
    phase: SearchPhase,
    options: Arc<Vec<OptionItem>>,
    selection: Selection,
    resolver: LabelResolver,
    /// Values with a by-id lookup in flight.
    pending_lookups: HashSet<String>,

    events_tx: mpsc::UnboundedSender<TaskEvent>,
    snapshot_tx: watch::Sender<PickerSnapshot>,
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl<S: OptionSource> PickerTask<S> {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PickerCommand<S::Filters>>,
        mut events: mpsc::UnboundedReceiver<TaskEvent>,
    ) {
        loop {
            tokio::select! {
                biased;

                cmd = commands.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    // All handles dropped: the widget is gone. In-flight
                    // fetch results die with the event channel.
                    None => break,
                },

                Some(event) = events.recv() => self.handle_event(event),

                () = sleep_until_deadline(self.debounce_deadline) => self.fire_debounce(),
            }
            self.publish();
        }
        debug!("picker task shut down");
    }

    fn handle_command(&mut self, command: PickerCommand<S::Filters>) {
        match command {
            PickerCommand::SetTerm(term) => {
                if term != self.raw_term {
                    self.raw_term = term;
                    self.debounce_deadline = Some(Instant::now() + self.debounce);
                }
            }
            PickerCommand::Open => self.open = true,
            PickerCommand::Close => {
                self.open = false;
                // Reset the search so the next open shows the default page.
                if !self.raw_term.is_empty() {
                    self.raw_term.clear();
                    self.debounce_deadline = Some(Instant::now() + self.debounce);
                }
            }
            PickerCommand::Select(item) => {
                // The picked item carries its label: cache it before the
                // snapshot goes out, so the chip never renders unresolved.
                self.resolver.record(&item.value, &item.label);
                let outcome = self.selection.select(&item.value);
                if outcome == SelectOutcome::Replaced {
                    self.open = false;
                }
                self.reconcile_selection();
            }
            PickerCommand::Remove(value) => {
                if self.selection.remove(&value) {
                    self.reconcile_selection();
                }
            }
            PickerCommand::Clear => self.selection.clear(),
            PickerCommand::SetFilters(filters) => {
                if filters != self.filters {
                    self.filters = filters;
                    self.issue_search();
                }
            }
            PickerCommand::SetLimit(limit) => {
                if limit != self.limit {
                    self.limit = limit;
                    self.issue_search();
                }
            }
        }
    }

    fn handle_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::SearchDone {
                epoch,
                term,
                result,
            } => {
                if epoch != self.epoch || term != self.debounced_term {
                    trace!(
                        stale_epoch = epoch,
                        current_epoch = self.epoch,
                        stale_term = %term,
                        "discarding stale search response"
                    );
                    return;
                }
                match result {
                    Ok(mut options) => {
                        options.sort_by(|a, b| {
                            a.label.to_lowercase().cmp(&b.label.to_lowercase())
                        });
                        self.options = Arc::new(options);
                        self.phase = SearchPhase::Ready;
                    }
                    Err(err) => {
                        warn!(error = %err, term = %term, "search failed");
                        self.phase = SearchPhase::Failed(err.to_string());
                    }
                }
                // Newly visible options may resolve selected ids; deferred
                // lookups also start here once the page outcome is known.
                self.reconcile_selection();
            }
            TaskEvent::LookupDone { value, result } => {
                self.pending_lookups.remove(&value);
                match result {
                    Ok(Some(item)) => self.resolver.record(&value, &item.label),
                    Ok(None) => self.resolver.mark_exhausted(&value),
                    Err(err) => {
                        // Lookup failures never surface; the raw id is the
                        // degraded display.
                        debug!(%value, error = %err, "by-id lookup failed");
                        self.resolver.mark_exhausted(&value);
                    }
                }
            }
        }
    }

    /// Debounce timer fired: commit the raw term if it actually changed.
    fn fire_debounce(&mut self) {
        self.debounce_deadline = None;
        if self.debounced_term != self.raw_term {
            self.debounced_term = self.raw_term.clone();
            self.issue_search();
        }
    }

    /// Issue a search for the current `(term, limit, filters)` under a new
    /// epoch.
    fn issue_search(&mut self) {
        self.epoch += 1;
        self.phase = SearchPhase::Loading;

        let query = SearchQuery {
            term: self.debounced_term.clone(),
            limit: self.limit,
            filters: self.filters.clone(),
        };
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        let epoch = self.epoch;
        trace!(epoch, term = %query.term, "issuing search");
        tokio::spawn(async move {
            let result = source.search(&query).await;
            // Send failure means the picker was dropped; nothing to do.
            let _ = events.send(TaskEvent::SearchDone {
                epoch,
                term: query.term,
                result,
            });
        });
    }

    /// Re-establish the resolution invariant: every selected value has a
    /// label, a pending local/remote resolution, or a recorded exhaustion
    /// (raw-id fallback).
    fn reconcile_selection(&mut self) {
        let values = self.selection.values();
        let needs_lookup = self.resolver.absorb_page(&values, &self.options);

        // Before the first page has landed the ids may still resolve
        // locally; hold off on lookups instead of racing the search. The
        // affected chips stay in their resolving state meanwhile.
        if matches!(self.phase, SearchPhase::Idle | SearchPhase::Loading) {
            return;
        }

        for value in needs_lookup {
            if self.pending_lookups.contains(&value) {
                continue;
            }
            if !self.source.supports_find_by_id() {
                self.resolver.mark_exhausted(&value);
                continue;
            }
            self.pending_lookups.insert(value.clone());
            let source = Arc::clone(&self.source);
            let events = self.events_tx.clone();
            tokio::spawn(async move {
                let result = source.find_by_id(&value).await;
                let _ = events.send(TaskEvent::LookupDone { value, result });
            });
        }
    }

    fn publish(&self) {
        let selected = self
            .selection
            .values()
            .into_iter()
            .map(|value| {
                let label = self.resolver.label_for(&value).map(ToOwned::to_owned);
                SelectedEntry {
                    resolving: label.is_none() && !self.resolver.is_exhausted(&value),
                    label,
                    value,
                }
            })
            .collect();

        self.snapshot_tx.send_replace(PickerSnapshot {
            open: self.open,
            term: self.raw_term.clone(),
            phase: self.phase.clone(),
            options: Arc::clone(&self.options),
            selection: self.selection.clone(),
            selected,
        });
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;

    /// In-memory source recording every issued search and lookup.
    #[derive(Default)]
    struct RecordingSource {
        options: Vec<OptionItem>,
        by_id: HashMap<String, OptionItem>,
        lookups_supported: bool,
        /// Per-term artificial latency, for race tests.
        delays: HashMap<String, Duration>,
        /// Terms whose search fails.
        fail_terms: Vec<String>,
        search_log: Mutex<Vec<String>>,
        lookup_log: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn with_options(pairs: &[(&str, &str)]) -> Self {
            Self {
                options: pairs
                    .iter()
                    .map(|(v, l)| OptionItem::new(*v, *l))
                    .collect(),
                ..Self::default()
            }
        }

        fn searches(&self) -> Vec<String> {
            self.search_log.lock().unwrap().clone()
        }

        fn lookups(&self) -> Vec<String> {
            self.lookup_log.lock().unwrap().clone()
        }
    }

    impl OptionSource for RecordingSource {
        type Filters = ();

        fn search(
            &self,
            query: &SearchQuery<()>,
        ) -> impl Future<Output = Result<Vec<OptionItem>, CoreError>> + Send {
            let term = query.term.clone();
            let needle = term.to_lowercase();
            let delay = self.delays.get(&term).copied();
            let fail = self.fail_terms.contains(&term);
            let matches: Vec<OptionItem> = self
                .options
                .iter()
                .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
                .take(query.limit)
                .cloned()
                .collect();
            self.search_log.lock().unwrap().push(term);
            async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                if fail {
                    return Err(CoreError::Internal("backend unavailable".into()));
                }
                Ok(matches)
            }
        }

        fn find_by_id(
            &self,
            id: &str,
        ) -> impl Future<Output = Result<Option<OptionItem>, CoreError>> + Send {
            self.lookup_log.lock().unwrap().push(id.to_owned());
            let found = self.by_id.get(id).cloned();
            async move { Ok(found) }
        }

        fn supports_find_by_id(&self) -> bool {
            self.lookups_supported
        }
    }

    async fn wait_for<F>(
        picker: &Picker<F>,
        pred: impl Fn(&PickerSnapshot) -> bool,
    ) -> PickerSnapshot {
        let mut rx = picker.subscribe();
        tokio::time::timeout(Duration::from_secs(30), async move {
            loop {
                {
                    let snap = rx.borrow_and_update();
                    if pred(&snap) {
                        return snap.clone();
                    }
                }
                rx.changed().await.expect("picker task ended");
            }
        })
        .await
        .expect("timed out waiting for picker snapshot")
    }

    fn labels(options: &[OptionItem]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn initial_search_loads_default_page() {
        let source = RecordingSource::with_options(&[("1", "Charlie"), ("2", "alice")]);
        let picker = PickerBuilder::single(source).spawn();

        let snap = wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;
        assert_eq!(labels(&snap.options), vec!["alice", "Charlie"]);
        assert!(snap.selection.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn options_sorted_case_insensitively() {
        let source = RecordingSource::with_options(&[
            ("1", "Bob"),
            ("2", "alice"),
            ("3", "Dave"),
            ("4", "carol"),
        ]);
        let picker = PickerBuilder::single(source).spawn();

        let snap = wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;
        assert_eq!(labels(&snap.options), vec!["alice", "Bob", "carol", "Dave"]);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_issues_one_fetch_with_final_term() {
        let source = Arc::new(RecordingSource::with_options(&[
            ("1", "John Doe"),
            ("2", "Johnny Lee"),
            ("3", "Alice"),
        ]));
        let picker = PickerBuilder::single(Arc::clone(&source)).spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.set_term("jo");
        tokio::time::sleep(Duration::from_millis(100)).await;
        picker.set_term("john");

        let snap = wait_for(&picker, |s| {
            s.phase == SearchPhase::Ready && s.options.len() == 2
        })
        .await;

        // Initial default-page fetch plus exactly one for the final term.
        assert_eq!(source.searches(), vec![String::new(), "john".to_owned()]);
        assert_eq!(labels(&snap.options), vec!["John Doe", "Johnny Lee"]);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_discarded() {
        let mut source = RecordingSource::with_options(&[
            ("1", "abacus"),
            ("2", "abchaos"),
            ("3", "azure"),
        ]);
        // "a" straggles; "abc" returns quickly.
        source.delays.insert("a".into(), Duration::from_millis(500));
        source.delays.insert("abc".into(), Duration::from_millis(10));
        let source = Arc::new(source);
        let picker = PickerBuilder::single(Arc::clone(&source)).spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.set_term("a");
        // Let the debounce fire so the slow "a" fetch is actually in flight.
        let _ = wait_for(&picker, |s| s.phase == SearchPhase::Loading).await;

        picker.set_term("ab");
        picker.set_term("abc");
        let snap = wait_for(&picker, |s| {
            s.phase == SearchPhase::Ready && s.options.len() == 2
        })
        .await;
        assert_eq!(labels(&snap.options), vec!["abacus", "abchaos"]);

        // The "a" response lands afterwards and must not overwrite.
        tokio::time::sleep(Duration::from_millis(600)).await;
        let snap = picker.snapshot();
        assert_eq!(labels(&snap.options), vec!["abacus", "abchaos"]);
        assert_eq!(snap.phase, SearchPhase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn search_failure_is_distinct_and_recoverable() {
        let mut source = RecordingSource::with_options(&[("1", "Alice")]);
        source.fail_terms.push("boom".into());
        let picker = PickerBuilder::single(source).spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.set_term("boom");
        let snap = wait_for(&picker, |s| matches!(s.phase, SearchPhase::Failed(_))).await;
        match &snap.phase {
            SearchPhase::Failed(message) => assert!(message.contains("backend unavailable")),
            other => panic!("expected Failed, got {other:?}"),
        }

        // Changing the term retries and recovers.
        picker.set_term("ali");
        let snap = wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;
        assert_eq!(labels(&snap.options), vec!["Alice"]);
    }

    #[tokio::test(start_paused = true)]
    async fn seed_resolution_skips_by_id_lookup() {
        let mut source = RecordingSource::with_options(&[("2", "Bob")]);
        source.lookups_supported = true;
        let source = Arc::new(source);
        let picker = PickerBuilder::multi(Arc::clone(&source))
            .seeds(vec![OptionItem::new("1", "Alice")])
            .selected(vec!["1".into()])
            .spawn();

        let snap = wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;
        assert_eq!(snap.selected.len(), 1);
        assert_eq!(snap.selected[0].display_label(), "Alice");
        assert!(source.lookups().is_empty(), "seed match must not hit the source");
    }

    #[tokio::test(start_paused = true)]
    async fn missing_id_resolves_via_lookup_or_falls_back() {
        let mut source = RecordingSource::with_options(&[("2", "Bob")]);
        source.lookups_supported = true;
        // "1" is absent from both the page and the by-id index.
        let source = Arc::new(source);
        let picker = PickerBuilder::multi(Arc::clone(&source))
            .selected(vec!["1".into(), "2".into()])
            .spawn();

        let snap = wait_for(&picker, |s| {
            s.phase == SearchPhase::Ready && s.selected.iter().all(|e| !e.resolving)
        })
        .await;

        let by_value: HashMap<&str, &SelectedEntry> =
            snap.selected.iter().map(|e| (e.value.as_str(), e)).collect();
        assert_eq!(by_value["2"].display_label(), "Bob");
        assert_eq!(by_value["1"].display_label(), "1", "raw id fallback");
        // Only the unresolvable id went through the lookup path.
        assert_eq!(source.lookups(), vec!["1".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_hit_resolves_label() {
        let mut source = RecordingSource::with_options(&[]);
        source.lookups_supported = true;
        source
            .by_id
            .insert("7".into(), OptionItem::new("7", "Grace"));
        let picker = PickerBuilder::single(source)
            .selected(vec!["7".into()])
            .spawn();

        let snap = wait_for(&picker, |s| {
            s.selected.iter().any(|e| e.label.is_some())
        })
        .await;
        assert_eq!(snap.selected[0].display_label(), "Grace");
    }

    #[tokio::test(start_paused = true)]
    async fn seeds_auto_select_when_no_selection_given() {
        let source = RecordingSource::with_options(&[]);
        let picker = PickerBuilder::multi(source)
            .seeds(vec![OptionItem::new("1", "Alice"), OptionItem::new("2", "Bob")])
            .spawn();

        let snap = wait_for(&picker, |s| !s.selection.is_empty()).await;
        assert_eq!(snap.values(), vec!["1".to_owned(), "2".to_owned()]);
        assert_eq!(snap.selected[0].display_label(), "Alice");
        assert_eq!(snap.selected[1].display_label(), "Bob");
    }

    #[tokio::test(start_paused = true)]
    async fn single_select_replaces_and_closes_list() {
        let source = RecordingSource::with_options(&[("1", "Alice"), ("2", "Bob")]);
        let picker = PickerBuilder::single(source).spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.open();
        wait_for(&picker, |s| s.open).await;

        picker.select(OptionItem::new("1", "Alice"));
        let snap = wait_for(&picker, |s| !s.selection.is_empty()).await;
        assert!(!snap.open, "single select closes the list");
        assert_eq!(snap.selected[0].display_label(), "Alice");

        picker.open();
        picker.select(OptionItem::new("2", "Bob"));
        let snap = wait_for(&picker, |s| s.selection.contains("2")).await;
        assert_eq!(snap.values(), vec!["2".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn multi_select_toggles_and_keeps_list_open() {
        let mut source = RecordingSource::with_options(&[("1", "Alice"), ("2", "Bob")]);
        source.lookups_supported = true;
        let source = Arc::new(source);
        let picker = PickerBuilder::multi(Arc::clone(&source)).spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.open();
        picker.select(OptionItem::new("1", "Alice"));
        picker.select(OptionItem::new("2", "Bob"));
        let snap = wait_for(&picker, |s| s.selection.values().len() == 2).await;
        assert!(snap.open, "multi select keeps the list open");

        // Toggling one off leaves the other's resolved label untouched and
        // triggers no refetch of the remaining selection.
        picker.select(OptionItem::new("1", "Alice"));
        let snap = wait_for(&picker, |s| s.selection.values().len() == 1).await;
        assert_eq!(snap.selected[0].display_label(), "Bob");
        assert!(source.lookups().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn remove_is_idempotent_through_the_task() {
        let source = RecordingSource::with_options(&[("1", "Alice"), ("2", "Bob")]);
        let picker = PickerBuilder::multi(source)
            .selected(vec!["1".into(), "2".into()])
            .spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.remove("1");
        let snap = wait_for(&picker, |s| s.selection.values().len() == 1).await;
        let first = snap.selection.clone();

        picker.remove("1");
        // A no-op remove publishes nothing new; poke the task and compare.
        picker.open();
        let snap = wait_for(&picker, |s| s.open).await;
        assert_eq!(snap.selection, first);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_empties_selection() {
        let source = RecordingSource::with_options(&[("1", "Alice"), ("2", "Bob")]);
        let picker = PickerBuilder::multi(source)
            .selected(vec!["1".into(), "2".into()])
            .spawn();
        wait_for(&picker, |s| !s.selection.is_empty()).await;

        picker.clear();
        let snap = wait_for(&picker, |s| s.selection.is_empty()).await;
        assert!(snap.selected.is_empty());
    }

    /// Source whose filter narrows results to one module.
    #[derive(Default)]
    struct FilteredSource {
        log: Mutex<Vec<(String, Option<String>)>>,
    }

    impl OptionSource for FilteredSource {
        type Filters = Option<String>;

        fn search(
            &self,
            query: &SearchQuery<Option<String>>,
        ) -> impl Future<Output = Result<Vec<OptionItem>, CoreError>> + Send {
            self.log
                .lock()
                .unwrap()
                .push((query.term.clone(), query.filters.clone()));
            let items = match &query.filters {
                Some(module) => vec![OptionItem::new("1", format!("{module}: Unit 1"))],
                None => vec![OptionItem::new("0", "All modules")],
            };
            async move { Ok(items) }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn filters_change_reissues_search_without_debounce() {
        let source = Arc::new(FilteredSource::default());
        let picker = PickerBuilder::single(Arc::clone(&source)).spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.set_filters(Some("Book 2".into()));
        let snap = wait_for(&picker, |s| {
            s.phase == SearchPhase::Ready
                && s.options.first().is_some_and(|o| o.label.starts_with("Book 2"))
        })
        .await;
        assert_eq!(snap.options.len(), 1);

        let log = source.log.lock().unwrap().clone();
        assert_eq!(
            log,
            vec![
                (String::new(), None),
                (String::new(), Some("Book 2".to_owned()))
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn close_resets_term_and_refetches_default_page() {
        let source = Arc::new(RecordingSource::with_options(&[("1", "Alice")]));
        let picker = PickerBuilder::single(Arc::clone(&source)).spawn();
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.open();
        picker.set_term("ali");
        // Debounce fires, then the "ali" page commits.
        wait_for(&picker, |s| s.phase == SearchPhase::Loading).await;
        wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

        picker.close();
        let snap = wait_for(&picker, |s| !s.open && s.term.is_empty()).await;
        assert!(snap.term.is_empty());

        // Debounce elapses, default page is fetched again.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(
            source.searches(),
            vec![String::new(), "ali".to_owned(), String::new()]
        );
    }
}
