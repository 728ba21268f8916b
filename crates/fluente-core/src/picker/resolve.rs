// ── Selection label resolution ──
//
// Guarantees every selected id has a display label: seeds first, then the
// current option page, then a by-id lookup; raw id as the last resort.
// Resolved labels are cached for the life of the widget, so removing one
// selected id never degrades the labels of the others.

use std::collections::{HashMap, HashSet};

use super::source::OptionItem;

/// A selected id prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    pub value: String,
    /// Resolved label, if any source produced one.
    pub label: Option<String>,
    /// A by-id lookup for this value is still in flight.
    pub resolving: bool,
}

impl SelectedEntry {
    /// Label to render: the resolved label, or the raw id as degraded
    /// fallback.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Label cache with the three-step resolution order.
#[derive(Debug, Default)]
pub(crate) struct LabelResolver {
    /// value -> label, fed by seeds, picks, option pages, and lookups.
    resolved: HashMap<String, String>,
    /// Values whose by-id lookup failed or returned nothing; rendered as
    /// raw id until the value reappears in an option page.
    exhausted: HashSet<String>,
}

impl LabelResolver {
    /// Resolver pre-seeded with the widget's initial options.
    pub fn with_seeds(seeds: &[OptionItem]) -> Self {
        let mut resolver = Self::default();
        for seed in seeds {
            resolver.record(&seed.value, &seed.label);
        }
        resolver
    }

    /// Cache a known label (a picked option, a seed, a lookup hit).
    pub fn record(&mut self, value: &str, label: &str) {
        self.exhausted.remove(value);
        self.resolved.insert(value.to_owned(), label.to_owned());
    }

    /// Mark a value as unresolvable; it renders as its raw id.
    pub fn mark_exhausted(&mut self, value: &str) {
        self.exhausted.insert(value.to_owned());
    }

    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.resolved.get(value).map(String::as_str)
    }

    /// Whether every resolution source has been tried and failed for this
    /// value.
    pub fn is_exhausted(&self, value: &str) -> bool {
        self.exhausted.contains(value)
    }

    /// Absorb the current option page for the given selected values and
    /// return those still needing a by-id lookup.
    ///
    /// A value already resolved or already known unresolvable needs no
    /// lookup; a value present in `options` resolves locally (this also
    /// rescues previously exhausted values that reappear in a page).
    pub fn absorb_page(&mut self, values: &[String], options: &[OptionItem]) -> Vec<String> {
        let mut needs_lookup = Vec::new();
        for value in values {
            if self.resolved.contains_key(value) {
                continue;
            }
            if let Some(option) = options.iter().find(|o| &o.value == value) {
                let label = option.label.clone();
                self.record(value, &label);
                continue;
            }
            if !self.exhausted.contains(value) {
                needs_lookup.push(value.clone());
            }
        }
        needs_lookup
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn opts(pairs: &[(&str, &str)]) -> Vec<OptionItem> {
        pairs
            .iter()
            .map(|(v, l)| OptionItem::new(*v, *l))
            .collect()
    }

    #[test]
    fn seeds_resolve_without_lookup() {
        let mut resolver = LabelResolver::with_seeds(&opts(&[("1", "Alice")]));
        let pending = resolver.absorb_page(&["1".to_owned()], &[]);
        assert!(pending.is_empty());
        assert_eq!(resolver.label_for("1"), Some("Alice"));
    }

    #[test]
    fn page_options_resolve_second() {
        let mut resolver = LabelResolver::default();
        let pending = resolver.absorb_page(
            &["2".to_owned()],
            &opts(&[("1", "Alice"), ("2", "Bob")]),
        );
        assert!(pending.is_empty());
        assert_eq!(resolver.label_for("2"), Some("Bob"));
    }

    #[test]
    fn missing_values_need_lookup_once() {
        let mut resolver = LabelResolver::default();
        let pending = resolver.absorb_page(&["9".to_owned()], &[]);
        assert_eq!(pending, vec!["9".to_owned()]);

        resolver.mark_exhausted("9");
        let pending = resolver.absorb_page(&["9".to_owned()], &[]);
        assert!(pending.is_empty(), "exhausted values are not retried");
        assert_eq!(resolver.label_for("9"), None);
    }

    #[test]
    fn exhausted_value_rescued_by_page() {
        let mut resolver = LabelResolver::default();
        resolver.mark_exhausted("9");
        let pending = resolver.absorb_page(&["9".to_owned()], &opts(&[("9", "Nina")]));
        assert!(pending.is_empty());
        assert_eq!(resolver.label_for("9"), Some("Nina"));
    }

    #[test]
    fn display_label_falls_back_to_raw_id() {
        let entry = SelectedEntry {
            value: "42".into(),
            label: None,
            resolving: false,
        };
        assert_eq!(entry.display_label(), "42");
    }
}
