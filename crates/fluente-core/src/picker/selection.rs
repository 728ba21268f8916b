// ── Selection state ──
//
// Tagged union over the two selection shapes. One shared mutation and
// resolution algorithm operates on both variants; there is no runtime
// scalar-vs-array sniffing anywhere.

/// Which selection shape a picker uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multi,
}

/// Current selection: a single optional value, or an ordered set.
///
/// Multi keeps insertion order for display; equality of the set does not
/// depend on it, but chips render in the order values were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(Option<String>),
    Multi(Vec<String>),
}

/// What a `select` call did, so the widget can react (close the list,
/// keep it open, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Single-select replaced the current value.
    Replaced,
    /// Multi-select added a new value.
    Added,
    /// Multi-select toggled an already-selected value off.
    Toggled,
}

impl Selection {
    /// Empty selection for the given mode.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multi => Self::Multi(Vec::new()),
        }
    }

    /// Selection seeded with the given values (first value only for single).
    pub fn from_values(mode: SelectionMode, values: Vec<String>) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(values.into_iter().next()),
            SelectionMode::Multi => {
                let mut seen = Vec::new();
                for value in values {
                    if !seen.contains(&value) {
                        seen.push(value);
                    }
                }
                Self::Multi(seen)
            }
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multi(_) => SelectionMode::Multi,
        }
    }

    /// Selected values in display order.
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Single(value) => value.iter().cloned().collect(),
            Self::Multi(values) => values.clone(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(current) => current.as_deref() == Some(value),
            Self::Multi(values) => values.iter().any(|v| v == value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_none(),
            Self::Multi(values) => values.is_empty(),
        }
    }

    /// Apply a pick from the option list.
    ///
    /// Single-select replaces the value; multi-select toggles membership,
    /// appending new values without disturbing existing ones.
    pub fn select(&mut self, value: &str) -> SelectOutcome {
        match self {
            Self::Single(current) => {
                *current = Some(value.to_owned());
                SelectOutcome::Replaced
            }
            Self::Multi(values) => {
                if let Some(idx) = values.iter().position(|v| v == value) {
                    values.remove(idx);
                    SelectOutcome::Toggled
                } else {
                    values.push(value.to_owned());
                    SelectOutcome::Added
                }
            }
        }
    }

    /// Remove one value. Removing a value that is not selected is a no-op;
    /// returns whether anything changed.
    pub fn remove(&mut self, value: &str) -> bool {
        match self {
            Self::Single(current) => {
                if current.as_deref() == Some(value) {
                    *current = None;
                    true
                } else {
                    false
                }
            }
            Self::Multi(values) => {
                let before = values.len();
                values.retain(|v| v != value);
                values.len() != before
            }
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        match self {
            Self::Single(current) => *current = None,
            Self::Multi(values) => values.clear(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn single_select_replaces() {
        let mut sel = Selection::empty(SelectionMode::Single);
        assert_eq!(sel.select("a"), SelectOutcome::Replaced);
        assert_eq!(sel.select("b"), SelectOutcome::Replaced);
        assert_eq!(sel.values(), vec!["b".to_owned()]);
    }

    #[test]
    fn multi_select_toggles_membership() {
        let mut sel = Selection::empty(SelectionMode::Multi);
        assert_eq!(sel.select("a"), SelectOutcome::Added);
        assert_eq!(sel.select("b"), SelectOutcome::Added);
        assert_eq!(sel.select("a"), SelectOutcome::Toggled);
        assert_eq!(sel.values(), vec!["b".to_owned()]);
        // re-adding appends at the end, preserving existing order
        assert_eq!(sel.select("a"), SelectOutcome::Added);
        assert_eq!(sel.values(), vec!["b".to_owned(), "a".to_owned()]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut sel = Selection::from_values(
            SelectionMode::Multi,
            vec!["a".into(), "b".into(), "c".into()],
        );
        assert!(sel.remove("b"));
        let after_first = sel.clone();
        assert!(!sel.remove("b"));
        assert_eq!(sel, after_first);
        assert_eq!(sel.values(), vec!["a".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn remove_clears_single() {
        let mut sel = Selection::from_values(SelectionMode::Single, vec!["a".into()]);
        assert!(sel.remove("a"));
        assert!(sel.is_empty());
        assert!(!sel.remove("a"));
    }

    #[test]
    fn from_values_dedupes_multi_and_truncates_single() {
        let sel = Selection::from_values(
            SelectionMode::Multi,
            vec!["a".into(), "b".into(), "a".into()],
        );
        assert_eq!(sel.values(), vec!["a".to_owned(), "b".to_owned()]);

        let sel = Selection::from_values(SelectionMode::Single, vec!["x".into(), "y".into()]);
        assert_eq!(sel.values(), vec!["x".to_owned()]);
    }

    #[test]
    fn clear_empties_both_variants() {
        let mut single = Selection::from_values(SelectionMode::Single, vec!["a".into()]);
        single.clear();
        assert!(single.is_empty());

        let mut multi =
            Selection::from_values(SelectionMode::Multi, vec!["a".into(), "b".into()]);
        multi.clear();
        assert!(multi.is_empty());
    }
}
