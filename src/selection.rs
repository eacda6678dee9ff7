//! Recovering domain entities from table-row selections.
//!
//! Table widgets report a selected row as a bag of display strings, not as
//! the entity that produced it. Resolution therefore matches on a composite
//! key: the row's key field (jersey number for players, id for matches)
//! normalised to string form, plus the name field, both required to match
//! exactly. A missing or malformed field is a non-match, never an error.

use crate::domain::{Game, Player};

/// Display fields recovered from a selected table row.
#[derive(Debug, Clone, Default)]
pub struct RowSelection {
    pub key: Option<String>,
    pub name: Option<String>,
}

impl RowSelection {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        RowSelection {
            key: Some(key.into()),
            name: Some(name.into()),
        }
    }
}

/// Entities addressable by a (key, name) display pair.
pub trait RowIdentity {
    /// The key field, normalised to string form.
    fn row_key(&self) -> String;
    /// The name field as displayed.
    fn row_name(&self) -> &str;
}

impl RowIdentity for Player {
    fn row_key(&self) -> String {
        self.number.to_string()
    }
    fn row_name(&self) -> &str {
        &self.name
    }
}

impl RowIdentity for Game {
    fn row_key(&self) -> String {
        self.id.to_string()
    }
    fn row_name(&self) -> &str {
        &self.opponent
    }
}

/// Resolve a row selection against the list currently backing the display.
///
/// Returns the first candidate whose key and name both match, `None`
/// otherwise. Callers decide whether a miss is worth surfacing.
pub fn resolve<'a, T: RowIdentity>(
    selection: &RowSelection,
    candidates: &'a [T],
) -> Option<&'a T> {
    let key = selection.key.as_deref()?;
    let name = selection.name.as_deref()?;
    candidates
        .iter()
        .find(|c| c.row_key() == key && c.row_name() == name)
}

/// Current selection plus the most recent successfully resolved one.
///
/// List refreshes clear widget selections, so destructive actions fall back
/// to the last valid selection. `last_valid` is updated only on successful
/// resolution and cleared only when a destructive action completes.
#[derive(Debug, Clone)]
pub struct SelectionTracker<T: Clone> {
    current: Option<T>,
    last_valid: Option<T>,
}

impl<T: Clone> Default for SelectionTracker<T> {
    fn default() -> Self {
        SelectionTracker {
            current: None,
            last_valid: None,
        }
    }
}

impl<T: Clone> SelectionTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful resolution.
    pub fn select(&mut self, item: T) {
        self.last_valid = Some(item.clone());
        self.current = Some(item);
    }

    /// A list refresh cleared the widget selection; the fallback survives.
    #[allow(dead_code)]
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    #[allow(dead_code)]
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// The selection a destructive action should target: the current one,
    /// falling back to the last valid one.
    pub fn target(&self) -> Option<&T> {
        self.current.as_ref().or(self.last_valid.as_ref())
    }

    /// A destructive action completed; both selections are now stale.
    pub fn complete_action(&mut self) {
        self.current = None;
        self.last_valid = None;
    }
}
