use std::collections::BTreeSet;

use log::debug;

use crate::categories::{self, EventKey};
use crate::store::EventListenerStore;

/// Derived state of a category heading's checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    /// Some but not all of the category's event types are armed.
    Indeterminate,
    Unchecked,
}

impl CheckState {
    pub fn is_checked(self) -> bool {
        self == CheckState::Checked
    }
}

/// One visible line of the breakpoint tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Heading(&'static str),
    Event {
        category: &'static str,
        event_type: &'static str,
    },
}

impl Row {
    pub fn category(&self) -> &'static str {
        match self {
            Row::Heading(category) | Row::Event { category, .. } => *category,
        }
    }
}

/// Heading state for `category` against an ActiveSet snapshot.
pub fn heading_state(category: &str, active: &BTreeSet<EventKey>) -> CheckState {
    let types = categories::event_types(category);
    let armed = types
        .iter()
        .filter(|event_type| active.contains(&categories::event_key(category, event_type)))
        .count();

    if armed == types.len() {
        CheckState::Checked
    } else if armed > 0 {
        CheckState::Indeterminate
    } else {
        CheckState::Unchecked
    }
}

/// Panel state, owned exclusively by the main thread.
///
/// Only the expand/collapse set and the selection live here; which
/// breakpoints are armed is read from the store on every frame.
pub struct App {
    /// Whether the app should exit on the next loop iteration.
    pub should_quit: bool,
    /// Category names currently expanded, in the order they were opened.
    expanded_categories: Vec<&'static str>,
    /// Index of the highlighted row in `rows()`.
    pub selected: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            expanded_categories: Vec::new(),
            selected: 0,
        }
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded_categories.iter().any(|name| *name == category)
    }

    /// Flip a category's arrow. Never touches the ActiveSet.
    pub fn toggle_category(&mut self, category: &str) {
        let Some(category) = categories::names().find(|name| *name == category) else {
            return;
        };
        let previous = self.selected_row();

        if self.is_expanded(category) {
            self.expanded_categories.retain(|name| *name != category);
            debug!("collapsed {category}");
        } else {
            self.expanded_categories.push(category);
            debug!("expanded {category}");
        }

        if let Some(row) = previous {
            self.reselect(row);
        }
    }

    /// Heading checkbox clicked; `checked` is the box's new value.
    pub fn on_category_click(
        &self,
        category: &str,
        checked: bool,
        store: &mut impl EventListenerStore,
    ) {
        let events = categories::category_keys(category);
        if checked {
            store.add_event_listeners(&events);
        } else {
            store.remove_event_listeners(&events);
        }
    }

    /// Event-type checkbox clicked; `checked` is the box's new value.
    pub fn on_event_type_click(
        &self,
        key: &str,
        checked: bool,
        store: &mut impl EventListenerStore,
    ) {
        let events = [key.to_string()];
        if checked {
            store.add_event_listeners(&events);
        } else {
            store.remove_event_listeners(&events);
        }
    }

    /// Event rows shown under `category`; empty while it is collapsed.
    pub fn listing(&self, category: &'static str) -> Vec<Row> {
        if !self.is_expanded(category) {
            return Vec::new();
        }
        categories::event_types(category)
            .iter()
            .map(|event_type| Row::Event {
                category,
                event_type: *event_type,
            })
            .collect()
    }

    /// Every visible row: each heading followed by its listing.
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for category in categories::names() {
            rows.push(Row::Heading(category));
            rows.extend(self.listing(category));
        }
        rows
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows().get(self.selected).copied()
    }

    // ── Selection ───────────────────────────────────────────────

    pub fn select_next(&mut self) {
        let last = self.rows().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }

    /// Keep `row` highlighted after the tree changed shape, falling back
    /// to its heading when it is no longer visible.
    fn reselect(&mut self, row: Row) {
        let rows = self.rows();
        let heading = Row::Heading(row.category());
        self.selected = rows
            .iter()
            .position(|r| *r == row)
            .or_else(|| rows.iter().position(|r| *r == heading))
            .unwrap_or(0);
    }

    // ── Actions on the selected row ─────────────────────────────

    /// Click the checkbox of the highlighted row.
    pub fn click_selected(&mut self, store: &mut impl EventListenerStore) {
        match self.selected_row() {
            Some(Row::Heading(category)) => {
                let checked = heading_state(category, store.active_event_listeners()).is_checked();
                self.on_category_click(category, !checked, store);
            }
            Some(Row::Event {
                category,
                event_type,
            }) => {
                let key = categories::event_key(category, event_type);
                let checked = store.active_event_listeners().contains(&key);
                self.on_event_type_click(&key, !checked, store);
            }
            None => {}
        }
    }

    /// Enter/Tab: arrow on a heading, checkbox on an event row.
    pub fn activate_selected(&mut self, store: &mut impl EventListenerStore) {
        match self.selected_row() {
            Some(Row::Heading(category)) => self.toggle_category(category),
            Some(Row::Event { .. }) => self.click_selected(store),
            None => {}
        }
    }

    pub fn expand_selected(&mut self) {
        if let Some(Row::Heading(category)) = self.selected_row() {
            if !self.is_expanded(category) {
                self.toggle_category(category);
            }
        }
    }

    /// Collapse the highlighted heading, or jump from an event row to its heading.
    pub fn collapse_selected(&mut self) {
        match self.selected_row() {
            Some(Row::Heading(category)) => {
                if self.is_expanded(category) {
                    self.toggle_category(category);
                }
            }
            Some(Row::Event { category, .. }) => self.reselect(Row::Heading(category)),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every mutation request and applies it to a local set.
    #[derive(Default)]
    struct RecordingStore {
        active: BTreeSet<EventKey>,
        added: Vec<Vec<EventKey>>,
        removed: Vec<Vec<EventKey>>,
    }

    impl RecordingStore {
        fn with(keys: &[&str]) -> Self {
            Self {
                active: keys.iter().map(|k| k.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl EventListenerStore for RecordingStore {
        fn active_event_listeners(&self) -> &BTreeSet<EventKey> {
            &self.active
        }

        fn add_event_listeners(&mut self, keys: &[EventKey]) {
            self.added.push(keys.to_vec());
            self.active.extend(keys.iter().cloned());
        }

        fn remove_event_listeners(&mut self, keys: &[EventKey]) {
            self.removed.push(keys.to_vec());
            for key in keys {
                self.active.remove(key);
            }
        }
    }

    fn set(keys: &[&str]) -> BTreeSet<EventKey> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn heading_checked_only_when_every_type_armed() {
        let all_mouse = set(&["Mouse:click", "Mouse:mouseover", "Mouse:dblclick"]);
        assert_eq!(heading_state("Mouse", &all_mouse), CheckState::Checked);
        assert_eq!(heading_state("Keyboard", &all_mouse), CheckState::Unchecked);
    }

    #[test]
    fn partial_selection_is_indeterminate() {
        let active = set(&["Keyboard:keydown", "Mouse:click", "Mouse:dblclick"]);
        assert_eq!(heading_state("Keyboard", &active), CheckState::Indeterminate);
        assert_eq!(heading_state("Mouse", &active), CheckState::Indeterminate);
        assert!(!heading_state("Mouse", &active).is_checked());
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut app = App::new();
        app.toggle_category("Mouse");
        assert!(app.is_expanded("Mouse"));
        app.toggle_category("Mouse");
        assert!(!app.is_expanded("Mouse"));

        app.toggle_category("Keyboard");
        app.toggle_category("Mouse");
        app.toggle_category("Mouse");
        assert!(app.is_expanded("Keyboard"));
        assert!(!app.is_expanded("Mouse"));
    }

    #[test]
    fn toggle_does_not_touch_store() {
        let mut app = App::new();
        let mut store = RecordingStore::with(&["Mouse:click"]);
        app.activate_selected(&mut store);
        assert!(app.is_expanded("Mouse"));
        assert!(store.added.is_empty() && store.removed.is_empty());
    }

    #[test]
    fn unknown_category_is_ignored() {
        let mut app = App::new();
        app.toggle_category("Touch");
        assert_eq!(app.rows().len(), 2);
    }

    #[test]
    fn heading_click_requests_whole_category() {
        let app = App::new();
        let mut store = RecordingStore::default();

        app.on_category_click("Mouse", true, &mut store);
        assert_eq!(store.added, vec![categories::category_keys("Mouse")]);

        app.on_category_click("Mouse", false, &mut store);
        assert_eq!(store.removed, vec![categories::category_keys("Mouse")]);
        assert!(store.active.is_empty());
    }

    #[test]
    fn indeterminate_heading_click_arms_everything() {
        let mut app = App::new();
        let mut store = RecordingStore::with(&["Mouse:click"]);
        app.click_selected(&mut store);
        assert_eq!(store.added, vec![categories::category_keys("Mouse")]);
        assert_eq!(heading_state("Mouse", &store.active), CheckState::Checked);

        app.click_selected(&mut store);
        assert_eq!(store.removed, vec![categories::category_keys("Mouse")]);
    }

    #[test]
    fn event_click_touches_only_that_key() {
        let mut app = App::new();
        let mut store = RecordingStore::with(&["Mouse:dblclick"]);
        app.toggle_category("Mouse");
        app.select_next();
        assert_eq!(
            app.selected_row(),
            Some(Row::Event {
                category: "Mouse",
                event_type: "click"
            })
        );

        app.click_selected(&mut store);
        assert_eq!(store.added, vec![vec!["Mouse:click".to_string()]]);
        assert!(store.active.contains("Mouse:dblclick"));

        app.click_selected(&mut store);
        assert_eq!(store.removed, vec![vec!["Mouse:click".to_string()]]);
        assert_eq!(store.active, set(&["Mouse:dblclick"]));
    }

    #[test]
    fn collapsed_category_lists_nothing() {
        let mut app = App::new();
        assert!(app.listing("Mouse").is_empty());
        assert_eq!(
            app.rows(),
            vec![Row::Heading("Mouse"), Row::Heading("Keyboard")]
        );

        app.toggle_category("Mouse");
        assert_eq!(app.listing("Mouse").len(), categories::event_types("Mouse").len());
        assert_eq!(app.rows().len(), 5);
    }

    #[test]
    fn collapse_moves_selection_to_heading() {
        let mut app = App::new();
        app.toggle_category("Mouse");
        app.toggle_category("Keyboard");
        app.select_last();
        assert_eq!(
            app.selected_row(),
            Some(Row::Event {
                category: "Keyboard",
                event_type: "keydown"
            })
        );

        app.toggle_category("Keyboard");
        assert_eq!(app.selected_row(), Some(Row::Heading("Keyboard")));
    }

    #[test]
    fn expanding_above_keeps_selected_row() {
        let mut app = App::new();
        app.select_last();
        assert_eq!(app.selected_row(), Some(Row::Heading("Keyboard")));
        app.toggle_category("Mouse");
        assert_eq!(app.selected_row(), Some(Row::Heading("Keyboard")));
        assert_eq!(app.selected, 4);
    }

    #[test]
    fn collapse_from_event_row_jumps_to_heading() {
        let mut app = App::new();
        app.expand_selected();
        app.select_next();
        app.select_next();
        app.collapse_selected();
        assert_eq!(app.selected_row(), Some(Row::Heading("Mouse")));
        assert!(app.is_expanded("Mouse"));

        app.collapse_selected();
        assert!(!app.is_expanded("Mouse"));
    }

    #[test]
    fn selection_is_clamped() {
        let mut app = App::new();
        app.select_prev();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }
}
