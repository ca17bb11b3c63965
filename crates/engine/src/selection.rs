//! Selection state for the catalog explorer.
//!
//! The state is an explicit immutable value with pure transition functions:
//! each transition returns a new `Selection`, so the UI layer can hold the
//! current value however it likes and the transitions unit-test without any
//! rendering harness.

use crate::{
    catalog::Catalog,
    query::{prerequisites_of, unlockable_given},
};
use serde::Serialize;
use std::collections::HashSet;

/// The current selection and its derived highlight sets
///
/// Idle is `selected_id == None` with both sets empty. Derived sets are
/// recomputed on every transition and never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    selected_id: Option<String>,
    prerequisite_ids: HashSet<String>,
    unlockable_ids: HashSet<String>,
}

impl Selection {
    /// The idle state: nothing selected, nothing highlighted
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Direct non-exclusion prerequisites of the selected course
    pub fn prerequisite_ids(&self) -> &HashSet<String> {
        &self.prerequisite_ids
    }

    /// Courses newly unlocked by the selected course
    pub fn unlockable_ids(&self) -> &HashSet<String> {
        &self.unlockable_ids
    }

    /// The selected id as a set, in the shape the graph queries take
    pub fn selected_ids(&self) -> HashSet<String> {
        self.selected_id.iter().cloned().collect()
    }

    /// Clicks a course: selects it, or toggles back to idle when it is
    /// already the selected one. Selecting an id the catalog does not know
    /// clears to idle.
    pub fn select(&self, catalog: &Catalog, id: &str) -> Self {
        if self.selected_id.as_deref() == Some(id) {
            return Self::idle();
        }
        let Some(course) = catalog.course(id) else {
            return Self::idle();
        };

        let prerequisite_ids = prerequisites_of(course);
        let selected: HashSet<String> = [id.to_string()].into_iter().collect();
        let unlockable_ids = unlockable_given(catalog.courses(), &selected);

        Self {
            selected_id: Some(id.to_string()),
            prerequisite_ids,
            unlockable_ids,
        }
    }

    /// Returns to idle from any state
    pub fn clear(&self) -> Self {
        Self::idle()
    }

    /// Pure query, not a transition: a course fades when something is
    /// selected and the course is neither the selection, one of its
    /// prerequisites, nor unlocked by it
    pub fn is_faded(&self, course_id: &str) -> bool {
        match self.selected_id.as_deref() {
            None => false,
            Some(selected) => {
                selected != course_id
                    && !self.prerequisite_ids.contains(course_id)
                    && !self.unlockable_ids.contains(course_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{
        course::{Course, PrerequisiteEdge},
        credits::Credits,
    };

    fn course(id: &str, level: i32, edges: Vec<PrerequisiteEdge>) -> Course {
        Course {
            id: id.to_string(),
            code: format!("COMP {level}"),
            title: String::new(),
            credits: Credits::DEFAULT,
            description: String::new(),
            level,
            department: "COMP".to_string(),
            prerequisites: edges,
        }
    }

    fn edge(source: &str, target: &str, is_exclusion: bool) -> PrerequisiteEdge {
        PrerequisiteEdge {
            source_course_id: source.to_string(),
            target_course_id: target.to_string(),
            is_corequisite: false,
            is_exclusion,
            logic_type: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            course("a", 1000, Vec::new()),
            course("b", 2000, vec![edge("b", "a", false)]),
            course("c", 2000, vec![edge("c", "a", true)]),
        ])
    }

    #[test]
    fn test_select_derives_highlight_sets() {
        let catalog = catalog();
        let state = Selection::idle().select(&catalog, "b");

        assert_eq!(state.selected_id(), Some("b"));
        assert!(state.prerequisite_ids().contains("a"));
        assert!(state.unlockable_ids().is_empty());

        let state = Selection::idle().select(&catalog, "a");
        assert!(state.prerequisite_ids().is_empty());
        assert!(state.unlockable_ids().contains("b"));
        assert!(!state.unlockable_ids().contains("c"));
    }

    #[test]
    fn test_reselect_toggles_to_idle() {
        let catalog = catalog();
        let state = Selection::idle().select(&catalog, "a").select(&catalog, "a");

        assert_eq!(state, Selection::idle());
        assert!(state.prerequisite_ids().is_empty());
        assert!(state.unlockable_ids().is_empty());
    }

    #[test]
    fn test_select_different_course_switches_directly() {
        let catalog = catalog();
        let state = Selection::idle().select(&catalog, "a").select(&catalog, "b");

        assert_eq!(state.selected_id(), Some("b"));
        assert!(state.prerequisite_ids().contains("a"));
    }

    #[test]
    fn test_clear_from_any_state() {
        let catalog = catalog();
        let state = Selection::idle().select(&catalog, "a").clear();

        assert_eq!(state, Selection::idle());
        for id in ["a", "b", "c"] {
            assert!(!state.is_faded(id));
        }
    }

    #[test]
    fn test_fade_predicate() {
        let catalog = catalog();
        let state = Selection::idle().select(&catalog, "a");

        assert!(!state.is_faded("a"));
        assert!(!state.is_faded("b")); // unlockable
        assert!(state.is_faded("c")); // excluded course is unrelated

        let state = Selection::idle().select(&catalog, "b");
        assert!(!state.is_faded("a")); // prerequisite
        assert!(state.is_faded("c"));
    }

    #[test]
    fn test_unknown_id_clears() {
        let catalog = catalog();
        let state = Selection::idle().select(&catalog, "nope");

        assert_eq!(state, Selection::idle());
    }

    #[test]
    fn test_empty_catalog_is_harmless() {
        let state = Selection::idle().select(&Catalog::empty(), "a");

        assert_eq!(state, Selection::idle());
    }
}
