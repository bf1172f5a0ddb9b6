//! Submission gate
//!
//! The gate only looks at each section's top-level items. Nested nodes count
//! toward progress but never hold the gate closed, so a checklist can be
//! ready to submit while progress is below 100%.

use crate::model::{Checklist, ChecklistNode};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Externally meaningful checklist state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// At least one top-level item is unchecked
    Incomplete,
    /// Every top-level item of every section is checked
    Ready,
}

impl GateState {
    /// Whether submission is allowed
    #[inline]
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl From<bool> for GateState {
    fn from(ready: bool) -> Self {
        if ready {
            Self::Ready
        } else {
            Self::Incomplete
        }
    }
}

impl Display for GateState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "incomplete"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// An unchecked top-level item holding the gate closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingItem<'a> {
    /// Section containing the item
    pub section_id: &'a str,
    /// The unchecked item
    pub node: &'a ChecklistNode,
}

/// True iff every section's top-level items are all checked
///
/// Sections without items, and checklists without sections, pass.
#[must_use]
pub fn can_submit(checklist: &Checklist) -> bool {
    checklist
        .sections()
        .iter()
        .all(|section| section.items().iter().all(ChecklistNode::is_checked))
}

/// Unchecked top-level items, in checklist order
#[must_use]
pub fn blocking_items(checklist: &Checklist) -> Vec<BlockingItem<'_>> {
    checklist
        .sections()
        .iter()
        .flat_map(|section| {
            section
                .items()
                .iter()
                .filter(|node| !node.is_checked())
                .map(move |node| BlockingItem {
                    section_id: section.id(),
                    node,
                })
        })
        .collect()
}

impl Checklist {
    /// See [`can_submit`]
    #[inline]
    #[must_use]
    pub fn can_submit(&self) -> bool {
        can_submit(self)
    }

    /// Gate state of this snapshot
    #[inline]
    #[must_use]
    pub fn gate_state(&self) -> GateState {
        GateState::from(self.can_submit())
    }

    /// See [`blocking_items`]
    #[inline]
    #[must_use]
    pub fn blocking_items(&self) -> Vec<BlockingItem<'_>> {
        blocking_items(self)
    }

    /// `url` when the gate is open, `None` otherwise
    ///
    /// Navigating to the target is left to the caller.
    #[inline]
    #[must_use]
    pub fn submission_target<'u>(&self, url: &'u str) -> Option<&'u str> {
        self.can_submit().then_some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChecklistSection;

    fn sample() -> Checklist {
        Checklist::new([
            ChecklistSection::new(
                "one",
                "One",
                [
                    ChecklistNode::composite("a", "A", [ChecklistNode::leaf("a1", "A1")]),
                    ChecklistNode::leaf("b", "B"),
                ],
            ),
            ChecklistSection::new("two", "Two", [ChecklistNode::leaf("c", "C")]),
        ])
    }

    #[test]
    fn gate_closed_until_every_top_level_item_checked() {
        let c = sample();
        assert_eq!(c.gate_state(), GateState::Incomplete);
        let c = c.toggle("one", "a").toggle("one", "b");
        assert!(!c.can_submit());
        let c = c.toggle("two", "c");
        assert_eq!(c.gate_state(), GateState::Ready);
    }

    #[test]
    fn gate_ignores_nested_nodes() {
        let ready = sample().toggle("one", "a").toggle("one", "b").toggle("two", "c");
        assert!(ready.can_submit());
        assert!(!ready.node("one", "a1").unwrap().is_checked());
        assert!(ready.progress().percent() < 100.0);

        // checking only the nested node does not help
        let nested_only = sample().toggle("one", "a1");
        assert!(!nested_only.can_submit());
    }

    #[test]
    fn unchecking_a_top_level_item_closes_the_gate() {
        let ready = sample().toggle("one", "a").toggle("one", "b").toggle("two", "c");
        assert!(!ready.toggle("two", "c").can_submit());
    }

    #[test]
    fn empty_checklists_pass_vacuously() {
        assert!(Checklist::default().can_submit());
        assert!(Checklist::new([ChecklistSection::new("e", "E", [])]).can_submit());
    }

    #[test]
    fn blocking_items_lists_unchecked_top_level() {
        let c = sample().toggle("one", "b");
        let blocking: Vec<(&str, &str)> = c
            .blocking_items()
            .iter()
            .map(|item| (item.section_id, item.node.id()))
            .collect();
        assert_eq!(blocking, vec![("one", "a"), ("two", "c")]);
    }

    #[test]
    fn submission_target_only_when_ready() {
        let url = "https://tickets.example.com/new";
        assert_eq!(sample().submission_target(url), None);
        let ready = sample().toggle("one", "a").toggle("one", "b").toggle("two", "c");
        assert_eq!(ready.submission_target(url), Some(url));
    }

    #[test]
    fn gate_state_display() {
        assert_eq!(GateState::Ready.to_string(), "ready");
        assert_eq!(GateState::from(false), GateState::Incomplete);
        assert!(!GateState::Incomplete.is_ready());
    }
}
