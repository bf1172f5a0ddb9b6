//! Incomplete collector
//!
//! Gathers unchecked nodes for summary display. The output drives no state
//! transition.

use crate::model::{Checklist, ChecklistNode, ChecklistSection};

/// Every unchecked node of `section`, flattened in pre-order
///
/// An unchecked node is listed before its descendants; an unchecked parent
/// and its unchecked children both appear.
#[must_use]
pub fn collect_incomplete(section: &ChecklistSection) -> Vec<&ChecklistNode> {
    section
        .walk()
        .filter(|visit| !visit.node.is_checked())
        .map(|visit| visit.node)
        .collect()
}

/// Unchecked nodes of one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteSection<'a> {
    /// The section the nodes belong to
    pub section: &'a ChecklistSection,
    /// Unchecked nodes in pre-order
    pub items: Vec<&'a ChecklistNode>,
}

impl IncompleteSection<'_> {
    /// Number of unchecked nodes
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}

/// Sections with at least one unchecked node, in checklist order
#[must_use]
pub fn incomplete_sections(checklist: &Checklist) -> Vec<IncompleteSection<'_>> {
    checklist
        .sections()
        .iter()
        .map(|section| IncompleteSection {
            section,
            items: collect_incomplete(section),
        })
        .filter(|report| !report.items.is_empty())
        .collect()
}

impl Checklist {
    /// See [`incomplete_sections`]
    #[inline]
    #[must_use]
    pub fn incomplete_sections(&self) -> Vec<IncompleteSection<'_>> {
        incomplete_sections(self)
    }
}
