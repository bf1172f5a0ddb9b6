//! Reset engine

use crate::model::{Checklist, ChecklistNode};
use crate::walk::walk;
use im::Vector;

impl Checklist {
    /// Clear every checked flag, keeping the structure intact
    ///
    /// Subtrees with nothing checked are shared with `self` as-is.
    #[must_use]
    pub fn reset(&self) -> Self {
        let sections = self
            .sections()
            .iter()
            .map(|section| section.with_items(cleared(section.items())))
            .collect();
        tracing::debug!(sections = self.len(), "checklist reset");
        self.with_sections(sections)
    }
}

fn cleared(items: &Vector<ChecklistNode>) -> Vector<ChecklistNode> {
    if !walk(items).any(|visit| visit.node.is_checked()) {
        return items.clone();
    }

    items
        .iter()
        .map(|node| {
            let node = node.clone().with_checked(false);
            match node.children() {
                Some(children) => node.with_children(cleared(children)),
                None => node,
            }
        })
        .collect()
}

/// Free-function form of [`Checklist::reset`]
#[inline]
#[must_use]
pub fn reset(checklist: &Checklist) -> Checklist {
    checklist.reset()
}
