//! Toggle engine
//!
//! Flips (or sets) the checked flag of one node and returns a new snapshot.
//! Only the nodes on the path from the section down to the target are
//! rebuilt; sibling subtrees and other sections are shared with the input.

use crate::model::{Checklist, ChecklistNode};
use im::Vector;

impl Checklist {
    /// Invert the checked flag of `node_id` inside `section_id`
    ///
    /// Unknown section or node ids are a no-op: the returned snapshot equals
    /// `self`. Parents and children of the target are left untouched.
    #[must_use]
    pub fn toggle(&self, section_id: &str, node_id: &str) -> Self {
        self.update_node(section_id, node_id, ChecklistNode::flipped)
    }

    /// Set the checked flag of `node_id` inside `section_id` to `checked`
    ///
    /// Same lookup and no-op rules as [`Checklist::toggle`].
    #[must_use]
    pub fn set_checked(&self, section_id: &str, node_id: &str, checked: bool) -> Self {
        if self.node(section_id, node_id).map(ChecklistNode::is_checked) == Some(checked) {
            return self.clone();
        }
        self.update_node(section_id, node_id, |node| node.clone().with_checked(checked))
    }

    fn update_node<F>(&self, section_id: &str, node_id: &str, update: F) -> Self
    where
        F: FnOnce(&ChecklistNode) -> ChecklistNode,
    {
        let Some((position, path)) = self.index().locate(section_id, node_id) else {
            tracing::debug!(section_id, node_id, "toggle target not found, snapshot unchanged");
            return self.clone();
        };
        let Some(section) = self.sections().get(position) else {
            return self.clone();
        };

        let items = rebuild_path(section.items(), path.positions(), update);
        let sections = self.sections().update(position, section.with_items(items));
        tracing::trace!(section_id, node_id, depth = path.depth(), "node updated");
        self.with_sections(sections)
    }
}

/// Rebuild the nodes along `path`, applying `update` at its end
fn rebuild_path<F>(
    items: &Vector<ChecklistNode>,
    path: &[usize],
    update: F,
) -> Vector<ChecklistNode>
where
    F: FnOnce(&ChecklistNode) -> ChecklistNode,
{
    let Some((&head, rest)) = path.split_first() else {
        return items.clone();
    };
    let Some(node) = items.get(head) else {
        return items.clone();
    };

    let replacement = if rest.is_empty() {
        update(node)
    } else {
        match node.children() {
            Some(children) => node.with_children(rebuild_path(children, rest, update)),
            None => return items.clone(),
        }
    };

    items.update(head, replacement)
}

/// Free-function form of [`Checklist::toggle`]
#[inline]
#[must_use]
pub fn toggle(checklist: &Checklist, section_id: &str, node_id: &str) -> Checklist {
    checklist.toggle(section_id, node_id)
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
                    ChecklistNode::composite(
                        "a",
                        "A",
                        [ChecklistNode::leaf("a1", "A1"), ChecklistNode::leaf("a2", "A2")],
                    ),
                    ChecklistNode::leaf("b", "B"),
                ],
            ),
            ChecklistSection::new("two", "Two", [ChecklistNode::leaf("c", "C")]),
        ])
    }

    fn checked(checklist: &Checklist, section: &str, node: &str) -> bool {
        checklist.node(section, node).is_some_and(ChecklistNode::is_checked)
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let before = sample();
        let after = before.toggle("one", "a2");

        assert!(checked(&after, "one", "a2"));
        assert!(!checked(&after, "one", "a"));
        assert!(!checked(&after, "one", "a1"));
        assert!(!checked(&after, "one", "b"));
        assert!(!checked(&after, "two", "c"));
    }

    #[test]
    fn parent_toggle_does_not_cascade() {
        let after = sample().toggle("one", "a");
        assert!(checked(&after, "one", "a"));
        assert!(!checked(&after, "one", "a1"));
        assert!(!checked(&after, "one", "a2"));
    }

    #[test]
    fn previous_snapshot_is_unaffected() {
        let before = sample();
        let after = before.toggle("one", "b");
        assert!(!checked(&before, "one", "b"));
        assert!(checked(&after, "one", "b"));
        assert_ne!(before, after);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let before = sample();
        assert_eq!(before.toggle("one", "zzz"), before);
        assert_eq!(before.toggle("zzz", "a"), before);
        // node exists, but in another section
        assert_eq!(before.toggle("two", "a"), before);
    }

    #[test]
    fn double_toggle_restores() {
        let before = sample();
        assert_eq!(before.toggle("one", "a1").toggle("one", "a1"), before);
    }

    #[test]
    fn untouched_section_is_shared() {
        let before = sample();
        let after = before.toggle("one", "b");
        assert_eq!(before.sections()[1], after.sections()[1]);
    }

    #[test]
    fn set_checked_is_absolute() {
        let before = sample();
        let on = before.set_checked("one", "a1", true);
        assert!(checked(&on, "one", "a1"));
        assert_eq!(on.set_checked("one", "a1", true), on);
        assert_eq!(on.set_checked("one", "a1", false), before);
        assert_eq!(before.set_checked("one", "nope", true), before);
    }

    #[test]
    fn free_function_matches_method() {
        let before = sample();
        assert_eq!(toggle(&before, "two", "c"), before.toggle("two", "c"));
    }
}
