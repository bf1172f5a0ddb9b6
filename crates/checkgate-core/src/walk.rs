//! Pre-order traversal over checklist nodes
//!
//! [`Walk`] keeps an explicit stack of child iterators instead of recursing,
//! so traversal depth is bounded by heap, not by the call stack.

use crate::model::ChecklistNode;
use im::vector::{Iter, Vector};

/// A node reached during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit<'a> {
    /// Distance from the section's top-level items (0 = top level)
    pub depth: usize,
    /// The node itself
    pub node: &'a ChecklistNode,
}

/// Depth-first, pre-order iterator: a node is yielded before its children
pub struct Walk<'a> {
    stack: Vec<Iter<'a, ChecklistNode>>,
}

/// Walk `items` and all their descendants in pre-order
#[inline]
#[must_use]
pub fn walk(items: &Vector<ChecklistNode>) -> Walk<'_> {
    Walk {
        stack: vec![items.iter()],
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            match self.stack[depth].next() {
                Some(node) => {
                    if let Some(children) = node.children() {
                        self.stack.push(children.iter());
                    }
                    return Some(Visit { depth, node });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
