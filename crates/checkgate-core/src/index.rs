//! Identifier index over a checklist shape
//!
//! Provides [`NodeIndex`], mapping `(section id, node id)` to the position
//! path of the node inside its section. The shape of a checklist never
//! changes after construction, so one index serves every snapshot.

use crate::model::{ChecklistNode, ChecklistSection};
use im::Vector;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Positions from a section's top-level items down to one node
///
/// `[2, 0]` is the first child of the third top-level item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Positions, outermost first
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    /// Depth of the addressed node (0 = top level)
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[inline]
    #[must_use]
    fn child(&self, position: usize) -> Self {
        let mut next = self.0.clone();
        next.push(position);
        Self(next)
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Every node of `items` with its path, in pre-order
pub(crate) fn paths(items: &Vector<ChecklistNode>) -> Vec<(NodePath, &ChecklistNode)> {
    let mut out = Vec::new();
    let mut stack: Vec<(NodePath, &ChecklistNode)> = (0..items.len())
        .rev()
        .map(|position| (NodePath(vec![position]), &items[position]))
        .collect();

    while let Some((path, node)) = stack.pop() {
        if let Some(children) = node.children() {
            for position in (0..children.len()).rev() {
                stack.push((path.child(position), &children[position]));
            }
        }
        out.push((path, node));
    }

    out
}

/// Lookup table from identifiers to locations
///
/// When a definition repeats an identifier, the first occurrence wins:
/// the first section in order, and the first node in pre-order.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    sections: HashMap<String, SectionSlot>,
    node_count: usize,
}

#[derive(Debug, Clone)]
struct SectionSlot {
    position: usize,
    nodes: HashMap<String, NodePath>,
}

impl NodeIndex {
    /// Index every section and node
    #[must_use]
    pub fn build(sections: &Vector<ChecklistSection>) -> Self {
        let mut index = Self::default();

        for (position, section) in sections.iter().enumerate() {
            let located = paths(section.items());
            index.node_count += located.len();

            if index.sections.contains_key(section.id()) {
                tracing::warn!(
                    section_id = section.id(),
                    position,
                    "duplicate section id ignored by index"
                );
                continue;
            }

            let mut nodes = HashMap::with_capacity(located.len());
            for (path, node) in located {
                nodes.entry(node.id().to_owned()).or_insert(path);
            }
            index
                .sections
                .insert(section.id().to_owned(), SectionSlot { position, nodes });
        }

        tracing::trace!(
            sections = index.sections.len(),
            nodes = index.node_count,
            "built node index"
        );
        index
    }

    /// Position of a section
    #[inline]
    #[must_use]
    pub fn section_position(&self, section_id: &str) -> Option<usize> {
        self.sections.get(section_id).map(|slot| slot.position)
    }

    /// Section position and node path for a node inside a section
    #[must_use]
    pub fn locate(&self, section_id: &str, node_id: &str) -> Option<(usize, &NodePath)> {
        let slot = self.sections.get(section_id)?;
        slot.nodes.get(node_id).map(|path| (slot.position, path))
    }

    /// Number of nodes across all sections (duplicates included)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.node_count
    }

    /// Whether no nodes were indexed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}
