//! Checklist tree model
//!
//! Provides [`ChecklistNode`], [`ChecklistSection`] and [`Checklist`], the
//! immutable snapshot every engine operation reads from and returns.

use crate::index::{NodeIndex, NodePath};
use crate::validation::{self, ValidationError};
use crate::walk::{walk, Visit, Walk};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single checkable requirement
///
/// A node is a leaf when `children` is absent and a composite when present.
/// A composite with an empty children list behaves like a leaf in every
/// operation.
///
/// # Invariants
/// - `id` is unique across the whole checklist, not only among siblings
/// - `checked` is stored per node; flipping a parent never touches its
///   children and flipping a child never touches its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistNode {
    id: String,
    label: String,
    #[serde(default)]
    checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vector<ChecklistNode>>,
}

impl ChecklistNode {
    /// Create an unchecked leaf node
    #[inline]
    #[must_use]
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            checked: false,
            link: None,
            children: None,
        }
    }

    /// Create an unchecked composite node
    #[inline]
    #[must_use]
    pub fn composite(
        id: impl Into<String>,
        label: impl Into<String>,
        children: impl IntoIterator<Item = ChecklistNode>,
    ) -> Self {
        Self {
            children: Some(children.into_iter().collect()),
            ..Self::leaf(id, label)
        }
    }

    /// Attach a reference link
    #[inline]
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the checked flag
    #[inline]
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Node identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this node is checked
    #[inline]
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Reference link (informational only)
    #[inline]
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Child nodes, `None` for a leaf
    #[inline]
    #[must_use]
    pub fn children(&self) -> Option<&Vector<ChecklistNode>> {
        self.children.as_ref()
    }

    /// Whether the node declares a children list (possibly empty)
    #[inline]
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.children.is_some()
    }

    /// Iterate over direct children (empty for a leaf)
    pub fn child_nodes(&self) -> impl Iterator<Item = &ChecklistNode> {
        self.children.iter().flat_map(Vector::iter)
    }

    /// Copy of this node with `checked` inverted
    #[inline]
    #[must_use]
    pub(crate) fn flipped(&self) -> Self {
        self.clone().with_checked(!self.checked)
    }

    /// Copy of this node with its children replaced
    #[inline]
    #[must_use]
    pub(crate) fn with_children(&self, children: Vector<ChecklistNode>) -> Self {
        Self {
            children: Some(children),
            ..self.clone()
        }
    }
}

/// A titled group of top-level nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSection {
    id: String,
    title: String,
    #[serde(default)]
    items: Vector<ChecklistNode>,
}

impl ChecklistSection {
    /// Create a section from its top-level nodes
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        items: impl IntoIterator<Item = ChecklistNode>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items: items.into_iter().collect(),
        }
    }

    /// Section identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Section title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Top-level nodes (depth 0)
    #[inline]
    #[must_use]
    pub fn items(&self) -> &Vector<ChecklistNode> {
        &self.items
    }

    /// Pre-order traversal of every node in the section
    #[inline]
    pub fn walk(&self) -> Walk<'_> {
        walk(&self.items)
    }

    #[inline]
    #[must_use]
    pub(crate) fn with_items(&self, items: Vector<ChecklistNode>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            items,
        }
    }
}

/// Immutable checklist snapshot
///
/// Toggle and reset return a new snapshot. The previous one stays valid and
/// unchanged; untouched subtrees are shared between the two.
///
/// The id index is built once when the checklist is constructed and shared by
/// every snapshot derived from it, since only `checked` flags ever change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ChecklistSection>", into = "Vec<ChecklistSection>")]
pub struct Checklist {
    sections: Vector<ChecklistSection>,
    index: Arc<NodeIndex>,
}

impl Checklist {
    /// Build a checklist without checking id invariants
    ///
    /// Duplicate node ids are tolerated: lookups resolve to the first match
    /// in pre-order.
    #[must_use]
    pub fn new(sections: impl IntoIterator<Item = ChecklistSection>) -> Self {
        let sections: Vector<ChecklistSection> = sections.into_iter().collect();
        let index = Arc::new(NodeIndex::build(&sections));
        Self { sections, index }
    }

    /// Build a checklist, rejecting structural defects
    ///
    /// # Errors
    /// Returns the first defect found by [`validation::validate`]
    pub fn validated(
        sections: impl IntoIterator<Item = ChecklistSection>,
    ) -> Result<Self, ValidationError> {
        let checklist = Self::new(sections);
        match validation::validate(&checklist.sections).into_iter().next() {
            Some(defect) => Err(defect),
            None => Ok(checklist),
        }
    }

    /// Sections in order
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &Vector<ChecklistSection> {
        &self.sections
    }

    /// Look up a section by id
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&ChecklistSection> {
        let position = self.index.section_position(section_id)?;
        self.sections.get(position)
    }

    /// Look up a node inside a section by id (any depth)
    #[must_use]
    pub fn node(&self, section_id: &str, node_id: &str) -> Option<&ChecklistNode> {
        let (position, path) = self.index.locate(section_id, node_id)?;
        let section = self.sections.get(position)?;
        resolve(section.items(), path)
    }

    /// Every node of every section, in section order then pre-order
    pub fn nodes(&self) -> impl Iterator<Item = (&ChecklistSection, Visit<'_>)> {
        self.sections
            .iter()
            .flat_map(|section| section.walk().map(move |visit| (section, visit)))
    }

    /// Number of sections
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the checklist has no sections
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[inline]
    pub(crate) fn index(&self) -> &NodeIndex {
        &self.index
    }

    /// New snapshot over `sections`, reusing this snapshot's index
    ///
    /// `sections` must have the same shape as `self.sections`.
    #[inline]
    #[must_use]
    pub(crate) fn with_sections(&self, sections: Vector<ChecklistSection>) -> Self {
        Self {
            sections,
            index: Arc::clone(&self.index),
        }
    }
}

fn resolve<'a>(items: &'a Vector<ChecklistNode>, path: &NodePath) -> Option<&'a ChecklistNode> {
    let (&first, rest) = path.positions().split_first()?;
    let mut node = items.get(first)?;
    for &position in rest {
        node = node.children()?.get(position)?;
    }
    Some(node)
}

impl PartialEq for Checklist {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl Eq for Checklist {}

impl From<Vec<ChecklistSection>> for Checklist {
    fn from(sections: Vec<ChecklistSection>) -> Self {
        Self::new(sections)
    }
}

impl From<Checklist> for Vec<ChecklistSection> {
    fn from(checklist: Checklist) -> Self {
        checklist.sections.into_iter().collect()
    }
}

impl FromIterator<ChecklistSection> for Checklist {
    fn from_iter<I: IntoIterator<Item = ChecklistSection>>(iter: I) -> Self {
        Self::new(iter)
    }
}
