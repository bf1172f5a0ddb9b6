//! Checklist validation
//!
//! The engine itself tolerates malformed definitions (duplicate ids
//! resolve to the first match). Hosts that need the uniqueness guarantee run
//! these checks once at construction time.

use crate::index::{paths, NodePath};
use crate::model::ChecklistSection;
use im::Vector;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Where a node sits: its section and position path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    /// Containing section id
    pub section_id: String,
    /// Positions below the section
    pub path: NodePath,
}

impl Display for NodeLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.section_id, self.path)
    }
}

/// Defects in an authored checklist definition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Section id is empty
    #[error("section at position {position} has an empty id")]
    EmptySectionId { position: usize },

    /// Two sections share an id
    #[error("duplicate section id '{id}' at positions {first} and {second}")]
    DuplicateSectionId {
        id: String,
        first: usize,
        second: usize,
    },

    /// Section id contains whitespace
    #[error("section id '{id}' at position {position} contains whitespace")]
    WhitespaceInSectionId { id: String, position: usize },

    /// Node id is empty
    #[error("node at {location} has an empty id")]
    EmptyNodeId { location: NodeLocation },

    /// Node id contains whitespace
    #[error("node id '{id}' at {location} contains whitespace")]
    WhitespaceInNodeId { id: String, location: NodeLocation },

    /// Two nodes anywhere in the checklist share an id
    #[error("duplicate node id '{id}' at {first} and {second}")]
    DuplicateNodeId {
        id: String,
        first: NodeLocation,
        second: NodeLocation,
    },
}

/// Every defect in `sections`, in document order
///
/// Ids must be non-empty and free of whitespace, and node ids must be unique
/// across the whole checklist, not only within a section. A composite node
/// with no children is not a defect.
#[must_use]
pub fn validate(sections: &Vector<ChecklistSection>) -> Vec<ValidationError> {
    let mut defects = Vec::new();
    let mut section_ids: HashMap<&str, usize> = HashMap::new();
    let mut node_ids: HashMap<&str, NodeLocation> = HashMap::new();

    for (position, section) in sections.iter().enumerate() {
        if section.id().is_empty() {
            defects.push(ValidationError::EmptySectionId { position });
        } else if let Some(&first) = section_ids.get(section.id()) {
            defects.push(ValidationError::DuplicateSectionId {
                id: section.id().to_owned(),
                first,
                second: position,
            });
        } else {
            section_ids.insert(section.id(), position);
        }
        if has_whitespace(section.id()) {
            defects.push(ValidationError::WhitespaceInSectionId {
                id: section.id().to_owned(),
                position,
            });
        }

        for (path, node) in paths(section.items()) {
            let location = NodeLocation {
                section_id: section.id().to_owned(),
                path,
            };
            if node.id().is_empty() {
                defects.push(ValidationError::EmptyNodeId { location });
                continue;
            }
            if has_whitespace(node.id()) {
                defects.push(ValidationError::WhitespaceInNodeId {
                    id: node.id().to_owned(),
                    location: location.clone(),
                });
            }
            if let Some(first) = node_ids.get(node.id()) {
                defects.push(ValidationError::DuplicateNodeId {
                    id: node.id().to_owned(),
                    first: first.clone(),
                    second: location,
                });
            } else {
                node_ids.insert(node.id(), location);
            }
        }
    }

    for defect in &defects {
        tracing::warn!(%defect, "checklist definition defect");
    }
    defects
}

fn has_whitespace(id: &str) -> bool {
    id.chars().any(char::is_whitespace)
}
