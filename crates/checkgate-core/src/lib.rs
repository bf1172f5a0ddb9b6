//! checkgate core
//!
//! Hierarchical requirement checklists with a submission gate.
//!
//! # Core Concepts
//!
//! - [`Checklist`]: immutable snapshot of sections and nested nodes
//! - [`Checklist::toggle`] / [`Checklist::reset`]: produce new snapshots
//! - [`Tally`] / [`Progress`]: counts and percentage at every depth
//! - [`collect_incomplete`]: flat pre-order list of unchecked nodes
//! - [`can_submit`]: the gate, over top-level items only
//! - [`Summary`]: every derived view of a snapshot in one value
//!
//! # Example
//!
//! ```rust
//! use checkgate_core::{Checklist, ChecklistNode, ChecklistSection};
//!
//! let checklist = Checklist::new([ChecklistSection::new(
//!     "release",
//!     "Release",
//!     [
//!         ChecklistNode::composite(
//!             "docs",
//!             "Docs",
//!             [ChecklistNode::leaf("changelog", "Changelog")],
//!         ),
//!         ChecklistNode::leaf("tests", "Tests pass"),
//!     ],
//! )]);
//!
//! let next = checklist.toggle("release", "docs").toggle("release", "tests");
//! assert!(next.can_submit());
//! assert_eq!(next.totals().checked, 2);
//! assert_eq!(next.progress().rounded(), 67);
//!
//! // the first snapshot is unchanged
//! assert!(!checklist.can_submit());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod aggregate;
mod document;
mod gate;
mod incomplete;
mod index;
mod model;
mod reset;
mod summary;
mod toggle;
mod validation;
mod walk;

// Re-exports
pub use aggregate::{count_checked, count_total, Progress, ProgressOutOfRange, Tally};
pub use document::{load_checklist, ChecklistDocument, DocumentError, DocumentFormat};
pub use gate::{blocking_items, can_submit, BlockingItem, GateState};
pub use incomplete::{collect_incomplete, incomplete_sections, IncompleteSection};
pub use index::{NodeIndex, NodePath};
pub use model::{Checklist, ChecklistNode, ChecklistSection};
pub use reset::reset;
pub use summary::{IncompleteSummary, ItemSummary, SectionSummary, Status, Summary, Thresholds};
pub use toggle::toggle;
pub use validation::{validate, NodeLocation, ValidationError};
pub use walk::{walk, Visit, Walk};

/// Checklists embedded in the crate
pub mod builtin;

/// Persistent vector used for node and section lists
pub use im::Vector;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
