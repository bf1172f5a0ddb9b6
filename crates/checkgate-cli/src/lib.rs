//! checkgate CLI
//!
//! Loads a checklist document (or the built-in catalog), applies `--check`
//! marks and runs one of the `show`, `summary`, `gate`, `validate` or
//! `session` commands.

#![allow(missing_docs)]

pub mod config;
pub mod render;
pub mod session;

pub use config::{CliConfig, ConfigError};
pub use session::{Flow, Session, SessionCommand, SessionError};

use checkgate_core::Checklist;

/// Split a `SECTION/NODE` reference at the first `/`
#[must_use]
pub fn parse_node_ref(text: &str) -> Option<(&str, &str)> {
    let (section, node) = text.split_once('/')?;
    if section.is_empty() || node.is_empty() {
        None
    } else {
        Some((section, node))
    }
}

/// Mark every referenced node checked
///
/// Returns the new snapshot and the references that matched nothing.
pub fn apply_checks<'r>(
    checklist: &Checklist,
    refs: impl IntoIterator<Item = (&'r str, &'r str)>,
) -> (Checklist, Vec<(&'r str, &'r str)>) {
    let mut missing = Vec::new();
    let mut current = checklist.clone();
    for (section, node) in refs {
        if current.node(section, node).is_none() {
            tracing::warn!(section, node, "--check target not found");
            missing.push((section, node));
            continue;
        }
        current = current.set_checked(section, node, true);
    }
    (current, missing)
}
