//! Checklists shipped with the crate

use crate::document::{ChecklistDocument, DocumentError};

const IPT_REC_MODAL: &str = include_str!("../assets/ipt-rec-modal.yaml");

/// Jira ticket validation checklist for the IPT recommendation modal
///
/// # Errors
/// Only fails if the embedded asset is malformed
pub fn ipt_rec_modal() -> Result<ChecklistDocument, DocumentError> {
    ChecklistDocument::from_yaml_str(IPT_REC_MODAL)
}
