//! Whole-checklist summary
//!
//! [`Summary`] bundles every derived view of one snapshot: totals, progress,
//! status band, gate state, per-section tallies and the incomplete report.
//! It owns its data so it can be serialized and outlive the snapshot.

use crate::aggregate::{Progress, Tally};
use crate::gate::GateState;
use crate::incomplete::incomplete_sections;
use crate::model::Checklist;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Progress bands used to classify a checklist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum percentage for [`Status::Good`]
    pub good: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { good: 70.0 }
    }
}

/// Progress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Every node is checked
    Complete,
    /// At or above the good threshold
    Good,
    /// Below the good threshold
    NeedsWork,
}

impl Status {
    /// Classify `progress` against `thresholds`
    #[must_use]
    pub fn classify(progress: Progress, thresholds: Thresholds) -> Self {
        if progress.is_full() {
            Self::Complete
        } else if progress.percent() >= thresholds.good {
            Self::Good
        } else {
            Self::NeedsWork
        }
    }

    /// One-line message for people
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Complete => "Excellent! This ticket meets all requirements.",
            Self::Good => "Good progress! A few items still need attention.",
            Self::NeedsWork => "This ticket needs more work before submission.",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Complete => "complete",
            Self::Good => "good",
            Self::NeedsWork => "needs work",
        };
        f.write_str(name)
    }
}

/// Counts for one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub tally: Tally,
    pub complete: bool,
}

/// Id and label of an unchecked node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub label: String,
}

/// Unchecked nodes of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteSummary {
    pub section_id: String,
    pub title: String,
    pub remaining: usize,
    pub items: Vec<ItemSummary>,
}

/// Every derived view of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(flatten)]
    pub totals: Tally,
    pub progress: Progress,
    pub percent: u8,
    pub status: Status,
    pub gate: GateState,
    pub sections: Vec<SectionSummary>,
    pub incomplete: Vec<IncompleteSummary>,
}

impl Summary {
    /// Derive the summary of `checklist`
    #[must_use]
    pub fn of(checklist: &Checklist, thresholds: Thresholds) -> Self {
        let totals = checklist.totals();
        let progress = totals.progress();

        let sections = checklist
            .sections()
            .iter()
            .map(|section| {
                let tally = section.tally();
                SectionSummary {
                    id: section.id().to_owned(),
                    title: section.title().to_owned(),
                    tally,
                    complete: tally.is_complete(),
                }
            })
            .collect();

        let incomplete = incomplete_sections(checklist)
            .into_iter()
            .map(|report| IncompleteSummary {
                section_id: report.section.id().to_owned(),
                title: report.section.title().to_owned(),
                remaining: report.remaining(),
                items: report
                    .items
                    .iter()
                    .map(|node| ItemSummary {
                        id: node.id().to_owned(),
                        label: node.label().to_owned(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            totals,
            progress,
            percent: progress.rounded(),
            status: Status::classify(progress, thresholds),
            gate: checklist.gate_state(),
            sections,
            incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChecklistNode, ChecklistSection};
    use pretty_assertions::assert_eq;

    fn ten_leaves(checked: usize) -> Checklist {
        let items = (0..10).map(|i| {
            ChecklistNode::leaf(format!("n{i}"), format!("N{i}")).with_checked(i < checked)
        });
        Checklist::new([ChecklistSection::new("s", "S", items)])
    }

    #[test]
    fn status_bands() {
        let t = Thresholds::default();
        assert_eq!(Status::classify(Progress::from_counts(10, 10), t), Status::Complete);
        assert_eq!(Status::classify(Progress::from_counts(7, 10), t), Status::Good);
        assert_eq!(Status::classify(Progress::from_counts(69, 100), t), Status::NeedsWork);
        assert_eq!(Status::classify(Progress::from_counts(0, 0), t), Status::NeedsWork);
        assert_eq!(
            Status::classify(Progress::from_counts(5, 10), Thresholds { good: 50.0 }),
            Status::Good
        );
    }

    #[test]
    fn status_messages() {
        assert_eq!(Status::Complete.message(), "Excellent! This ticket meets all requirements.");
        assert_eq!(Status::Good.message(), "Good progress! A few items still need attention.");
        assert_eq!(
            Status::NeedsWork.message(),
            "This ticket needs more work before submission."
        );
    }

    #[test]
    fn summary_of_partial_checklist() {
        let summary = Summary::of(&ten_leaves(8), Thresholds::default());
        assert_eq!(summary.totals, Tally { checked: 8, total: 10 });
        assert_eq!(summary.percent, 80);
        assert_eq!(summary.status, Status::Good);
        assert_eq!(summary.gate, GateState::Incomplete);
        assert_eq!(summary.incomplete.len(), 1);
        assert_eq!(
            summary.incomplete[0].items,
            vec![
                ItemSummary { id: "n8".into(), label: "N8".into() },
                ItemSummary { id: "n9".into(), label: "N9".into() },
            ]
        );
        assert!(!summary.sections[0].complete);
    }

    #[test]
    fn summary_of_complete_checklist() {
        let summary = Summary::of(&ten_leaves(10), Thresholds::default());
        assert_eq!(summary.status, Status::Complete);
        assert_eq!(summary.gate, GateState::Ready);
        assert!(summary.incomplete.is_empty());
        assert!(summary.sections[0].complete);
    }

    #[test]
    fn summary_json_shape() {
        let summary = Summary::of(&ten_leaves(3), Thresholds::default());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["checked"], 3);
        assert_eq!(json["total"], 10);
        assert_eq!(json["status"], "needs_work");
        assert_eq!(json["gate"], "incomplete");
        assert_eq!(json["sections"][0]["checked"], 3);
        assert_eq!(json["incomplete"][0]["remaining"], 7);
    }
}
