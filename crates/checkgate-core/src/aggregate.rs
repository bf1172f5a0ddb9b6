//! Aggregation engine
//!
//! Counts nodes at every depth and derives the progress percentage.

use crate::model::{Checklist, ChecklistNode, ChecklistSection};
use crate::walk::walk;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;

/// Number of nodes in `items`, counting every descendant
#[inline]
#[must_use]
pub fn count_total(items: &Vector<ChecklistNode>) -> usize {
    walk(items).count()
}

/// Number of checked nodes in `items`, counting every descendant
#[inline]
#[must_use]
pub fn count_checked(items: &Vector<ChecklistNode>) -> usize {
    walk(items).filter(|visit| visit.node.is_checked()).count()
}

/// Checked and total node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    /// Checked nodes
    pub checked: usize,
    /// All nodes
    pub total: usize,
}

impl Tally {
    /// Count `items` and all their descendants in one pass
    #[must_use]
    pub fn of(items: &Vector<ChecklistNode>) -> Self {
        walk(items).fold(Self::default(), |tally, visit| Self {
            checked: tally.checked + usize::from(visit.node.is_checked()),
            total: tally.total + 1,
        })
    }

    /// Unchecked nodes
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total - self.checked
    }

    /// Every node is checked (vacuously true for zero nodes)
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.checked == self.total
    }

    /// Progress derived from this tally
    #[inline]
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::from_counts(self.checked, self.total)
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            checked: self.checked + rhs.checked,
            total: self.total + rhs.total,
        }
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Display for Tally {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.checked, self.total)
    }
}

/// Completion percentage in `[0, 100]`
///
/// Serialized as a bare number. Deserializing rejects NaN and anything
/// outside the range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Progress(f64);

/// A percentage outside `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("progress must be between 0 and 100, got {0}")]
pub struct ProgressOutOfRange(pub f64);

impl TryFrom<f64> for Progress {
    type Error = ProgressOutOfRange;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        if (0.0..=100.0).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(ProgressOutOfRange(percent))
        }
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl Progress {
    /// `checked / total * 100`, or 0 when there is nothing to count
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(checked: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0.0);
        }
        let percent = checked as f64 * 100.0 / total as f64;
        Self(percent.clamp(0.0, 100.0))
    }

    /// Raw percentage
    #[inline]
    #[must_use]
    pub fn percent(self) -> f64 {
        self.0
    }

    /// Nearest whole percent, halves rounding up
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded(self) -> u8 {
        self.0.round() as u8
    }

    /// Exactly 100 percent
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_full(self) -> bool {
        self.0 == 100.0
    }
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.rounded())
    }
}

impl ChecklistSection {
    /// Checked and total counts for this section, at every depth
    #[inline]
    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally::of(self.items())
    }
}

impl Checklist {
    /// Checked and total counts summed over every section
    #[must_use]
    pub fn totals(&self) -> Tally {
        self.sections().iter().map(ChecklistSection::tally).sum()
    }

    /// Share of checked nodes across the whole checklist
    #[inline]
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.totals().progress()
    }
}
