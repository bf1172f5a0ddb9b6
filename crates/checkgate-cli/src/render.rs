//! Plain-text views of a checklist snapshot

use checkgate_core::{Checklist, Progress, Summary};
use std::io::{self, Write};

/// Width of the progress bar, in cells
pub const BAR_WIDTH: usize = 20;

/// `[x]` or `[ ]`
#[inline]
#[must_use]
pub fn mark(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// `[########------------] 40%`
#[must_use]
pub fn progress_bar(progress: Progress, width: usize) -> String {
    let filled = (usize::from(progress.rounded()) * width / 100).min(width);
    format!(
        "[{}{}] {progress}",
        "#".repeat(filled),
        "-".repeat(width - filled)
    )
}

/// One line: progress, counts and gate state
#[must_use]
pub fn status_line(checklist: &Checklist) -> String {
    format!(
        "{} {} checked | gate: {}",
        progress_bar(checklist.progress(), BAR_WIDTH),
        checklist.totals(),
        checklist.gate_state()
    )
}

/// Every section as an indented tree
///
/// # Errors
/// Returns error if writing fails
pub fn write_tree<W: Write>(out: &mut W, checklist: &Checklist) -> io::Result<()> {
    for section in checklist.sections() {
        writeln!(out, "{} ({}) [{}]", section.title(), section.tally(), section.id())?;
        for visit in section.walk() {
            let indent = "  ".repeat(visit.depth + 1);
            let node = visit.node;
            write!(out, "{indent}{} {} ({})", mark(node.is_checked()), node.label(), node.id())?;
            if let Some(link) = node.link() {
                write!(out, " <{link}>")?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "{}", status_line(checklist))
}

/// Unchecked nodes grouped by section
///
/// # Errors
/// Returns error if writing fails
pub fn write_incomplete<W: Write>(out: &mut W, checklist: &Checklist) -> io::Result<()> {
    let sections = checklist.incomplete_sections();
    if sections.is_empty() {
        return writeln!(out, "nothing left to check");
    }
    for entry in sections {
        writeln!(out, "{} ({} left):", entry.section.title(), entry.remaining())?;
        for node in entry.items {
            writeln!(out, "  - {} ({})", node.label(), node.id())?;
        }
    }
    Ok(())
}

/// Gate state and the top-level items holding it closed
///
/// # Errors
/// Returns error if writing fails
pub fn write_gate<W: Write>(out: &mut W, checklist: &Checklist) -> io::Result<()> {
    writeln!(out, "gate: {}", checklist.gate_state())?;
    for item in checklist.blocking_items() {
        writeln!(
            out,
            "  blocked by {}/{}: {}",
            item.section_id,
            item.node.id(),
            item.node.label()
        )?;
    }
    Ok(())
}

/// Human-readable [`Summary`]
///
/// # Errors
/// Returns error if writing fails
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(
        out,
        "{} {} checked",
        progress_bar(summary.progress, BAR_WIDTH),
        summary.totals
    )?;
    writeln!(out, "status: {} - {}", summary.status, summary.status.message())?;
    writeln!(out, "gate: {}", summary.gate)?;
    for section in &summary.sections {
        let done = if section.complete { " done" } else { "" };
        writeln!(out, "  {} {}{done}", section.title, section.tally)?;
    }
    for entry in &summary.incomplete {
        writeln!(out, "{} ({} left):", entry.title, entry.remaining)?;
        for item in &entry.items {
            writeln!(out, "  - {} ({})", item.label, item.id)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkgate_core::Thresholds;
    use checkgate_test_utils::{scenario_checklist, two_section_checklist, SCENARIO_SECTION};
    use pretty_assertions::assert_eq;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bar_widths() {
        assert_eq!(progress_bar(Progress::from_counts(0, 5), 10), "[----------] 0%");
        assert_eq!(progress_bar(Progress::from_counts(3, 5), 10), "[######----] 60%");
        assert_eq!(progress_bar(Progress::from_counts(5, 5), 10), "[##########] 100%");
        assert_eq!(progress_bar(Progress::from_counts(1, 1), 0), "[] 100%");
    }

    #[test]
    fn bar_never_overflows_its_width() {
        for checked in 0..=7 {
            let bar = progress_bar(Progress::from_counts(checked, 7), BAR_WIDTH);
            let cells = bar.trim_start_matches('[').split(']').next().unwrap();
            assert_eq!(cells.len(), BAR_WIDTH);
        }
        let decoded: Result<Summary, _> = serde_json::from_str(
            r#"{"checked":1,"total":2,"progress":250.0,"percent":250,"status":"good",
                "gate":"ready","sections":[],"incomplete":[]}"#,
        );
        assert!(decoded.is_err());
    }

    #[test]
    fn tree_marks_and_links() {
        let checklist = two_section_checklist().toggle("design", "copy");
        let text = rendered(|out| write_tree(out, &checklist));
        assert!(text.contains("Design (1/5) [design]\n"));
        assert!(text.contains("  [ ] Mockups attached (mockups)\n"));
        assert!(text.contains("      [ ] Dark mode (mockups-mobile-dark)\n"));
        assert!(text.contains("  [x] Copy reviewed (copy) <https://example.com/copy>\n"));
        assert!(text.ends_with("1/7 checked | gate: incomplete\n"));
    }

    #[test]
    fn incomplete_listing() {
        let checklist = scenario_checklist()
            .toggle(SCENARIO_SECTION, "A")
            .toggle(SCENARIO_SECTION, "B");
        let text = rendered(|out| write_incomplete(out, &checklist));
        assert_eq!(
            text,
            "Main requirements (3 left):\n\
             \x20 - Requirement A.1 (A1)\n\
             \x20 - Requirement A.2 (A2)\n\
             \x20 - Requirement C (C)\n"
        );
    }

    #[test]
    fn gate_lists_blockers() {
        let checklist = scenario_checklist().toggle(SCENARIO_SECTION, "A");
        let text = rendered(|out| write_gate(out, &checklist));
        assert_eq!(
            text,
            "gate: incomplete\n\
             \x20 blocked by main/B: Requirement B\n\
             \x20 blocked by main/C: Requirement C\n"
        );
    }

    #[test]
    fn summary_text() {
        let summary = Summary::of(&scenario_checklist(), Thresholds::default());
        let text = rendered(|out| write_summary(out, &summary));
        assert!(text.starts_with("[--------------------] 0% 0/5 checked\n"));
        assert!(text.contains(
            "status: needs work - This ticket needs more work before submission.\n"
        ));
        assert!(text.contains("gate: incomplete\n"));
        assert!(text.contains("Main requirements (5 left):\n"));
    }
}
