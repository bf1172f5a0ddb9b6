//! Algebraic properties of the checklist engine, checked over arbitrary trees.

use checkgate_core::{collect_incomplete, count_checked, count_total, Checklist};
use checkgate_test_utils::{arb_checklist, node_refs, preorder_ids, top_level_refs};
use proptest::prelude::*;
use proptest::sample::Index;

fn pick(refs: &[(String, String)], index: &Index) -> Option<(String, String)> {
    if refs.is_empty() {
        None
    } else {
        Some(refs[index.index(refs.len())].clone())
    }
}

fn grand_total(checklist: &Checklist) -> usize {
    checklist
        .sections()
        .iter()
        .map(|section| count_total(section.items()))
        .sum()
}

proptest! {
    #[test]
    fn prop_double_toggle_is_identity(checklist in arb_checklist(), index in any::<Index>()) {
        let Some((section, node)) = pick(&node_refs(&checklist), &index) else {
            return Ok(());
        };
        let twice = checklist.toggle(&section, &node).toggle(&section, &node);
        prop_assert_eq!(twice, checklist);
    }

    #[test]
    fn prop_toggle_changes_exactly_one_flag(checklist in arb_checklist(), index in any::<Index>()) {
        let Some((section, node)) = pick(&node_refs(&checklist), &index) else {
            return Ok(());
        };
        let before = checklist.node(&section, &node).unwrap().is_checked();
        let toggled = checklist.toggle(&section, &node);
        prop_assert_eq!(toggled.node(&section, &node).unwrap().is_checked(), !before);

        let differing = checklist
            .nodes()
            .zip(toggled.nodes())
            .filter(|((_, a), (_, b))| a.node.is_checked() != b.node.is_checked())
            .count();
        prop_assert_eq!(differing, 1);
    }

    #[test]
    fn prop_reset_is_idempotent(checklist in arb_checklist()) {
        let once = checklist.reset();
        prop_assert_eq!(once.reset(), once.clone());
        for section in once.sections() {
            prop_assert_eq!(count_checked(section.items()), 0);
        }
    }

    #[test]
    fn prop_totals_invariant_under_mutation(checklist in arb_checklist(), index in any::<Index>()) {
        let total = grand_total(&checklist);
        prop_assert_eq!(grand_total(&checklist.reset()), total);
        if let Some((section, node)) = pick(&node_refs(&checklist), &index) {
            let toggled = checklist.toggle(&section, &node);
            prop_assert_eq!(grand_total(&toggled), total);
            prop_assert_eq!(toggled.totals().total, total);
        }
    }

    #[test]
    fn prop_progress_bounded(checklist in arb_checklist()) {
        let percent = checklist.progress().percent();
        prop_assert!(!percent.is_nan());
        prop_assert!((0.0..=100.0).contains(&percent));
        if checklist.totals().total == 0 {
            prop_assert!(percent.abs() < f64::EPSILON);
        }
    }

    #[test]
    fn prop_gate_monotone_in_top_level_items(
        checklist in arb_checklist(),
        index in any::<Index>(),
    ) {
        let Some((section, node)) = pick(&top_level_refs(&checklist), &index) else {
            prop_assert!(checklist.can_submit());
            return Ok(());
        };

        let unchecked = checklist.set_checked(&section, &node, false);
        prop_assert!(!unchecked.can_submit());

        let checked = checklist.set_checked(&section, &node, true);
        prop_assert!(checked.can_submit() >= checklist.can_submit());
        prop_assert_eq!(unchecked.set_checked(&section, &node, true), checked.clone());

        let others_checked = top_level_refs(&checked)
            .iter()
            .all(|(s, n)| checked.node(s, n).unwrap().is_checked());
        prop_assert_eq!(checked.can_submit(), others_checked);
    }

    #[test]
    fn prop_incomplete_after_reset_is_full_preorder(checklist in arb_checklist()) {
        let reset = checklist.reset();
        for section in reset.sections() {
            let collected: Vec<String> = collect_incomplete(section)
                .into_iter()
                .map(|node| node.id().to_owned())
                .collect();
            prop_assert_eq!(collected, preorder_ids(section));
        }
    }

    #[test]
    fn prop_incomplete_count_matches_tally(checklist in arb_checklist()) {
        for section in checklist.sections() {
            prop_assert_eq!(collect_incomplete(section).len(), section.tally().remaining());
        }
        let reported: usize = checklist.incomplete_sections().iter().map(|s| s.remaining()).sum();
        prop_assert_eq!(reported, checklist.totals().remaining());
    }

    #[test]
    fn prop_serde_preserves_snapshot(checklist in arb_checklist()) {
        let json = serde_json::to_string(&checklist).unwrap();
        let back: Checklist = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, checklist);
    }
}
