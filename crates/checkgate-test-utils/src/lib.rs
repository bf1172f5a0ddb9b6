//! Testing utilities for checkgate workspace
//!
//! Shared fixtures and proptest strategies.

#![allow(missing_docs)]

use checkgate_core::{Checklist, ChecklistNode, ChecklistSection};
use proptest::prelude::*;

/// Section id used by [`scenario_checklist`]
pub const SCENARIO_SECTION: &str = "main";

/// One section with `A(A1, A2), B, C`, all unchecked
pub fn scenario_checklist() -> Checklist {
    Checklist::new([ChecklistSection::new(
        SCENARIO_SECTION,
        "Main requirements",
        [
            ChecklistNode::composite(
                "A",
                "Requirement A",
                [
                    ChecklistNode::leaf("A1", "Requirement A.1"),
                    ChecklistNode::leaf("A2", "Requirement A.2"),
                ],
            ),
            ChecklistNode::leaf("B", "Requirement B"),
            ChecklistNode::leaf("C", "Requirement C"),
        ],
    )])
}

/// Two sections, a nested composite and a link
pub fn two_section_checklist() -> Checklist {
    Checklist::new([
        ChecklistSection::new(
            "design",
            "Design",
            [
                ChecklistNode::composite(
                    "mockups",
                    "Mockups attached",
                    [
                        ChecklistNode::leaf("mockups-desktop", "Desktop"),
                        ChecklistNode::composite(
                            "mockups-mobile",
                            "Mobile",
                            [ChecklistNode::leaf("mockups-mobile-dark", "Dark mode")],
                        ),
                    ],
                ),
                ChecklistNode::leaf("copy", "Copy reviewed").with_link("https://example.com/copy"),
            ],
        ),
        ChecklistSection::new(
            "release",
            "Release",
            [
                ChecklistNode::leaf("flag", "Feature flag created"),
                ChecklistNode::composite("locales", "Locales", []),
            ],
        ),
    ])
}

/// Ids of every node of `section`, in pre-order
pub fn preorder_ids(section: &ChecklistSection) -> Vec<String> {
    section.walk().map(|visit| visit.node.id().to_owned()).collect()
}

/// Every `(section id, node id)` pair, in section order then pre-order
pub fn node_refs(checklist: &Checklist) -> Vec<(String, String)> {
    checklist
        .nodes()
        .map(|(section, visit)| (section.id().to_owned(), visit.node.id().to_owned()))
        .collect()
}

/// Every `(section id, node id)` pair of top-level items
pub fn top_level_refs(checklist: &Checklist) -> Vec<(String, String)> {
    checklist
        .sections()
        .iter()
        .flat_map(|section| {
            section
                .items()
                .iter()
                .map(move |node| (section.id().to_owned(), node.id().to_owned()))
        })
        .collect()
}

/// Tree shape with checked flags; ids are assigned when built
#[derive(Debug, Clone)]
pub enum Shape {
    Leaf(bool),
    Composite(bool, Vec<Shape>),
}

/// Arbitrary node shape, up to four levels deep
pub fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = any::<bool>().prop_map(Shape::Leaf);
    leaf.prop_recursive(4, 48, 4, |inner| {
        (any::<bool>(), prop::collection::vec(inner, 0..4))
            .prop_map(|(checked, children)| Shape::Composite(checked, children))
    })
}

/// Arbitrary checklist with globally unique node ids
///
/// Includes empty checklists, empty sections and composites without
/// children.
pub fn arb_checklist() -> impl Strategy<Value = Checklist> {
    prop::collection::vec(prop::collection::vec(arb_shape(), 0..5), 0..4)
        .prop_map(|sections| build_checklist(&sections))
}

/// Build a checklist from shapes, numbering nodes `n0, n1, ...` in pre-order
pub fn build_checklist(sections: &[Vec<Shape>]) -> Checklist {
    let mut next_id = 0usize;
    Checklist::new(sections.iter().enumerate().map(|(position, shapes)| {
        let items: Vec<ChecklistNode> = shapes
            .iter()
            .map(|shape| build_node(shape, &mut next_id))
            .collect();
        ChecklistSection::new(format!("s{position}"), format!("Section {position}"), items)
    }))
}

fn build_node(shape: &Shape, next_id: &mut usize) -> ChecklistNode {
    let id = format!("n{next_id}");
    *next_id += 1;
    match shape {
        Shape::Leaf(checked) => {
            ChecklistNode::leaf(id.clone(), format!("Node {id}")).with_checked(*checked)
        }
        Shape::Composite(checked, children) => {
            let label = format!("Node {id}");
            let children: Vec<ChecklistNode> =
                children.iter().map(|child| build_node(child, next_id)).collect();
            ChecklistNode::composite(id, label, children).with_checked(*checked)
        }
    }
}
