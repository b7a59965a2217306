//! Testing utilities for the team hierarchy workspace
//!
//! Shared fixtures, sample trees, and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use team_hierarchy::{HierarchyNode, LegBusinessSummary, Viewer};

pub fn sample_viewer() -> Viewer {
    Viewer::new("100", "me")
        .with_full_name("Viewer Person")
        .with_plan(true, Decimal::from(1_000))
}

pub fn member(id: &str, username: &str, level: u32) -> HierarchyNode {
    HierarchyNode::member(username).with_id(id).with_level(level)
}

/// root → [john, jane → [johnny]]
pub fn john_jane_members() -> Vec<HierarchyNode> {
    vec![
        member("1", "john", 1).with_plan(true, Decimal::from(100)),
        member("2", "jane", 1).with_child(member("3", "johnny", 2).with_plan(true, Decimal::from(50))),
    ]
}

pub fn john_jane_tree() -> HierarchyNode {
    HierarchyNode::synthetic_root(&sample_viewer(), john_jane_members())
}

/// Wide tree with `per_level` children under every node down to `depth`
pub fn uniform_tree(depth: u32, per_level: usize) -> HierarchyNode {
    fn grow(prefix: &str, level: u32, depth: u32, per_level: usize) -> Vec<HierarchyNode> {
        if level > depth {
            return Vec::new();
        }
        (0..per_level)
            .map(|i| {
                let id = format!("{prefix}{i}");
                let mut node = member(&id, &format!("user{id}"), level);
                node.child = grow(&format!("{id}."), level + 1, depth, per_level);
                node
            })
            .collect()
    }
    HierarchyNode::synthetic_root(&sample_viewer(), grow("", 1, depth, per_level))
}

pub fn summary(username: &str, pro: i64, express: i64, team: i64) -> LegBusinessSummary {
    LegBusinessSummary::new(Decimal::from(pro), Decimal::from(express), Decimal::from(team))
        .with_username(username)
}

/// Rewrite stored levels so they match traversal depth
pub fn relevel(node: &mut HierarchyNode, level: u32) {
    node.level = level;
    for child in &mut node.child {
        relevel(child, level + 1);
    }
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["ann", "anna", "bob", "bobby", "cara", "dan", "Ann", "BOB"])
        .prop_map(str::to_string)
}

fn arb_member() -> impl Strategy<Value = HierarchyNode> {
    (
        proptest::option::of(0u32..1_000),
        arb_name(),
        any::<bool>(),
        0u32..10_000,
    )
        .prop_map(|(id, name, active, price)| {
            let mut node = HierarchyNode::member(name).with_plan(active, Decimal::from(price));
            node.id = id.map(|v| v.to_string());
            node
        })
}

/// Arbitrary referral tree with a synthetic root and consistent levels
pub fn arb_tree() -> impl Strategy<Value = HierarchyNode> {
    let leaf = arb_member();
    let subtree = leaf.prop_recursive(4, 40, 4, |inner| {
        (arb_member(), prop::collection::vec(inner, 0..4)).prop_map(|(mut node, child)| {
            node.child = child;
            node
        })
    });
    prop::collection::vec(subtree, 0..4).prop_map(|members| {
        let mut root = HierarchyNode::synthetic_root(&sample_viewer(), members);
        relevel(&mut root, 0);
        root
    })
}

pub fn arb_query() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "a", "an", "ANN", "bob", "by", "zzz", "me"]).prop_map(str::to_string)
}

pub fn arb_summaries() -> impl Strategy<Value = Vec<LegBusinessSummary>> {
    prop::collection::vec((0i64..50, 0i64..50, 0i64..50), 0..12).prop_map(|rows| {
        rows.into_iter()
            .map(|(p, e, t)| LegBusinessSummary::new(Decimal::from(p), Decimal::from(e), Decimal::from(t)))
            .collect()
    })
}

/// Ids of every node in pre-order, for comparing views
pub fn preorder_names(nodes: &[HierarchyNode]) -> Vec<String> {
    fn walk(nodes: &[HierarchyNode], out: &mut Vec<String>) {
        for node in nodes {
            out.push(node.username.clone());
            walk(&node.child, out);
        }
    }
    let mut out = Vec::new();
    walk(nodes, &mut out);
    out
}
