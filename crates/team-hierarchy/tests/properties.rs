//! Property tests for the hierarchy views.

use proptest::prelude::*;
use std::collections::HashSet;
use team_hierarchy::{
    filter_by_level, filter_tree, flatten, mark_top_performers, name_matches, ExpansionKey,
    HierarchyArena, HierarchyNode, LevelFilter,
};
use team_test_utils::{arb_query, arb_summaries, arb_tree, preorder_names};

fn every_kept_node_is_justified(node: &HierarchyNode, query: &str) -> bool {
    (name_matches(node, query) || !node.child.is_empty())
        && node.child.iter().all(|c| every_kept_node_is_justified(c, query))
}

proptest! {
    #[test]
    fn prop_search_is_idempotent(tree in arb_tree(), query in arb_query()) {
        let once = filter_tree(&tree, &query);
        let twice = once.as_ref().and_then(|t| filter_tree(t, &query));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_empty_search_is_identity(tree in arb_tree()) {
        prop_assert_eq!(filter_tree(&tree, ""), Some(tree));
    }

    #[test]
    fn prop_search_keeps_only_matches_and_ancestors(tree in arb_tree(), query in arb_query()) {
        if let Some(filtered) = filter_tree(&tree, &query) {
            prop_assert!(every_kept_node_is_justified(&filtered, &query));
        }
    }

    #[test]
    fn prop_level_all_is_identity(tree in arb_tree()) {
        let input = vec![tree];
        let out = filter_by_level(&input, LevelFilter::All, 0);
        prop_assert_eq!(&*out, input.as_slice());
    }

    #[test]
    fn prop_level_slice_is_flat_and_at_depth(tree in arb_tree(), level in 0u32..6) {
        let input = vec![tree];
        let out = filter_by_level(&input, LevelFilter::Exactly(level), 0);
        prop_assert!(out.iter().all(|n| n.child.is_empty() && n.level == level));
        let expected = flatten(&input, 0).iter().filter(|r| r.level == level).count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn prop_flatten_preserves_count(tree in arb_tree()) {
        let count = tree.node_count();
        prop_assert_eq!(flatten(std::slice::from_ref(&tree), 0).len(), count);
    }

    #[test]
    fn prop_flatten_depth_matches_true_depth(tree in arb_tree()) {
        // arb_tree stores levels equal to traversal depth
        for row in flatten(std::slice::from_ref(&tree), 0) {
            prop_assert_eq!(row.level, row.node.level);
        }
    }

    #[test]
    fn prop_arena_search_matches_tree_search(tree in arb_tree(), query in arb_query()) {
        let arena = HierarchyArena::build(std::slice::from_ref(&tree));
        let from_arena: Vec<String> = arena
            .search_view(&query)
            .into_iter()
            .map(|i| arena.node(i).username.clone())
            .collect();
        let from_tree = filter_tree(&tree, &query)
            .map(|t| preorder_names(std::slice::from_ref(&t)))
            .unwrap_or_default();
        prop_assert_eq!(from_arena, from_tree);
    }

    #[test]
    fn prop_arena_level_slice_matches_filter(tree in arb_tree(), level in 0u32..6) {
        let input = vec![tree];
        let arena = HierarchyArena::build(&input);
        let from_arena: Vec<String> = arena
            .level_slice(LevelFilter::Exactly(level))
            .into_iter()
            .map(|i| arena.node(i).username.clone())
            .collect();
        let from_filter = preorder_names(&filter_by_level(&input, LevelFilter::Exactly(level), 0));
        prop_assert_eq!(from_arena, from_filter);
    }

    #[test]
    fn prop_sibling_keys_unique_with_distinct_ids(count in 2usize..8) {
        let parent = ExpansionKey::root();
        let keys: HashSet<ExpansionKey> = (0..count)
            .map(|i| parent.child(&HierarchyNode::member("same").with_id(i.to_string()), i))
            .collect();
        prop_assert_eq!(keys.len(), count);
    }

    #[test]
    fn prop_all_zero_leg_marks_nobody(len in 0usize..10) {
        let entries = vec![team_hierarchy::LegBusinessSummary::default(); len];
        prop_assert!(mark_top_performers(&entries).iter().all(|m| !m));
    }

    #[test]
    fn prop_marked_entries_are_exactly_the_maximum(entries in arb_summaries()) {
        let marks = mark_top_performers(&entries);
        let max = entries.iter().map(|e| e.combined_business()).max();
        for (entry, marked) in entries.iter().zip(marks) {
            let at_max = max.is_some_and(|m| !m.is_zero() && entry.combined_business() == m);
            prop_assert_eq!(marked, at_max);
        }
    }
}
