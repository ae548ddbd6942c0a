#[path = "common/mod.rs"]
mod common;
use common::{assert_pairs_snapshot, example_tree, render_pairs, tree_from};
use ziptree::query::QueryConfig;

#[test]
fn example_pairs_within_15_match_golden() {
    let tree = example_tree();
    assert_pairs_snapshot("pairs/example_15.txt", &tree, &QueryConfig::with_max_distance(15));
}

#[test]
fn nested_chain_pairs_render_in_walk_order() {
    let tree = tree_from(r#"["a", 1, ["b", 5, "c"], 1, "d"]"#);
    assert_eq!(
        render_pairs(&tree, &QueryConfig::with_max_distance(7)),
        "b\ta\t1\nc\tb\t5\nc\ta\t6\nd\tc\t1\nd\tb\t6\nd\ta\t7\n"
    );
}

#[test]
fn example_pairs_within_15_count_and_extremes() {
    let tree = example_tree();
    let pairs: Vec<_> = tree
        .pairs_within(&QueryConfig::with_max_distance(15))
        .collect();
    assert_eq!(pairs.len(), 25);
    assert!(pairs.iter().all(|pair| pair.distance <= 15));
    assert_eq!(pairs.iter().map(|pair| pair.distance).min(), Some(2));
    assert_eq!(
        pairs.iter().filter(|pair| pair.distance == 15).count(),
        4,
        "f-c, h-e, i-f and i-c sit exactly on the bound"
    );
}
