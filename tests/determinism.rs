#[path = "common/mod.rs"]
mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use blake3::hash;
use common::{example_tree, render_pairs};
use ziptree::query::QueryConfig;
use ziptree::ZipTree;

fn fingerprint(tree: &ZipTree<String>, max_distance: i64) -> blake3::Hash {
    hash(render_pairs(tree, &QueryConfig::with_max_distance(max_distance)).as_bytes())
}

#[test]
fn repeated_queries_are_identical() {
    let tree = example_tree();

    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        fingerprints.insert(fingerprint(&tree, 15));
    }
    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs");
}

#[test]
fn concurrent_queries_share_one_tree() {
    let tree = Arc::new(example_tree());
    let expected = fingerprint(&tree, 15);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || fingerprint(&tree, 15))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("query thread finished"), expected);
    }
}

#[test]
fn abandoned_walks_leave_tree_usable() {
    let tree = example_tree();
    let mut partial = tree.pairs_within(&QueryConfig::with_max_distance(15));
    assert!(partial.next().is_some());
    drop(partial);
    assert_eq!(tree.pairs_within(&QueryConfig::with_max_distance(15)).count(), 25);
}
