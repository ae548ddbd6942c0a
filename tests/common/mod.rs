use std::fs;
use std::path::{Path, PathBuf};

use ziptree::notation::{parse_tree, NotationConfig, EXAMPLE};
use ziptree::query::QueryConfig;
use ziptree::ZipTree;

/// The reference example tree.
#[allow(dead_code)]
pub fn example_tree() -> ZipTree<String> {
    tree_from(EXAMPLE)
}

/// Tree written in bracket notation; panics on malformed fixtures.
#[allow(dead_code)]
pub fn tree_from(text: &str) -> ZipTree<String> {
    parse_tree(text, &NotationConfig::default())
        .unwrap_or_else(|err| panic!("fixture {:?} does not parse: {}", text, err))
}

/// All pairs in walk order, one `origin\treached\tdistance` line each.
#[allow(dead_code)]
pub fn render_pairs(tree: &ZipTree<String>, config: &QueryConfig) -> String {
    tree.pairs_within(config)
        .map(|pair| format!("{}\n", pair))
        .collect()
}

/// Compare a tree's pairs against `tests/snapshots/<name>`.
///
/// Set `ZIPTREE_UPDATE_SNAPSHOTS` to rewrite the file instead.
#[allow(dead_code)]
pub fn assert_pairs_snapshot(name: &str, tree: &ZipTree<String>, config: &QueryConfig) {
    let actual = render_pairs(tree, config);
    let path = snapshot_path(name);
    if std::env::var("ZIPTREE_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, &actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();
    if let Some(line) = (0..expected.len().max(actual.len()))
        .find(|&i| expected.get(i) != actual.get(i))
    {
        panic!(
            "pairs within {} differ from {:?} at line {}: expected {:?}, walked {:?} \
             ({} expected lines, {} walked). Set ZIPTREE_UPDATE_SNAPSHOTS=1 to regenerate.",
            config.max_distance,
            path,
            line + 1,
            expected.get(line),
            actual.get(line),
            expected.len(),
            actual.len()
        );
    }
}

#[allow(dead_code)]
fn snapshot_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name)
}
