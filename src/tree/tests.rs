use std::thread;

use crate::tree::{Link, Node, TitleTree};

/// Helper to build a tree whose values record insertion order
fn tree_of(titles: &[&str]) -> TitleTree<usize> {
    titles.iter().enumerate().map(|(idx, title)| (*title, idx)).collect()
}

/// Titles in traversal order
fn titles(tree: &TitleTree<usize>) -> Vec<String> {
    tree.iter().map(|(title, _)| title.to_string()).collect()
}

/// Walks the whole tree with an explicit stack and checks that every left
/// subtree is strictly smaller and every right subtree is greater or equal
/// than its parent, and that the node count matches `len`.
fn assert_bst_invariants<V>(tree: &TitleTree<V>) {
    let mut count = 0_usize;
    let mut stack: Vec<(&Node<V>, Option<&str>, Option<&str>)> = Vec::new();
    stack.extend(tree.root.as_deref().map(|root| (root, None, None)));
    while let Some((node, lower, upper)) = stack.pop() {
        count += 1;
        let title = node.title.as_str();
        if let Some(lower) = lower {
            assert!(title >= lower, "{title:?} sits right of {lower:?} but is smaller");
        }
        if let Some(upper) = upper {
            assert!(title < upper, "{title:?} sits left of {upper:?} but is not smaller");
        }
        stack.extend(node.left.as_deref().map(|left| (left, lower, Some(title))));
        stack.extend(node.right.as_deref().map(|right| (right, Some(title), upper)));
    }
    assert_eq!(count, tree.len());
}

#[test]
fn test_empty_tree() {
    let mut tree: TitleTree<u32> = TitleTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert!(tree.search("anything").is_none());
    assert!(tree.min().is_none());
    assert!(tree.delete("anything").is_none());
    assert!(tree.in_order_traversal().is_empty());
}

#[test]
fn test_in_order_is_sorted() {
    let tree = tree_of(&["Moby Dick", "Dune", "Ulysses", "Beloved", "Emma", "Walden"]);
    assert_eq!(titles(&tree), ["Beloved", "Dune", "Emma", "Moby Dick", "Ulysses", "Walden"]);
    assert_eq!(tree.len(), 6);
    assert_bst_invariants(&tree);
}

#[test]
fn test_ordering_is_bytewise() {
    let tree = tree_of(&["b", "B", "a", "A", "ab", ""]);
    assert_eq!(titles(&tree), ["", "A", "B", "a", "ab", "b"]);
}

#[test]
#[allow(clippy::unwrap_used)]
fn test_equal_titles_go_right() {
    let tree = tree_of(&["M", "A", "M", "Z"]);
    assert_eq!(titles(&tree), ["A", "M", "M", "Z"]);

    let root = tree.root.as_deref().unwrap();
    assert_eq!(root.title, "M");
    assert_eq!(root.value, 0);
    let second = root.right.as_deref().unwrap();
    assert_eq!(second.title, "M");
    assert_eq!(second.value, 2);
    assert_eq!(second.right.as_deref().unwrap().title, "Z");
    assert_eq!(root.left.as_deref().unwrap().title, "A");

    // equal titles keep insertion order in the traversal
    let values: Vec<usize> = tree.iter().map(|(_, value)| *value).collect();
    assert_eq!(values, [1, 0, 2, 3]);
}

#[test]
fn test_search_returns_first_match_on_path() {
    let tree = tree_of(&["M", "A", "M", "Z", "M"]);
    assert_eq!(tree.search("M"), Some(&0));
    assert_eq!(tree.search("A"), Some(&1));
    assert_eq!(tree.search("Z"), Some(&3));
    assert_eq!(tree.search("N"), None);
    assert_eq!(tree.search_all("M"), [&0, &2, &4]);
    assert!(tree.search_all("Q").is_empty());
}

#[test]
fn test_min() {
    let tree = tree_of(&["M", "B", "T", "A", "C"]);
    assert_eq!(tree.min(), Some(("A", &3)));
}

#[test]
fn test_delete_leaf() {
    let mut tree = tree_of(&["B", "A", "C"]);
    assert_eq!(tree.delete("A"), Some(1));
    assert_eq!(titles(&tree), ["B", "C"]);
    assert_eq!(tree.len(), 2);
    assert_bst_invariants(&tree);
}

#[test]
fn test_delete_node_with_one_child() {
    let mut tree = tree_of(&["M", "B", "A", "T"]);
    assert_eq!(tree.delete("B"), Some(1));
    assert_eq!(titles(&tree), ["A", "M", "T"]);
    assert_bst_invariants(&tree);

    let mut tree = tree_of(&["M", "B", "C"]);
    assert_eq!(tree.delete("B"), Some(1));
    assert_eq!(titles(&tree), ["C", "M"]);
    assert_bst_invariants(&tree);
}

#[test]
#[allow(clippy::unwrap_used)]
fn test_delete_two_children_promotes_successor() {
    let mut tree = tree_of(&["M", "B", "T", "A", "C", "S", "Z"]);
    assert_eq!(tree.delete("M"), Some(0));

    assert_eq!(titles(&tree), ["A", "B", "C", "S", "T", "Z"]);
    assert!(tree.search("M").is_none());
    assert_eq!(tree.len(), 6);

    // the root node stays in place and now carries the successor's entry
    let root = tree.root.as_deref().unwrap();
    assert_eq!(root.title, "S");
    assert_eq!(root.value, 5);
    assert!(root.right.as_deref().unwrap().left.is_none());
    assert_bst_invariants(&tree);
}

#[test]
fn test_delete_two_children_with_deep_successor() {
    let mut tree = tree_of(&["M", "B", "X", "R", "Z", "P", "S", "Q"]);
    assert_eq!(tree.delete("M"), Some(0));
    assert_eq!(titles(&tree), ["B", "P", "Q", "R", "S", "X", "Z"]);
    assert_bst_invariants(&tree);
}

#[test]
fn test_delete_root_repeatedly() {
    let mut tree = tree_of(&["M", "B", "T", "A", "C", "S", "Z"]);
    let mut expected = titles(&tree);
    while let Some(root_title) = tree.root.as_deref().map(|root| root.title.clone()) {
        assert!(tree.delete(&root_title).is_some());
        expected.retain(|title| *title != root_title);
        assert_eq!(titles(&tree), expected);
        assert_bst_invariants(&tree);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn test_delete_absent_title_is_noop() {
    let mut tree = tree_of(&["B", "A", "C"]);
    let before = titles(&tree);
    assert!(tree.delete("Q").is_none());
    assert!(tree.delete("").is_none());
    assert_eq!(titles(&tree), before);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_delete_duplicate_removes_first_on_path() {
    let mut tree = tree_of(&["M", "A", "M", "Z"]);
    assert_eq!(tree.delete("M"), Some(0));
    assert_eq!(titles(&tree), ["A", "M", "Z"]);
    assert_eq!(tree.search("M"), Some(&2));
    assert_eq!(tree.delete("M"), Some(2));
    assert!(tree.search("M").is_none());
    assert_bst_invariants(&tree);
}

#[test]
fn test_delete_matching_picks_exact_duplicate() {
    let mut tree = tree_of(&["M", "A", "M", "Z", "M"]);
    assert_eq!(tree.delete_matching("M", |value| *value == 4), Some(4));
    assert_eq!(tree.search_all("M"), [&0, &2]);
    assert_eq!(tree.delete_matching("M", |value| *value == 0), Some(0));
    assert_eq!(tree.search_all("M"), [&2]);
    assert!(tree.delete_matching("M", |value| *value == 7).is_none());
    assert_eq!(tree.len(), 3);
    assert_bst_invariants(&tree);
}

#[test]
fn test_height_reflects_shape() {
    let balanced = tree_of(&["D", "B", "F", "A", "C", "E", "G"]);
    assert_eq!(balanced.height(), 3);

    let chain = tree_of(&["A", "B", "C", "D", "E", "F", "G"]);
    assert_eq!(chain.height(), 7);
}

#[test]
fn test_clear() {
    let mut tree = tree_of(&["B", "A", "C"]);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    tree.insert("Z", 9);
    assert_eq!(titles(&tree), ["Z"]);
}

#[test]
fn test_iterator_is_exact_size() {
    let tree = tree_of(&["C", "A", "B"]);
    let mut iter = tree.iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some(("A", &1)));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.by_ref().count(), 2);
    assert!(iter.next().is_none());
}

#[test]
fn test_debug_lists_entries_in_order() {
    let tree = tree_of(&["B", "A"]);
    assert_eq!(format!("{tree:?}"), r#"{"A": 1, "B": 0}"#);
}

/// Title of the entry at `idx` in an ascending chain
fn chain_title(idx: usize) -> String {
    format!("Title{idx:06}")
}

/// Builds the tree that inserting `count` ascending titles produces, bottom
/// up in linear time: each node hangs as the right child of its predecessor
fn ascending_chain(count: usize) -> TitleTree<usize> {
    let mut root: Link<usize> = None;
    for idx in (0..count).rev() {
        let mut node = Node::leaf(chain_title(idx), idx);
        node.right = root;
        root = Some(Box::new(node));
    }
    TitleTree { root, len: count }
}

/// Walks, edits and tears down a chain of ascending titles `0..len`
#[allow(clippy::unwrap_used)]
fn degenerate_chain_round_trip(mut tree: TitleTree<usize>) {
    let count = tree.len();
    assert_eq!(tree.height(), count);

    let last = chain_title(count - 1);
    assert_eq!(tree.search(&last), Some(&(count - 1)));

    let traversal = tree.in_order_traversal();
    assert_eq!(traversal.len(), count);
    assert!(traversal.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    drop(traversal);

    tree.insert(chain_title(count), count);
    assert_eq!(tree.height(), count + 1);

    let middle = chain_title(count / 2);
    assert_eq!(tree.delete(&middle), Some(count / 2));
    assert!(tree.search(&middle).is_none());
    assert_eq!(tree.delete(&last), Some(count - 1));
    assert_eq!(tree.delete("Title000000"), Some(0));
    assert_eq!(tree.len(), count - 2);
    assert_eq!(tree.height(), count - 2);
    assert_eq!(tree.min().unwrap().0, "Title000001");
    drop(tree);
}

#[test]
fn test_chain_builder_matches_sorted_insertion() {
    let mut inserted = TitleTree::new();
    for idx in 0..50 {
        inserted.insert(chain_title(idx), idx);
    }
    let built = ascending_chain(50);

    assert_eq!(built.height(), inserted.height());
    assert_eq!(built.in_order_traversal(), inserted.in_order_traversal());
    assert_bst_invariants(&built);
}

#[test]
#[allow(clippy::unwrap_used)]
fn test_degenerate_chain_on_small_stack() {
    // a recursive walk or drop would need far more than 256 KiB for this depth
    thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| {
            let mut tree = TitleTree::new();
            for idx in 0..20_000 {
                tree.insert(chain_title(idx), idx);
            }
            degenerate_chain_round_trip(tree);
        })
        .unwrap()
        .join()
        .unwrap();
}

#[test]
#[allow(clippy::unwrap_used)]
fn test_hundred_thousand_deep_chain_on_small_stack() {
    thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| degenerate_chain_round_trip(ascending_chain(100_000)))
        .unwrap()
        .join()
        .unwrap();
}
