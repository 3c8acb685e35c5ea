//! Title index: an unbalanced binary search tree ordered by title.
//!
//! Nodes are ordered by byte-wise string comparison of their titles. Equal
//! titles are allowed and always descend to the right, so the tree keeps
//! `left < node <= right` and behaves as a multiset with a stable,
//! right-biased tie-break: in-order output lists equal titles in insertion
//! order.
//!
//! The tree is never rebalanced. Sorted insertion degrades it into a chain
//! of depth `n`, so no operation here recurses on the call stack: insert,
//! search and delete walk a single root-to-leaf path in a loop, while
//! traversal and drop use an explicit heap-allocated stack.

use std::{cmp::Ordering, collections::VecDeque, fmt, iter::FusedIterator, mem};

/// Owned, optional child subtree
type Link<V> = Option<Box<Node<V>>>;

/// A single tree node. Each node exclusively owns both of its subtrees.
struct Node<V> {
    /// Ordering key
    title: String,
    /// Payload stored under the title
    value: V,
    /// Subtree of strictly smaller titles
    left: Link<V>,
    /// Subtree of greater or equal titles
    right: Link<V>,
}

impl<V> Node<V> {
    /// Create a node without children
    fn leaf(title: String, value: V) -> Self {
        Self { title, value, left: None, right: None }
    }
}

/// Binary search tree mapping titles to values, duplicates allowed
pub struct TitleTree<V> {
    /// Root of the tree, `None` when empty
    root: Link<V>,
    /// Number of stored entries
    len: usize,
}

impl<V> Default for TitleTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TitleTree<V> {
    /// Create an empty tree
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of entries in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a value under `title`.
    ///
    /// Walks down from the root, going left when `title` is smaller than the
    /// node's title and right otherwise (equal titles included), and attaches
    /// a new leaf at the first empty slot. Existing entries are never
    /// overwritten.
    pub fn insert(&mut self, title: impl Into<String>, value: V) {
        let title = title.into();
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if title < node.title { &mut node.left } else { &mut node.right };
        }
        *slot = Some(Box::new(Node::leaf(title, value)));
        self.len = self.len.saturating_add(1);
    }

    /// Find the value stored under `title`.
    ///
    /// Returns the first match on the search path, which is the
    /// earliest-inserted of several equal titles unless deletions have since
    /// promoted a later one into its node.
    #[must_use]
    pub fn search(&self, title: &str) -> Option<&V> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match title.cmp(node.title.as_str()) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Every value stored under `title`, in ascending in-order position.
    ///
    /// All equal titles sit on the search path for `title`, so this is a
    /// single root-to-leaf walk.
    #[must_use]
    pub fn search_all(&self, title: &str) -> Vec<&V> {
        let mut matches = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match title.cmp(node.title.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => {
                    matches.push(&node.value);
                    node.right.as_deref()
                }
                Ordering::Greater => node.right.as_deref(),
            };
        }
        matches
    }

    /// Entry with the smallest title (the leftmost node)
    #[must_use]
    pub fn min(&self) -> Option<(&str, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((node.title.as_str(), &node.value))
    }

    /// Remove one entry stored under `title`, returning its value.
    ///
    /// When several entries share the title, the first one met on the search
    /// path is removed. Deleting an absent title is a no-op.
    pub fn delete(&mut self, title: &str) -> Option<V> {
        self.delete_matching(title, |_| true)
    }

    /// Remove the first entry on the search path whose title equals `title`
    /// and whose value satisfies `predicate`.
    ///
    /// A node with two children keeps its place in the tree: it takes over the
    /// title and value of its in-order successor, and the successor's node is
    /// the one unlinked.
    pub fn delete_matching(
        &mut self,
        title: &str,
        mut predicate: impl FnMut(&V) -> bool,
    ) -> Option<V> {
        let mut slot = &mut self.root;
        loop {
            let go_left = match slot.as_deref() {
                None => return None,
                Some(node) => match title.cmp(node.title.as_str()) {
                    Ordering::Less => true,
                    Ordering::Equal if predicate(&node.value) => break,
                    Ordering::Equal | Ordering::Greater => false,
                },
            };
            slot = match slot {
                Some(node) => {
                    if go_left {
                        &mut node.left
                    } else {
                        &mut node.right
                    }
                }
                None => return None,
            };
        }

        let removed = Self::unlink(slot)?;
        self.len = self.len.saturating_sub(1);
        Some(removed)
    }

    /// Splice the node held in `slot` out of the tree and return its value
    fn unlink(slot: &mut Link<V>) -> Option<V> {
        let mut target = slot.take()?;
        match (target.left.take(), target.right.take()) {
            (None, None) => {}
            (Some(child), None) | (None, Some(child)) => *slot = Some(child),
            (Some(left), Some(right)) => {
                let (successor, rest) = Self::detach_min(right);
                let Node { title, value, .. } = *successor;
                target.title = title;
                let removed = mem::replace(&mut target.value, value);
                target.left = Some(left);
                target.right = rest;
                *slot = Some(target);
                return Some(removed);
            }
        }
        Some(target.value)
    }

    /// Split the leftmost node off `subtree`, returning it together with
    /// what remains of the subtree. The leftmost node has no left child, so
    /// its right child simply takes its place.
    fn detach_min(subtree: Box<Node<V>>) -> (Box<Node<V>>, Link<V>) {
        let mut spine = Vec::new();
        let mut current = subtree;
        while let Some(left) = current.left.take() {
            spine.push(current);
            current = left;
        }

        let mut rest = current.right.take();
        while let Some(mut parent) = spine.pop() {
            parent.left = rest;
            rest = Some(parent);
        }
        (current, rest)
    }

    /// All entries in ascending title order
    #[must_use]
    pub fn in_order_traversal(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Lazy in-order iterator over `(title, value)` pairs
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 when empty
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0_usize;
        let mut level: VecDeque<&Node<V>> = self.root.as_deref().into_iter().collect();
        while !level.is_empty() {
            height = height.saturating_add(1);
            for _ in 0..level.len() {
                if let Some(node) = level.pop_front() {
                    level.extend(node.left.as_deref());
                    level.extend(node.right.as_deref());
                }
            }
        }
        height
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node<V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Visit every node in breadth-first order with its parent's position,
    /// used by the visualizer to draw edges without recursion
    pub(crate) fn for_each_edge(&self, mut visit: impl FnMut(usize, Option<(usize, Side)>, &str)) {
        let mut queue: VecDeque<EdgeVisit<'_, V>> = VecDeque::new();
        queue.extend(self.root.as_deref().map(|root| (root, None)));
        let mut next_id = 0_usize;
        while let Some((node, parent)) = queue.pop_front() {
            let id = next_id;
            next_id = next_id.saturating_add(1);
            visit(id, parent, &node.title);
            queue.extend(node.left.as_deref().map(|left| (left, Some((id, Side::Left)))));
            queue.extend(node.right.as_deref().map(|right| (right, Some((id, Side::Right)))));
        }
    }

    /// Visit every title in pre-order with its depth, driven by an explicit stack
    pub(crate) fn for_each_preorder(&self, mut visit: impl FnMut(usize, Side, &str)) {
        let mut stack: Vec<(&Node<V>, usize, Side)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, 0, Side::Root)));
        while let Some((node, depth, side)) = stack.pop() {
            visit(depth, side, &node.title);
            let child_depth = depth.saturating_add(1);
            stack.extend(node.right.as_deref().map(|right| (right, child_depth, Side::Right)));
            stack.extend(node.left.as_deref().map(|left| (left, child_depth, Side::Left)));
        }
    }
}

/// A node waiting in the breadth-first queue, with its parent's id and side
type EdgeVisit<'a, V> = (&'a Node<V>, Option<(usize, Side)>);

/// Position of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// The root has no parent
    Root,
    /// Left child
    Left,
    /// Right child
    Right,
}

impl<V> Drop for TitleTree<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for TitleTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<S: Into<String>, V> FromIterator<(S, V)> for TitleTree<V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<S: Into<String>, V> Extend<(S, V)> for TitleTree<V> {
    fn extend<I: IntoIterator<Item = (S, V)>>(&mut self, iter: I) {
        for (title, value) in iter {
            self.insert(title, value);
        }
    }
}

impl<'a, V> IntoIterator for &'a TitleTree<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`TitleTree`].
///
/// Holds the unvisited left spine on an explicit stack: popping a node emits
/// it and pushes the left spine of its right subtree.
pub struct Iter<'a, V> {
    /// Nodes whose left subtrees are fully pushed, next to emit on top
    stack: Vec<&'a Node<V>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    /// Start a walk at `root`
    fn new(root: Option<&'a Node<V>>, len: usize) -> Self {
        let mut iter = Self { stack: Vec::new(), remaining: len };
        iter.push_left_spine(root);
        iter
    }

    /// Push `node` and all of its left descendants
    fn push_left_spine(&mut self, mut node: Option<&'a Node<V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.title.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("pending", &self.stack.len())
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests;
