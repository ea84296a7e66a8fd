//! The `Tree` multiset and its public operations (Sections 4.2–4.4, 4.7)

use crate::comparator::{equivalent, Comparator, DefaultComparator};
use crate::iter::{Cursor, RevCursor};
use crate::node::Node;

/// An in-memory, ordered multiset backed by a B-tree with a compile-time
/// branching factor.
///
/// `ORDER` is the tree's minimum degree: every non-root node holds between
/// `ORDER - 1` and `2 * ORDER - 1` keys, and every internal node has one more
/// child than it has keys. `ORDER` must be at least 2; this is enforced at
/// monomorphization time, not at runtime.
///
/// Ordering is expressed through a [`Comparator`] rather than `T: Ord`,
/// defaulting to [`DefaultComparator`] which defers to `T`'s own `Ord`
/// implementation. Two values are treated as duplicates of each other
/// (rather than distinct elements) exactly when the comparator considers
/// neither less than the other.
pub struct Tree<T, const ORDER: usize, C = DefaultComparator> {
    root: Option<Box<Node<T, ORDER>>>,
    comparator: C,
}

impl<T, const ORDER: usize> Tree<T, ORDER, DefaultComparator> {
    /// Creates an empty tree ordered by `T`'s own [`Ord`] implementation.
    pub fn new() -> Self {
        Self::new_with(DefaultComparator)
    }
}

impl<T, const ORDER: usize> Default for Tree<T, ORDER, DefaultComparator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const ORDER: usize, C: Comparator<T>> Tree<T, ORDER, C> {
    /// Forces evaluation of `ORDER >= 2` at monomorphization time. A tree
    /// instantiated with `ORDER` of 0 or 1 cannot satisfy the node size
    /// invariants in `Node` (a node could never have a valid minimum key
    /// count), so this is checked once per concrete `(T, ORDER, C)` rather
    /// than on every operation.
    const ASSERT_ORDER_AT_LEAST_TWO: () = assert!(ORDER >= 2, "Order must be at least 2");

    /// Creates an empty tree ordered by `comparator`.
    pub fn new_with(comparator: C) -> Self {
        let () = Self::ASSERT_ORDER_AT_LEAST_TWO;
        Tree {
            root: None,
            comparator,
        }
    }

    /// Returns `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every element, leaving the tree empty.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Returns `true` if an element equivalent to `value` is present.
    ///
    /// Unlike [`Tree::find`], this never descends past the first match: it
    /// answers "is it here", not "where is the leftmost one".
    pub fn contains(&self, value: &T) -> bool {
        let mut cur = match self.root.as_deref() {
            Some(node) => node,
            None => return false,
        };
        loop {
            let index = cur.lower_bound(value, &self.comparator);
            if index < cur.keys.len() && equivalent(&self.comparator, &cur.keys[index], value) {
                return true;
            }
            if cur.is_leaf() {
                return false;
            }
            cur = cur.children[index].as_ref();
        }
    }

    fn rightmost_leaf(&self) -> Option<&Node<T, ORDER>> {
        let mut cur = self.root.as_deref()?;
        while !cur.is_leaf() {
            cur = cur.children.last().expect("internal node has a child").as_ref();
        }
        Some(cur)
    }

    /// A cursor positioned at the leftmost (smallest) element.
    pub fn begin(&self) -> Cursor<'_, T, ORDER> {
        let mut cursor = Cursor::new_empty(self.rightmost_leaf());
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cursor.push(node, 0);
            if node.is_leaf() {
                break;
            }
            cur = Some(node.children[0].as_ref());
        }
        cursor
    }

    /// A cursor positioned one past the rightmost (largest) element.
    pub fn end(&self) -> Cursor<'_, T, ORDER> {
        let fin = self.rightmost_leaf();
        let mut cursor = Cursor::new_empty(fin);
        if let Some(node) = fin {
            cursor.push(node, node.keys.len());
        }
        cursor
    }

    /// A reverse cursor positioned at the rightmost (largest) element.
    pub fn rbegin(&self) -> RevCursor<'_, T, ORDER> {
        RevCursor::new(self.end(), self.begin())
    }

    /// A reverse cursor positioned one before the leftmost (smallest)
    /// element.
    pub fn rend(&self) -> RevCursor<'_, T, ORDER> {
        RevCursor::new(self.begin(), self.begin())
    }

    /// Finds the leftmost element equivalent to `value`, or `end()` if none
    /// exists.
    ///
    /// After locating the first node holding a match, the search continues
    /// into that match's left subtree looking for an earlier occurrence,
    /// descending as long as `lower_bound` finds a candidate index — without
    /// re-checking equivalence at each step. That second check is redundant
    /// rather than unsafe: any candidate reached this way sits strictly
    /// between `value` (by `lower_bound`) and the already-confirmed match
    /// (by subtree ordering), so it is equivalent to `value` by the
    /// comparator's transitivity. `contains` does not need this deeper
    /// descent because it only answers presence, not position.
    pub fn find(&self, value: &T) -> Cursor<'_, T, ORDER> {
        let fin = self.rightmost_leaf();
        let mut cursor = Cursor::new_empty(fin);
        let root = match self.root.as_deref() {
            Some(node) => node,
            None => return cursor,
        };

        let mut cur = root;
        let mut matched_child = None;
        loop {
            let index = cur.lower_bound(value, &self.comparator);
            if index < cur.keys.len() && equivalent(&self.comparator, &cur.keys[index], value) {
                cursor.push(cur, index);
                if !cur.is_leaf() {
                    matched_child = Some(cur.children[index].as_ref());
                }
                break;
            }
            if cur.is_leaf() {
                return Cursor::new_empty(fin);
            }
            cursor.push(cur, index);
            cur = cur.children[index].as_ref();
        }

        let mut deeper = matched_child;
        while let Some(node) = deeper {
            let index = node.lower_bound(value, &self.comparator);
            if index == node.keys.len() {
                break;
            }
            cursor.push(node, index);
            if node.is_leaf() {
                break;
            }
            deeper = Some(node.children[index].as_ref());
        }

        cursor
    }

    /// Inserts `value`. Since `Tree` is a multiset, this always succeeds,
    /// even when an equivalent value is already present.
    pub fn insert(&mut self, value: T) {
        if self.root.is_none() {
            let mut leaf = Node::new();
            leaf.keys.push(value);
            self.root = Some(Box::new(leaf));
            return;
        }

        if self.root.as_ref().expect("checked above").is_full() {
            let old_root = self.root.take().expect("checked above");
            let mut new_root = Node::new();
            new_root.children.push(old_root);
            new_root.split_child(0);
            self.root = Some(Box::new(new_root));
        }

        let mut node = self.root.as_mut().expect("root exists").as_mut();
        loop {
            let index = node.lower_bound(&value, &self.comparator);
            if node.is_leaf() {
                node.keys.insert(index, value);
                return;
            }

            let mut child_index = index;
            if node.children[child_index].is_full() {
                node.split_child(child_index);
                if self.comparator.less(&node.keys[child_index], &value) {
                    child_index += 1;
                }
            }
            node = node.children[child_index].as_mut();
        }
    }

    /// Removes a single element equivalent to `value`, if one is present.
    ///
    /// Returns `true` if an element was removed. When duplicates are
    /// present, which particular occurrence is removed is unspecified.
    pub fn remove(&mut self, value: &T) -> bool {
        if self.root.is_none() {
            return false;
        }

        if self.root.as_ref().expect("checked above").is_leaf() {
            let root = self.root.as_mut().expect("checked above");
            let index = root.lower_bound(value, &self.comparator);
            if index == root.keys.len() || !equivalent(&self.comparator, &root.keys[index], value)
            {
                return false;
            }
            root.remove_leaf(index);
            let now_empty = root.keys.is_empty();
            if now_empty {
                self.root = None;
            }
            return true;
        }

        let should_collapse = {
            let root = self.root.as_ref().expect("checked above");
            root.keys.len() == 1
                && root.children[0].keys.len() == Node::<T, ORDER>::MIN_KEYS
                && root.children[1].keys.len() == Node::<T, ORDER>::MIN_KEYS
        };
        if should_collapse {
            let root = self.root.as_mut().expect("checked above");
            root.merge_child_with_right(0);
            let mut old_root = self.root.take().expect("checked above");
            let merged = old_root
                .children
                .pop()
                .expect("merging a single-key root leaves exactly one child");
            self.root = Some(merged);
            debug_assert!(self.root.as_ref().expect("just assigned").keys.len() > Node::<T, ORDER>::MIN_KEYS);
        }

        let mut node = self.root.as_mut().expect("root exists").as_mut();
        loop {
            let index = node.lower_bound(value, &self.comparator);
            if index < node.keys.len() && equivalent(&self.comparator, &node.keys[index], value) {
                if node.is_leaf() {
                    node.remove_leaf(index);
                } else {
                    remove_middle_key(node, index);
                }
                return true;
            }
            if node.is_leaf() {
                return false;
            }
            node.ensure_child_full(index);
            let next = index.min(node.keys.len());
            node = node.children[next].as_mut();
        }
    }

    /// Exchanges the contents of `self` and `other` without moving or
    /// copying any element.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.root, &mut other.root);
        std::mem::swap(&mut self.comparator, &mut other.comparator);
    }
}

/// Exchanges the contents of `a` and `b`. Equivalent to `a.swap(b)`.
///
/// The original source this crate is modeled on also exposes a free `swap`
/// function, but takes both trees by value — silently moving the caller's
/// trees through the call instead of exchanging them in place. That shape
/// only behaves like a swap because the by-value parameters are themselves
/// swapped and then dropped, discarding whatever the caller had if they
/// expected their bindings to change; taking both by mutable reference here
/// gives the same exchange without that trap.
pub fn swap<T, const ORDER: usize, C: Comparator<T>>(a: &mut Tree<T, ORDER, C>, b: &mut Tree<T, ORDER, C>) {
    a.swap(b);
}

impl<T: Clone, const ORDER: usize, C: Comparator<T>> Clone for Tree<T, ORDER, C> {
    fn clone(&self) -> Self {
        Tree {
            root: self.root.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<'a, T, const ORDER: usize, C: Comparator<T>> IntoIterator for &'a Tree<T, ORDER, C> {
    type Item = &'a T;
    type IntoIter = Cursor<'a, T, ORDER>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

/// Replaces `node.keys[index]` — known to be equivalent to the value being
/// removed — with its predecessor or successor, or merges the two children
/// that straddle it and recurses into the merged node. Exactly one of the
/// three happens, chosen by which neighbor (if either) can spare a key
/// without underflowing.
fn remove_middle_key<T, const ORDER: usize>(node: &mut Node<T, ORDER>, index: usize) {
    if node.children[index].keys.len() > Node::<T, ORDER>::MIN_KEYS {
        let predecessor = move_predecessor(node, index);
        node.keys[index] = predecessor;
    } else if node.children[index + 1].keys.len() > Node::<T, ORDER>::MIN_KEYS {
        let successor = move_successor(node, index);
        node.keys[index] = successor;
    } else {
        node.merge_child_with_right(index);
        let merge_index = Node::<T, ORDER>::MIN_KEYS;
        let merged = node.children[index].as_mut();
        if merged.is_leaf() {
            merged.remove_leaf(merge_index);
        } else {
            remove_middle_key(merged, merge_index);
        }
    }
}

/// Removes and returns the rightmost key under `node.children[index]`,
/// rotating or merging along the way so every node on the path keeps more
/// than the minimum key count until after its key is taken.
fn move_predecessor<T, const ORDER: usize>(node: &mut Node<T, ORDER>, index: usize) -> T {
    let mut cur = node.children[index].as_mut();
    loop {
        if cur.is_leaf() {
            return cur.keys.pop().expect("leaf predecessor has a last key");
        }
        let last_child = cur.keys.len();
        cur.ensure_child_full(last_child);
        // `ensure_child_full` may have merged two children, shrinking
        // `cur.keys`; the rightmost child index must be re-read afterward.
        let rightmost = cur.keys.len();
        cur = cur.children[rightmost].as_mut();
    }
}

/// Removes and returns the leftmost key under `node.children[index + 1]`.
fn move_successor<T, const ORDER: usize>(node: &mut Node<T, ORDER>, index: usize) -> T {
    let mut cur = node.children[index + 1].as_mut();
    loop {
        if cur.is_leaf() {
            return cur.keys.remove(0);
        }
        cur.ensure_child_full(0);
        cur = cur.children[0].as_mut();
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn insert_then_contains(values: Vec<i32>) -> bool {
        let mut tree: Tree<i32, 3> = Tree::new();
        for &v in &values {
            tree.insert(v);
            if !tree.contains(&v) {
                return false;
            }
        }
        true
    }

    #[quickcheck]
    fn in_order_traversal_is_sorted(values: Vec<i32>) -> bool {
        let mut tree: Tree<i32, 4> = Tree::new();
        for &v in &values {
            tree.insert(v);
        }
        let collected: Vec<i32> = tree.begin().copied().collect();
        collected.windows(2).all(|w| w[0] <= w[1]) && collected.len() == values.len()
    }

    #[quickcheck]
    fn remove_then_not_contains_unless_duplicate(values: Vec<i32>) -> TestResult {
        if values.is_empty() {
            return TestResult::discard();
        }
        let mut tree: Tree<i32, 5> = Tree::new();
        for &v in &values {
            tree.insert(v);
        }
        let target = values[0];
        let remaining_duplicates = values.iter().filter(|&&v| v == target).count() - 1;

        if !tree.remove(&target) {
            return TestResult::error("remove reported failure for a value known to be present");
        }
        let still_there = tree.contains(&target);
        TestResult::from_bool(still_there == (remaining_duplicates > 0))
    }

    #[quickcheck]
    fn forward_and_reverse_traversal_are_mirror_images(values: Vec<i32>) -> bool {
        let mut tree: Tree<i32, 3> = Tree::new();
        for &v in &values {
            tree.insert(v);
        }
        let forward: Vec<i32> = tree.begin().copied().collect();
        let mut reverse: Vec<i32> = tree.rbegin().copied().collect();
        reverse.reverse();
        forward == reverse
    }

    #[quickcheck]
    fn clone_is_independent_and_equivalent(values: Vec<i32>) -> bool {
        let mut tree: Tree<i32, 3> = Tree::new();
        for &v in &values {
            tree.insert(v);
        }
        let clone = tree.clone();
        let original_sequence: Vec<i32> = tree.begin().copied().collect();
        let clone_sequence: Vec<i32> = clone.begin().copied().collect();
        original_sequence == clone_sequence
    }
}
