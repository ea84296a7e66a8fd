//! The bidirectional cursor and its reverse adapter (Section 4.6)
//!
//! A [`Cursor`] is a stack of `(node, key_index)` frames giving an in-order
//! position inside a tree it borrows immutably. Following the design note on
//! "iterator stack with back-references to nodes", this rewrite takes option
//! (a): a stack of shared read borrows tied to the tree's lifetime, rather
//! than raw pointers — any mutation of the tree the cursor was built from is
//! rejected at compile time for as long as the cursor lives, which is a
//! strictly stronger guarantee than Section 5's "any mutation invalidates
//! outstanding iterators" and costs nothing extra to provide.

use crate::node::Node;

struct Frame<'a, T, const ORDER: usize> {
    node: &'a Node<T, ORDER>,
    index: usize,
}

// Manual impls: `T` need not be `Clone`/`Copy` for a cursor to be copied,
// since a frame only ever borrows its node.
impl<T, const ORDER: usize> Clone for Frame<'_, T, ORDER> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T, const ORDER: usize> Copy for Frame<'_, T, ORDER> {}

/// A bidirectional, read-only cursor over a [`crate::Tree`]'s in-order
/// sequence. Returned by `Tree::begin`, `Tree::end`, and `Tree::find`.
pub struct Cursor<'a, T, const ORDER: usize> {
    frames: Vec<Frame<'a, T, ORDER>>,
    fin: Option<&'a Node<T, ORDER>>,
}

impl<T, const ORDER: usize> Clone for Cursor<'_, T, ORDER> {
    fn clone(&self) -> Self {
        Cursor {
            frames: self.frames.clone(),
            fin: self.fin,
        }
    }
}

impl<'a, T, const ORDER: usize> Cursor<'a, T, ORDER> {
    pub(crate) fn new_empty(fin: Option<&'a Node<T, ORDER>>) -> Self {
        Cursor {
            frames: Vec::new(),
            fin,
        }
    }

    pub(crate) fn push(&mut self, node: &'a Node<T, ORDER>, index: usize) {
        self.frames.push(Frame { node, index });
    }

    fn at_terminal_sentinel(&self) -> bool {
        match self.frames.last() {
            None => true,
            Some(top) => {
                self.fin.is_some_and(|fin| std::ptr::eq(fin, top.node))
                    && top.index == top.node.keys.len()
            }
        }
    }

    /// Dereferences the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is positioned at `end` (Section 4.6: "Reading at
    /// an out-of-range index is undefined"; this rewrite turns that into an
    /// explicit panic rather than silent undefined behavior).
    pub fn value(&self) -> &'a T {
        let top = self.frames.last().expect("dereferenced an end cursor");
        &top.node.keys[top.index]
    }

    /// Steps to the in-order successor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at `end`.
    pub fn advance(&mut self) {
        let (node, new_index) = {
            let top = self.frames.last_mut().expect("advanced past end");
            top.index += 1;
            (top.node, top.index)
        };

        if self.fin.is_some_and(|fin| std::ptr::eq(fin, node)) && new_index == node.keys.len() {
            return;
        }

        if !node.is_leaf() {
            let mut cur = node.children[new_index].as_ref();
            loop {
                self.frames.push(Frame { node: cur, index: 0 });
                if cur.is_leaf() {
                    break;
                }
                cur = cur.children[0].as_ref();
            }
        } else if new_index == node.keys.len() {
            while let Some(top) = self.frames.last() {
                if top.index == top.node.keys.len() {
                    self.frames.pop();
                } else {
                    break;
                }
            }
        }
    }

    /// Steps to the in-order predecessor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at `begin`.
    pub fn retreat(&mut self) {
        let (is_leaf, index) = {
            let top = self.frames.last().expect("retreated past begin");
            (top.node.is_leaf(), top.index)
        };

        if is_leaf {
            if index == 0 {
                while let Some(top) = self.frames.last() {
                    if top.index == 0 {
                        self.frames.pop();
                    } else {
                        break;
                    }
                }
            }
        } else {
            let top_node = self.frames.last().expect("retreated past begin").node;
            let mut cur = top_node.children[index].as_ref();
            loop {
                let idx = cur.keys.len();
                self.frames.push(Frame { node: cur, index: idx });
                if cur.is_leaf() {
                    break;
                }
                cur = cur.children[idx].as_ref();
            }
        }

        let top = self
            .frames
            .last_mut()
            .expect("retreated past begin");
        top.index -= 1;
    }
}

impl<T, const ORDER: usize> PartialEq for Cursor<'_, T, ORDER> {
    fn eq(&self, other: &Self) -> bool {
        match (self.frames.last(), other.frames.last()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                self.frames.len() == other.frames.len()
                    && std::ptr::eq(a.node, b.node)
                    && a.index == b.index
            }
            _ => false,
        }
    }
}

impl<T, const ORDER: usize> Eq for Cursor<'_, T, ORDER> {}

impl<'a, T, const ORDER: usize> Iterator for Cursor<'a, T, ORDER> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.at_terminal_sentinel() {
            return None;
        }
        let value = self.value();
        self.advance();
        Some(value)
    }
}

/// A thin adapter over [`Cursor`] walking the in-order sequence backwards.
/// Returned by `Tree::rbegin` and `Tree::rend`. Dereferencing yields the
/// element one step before the wrapped forward position, mirroring
/// `std::reverse_iterator`.
pub struct RevCursor<'a, T, const ORDER: usize> {
    inner: Cursor<'a, T, ORDER>,
    limit: Cursor<'a, T, ORDER>,
}

impl<T, const ORDER: usize> Clone for RevCursor<'_, T, ORDER> {
    fn clone(&self) -> Self {
        RevCursor {
            inner: self.inner.clone(),
            limit: self.limit.clone(),
        }
    }
}

impl<'a, T, const ORDER: usize> RevCursor<'a, T, ORDER> {
    pub(crate) fn new(inner: Cursor<'a, T, ORDER>, limit: Cursor<'a, T, ORDER>) -> Self {
        RevCursor { inner, limit }
    }

    /// Dereferences the reverse cursor: the element one step before the
    /// wrapped forward position.
    ///
    /// # Panics
    ///
    /// Panics if the reverse cursor is positioned at `rend`.
    pub fn value(&self) -> &'a T {
        let mut probe = self.inner.clone();
        probe.retreat();
        probe.value()
    }

    /// Steps to the next element in reverse order.
    pub fn advance(&mut self) {
        self.inner.retreat();
    }

    /// Steps to the previous element in reverse order (i.e. forward).
    pub fn retreat(&mut self) {
        self.inner.advance();
    }
}

impl<T, const ORDER: usize> PartialEq for RevCursor<'_, T, ORDER> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T, const ORDER: usize> Eq for RevCursor<'_, T, ORDER> {}

impl<'a, T, const ORDER: usize> Iterator for RevCursor<'a, T, ORDER> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.inner == self.limit {
            return None;
        }
        self.inner.retreat();
        Some(self.inner.value())
    }
}
