//! # Ordered B-Tree Multiset
//!
//! An in-memory, ordered multiset backed by a B-tree with a compile-time
//! branching factor (the `Order` const generic parameter), a user-pluggable
//! total-preorder [`Comparator`], and a stack-based bidirectional cursor
//! over its in-order sequence.
//!
//! Start with [`Tree`]. Ordering defaults to `T`'s own [`Ord`]
//! implementation via [`DefaultComparator`]; supply a custom [`Comparator`]
//! through `Tree::new_with` to order elements some other way, or to store
//! elements that have no natural `Ord` at all.

mod comparator;
mod iter;
mod node;
mod tree;

pub use comparator::{Comparator, DefaultComparator};
pub use iter::{Cursor, RevCursor};
pub use tree::{swap, Tree};
