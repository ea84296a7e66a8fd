//! B-tree multiset exposition
//!
//! We drive `Tree<i32, 2>` (minimum degree 2, so splits and merges show up
//! after only a handful of insertions) through INSERT, FIND, and REMOVE,
//! keeping a sorted `Vec` model alongside it so we can assert the in-order
//! sequence after every mutation.

use btree_multiset::Tree;

#[derive(Debug)]
struct NarratedTree {
    tree: Tree<i32, 2>,
    model: Vec<i32>,
}

impl NarratedTree {
    fn new() -> Self {
        println!("Creating empty tree (Order = 2).");
        NarratedTree {
            tree: Tree::new(),
            model: Vec::new(),
        }
    }

    fn insert(&mut self, value: i32) {
        println!("\nINSERT({value})");
        self.tree.insert(value);
        let pos = self.model.partition_point(|&v| v <= value);
        self.model.insert(pos, value);
        self.verify_and_dump();
    }

    fn find(&self, value: i32) {
        println!("\nFIND({value})");
        let mut cursor = self.tree.find(&value);
        if cursor == self.tree.end() {
            println!("  ✗ {value} not present.");
        } else {
            println!("  ✓ Found {value}.");
            cursor.advance();
        }
    }

    fn remove(&mut self, value: i32) {
        println!("\nREMOVE({value})");
        if self.tree.remove(&value) {
            if let Some(pos) = self.model.iter().position(|&v| v == value) {
                self.model.remove(pos);
            }
            println!("  ✓ Removed one occurrence of {value}.");
        } else {
            println!("  ✗ {value} not present; tree unchanged.");
        }
        self.verify_and_dump();
    }

    fn verify_and_dump(&self) {
        let in_order: Vec<i32> = self.tree.begin().copied().collect();
        assert_eq!(
            in_order, self.model,
            "in-order traversal diverged from the sorted model"
        );
        println!("  • In-order sequence: {in_order:?}");
    }
}

fn main() {
    println!("=== B-Tree Multiset Narration ===");

    let mut narrated = NarratedTree::new();

    for v in [10, 20, 5, 6, 12, 30, 7, 17] {
        narrated.insert(v);
    }
    // A duplicate: the multiset keeps both occurrences.
    narrated.insert(12);

    narrated.find(12);
    narrated.find(99);

    narrated.remove(6); // leaf removal
    narrated.remove(12); // one of two duplicates survives
    narrated.remove(10); // forces a merge or rotation near the root

    println!(
        "\nNarration complete. Final in-order sequence: {:?}",
        narrated.model
    );

    println!("\nReverse traversal:");
    let reversed: Vec<&i32> = narrated.tree.rbegin().collect();
    println!("  {reversed:?}");
}
