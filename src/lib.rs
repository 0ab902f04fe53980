//! This crate exposes a plain Binary Search Tree (BST) and a small command language for
//! exercising it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//! > `Node`s with exactly one child are called "half nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the number of
//! edges on the longest path from the root `Node` to a leaf `Node`). The tree in [`ordered`] makes
//! no attempt to keep that height down: inserting keys in sorted order builds a chain. It can
//! report how far from ideal its shape is though, see [`OrderedTree::is_balanced`] and
//! [`OrderedTree::is_perfect`].
//!
//! ## Command language
//!
//! [`interpreter`] reads `insert`, `delete`, `trim`, `traverse`, and `stats` commands from text
//! and applies them to a tree of words. The `bstree` binary runs such a program from a file.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod interpreter;
pub mod ordered;


pub use error::TreeError;
pub use ordered::Tree as OrderedTree;
