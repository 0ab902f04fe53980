//! A plain, unbalanced BST that stores each item as its own key. Nodes don't know their parent:
//! insert and remove recurse down from the root, and the link that owns the target node is the
//! one that gets rewritten.
//!
//! Nothing here ever rebalances. [`Tree::is_balanced`] and [`Tree::is_perfect`] only report on
//! the shape that the insertion order produced.
//!
//! # Examples
//!
//! ```
//! use bstree::ordered::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.height(), -1);
//!
//! for x in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(x);
//! }
//! assert_eq!(tree.size(), 7);
//! assert_eq!(tree.height(), 2);
//! assert!(tree.is_balanced());
//!
//! // Removing a node with two children promotes its in-order successor.
//! assert!(tree.remove(&5));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
//!
//! // Trimming removes the current leaves, once.
//! assert_eq!(tree.trim(), 3);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 7, 8]);
//! ```

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::TreeError;

/// An ordered set of `T`s kept in a binary search tree. Inserting an item equal to one already
/// stored replaces the stored item instead of adding a node, so no two stored items compare
/// equal.
#[derive(Clone)]
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            size: 0,
        }
    }

    /// The number of items stored in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Drops every node in the tree. This walks the tree with an explicit stack so that a tree
    /// degenerated into a long chain doesn't overflow the call stack.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.0.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.0.take());
            pending.extend(node.right.0.take());
        }
        self.size = 0;
    }

    /// Returns the item stored in the left-most node.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::ordered::Tree;
    /// use bstree::TreeError;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.min(), Err(TreeError::Empty { op: "min" }));
    ///
    /// tree.extend([5, 3, 8]);
    /// assert_eq!(tree.min(), Ok(&3));
    /// ```
    pub fn min(&self) -> Result<&T, TreeError> {
        let mut node = self.root.node().ok_or(TreeError::Empty { op: "min" })?;
        while let Some(left) = node.left.node() {
            node = left;
        }
        Ok(&node.item)
    }

    /// Returns the item stored in the right-most node.
    pub fn max(&self) -> Result<&T, TreeError> {
        let mut node = self.root.node().ok_or(TreeError::Empty { op: "max" })?;
        while let Some(right) = node.right.node() {
            node = right;
        }
        Ok(&node.item)
    }

    /// The number of edges on the longest path from the root to a leaf. A tree with just a root
    /// has a height of 0 so, by convention, an empty tree has a height of -1.
    pub fn height(&self) -> isize {
        self.root.height()
    }

    /// Counts the nodes without children.
    pub fn count_leaves(&self) -> usize {
        self.root.count_leaves()
    }

    /// Counts the nodes with exactly one child.
    pub fn count_halves(&self) -> usize {
        self.root.count_halves()
    }

    /// Whether, for every node, the heights of its two subtrees differ by at most one. The empty
    /// tree is balanced.
    pub fn is_balanced(&self) -> bool {
        self.root.balanced_height().is_some()
    }

    /// Whether every level of the tree is full, i.e. `size == 2^(height + 1) - 1`. The empty tree
    /// is perfect.
    pub fn is_perfect(&self) -> bool {
        u32::try_from(self.height() + 1)
            .ok()
            .and_then(|levels| 1usize.checked_shl(levels))
            .is_some_and(|capacity| self.size == capacity - 1)
    }

    /// Removes every node that is a leaf at the time of the call and returns how many were
    /// removed. Nodes that only become leaves because their children were trimmed stay put until
    /// the next call.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::ordered::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.trim(), 4);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 5, 8]);
    ///
    /// assert_eq!(tree.trim(), 2);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5]);
    /// ```
    pub fn trim(&mut self) -> usize {
        let removed = self.root.trim();
        self.size -= removed;
        debug!(removed, size = self.size, "trimmed leaves");

        if cfg!(test) {
            assert_eq!(self.size, self.root.count_nodes());
        }
        removed
    }

    /// Visits every item node-left-right.
    pub fn preorder_traverse(&self, mut visit: impl FnMut(&T)) {
        infallible(self.try_preorder_traverse(|item| {
            visit(item);
            Ok(())
        }))
    }

    /// Visits every item left-node-right, i.e. in ascending order.
    pub fn inorder_traverse(&self, mut visit: impl FnMut(&T)) {
        infallible(self.try_inorder_traverse(|item| {
            visit(item);
            Ok(())
        }))
    }

    /// Visits every item left-right-node.
    pub fn postorder_traverse(&self, mut visit: impl FnMut(&T)) {
        infallible(self.try_postorder_traverse(|item| {
            visit(item);
            Ok(())
        }))
    }

    /// Like [`Tree::preorder_traverse`] but stops at, and returns, the first error `visit`
    /// returns.
    pub fn try_preorder_traverse<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        self.root.try_preorder(&mut visit)
    }

    /// Like [`Tree::inorder_traverse`] but stops at, and returns, the first error `visit`
    /// returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::ordered::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let mut seen = Vec::new();
    /// let result = tree.try_inorder_traverse(|&x| {
    ///     if x == 2 {
    ///         return Err("two");
    ///     }
    ///     seen.push(x);
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(result, Err("two"));
    /// assert_eq!(seen, [1]);
    /// ```
    pub fn try_inorder_traverse<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        self.root.try_inorder(&mut visit)
    }

    /// Like [`Tree::postorder_traverse`] but stops at, and returns, the first error `visit`
    /// returns.
    pub fn try_postorder_traverse<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        self.root.try_postorder(&mut visit)
    }

    /// An iterator over the stored items in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.size)
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts the given item. If an equal item is already stored it is replaced and the shape
    /// of the tree doesn't change.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn insert(&mut self, item: T) {
        if self.root.insert(item) {
            self.size += 1;
        }
    }

    /// Whether an item equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.root.find(item).is_some()
    }

    /// Removes the item equal to `key` and returns whether there was one.
    pub fn remove(&mut self, key: &T) -> bool {
        self.take(key).is_some()
    }

    /// Removes the item equal to `key` and returns it. If nothing matches, nothing happens.
    ///
    /// A node with two children isn't unlinked itself. Instead its in-order successor (the
    /// left-most node of its right subtree) is unlinked and that item takes the place of the
    /// removed one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::ordered::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.take(&2), Some(2));
    /// assert_eq!(tree.take(&2), None);
    /// assert_eq!(tree.size(), 2);
    /// ```
    pub fn take(&mut self, key: &T) -> Option<T> {
        let removed = self.root.take(key)?;
        self.size -= 1;
        trace!(size = self.size, "unlinked node");

        if cfg!(test) {
            assert_eq!(self.size, self.root.count_nodes());
        }
        Some(removed)
    }

    /// Returns the stored item equal to `key`. This is useful when `T`'s ordering only looks at
    /// part of the item and the caller wants the rest of it.
    pub fn retrieve(&self, key: &T) -> Result<&T, TreeError> {
        if self.is_empty() {
            return Err(TreeError::Empty { op: "retrieve" });
        }
        self.root
            .find(key)
            .map(|node| &node.item)
            .ok_or(TreeError::NotFound)
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// The slot a node lives in: either the tree's root or one of a node's children.
#[derive(Clone)]
struct Link<T>(Option<Box<Node<T>>>);

impl<T> Link<T> {
    fn node(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    fn find(&self, key: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut link = self;
        while let Some(node) = link.node() {
            match key.cmp(&node.item) {
                Ordering::Less => link = &node.left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => link = &node.right,
            }
        }
        None
    }

    /// Inserts `item` into this subtree and returns whether a new node was attached. An equal
    /// item already stored is overwritten instead.
    fn insert(&mut self, item: T) -> bool
    where
        T: Ord,
    {
        match self.0 {
            None => {
                self.0 = Some(Node::new_boxed(item));
                true
            }
            Some(ref mut node) => match item.cmp(&node.item) {
                Ordering::Less => node.left.insert(item),
                Ordering::Equal => {
                    node.item = item;
                    trace!("overwrote existing item");
                    false
                }
                Ordering::Greater => node.right.insert(item),
            },
        }
    }

    /// Removes the node equal to `key` from this subtree and returns its item.
    fn take(&mut self, key: &T) -> Option<T>
    where
        T: Ord,
    {
        let node = self.0.as_mut()?;
        match key.cmp(&node.item) {
            Ordering::Less => node.left.take(key),
            Ordering::Equal => self.unlink(),
            Ordering::Greater => node.right.take(key),
        }
    }

    /// Removes the left-most node of this subtree and returns its item.
    fn take_min(&mut self) -> Option<T> {
        let node = self.0.as_mut()?;
        if node.left.0.is_some() {
            return node.left.take_min();
        }
        self.unlink()
    }

    /// Removes the node in this link, if any, and returns its item.
    fn unlink(&mut self) -> Option<T> {
        let node = self.0.as_mut()?;
        if node.left.0.is_some() {
            // With a right subtree too, the successor has no left child, so unlinking it below
            // takes the splice path.
            if let Some(successor) = node.right.take_min() {
                return Some(mem::replace(&mut node.item, successor));
            }
        }

        // Zero or one child: splice it into our place.
        let node = self.0.take()?;
        let Node { item, left, right } = *node;
        *self = if left.0.is_some() { left } else { right };
        Some(item)
    }

    fn height(&self) -> isize {
        self.node()
            .map_or(-1, |node| node.left.height().max(node.right.height()) + 1)
    }

    fn count_nodes(&self) -> usize {
        self.node().map_or(0, |node| {
            1 + node.left.count_nodes() + node.right.count_nodes()
        })
    }

    fn count_leaves(&self) -> usize {
        match self.node() {
            None => 0,
            Some(node) if node.is_leaf() => 1,
            Some(node) => node.left.count_leaves() + node.right.count_leaves(),
        }
    }

    fn count_halves(&self) -> usize {
        self.node().map_or(0, |node| {
            let is_half = node.left.0.is_some() != node.right.0.is_some();
            usize::from(is_half) + node.left.count_halves() + node.right.count_halves()
        })
    }

    /// The height of this subtree if every node in it is balanced, otherwise `None`. Returns as
    /// soon as an unbalanced subtree is found.
    fn balanced_height(&self) -> Option<isize> {
        let Some(node) = self.node() else {
            return Some(-1);
        };
        let left = node.left.balanced_height()?;
        let right = node.right.balanced_height()?;
        (left.abs_diff(right) <= 1).then(|| left.max(right) + 1)
    }

    /// Removes the leaves of this subtree. Each node is checked for being a leaf from the link
    /// that owns it, before descending, so a parent emptied by this pass is never seen as a leaf.
    fn trim(&mut self) -> usize {
        let Some(node) = self.0.as_mut() else {
            return 0;
        };
        if node.is_leaf() {
            self.0 = None;
            return 1;
        }
        node.left.trim() + node.right.trim()
    }

    fn try_preorder<E, F>(&self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        if let Some(node) = self.node() {
            visit(&node.item)?;
            node.left.try_preorder(visit)?;
            node.right.try_preorder(visit)?;
        }
        Ok(())
    }

    fn try_inorder<E, F>(&self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        if let Some(node) = self.node() {
            node.left.try_inorder(visit)?;
            visit(&node.item)?;
            node.right.try_inorder(visit)?;
        }
        Ok(())
    }

    fn try_postorder<E, F>(&self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        if let Some(node) = self.node() {
            node.left.try_postorder(visit)?;
            node.right.try_postorder(visit)?;
            visit(&node.item)?;
        }
        Ok(())
    }
}

#[derive(Clone)]
struct Node<T> {
    item: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Node {
            item,
            left: Link(None),
            right: Link(None),
        })
    }

    fn is_leaf(&self) -> bool {
        self.left.0.is_none() && self.right.0.is_none()
    }
}

/// Borrowing iterator over a [`Tree`] in ascending order. Created by [`Tree::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose item hasn't been yielded yet but whose left subtree has been (or is being)
    /// walked.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: &'a Link<T>, size: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: size,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link.node() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
