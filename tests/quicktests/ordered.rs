use bstree::OrderedTree;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut OrderedTree<T>, set: &mut BTreeSet<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                bst.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Remove(x) => {
                bst.remove(x);
                set.remove(x);
            }
        }
    }
}

fn inorder<T: Clone>(tree: &OrderedTree<T>) -> Vec<T> {
    let mut out = Vec::new();
    tree.inorder_traverse(|x| out.push(x.clone()));
    out
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = OrderedTree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set);
        tree.size() == set.len() && inorder(&tree) == set.into_iter().collect::<Vec<_>>()
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.contains(x) && tree.retrieve(x) == Ok(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }

    fn inorder_is_sorted_and_distinct(xs: Vec<i16>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();
        let distinct: BTreeSet<_> = xs.into_iter().collect();

        tree.size() == distinct.len()
            && inorder(&tree).windows(2).all(|w| w[0] < w[1])
    }

    fn remove_present_drops_exactly_one(xs: Vec<i8>, pick: usize) -> bool {
        if xs.is_empty() {
            return true;
        }
        let mut tree: OrderedTree<_> = xs.iter().copied().collect();
        let key = xs[pick % xs.len()];

        let mut expected = inorder(&tree);
        expected.retain(|&x| x != key);
        let size = tree.size();

        tree.remove(&key) && tree.size() == size - 1 && inorder(&tree) == expected
    }

    fn remove_absent_changes_nothing(xs: Vec<i8>, key: i8) -> bool {
        let mut tree: OrderedTree<_> = xs.iter().copied().filter(|&x| x != key).collect();
        let before = (tree.size(), tree.height(), inorder(&tree));

        !tree.remove(&key) && (tree.size(), tree.height(), inorder(&tree)) == before
    }

    fn trim_removes_exactly_the_leaves(xs: Vec<i8>) -> bool {
        let mut tree: OrderedTree<_> = xs.into_iter().collect();
        let leaves = tree.count_leaves();
        let size = tree.size();

        tree.trim() == leaves && tree.size() == size - leaves
    }

    fn min_max_match_inorder(xs: Vec<i8>) -> bool {
        let tree: OrderedTree<_> = xs.into_iter().collect();
        let items = inorder(&tree);

        tree.min().ok() == items.first() && tree.max().ok() == items.last()
    }

    fn traversals_rebuild_the_same_tree(xs: Vec<i8>) -> bool {
        // Re-inserting a BST's preorder sequence rebuilds exactly the same shape.
        let tree: OrderedTree<_> = xs.into_iter().collect();
        let mut pre = Vec::new();
        tree.preorder_traverse(|&x| pre.push(x));
        let rebuilt: OrderedTree<_> = pre.iter().copied().collect();

        let mut pre_again = Vec::new();
        rebuilt.preorder_traverse(|&x| pre_again.push(x));
        let mut post = Vec::new();
        tree.postorder_traverse(|&x| post.push(x));
        let mut post_again = Vec::new();
        rebuilt.postorder_traverse(|&x| post_again.push(x));

        pre == pre_again && post == post_again && tree.height() == rebuilt.height()
    }
}
