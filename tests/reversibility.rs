//! Randomized checks of traversal orders against recursive definitions.

use std::collections::VecDeque;

use proptest::prelude::*;

use sylvan::navigator::DirectNavigator;
use sylvan::traverse::{BreadthFirst, InOrder, Leaves, OrderTag, PostOrder, PreOrder, Siblings};
use sylvan::{BinaryNode, BinaryTree, NaryTree, Node, Shape};

/// Builds a binary tree by attaching one node per step.
///
/// Each step names an existing node (modulo the current size) and a slot.
/// Steps targeting an occupied slot are skipped.
fn build_binary(steps: &[(usize, bool)]) -> BinaryTree<usize> {
    let tree = BinaryTree::new(0);
    let mut nodes = vec![tree.root()];
    for &(index, left) in steps {
        let parent = nodes[index % nodes.len()].clone();
        let occupied = if left {
            parent.left_child().is_some()
        } else {
            parent.right_child().is_some()
        };
        if occupied {
            continue;
        }
        let data = nodes.len();
        let child = if left {
            parent.create_left_child(data)
        } else {
            parent.create_right_child(data)
        };
        nodes.push(child);
    }
    tree
}

/// Builds an n-ary tree by attaching one node per step.
///
/// Each step names an existing node (modulo the current size) and whether
/// the new node becomes its first child or its last child.
fn build_nary(steps: &[(usize, bool)]) -> NaryTree<usize> {
    let tree = NaryTree::new(0);
    let mut nodes = vec![tree.root()];
    for &(index, first) in steps {
        let parent = nodes[index % nodes.len()].clone();
        let data = nodes.len();
        let child = if first {
            parent.create_first_child(data)
        } else {
            parent.create_last_child(data)
        };
        nodes.push(child);
    }
    tree
}

/// Returns the children of the node in order.
fn children<S: Shape>(node: &Node<usize, S>) -> Vec<Node<usize, S>> {
    let mut children = Vec::new();
    let mut next = node.first_child();
    while let Some(child) = next {
        next = child.next_sibling();
        children.push(child);
    }
    children
}

fn pre_order<S: Shape>(node: &Node<usize, S>, out: &mut Vec<usize>) {
    out.push(*node.borrow_data());
    for child in children(node) {
        pre_order(&child, out);
    }
}

fn post_order<S: Shape>(node: &Node<usize, S>, out: &mut Vec<usize>) {
    for child in children(node) {
        post_order(&child, out);
    }
    out.push(*node.borrow_data());
}

fn in_order(node: &BinaryNode<usize>, out: &mut Vec<usize>) {
    if let Some(left) = node.left_child() {
        in_order(&left, out);
    }
    out.push(*node.borrow_data());
    if let Some(right) = node.right_child() {
        in_order(&right, out);
    }
}

fn breadth_first<S: Shape>(root: &Node<usize, S>) -> Vec<usize> {
    let mut out = Vec::new();
    let mut queue = VecDeque::from([root.clone()]);
    while let Some(node) = queue.pop_front() {
        out.push(*node.borrow_data());
        queue.extend(children(&node));
    }
    out
}

fn leaves<S: Shape>(root: &Node<usize, S>) -> Vec<usize> {
    let mut leaves = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        let children = children(&node);
        if children.is_empty() {
            leaves.push(*node.borrow_data());
        }
        stack.extend(children.into_iter().rev());
    }
    leaves
}

fn root_children<S: Shape>(root: &Node<usize, S>) -> Vec<usize> {
    children(root)
        .iter()
        .map(|node| *node.borrow_data())
        .collect()
}

/// Traverses in the given order, consuming from either end as `from_back`
/// dictates, and returns the nodes in forward order.
fn interleaved<O, S>(root: &Node<usize, S>, order: O, from_back: &[bool]) -> Vec<usize>
where
    S: Shape,
    O: OrderTag<DirectNavigator<Node<usize, S>>>,
{
    let mut iter = root.traverse(order);
    let mut front = Vec::new();
    let mut back = Vec::new();
    let mut switches = from_back.iter().copied().cycle();
    loop {
        let next = if switches.next().unwrap_or(false) {
            iter.next_back().map(|node| back.push(*node.borrow_data()))
        } else {
            iter.next().map(|node| front.push(*node.borrow_data()))
        };
        if next.is_none() {
            break;
        }
    }
    front.extend(back.into_iter().rev());
    front
}

/// Checks an order forward, backward, and interleaved.
fn check_order<O, S>(
    root: &Node<usize, S>,
    order: O,
    expected: &[usize],
    from_back: &[bool],
) -> Result<(), TestCaseError>
where
    S: Shape,
    O: OrderTag<DirectNavigator<Node<usize, S>>> + Copy,
{
    let forward = root
        .traverse(order)
        .map(|node| *node.borrow_data())
        .collect::<Vec<_>>();
    prop_assert_eq!(&forward, expected);

    let mut backward = root
        .traverse(order)
        .rev()
        .map(|node| *node.borrow_data())
        .collect::<Vec<_>>();
    backward.reverse();
    prop_assert_eq!(&backward, expected);

    prop_assert_eq!(&interleaved(root, order, from_back), expected);
    Ok(())
}

/// Steps to build a tree from.
fn steps() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((0usize..64, any::<bool>()), 0..48)
}

proptest! {
    #[test]
    fn binary_orders(steps in steps(), from_back in prop::collection::vec(any::<bool>(), 1..8)) {
        let tree = build_binary(&steps);
        let root = tree.root();
        prop_assert_eq!(root.count_subtree(), tree.size());

        let mut expected = Vec::new();
        pre_order(&root, &mut expected);
        check_order(&root, PreOrder, &expected, &from_back)?;

        expected.clear();
        in_order(&root, &mut expected);
        check_order(&root, InOrder, &expected, &from_back)?;

        expected.clear();
        post_order(&root, &mut expected);
        check_order(&root, PostOrder, &expected, &from_back)?;

        check_order(&root, BreadthFirst, &breadth_first(&root), &from_back)?;
        check_order(&root, Leaves, &leaves(&root), &from_back)?;
        check_order(&root, Siblings, &root_children(&root), &from_back)?;
    }

    #[test]
    fn nary_orders(steps in steps(), from_back in prop::collection::vec(any::<bool>(), 1..8)) {
        let tree = build_nary(&steps);
        let root = tree.root();
        prop_assert_eq!(tree.size(), steps.len() + 1);

        let mut expected = Vec::new();
        pre_order(&root, &mut expected);
        check_order(&root, PreOrder, &expected, &from_back)?;

        expected.clear();
        post_order(&root, &mut expected);
        check_order(&root, PostOrder, &expected, &from_back)?;

        check_order(&root, BreadthFirst, &breadth_first(&root), &from_back)?;
        check_order(&root, Leaves, &leaves(&root), &from_back)?;
        check_order(&root, Siblings, &root_children(&root), &from_back)?;
    }

    #[test]
    fn subtree_orders_stay_inside(steps in steps(), pick in 0usize..64) {
        let tree = build_nary(&steps);
        let mut all = Vec::new();
        pre_order(&tree.root(), &mut all);
        let target = all[pick % all.len()];
        let subtree = tree
            .root()
            .traverse(PreOrder)
            .find(|node| *node.borrow_data() == target)
            .expect("the node is in the tree");

        let mut expected = Vec::new();
        post_order(&subtree, &mut expected);
        check_order(&subtree, PostOrder, &expected, &[false, true])?;
        check_order(&subtree, BreadthFirst, &breadth_first(&subtree), &[true])?;
    }
}

#[test]
fn single_node_orders() {
    let tree = build_nary(&[]);
    let root = tree.root();
    let only = [0];
    for result in [
        check_order(&root, PreOrder, &only, &[false]),
        check_order(&root, PostOrder, &only, &[true]),
        check_order(&root, BreadthFirst, &only, &[false]),
        check_order(&root, Leaves, &only, &[true]),
        check_order(&root, Siblings, &[], &[false]),
    ] {
        assert!(result.is_ok());
    }
}
