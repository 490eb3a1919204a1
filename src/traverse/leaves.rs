//! Traversal of leaves.

use crate::navigator::Navigator;
use crate::traverse::base::{descend, PolicyBase};
use crate::traverse::{OrderPolicy, OrderTag};

/// Leaves (nodes without children) from left to right.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Leaves;

/// Policy of [`Leaves`].
#[derive(Debug, Clone)]
pub struct LeavesPolicy<N> {
    /// Position.
    base: PolicyBase<N>,
}

impl<Nav: Navigator> OrderTag<Nav> for Leaves {
    type Policy = LeavesPolicy<Nav::Node>;

    #[inline]
    fn policy(&self, root: Nav::Node) -> Self::Policy {
        LeavesPolicy {
            base: PolicyBase::new(root),
        }
    }
}

impl<Nav: Navigator> OrderPolicy<Nav> for LeavesPolicy<Nav::Node> {
    #[inline]
    fn root(&self) -> &Nav::Node {
        self.base.root()
    }

    #[inline]
    fn current(&self) -> Option<&Nav::Node> {
        self.base.current()
    }

    fn increment(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let mut node = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        let next = loop {
            if let Some(next) = self.base.next_sibling_within(nav, &node)? {
                break Some(descend(nav, next, Nav::first_child)?);
            }
            match self.base.parent_within(nav, &node)? {
                Some(parent) => node = parent,
                None => break None,
            }
        };
        self.base.set_current(next);
        Ok(())
    }

    fn decrement(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let mut node = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        let prev = loop {
            if let Some(prev) = self.base.prev_sibling_within(nav, &node)? {
                break Some(descend(nav, prev, Nav::last_child)?);
            }
            match self.base.parent_within(nav, &node)? {
                Some(parent) => node = parent,
                None => break None,
            }
        };
        self.base.set_current(prev);
        Ok(())
    }

    fn go_first(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let first = descend(nav, self.base.root().clone(), Nav::first_child)?;
        self.base.set_current(Some(first));
        Ok(())
    }

    fn go_last(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let last = descend(nav, self.base.root().clone(), Nav::last_child)?;
        self.base.set_current(Some(last));
        Ok(())
    }

    #[inline]
    fn reset_to(&mut self, _nav: &mut Nav, node: Option<Nav::Node>) -> Result<(), Nav::Error> {
        self.base.set_current(node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;

    use crate::nary_tree;

    #[test]
    fn single_node_is_a_leaf() {
        let tree = nary_tree! { "only" };
        let leaves = tree
            .root()
            .traverse(Leaves)
            .map(|node| *node.borrow_data())
            .collect::<Vec<_>>();
        assert_eq!(leaves, ["only"]);
    }

    #[test]
    fn leaves_of_uneven_tree() {
        let tree = nary_tree! { 0, [(1, [2, (3, [4])]), 5, (6, [(7, [8, 9])])] };
        let leaves = tree
            .root()
            .traverse(Leaves)
            .rev()
            .map(|node| *node.borrow_data())
            .collect::<Vec<_>>();
        assert_eq!(leaves, [9, 8, 5, 4, 2]);
    }
}
