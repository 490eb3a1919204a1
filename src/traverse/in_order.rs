//! In-order traversal of binary trees.

use crate::navigator::BinaryNavigator;
use crate::traverse::base::{descend, PolicyBase};
use crate::traverse::{OrderPolicy, OrderTag};

/// In-order: the left subtree, the node, then the right subtree.
///
/// Only available for [`BinaryNavigator`]s. Moves go through `left_child`,
/// `right_child`, and `parent` only, so a navigator filtering sibling
/// relations (such as [`GenerativeNavigator`][`crate::navigator::GenerativeNavigator`])
/// does not filter this order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InOrder;

/// Policy of [`InOrder`].
#[derive(Debug, Clone)]
pub struct InOrderPolicy<N> {
    /// Position.
    base: PolicyBase<N>,
}

impl<Nav: BinaryNavigator> OrderTag<Nav> for InOrder {
    type Policy = InOrderPolicy<Nav::Node>;

    #[inline]
    fn policy(&self, root: Nav::Node) -> Self::Policy {
        InOrderPolicy {
            base: PolicyBase::new(root),
        }
    }
}

impl<N: Clone> InOrderPolicy<N> {
    /// Climbs from the node until arriving at a parent from the given side,
    /// and returns that parent.
    fn climb_from<Nav, F>(
        &self,
        nav: &mut Nav,
        node: N,
        mut side: F,
    ) -> Result<Option<N>, Nav::Error>
    where
        Nav: BinaryNavigator<Node = N>,
        F: FnMut(&mut Nav, &N) -> Result<Option<N>, Nav::Error>,
    {
        let mut node = node;
        loop {
            let parent = match self.base.parent_within(nav, &node)? {
                Some(v) => v,
                None => return Ok(None),
            };
            let child = side(nav, &parent)?;
            if child.is_some_and(|child| nav.ptr_eq(&child, &node)) {
                return Ok(Some(parent));
            }
            node = parent;
        }
    }
}

impl<Nav: BinaryNavigator> OrderPolicy<Nav> for InOrderPolicy<Nav::Node> {
    #[inline]
    fn root(&self) -> &Nav::Node {
        self.base.root()
    }

    #[inline]
    fn current(&self) -> Option<&Nav::Node> {
        self.base.current()
    }

    fn increment(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let current = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        let next = match nav.right_child(&current)? {
            Some(right) => Some(descend(nav, right, Nav::left_child)?),
            None => self.climb_from(nav, current, Nav::left_child)?,
        };
        self.base.set_current(next);
        Ok(())
    }

    fn decrement(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let current = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        let prev = match nav.left_child(&current)? {
            Some(left) => Some(descend(nav, left, Nav::right_child)?),
            None => self.climb_from(nav, current, Nav::right_child)?,
        };
        self.base.set_current(prev);
        Ok(())
    }

    fn go_first(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let first = descend(nav, self.base.root().clone(), Nav::left_child)?;
        self.base.set_current(Some(first));
        Ok(())
    }

    fn go_last(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let last = descend(nav, self.base.root().clone(), Nav::right_child)?;
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

    use crate::binary_tree;

    #[test]
    fn right_spine_then_climb() {
        let tree = binary_tree! { 4, [(2, [1, 3]), (6, [5, (7, [_, 8])])] };
        let values = tree
            .root()
            .traverse(InOrder)
            .map(|node| *node.borrow_data())
            .collect::<Vec<_>>();
        assert_eq!(values, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn cursor_walks_both_ways() {
        let tree = binary_tree! { 2, [1, 3] };
        let mut cursor = tree.root().cursor(InOrder);
        let mut step = |forward: bool| {
            let moved = if forward {
                cursor.move_next()
            } else {
                cursor.move_prev()
            };
            moved.expect("infallible").map(|node| *node.borrow_data())
        };
        assert_eq!(step(true), Some(2));
        assert_eq!(step(true), Some(3));
        assert_eq!(step(false), Some(2));
        assert_eq!(step(false), Some(1));
        assert_eq!(step(false), None);
    }
}
