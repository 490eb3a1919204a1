//! Traversal of siblings.

use crate::navigator::Navigator;
use crate::traverse::base::PolicyBase;
use crate::traverse::{OrderPolicy, OrderTag};

/// Children of the root, from the first to the last.
///
/// The root itself is the boundary and is not visited.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Siblings;

/// Policy of [`Siblings`].
#[derive(Debug, Clone)]
pub struct SiblingsPolicy<N> {
    /// Position. The root is the parent of the siblings.
    base: PolicyBase<N>,
}

impl<Nav: Navigator> OrderTag<Nav> for Siblings {
    type Policy = SiblingsPolicy<Nav::Node>;

    #[inline]
    fn policy(&self, root: Nav::Node) -> Self::Policy {
        SiblingsPolicy {
            base: PolicyBase::new(root),
        }
    }
}

impl<Nav: Navigator> OrderPolicy<Nav> for SiblingsPolicy<Nav::Node> {
    #[inline]
    fn root(&self) -> &Nav::Node {
        self.base.root()
    }

    #[inline]
    fn current(&self) -> Option<&Nav::Node> {
        self.base.current()
    }

    fn increment(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        if let Some(current) = self.base.cloned_current() {
            let next = nav.next_sibling(&current)?;
            self.base.set_current(next);
        }
        Ok(())
    }

    fn decrement(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        if let Some(current) = self.base.cloned_current() {
            let prev = nav.prev_sibling(&current)?;
            self.base.set_current(prev);
        }
        Ok(())
    }

    fn go_first(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let first = nav.first_child(self.base.root())?;
        self.base.set_current(first);
        Ok(())
    }

    fn go_last(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let last = nav.last_child(self.base.root())?;
        self.base.set_current(last);
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

    use crate::{binary_tree, nary_tree};

    #[test]
    fn children_of_root_only() {
        let tree = nary_tree! { 0, [(1, [10]), 2, (3, [30])] };
        let children = tree
            .root()
            .traverse(Siblings)
            .map(|node| *node.borrow_data())
            .collect::<Vec<_>>();
        assert_eq!(children, [1, 2, 3]);
    }

    #[test]
    fn leaf_has_no_siblings_to_visit() {
        let tree = binary_tree! { 0, [_, 1] };
        let leaf = tree.root().right_child().expect("right child exists");
        assert_eq!(leaf.traverse(Siblings).count(), 0);
        assert_eq!(tree.root().traverse(Siblings).rev().count(), 1);
    }
}
