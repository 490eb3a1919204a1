//! Depth-first traversal.

use crate::navigator::Navigator;
use crate::traverse::base::{descend, PolicyBase};
use crate::traverse::{OrderPolicy, OrderTag};

/// Pre-order: a node, then the subtrees of its children.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreOrder;

/// Post-order: the subtrees of the children of a node, then the node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostOrder;

/// Policy of [`PreOrder`].
#[derive(Debug, Clone)]
pub struct PreOrderPolicy<N> {
    /// Position.
    base: PolicyBase<N>,
}

/// Policy of [`PostOrder`].
#[derive(Debug, Clone)]
pub struct PostOrderPolicy<N> {
    /// Position.
    base: PolicyBase<N>,
}

impl<Nav: Navigator> OrderTag<Nav> for PreOrder {
    type Policy = PreOrderPolicy<Nav::Node>;

    #[inline]
    fn policy(&self, root: Nav::Node) -> Self::Policy {
        PreOrderPolicy {
            base: PolicyBase::new(root),
        }
    }
}

impl<Nav: Navigator> OrderTag<Nav> for PostOrder {
    type Policy = PostOrderPolicy<Nav::Node>;

    #[inline]
    fn policy(&self, root: Nav::Node) -> Self::Policy {
        PostOrderPolicy {
            base: PolicyBase::new(root),
        }
    }
}

impl<Nav: Navigator> OrderPolicy<Nav> for PreOrderPolicy<Nav::Node> {
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
        if let Some(child) = nav.first_child(&current)? {
            self.base.set_current(Some(child));
            return Ok(());
        }
        // Leaf. Find the nearest ancestor-or-self with a next sibling.
        let mut node = current;
        let next = loop {
            if let Some(next) = self.base.next_sibling_within(nav, &node)? {
                break Some(next);
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
        let current = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        let prev = match self.base.prev_sibling_within(nav, &current)? {
            Some(prev) => Some(descend(nav, prev, Nav::last_child)?),
            None => self.base.parent_within(nav, &current)?,
        };
        self.base.set_current(prev);
        Ok(())
    }

    #[inline]
    fn go_first(&mut self, _nav: &mut Nav) -> Result<(), Nav::Error> {
        self.base.set_current_to_root();
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

impl<Nav: Navigator> OrderPolicy<Nav> for PostOrderPolicy<Nav::Node> {
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
        let next = match self.base.next_sibling_within(nav, &current)? {
            Some(next) => Some(descend(nav, next, Nav::first_child)?),
            None => self.base.parent_within(nav, &current)?,
        };
        self.base.set_current(next);
        Ok(())
    }

    fn decrement(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let current = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        if let Some(child) = nav.last_child(&current)? {
            self.base.set_current(Some(child));
            return Ok(());
        }
        // Leaf. Find the nearest ancestor-or-self with a previous sibling.
        let mut node = current;
        let prev = loop {
            if let Some(prev) = self.base.prev_sibling_within(nav, &node)? {
                break Some(prev);
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

    #[inline]
    fn go_last(&mut self, _nav: &mut Nav) -> Result<(), Nav::Error> {
        self.base.set_current_to_root();
        Ok(())
    }

    #[inline]
    fn reset_to(&mut self, _nav: &mut Nav, node: Option<Nav::Node>) -> Result<(), Nav::Error> {
        self.base.set_current(node);
        Ok(())
    }
}
