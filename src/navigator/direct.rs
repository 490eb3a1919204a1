//! Navigators reading relations directly from nodes.

use core::convert::Infallible;
use core::fmt;
use core::marker::PhantomData;

use crate::bundle::Bundle;
use crate::navigator::{BinaryNavigator, Navigator};
use crate::node::{BinaryTreeNode, TreeNode};

/// Navigator delegating to the relations of [`TreeNode`]s.
pub struct DirectNavigator<N>(PhantomData<fn() -> N>);

impl<N> DirectNavigator<N> {
    /// Creates a new navigator.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<N> Default for DirectNavigator<N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for DirectNavigator<N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for DirectNavigator<N> {}

impl<N> fmt::Debug for DirectNavigator<N> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DirectNavigator")
    }
}

impl<N: TreeNode> Navigator for DirectNavigator<N> {
    type Node = N;
    type Error = Infallible;

    #[inline]
    fn ptr_eq(&self, lhs: &N, rhs: &N) -> bool {
        lhs.ptr_eq(rhs)
    }

    #[inline]
    fn parent(&mut self, node: &N) -> Result<Option<N>, Infallible> {
        Ok(node.parent())
    }

    #[inline]
    fn prev_sibling(&mut self, node: &N) -> Result<Option<N>, Infallible> {
        Ok(node.prev_sibling())
    }

    #[inline]
    fn next_sibling(&mut self, node: &N) -> Result<Option<N>, Infallible> {
        Ok(node.next_sibling())
    }

    #[inline]
    fn first_child(&mut self, node: &N) -> Result<Option<N>, Infallible> {
        Ok(node.first_child())
    }

    #[inline]
    fn last_child(&mut self, node: &N) -> Result<Option<N>, Infallible> {
        Ok(node.last_child())
    }

    #[inline]
    fn child(&mut self, node: &N, index: usize) -> Result<Option<N>, Infallible> {
        Ok(node.child(index))
    }
}

impl<N: BinaryTreeNode> BinaryNavigator for DirectNavigator<N> {
    #[inline]
    fn left_child(&mut self, node: &N) -> Result<Option<N>, Infallible> {
        Ok(node.left_child())
    }

    #[inline]
    fn right_child(&mut self, node: &N) -> Result<Option<N>, Infallible> {
        Ok(node.right_child())
    }
}

/// Navigator moving [`Bundle`]s of structurally parallel nodes in lock-step.
///
/// A move succeeds if the main slot has the requested relation; other slots
/// become null where their own trees lack the relation.
pub struct ZipNavigator<N, const K: usize>(PhantomData<fn() -> N>);

impl<N, const K: usize> ZipNavigator<N, K> {
    /// Creates a new navigator.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<N, const K: usize> Default for ZipNavigator<N, K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const K: usize> Clone for ZipNavigator<N, K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, const K: usize> Copy for ZipNavigator<N, K> {}

impl<N, const K: usize> fmt::Debug for ZipNavigator<N, K> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ZipNavigator")
    }
}

/// Drops bundles whose main slot is null.
#[inline]
#[must_use]
fn non_null<N, const K: usize>(bundle: Bundle<N, K>) -> Option<Bundle<N, K>> {
    if bundle.is_some() {
        Some(bundle)
    } else {
        None
    }
}

impl<N: TreeNode, const K: usize> Navigator for ZipNavigator<N, K> {
    type Node = Bundle<N, K>;
    type Error = Infallible;

    #[inline]
    fn ptr_eq(&self, lhs: &Self::Node, rhs: &Self::Node) -> bool {
        lhs.ptr_eq(rhs)
    }

    fn parent(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.parent()))
    }

    fn prev_sibling(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.prev_sibling()))
    }

    fn next_sibling(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.next_sibling()))
    }

    fn first_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.first_child()))
    }

    fn last_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.last_child()))
    }

    fn child(&mut self, node: &Self::Node, index: usize) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.child(index)))
    }
}

impl<N: BinaryTreeNode, const K: usize> BinaryNavigator for ZipNavigator<N, K> {
    fn left_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.left_child()))
    }

    fn right_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Infallible> {
        Ok(non_null(node.right_child()))
    }
}
