//! Tree.

use core::cell::RefCell;
use core::fmt;

use alloc::rc::Rc;

use crate::node::{Binary, Nary, Node, Shape, TreeCore};

/// A reference to the tree.
///
/// A tree always has just one root node, and owns all the nodes reachable
/// from it.
pub struct Tree<T, S: Shape> {
    /// A reference to the tree core.
    core: Rc<RefCell<TreeCore<T, S>>>,
}

/// Binary tree.
pub type BinaryTree<T> = Tree<T, Binary>;

/// N-ary tree.
pub type NaryTree<T> = Tree<T, Nary>;

impl<T, S: Shape> Clone for Tree<T, S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for Tree<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("shape", &S::KIND)
            .field("root", &self.root())
            .finish()
    }
}

impl<T: PartialEq<U>, U, S: Shape> PartialEq<Tree<U, S>> for Tree<T, S> {
    /// Compares the trees reachable from the roots.
    #[inline]
    fn eq(&self, other: &Tree<U, S>) -> bool {
        self.root() == other.root()
    }
}

impl<T: Eq, S: Shape> Eq for Tree<T, S> {}

impl<T, S: Shape> Tree<T, S> {
    /// Creates a new tree with the given root data.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::BinaryTree;
    ///
    /// let tree = BinaryTree::new("root");
    /// assert_eq!(tree.size(), 1);
    /// assert!(tree.root().is_root());
    /// ```
    #[must_use]
    pub fn new(root_data: T) -> Self {
        Self {
            core: Rc::new(RefCell::new(TreeCore::new(root_data))),
        }
    }

    /// Creates a new `Tree` from the given `Rc` to the core tree.
    #[inline]
    #[must_use]
    pub(crate) fn from_core_rc(core: Rc<RefCell<TreeCore<T, S>>>) -> Self {
        Self { core }
    }

    /// Returns the number of arena slots, including vacant ones.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn arena_len(&self) -> usize {
        self.core.borrow().arena_len()
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> Node<T, S> {
        let root = self
            .core
            .try_borrow()
            .expect("[consistency] the tree core should not be borrowed mutably across calls")
            .root();
        Node::with_core_and_id(self.core.clone(), root)
    }

    /// Returns the number of nodes reachable from the root.
    ///
    /// Detached subtrees are not counted.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.root().count_subtree()
    }

    /// Returns `true` if the two handles refer to the same tree.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}
