//! Bidirectional tree traversals and lazily generated mirror trees.
//!
//! # Concepts
//!
//! ## Trees and nodes
//!
//! [`Tree`] owns its nodes in an arena, and [`Node`] is a shared reference
//! to a node which also keeps the tree alive. Nodes have one of two shapes:
//!
//! * [`Binary`]: two fixed child slots (left and right), either of which may
//!   be empty. The children of a binary node are its non-empty slots from
//!   left to right, so the left child's next sibling is the right child.
//! * [`Nary`]: an ordered list of children.
//!
//! ```
//! use sylvan::binary_tree;
//!
//! //      a
//! //     / \
//! //    b   c
//! //     \
//! //      d
//! let tree = binary_tree! { "a", [("b", [_, "d"]), "c"] };
//! let b = tree.root().first_child().expect("`a` has children");
//! let d = b.first_child().expect("`b` has a right child");
//!
//! assert!(b.left_child().is_none());
//! assert!(b.right_child().expect("`b` has a right child").ptr_eq(&d));
//! assert_eq!(*b.next_sibling().expect("`c` is next to `b`").borrow_data(), "c");
//! ```
//!
//! ## Navigators and orders
//!
//! Traversals never touch nodes directly. An order policy (see
//! [`traverse`]) moves one step forward or backward by asking a
//! [`Navigator`] for related nodes. The same orders run over
//!
//! * plain nodes, via [`navigator::DirectNavigator`],
//! * [`Bundle`]s of structurally parallel nodes, via
//!   [`navigator::ZipNavigator`], and
//! * a target tree paired with a filtered mirror built on demand, via
//!   [`navigator::GenerativeNavigator`].
//!
//! ```
//! use sylvan::nary_tree;
//! use sylvan::traverse::{BreadthFirst, Leaves, PostOrder};
//!
//! let tree = nary_tree! { 1, [(2, [4, 5]), (3, [6])] };
//! let collect = |iter: &mut dyn DoubleEndedIterator<Item = sylvan::NaryNode<i32>>| {
//!     iter.map(|node| *node.borrow_data()).collect::<Vec<_>>()
//! };
//!
//! assert_eq!(collect(&mut tree.root().traverse(PostOrder)), [4, 5, 2, 6, 3, 1]);
//! assert_eq!(collect(&mut tree.root().traverse(BreadthFirst)), [1, 2, 3, 4, 5, 6]);
//! assert_eq!(collect(&mut tree.root().traverse(Leaves).rev()), [6, 5, 4]);
//! ```
//!
//! ## Generated trees
//!
//! A [`navigator::GenerativeNavigator`] walks a target tree and creates the
//! counterparts of the nodes accepted by a predicate in another tree, only
//! when a traversal reaches them. Counterparts are remembered, so visiting a
//! node again does not create a node again.
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
// `clippy::missing_docs_in_private_items` implies `missing_docs`.
#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[macro_use]
mod macros;

mod bundle;
pub mod navigator;
pub mod node;
pub mod traverse;
pub mod tree;

pub use self::bundle::{Bundle, BundleError};
pub use self::navigator::{BinaryNavigator, Navigator};
pub use self::node::{
    AllocationFailure, AnyNode, Binary, BinaryNode, BinaryTreeNode, Nary, NaryNode, Node, NodeId,
    Shape, ShapeKind, TreeNode,
};
pub use self::traverse::{Cursor, Nodes, Traverser};
pub use self::tree::{BinaryTree, NaryTree, Tree};
