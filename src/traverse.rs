//! Tree traversals.
//!
//! An order is a bidirectional walk over the nodes of a subtree. Each order
//! is a policy type implementing [`OrderPolicy`], selected by a zero-sized
//! tag implementing [`OrderTag`]:
//!
//! | Tag              | Visits                                        |
//! |------------------|-----------------------------------------------|
//! | [`PreOrder`]     | parents before children                       |
//! | [`InOrder`]      | left subtree, node, right subtree (binary)    |
//! | [`PostOrder`]    | children before parents                       |
//! | [`BreadthFirst`] | level by level                                |
//! | [`Leaves`]       | nodes without children                        |
//! | [`Siblings`]     | children of the root, not the root itself     |
//!
//! Policies move the cursor one step at a time in either direction, using a
//! [`Navigator`] passed by the caller. [`Cursor`] and [`Traverser`] bundle a
//! navigator with policies.

mod base;
mod breadth_first;
mod cursor;
mod depth_first;
mod in_order;
mod leaves;
mod siblings;

use crate::navigator::Navigator;

pub use self::base::PolicyBase;
pub use self::breadth_first::{BreadthFirst, BreadthFirstPolicy};
pub use self::cursor::{Cursor, Nodes, Traverser};
pub use self::depth_first::{PostOrder, PostOrderPolicy, PreOrder, PreOrderPolicy};
pub use self::in_order::{InOrder, InOrderPolicy};
pub use self::leaves::{Leaves, LeavesPolicy};
pub use self::siblings::{Siblings, SiblingsPolicy};

/// Single-step movement of a cursor in some order.
///
/// A policy is either positioned at a node of the subtree, or exhausted.
/// Moving an exhausted policy with [`increment`][`Self::increment`] or
/// [`decrement`][`Self::decrement`] keeps it exhausted; use
/// [`go_first`][`Self::go_first`], [`go_last`][`Self::go_last`], or
/// [`reset_to`][`Self::reset_to`] to position it again.
///
/// Errors are failures of the navigator. The position after an error is
/// unspecified.
pub trait OrderPolicy<Nav: Navigator> {
    /// Returns the root of the traversal.
    #[must_use]
    fn root(&self) -> &Nav::Node;

    /// Returns the current node, or `None` if exhausted.
    #[must_use]
    fn current(&self) -> Option<&Nav::Node>;

    /// Moves to the next node.
    fn increment(&mut self, nav: &mut Nav) -> Result<(), Nav::Error>;

    /// Moves to the previous node.
    fn decrement(&mut self, nav: &mut Nav) -> Result<(), Nav::Error>;

    /// Moves to the first node.
    fn go_first(&mut self, nav: &mut Nav) -> Result<(), Nav::Error>;

    /// Moves to the last node.
    fn go_last(&mut self, nav: &mut Nav) -> Result<(), Nav::Error>;

    /// Moves to the given node, or makes the policy exhausted if `None`.
    ///
    /// The node should be a node the order visits.
    fn reset_to(&mut self, nav: &mut Nav, node: Option<Nav::Node>) -> Result<(), Nav::Error>;

    /// Returns `true` if the policy is not positioned at any node.
    #[inline]
    #[must_use]
    fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }
}

/// Selection of an order.
pub trait OrderTag<Nav: Navigator> {
    /// Policy implementing the order.
    type Policy: OrderPolicy<Nav>;

    /// Creates an exhausted policy for the subtree of the given root.
    #[must_use]
    fn policy(&self, root: Nav::Node) -> Self::Policy;
}
