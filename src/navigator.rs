//! Node navigators.
//!
//! A navigator moves from a node to a related node. Order policies only talk
//! to nodes through this capability, so any order can be run over plain
//! nodes ([`DirectNavigator`]), over bundles of parallel nodes
//! ([`ZipNavigator`]), or over a lazily generated mirror tree
//! ([`GenerativeNavigator`]).
//!
//! "No such node" is `Ok(None)`. `Err(_)` is reserved for failures of the
//! navigator itself, such as allocation failures of a generative navigator.

mod direct;
mod generative;

pub use self::direct::{DirectNavigator, ZipNavigator};
pub use self::generative::{
    CloningAllocator, GenerativeNavigator, LimitedAllocator, NodeAllocator,
};

/// Capability to move from a node to related nodes.
pub trait Navigator {
    /// Node handle the navigator moves between.
    type Node: Clone;
    /// Failure of the navigator itself.
    type Error;

    /// Returns `true` if the two nodes are identical.
    #[must_use]
    fn ptr_eq(&self, lhs: &Self::Node, rhs: &Self::Node) -> bool;

    /// Returns the parent of the node.
    fn parent(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Self::Error>;

    /// Returns the previous sibling of the node.
    fn prev_sibling(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Self::Error>;

    /// Returns the next sibling of the node.
    fn next_sibling(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Self::Error>;

    /// Returns the first child of the node.
    fn first_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Self::Error>;

    /// Returns the last child of the node.
    fn last_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Self::Error>;

    /// Returns the `index`-th child of the node.
    fn child(
        &mut self,
        node: &Self::Node,
        index: usize,
    ) -> Result<Option<Self::Node>, Self::Error>;
}

/// Navigator over binary nodes.
pub trait BinaryNavigator: Navigator {
    /// Returns the left child of the node.
    fn left_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Self::Error>;

    /// Returns the right child of the node.
    fn right_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, Self::Error>;
}
