//! Node.

mod debug_print;
mod internal;
pub(crate) mod shape;

use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use alloc::rc::Rc;

use crate::navigator::DirectNavigator;
use crate::traverse::{Cursor, Nodes, OrderTag, Traverser};
use crate::tree::Tree;

pub(crate) use self::internal::TreeCore;
use self::shape::{LEFT, RIGHT};
pub use self::shape::{Binary, Nary, Shape, ShapeKind};

/// Failure to allocate a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("failed to allocate a tree node")]
pub struct AllocationFailure {
    /// Private field to prevent construction outside the crate.
    _priv: (),
}

impl AllocationFailure {
    /// Creates a new allocation failure.
    ///
    /// This is intended for custom [`NodeAllocator`][`crate::navigator::NodeAllocator`]
    /// implementations.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { _priv: () }
    }
}

impl Default for AllocationFailure {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Node ID, unique inside a tree.
///
/// Arena slots of removed nodes are reused, but an ID of a removed node never
/// compares equal to the ID of a node created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    /// Index in the arena.
    index: usize,
    /// Number of times the arena slot has been vacated before the node was
    /// created.
    generation: u32,
}

impl NodeId {
    /// Creates a new node ID of the first generation.
    #[inline]
    #[must_use]
    pub(crate) fn new(index: usize) -> Self {
        Self::with_generation(index, 0)
    }

    /// Creates a new node ID.
    #[inline]
    #[must_use]
    pub(crate) fn with_generation(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the index in the arena.
    #[inline]
    #[must_use]
    pub(crate) fn index(self) -> usize {
        self.index
    }

    /// Returns the generation of the arena slot.
    #[inline]
    #[must_use]
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// Structural relations of a node.
///
/// This is the capability consumed by [`DirectNavigator`]. "No such node" is
/// always `None`.
pub trait TreeNode: Clone {
    /// Returns the shape of the node.
    #[must_use]
    fn shape(&self) -> ShapeKind;

    /// Returns `true` if the two handles refer to the same node.
    #[must_use]
    fn ptr_eq(&self, other: &Self) -> bool;

    /// Returns the parent.
    #[must_use]
    fn parent(&self) -> Option<Self>;

    /// Returns the previous sibling.
    #[must_use]
    fn prev_sibling(&self) -> Option<Self>;

    /// Returns the next sibling.
    #[must_use]
    fn next_sibling(&self) -> Option<Self>;

    /// Returns the first child.
    #[must_use]
    fn first_child(&self) -> Option<Self>;

    /// Returns the last child.
    #[must_use]
    fn last_child(&self) -> Option<Self>;

    /// Returns the `index`-th child.
    #[must_use]
    fn child(&self, index: usize) -> Option<Self>;
}

/// Relations only binary nodes have.
pub trait BinaryTreeNode: TreeNode {
    /// Returns the left child.
    #[must_use]
    fn left_child(&self) -> Option<Self>;

    /// Returns the right child.
    #[must_use]
    fn right_child(&self) -> Option<Self>;
}

/// A shared reference to a node.
///
/// The node is owned by the tree; this handle keeps the whole tree alive.
pub struct Node<T, S: Shape> {
    /// Tree core the node belongs to.
    core: Rc<RefCell<TreeCore<T, S>>>,
    /// Node ID in the tree core.
    id: NodeId,
}

/// Node of a binary tree.
pub type BinaryNode<T> = Node<T, Binary>;

/// Node of an n-ary tree.
pub type NaryNode<T> = Node<T, Nary>;

impl<T, S: Shape> Clone for Node<T, S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            id: self.id,
        }
    }
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for Node<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.core.try_borrow() {
            Ok(core) if core.contains(self.id) => {
                debug_print::DebugPrintSubtree::new(&core, self.id).fmt(f)
            }
            _ => f
                .debug_struct("Node")
                .field("id", &self.id)
                .finish_non_exhaustive(),
        }
    }
}

impl<T: PartialEq<U>, U, S: Shape> PartialEq<Node<U, S>> for Node<T, S> {
    /// Compares two subtrees.
    ///
    /// Returns `true` if the two subtrees have the same shape and equal data,
    /// even if they are stored in different trees.
    ///
    /// # Panics
    ///
    /// Panics if the data of some node is mutably borrowed, or if either node
    /// has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::binary_tree;
    ///
    /// let lhs = binary_tree! { 1, [2] };
    /// let rhs = binary_tree! { 1, [_, 2] };
    /// assert_ne!(lhs.root(), rhs.root());
    /// assert_eq!(lhs.root(), binary_tree! { 1, [2, _] }.root());
    /// ```
    fn eq(&self, other: &Node<U, S>) -> bool {
        self.core
            .borrow()
            .subtree_eq(self.id, &other.core.borrow(), other.id)
    }
}

impl<T: Eq, S: Shape> Eq for Node<T, S> {}

impl<T, S: Shape> Node<T, S> {
    /// Creates a node handle.
    #[inline]
    #[must_use]
    pub(crate) fn with_core_and_id(core: Rc<RefCell<TreeCore<T, S>>>, id: NodeId) -> Self {
        Self { core, id }
    }

    /// Creates a handle to another node of the same tree.
    #[inline]
    #[must_use]
    fn sibling_handle(&self, id: NodeId) -> Self {
        Self {
            core: self.core.clone(),
            id,
        }
    }

    /// Borrows the tree core.
    #[must_use]
    fn core(&self) -> Ref<'_, TreeCore<T, S>> {
        self.core
            .try_borrow()
            .expect("[consistency] the tree core should not be borrowed mutably across calls")
    }

    /// Borrows the tree core mutably.
    #[must_use]
    fn core_mut(&self) -> RefMut<'_, TreeCore<T, S>> {
        self.core
            .try_borrow_mut()
            .expect("[consistency] the tree should not be edited while its data is borrowed")
    }

    /// Returns the node ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the tree the node belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::NaryTree;
    ///
    /// let tree = NaryTree::new("root");
    /// let child = tree.root().create_last_child("child");
    ///
    /// assert!(child.tree().ptr_eq(&tree));
    /// ```
    #[inline]
    #[must_use]
    pub fn tree(&self) -> Tree<T, S> {
        Tree::from_core_rc(self.core.clone())
    }

    /// Returns `true` if the two handles refer to the same node.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && self.id == other.id
    }

    /// Returns `true` if the node has been removed from the tree.
    ///
    /// Relations of a removed node are all `None`. Accessing its data or
    /// creating children under it panics.
    #[inline]
    #[must_use]
    pub fn is_removed(&self) -> bool {
        !self.core().contains(self.id)
    }

    /// Returns a reference to the data associated to the node.
    ///
    /// # Panics
    ///
    /// Panics if the data of any node of the tree is mutably borrowed, or if
    /// the node has been removed.
    #[inline]
    #[must_use]
    pub fn borrow_data(&self) -> Ref<'_, T> {
        Ref::map(self.core(), |core| core.data(self.id))
    }

    /// Returns a mutable reference to the data associated to the node.
    ///
    /// # Panics
    ///
    /// Panics if the data of any node of the tree is already borrowed, or if
    /// the node has been removed.
    #[inline]
    #[must_use]
    pub fn borrow_data_mut(&self) -> RefMut<'_, T> {
        RefMut::map(self.core_mut(), |core| core.data_mut(self.id))
    }

    /// Returns `true` if the node is the root of the tree.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.core().root() == self.id
    }

    /// Returns the parent.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let id = self.core().parent(self.id)?;
        Some(self.sibling_handle(id))
    }

    /// Returns the previous sibling.
    #[must_use]
    pub fn prev_sibling(&self) -> Option<Self> {
        let id = self.core().prev_sibling(self.id)?;
        Some(self.sibling_handle(id))
    }

    /// Returns the next sibling.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::binary_tree;
    ///
    /// let tree = binary_tree! { "root", ["left", "right"] };
    /// let left = tree.root().left_child().expect("has left child");
    ///
    /// let right = left.next_sibling().expect("right is next to left");
    /// assert_eq!(*right.borrow_data(), "right");
    /// assert!(right.next_sibling().is_none());
    /// ```
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        let id = self.core().next_sibling(self.id)?;
        Some(self.sibling_handle(id))
    }

    /// Returns the first child.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        let id = self.core().first_child(self.id)?;
        Some(self.sibling_handle(id))
    }

    /// Returns the last child.
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        let id = self.core().last_child(self.id)?;
        Some(self.sibling_handle(id))
    }

    /// Returns the `index`-th child.
    ///
    /// For binary nodes, empty slots are not counted.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<Self> {
        let id = self.core().child(self.id, index)?;
        Some(self.sibling_handle(id))
    }

    /// Returns `true` if the node has any children.
    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.core().first_child(self.id).is_some()
    }

    /// Returns the number of nodes in the subtree, including the node itself.
    #[inline]
    #[must_use]
    pub fn count_subtree(&self) -> usize {
        self.core().count_subtree(self.id)
    }

    /// Returns the slot number of the node in its parent.
    #[inline]
    #[must_use]
    pub(crate) fn slot_in_parent(&self) -> Option<usize> {
        self.core().slot_in_parent(self.id)
    }

    /// Returns the child at the given slot.
    #[must_use]
    pub(crate) fn child_at_slot(&self, slot: usize) -> Option<Self> {
        let id = self.core().child_at_slot(self.id, slot)?;
        Some(self.sibling_handle(id))
    }

    /// Creates a child at the given slot, and returns the new node.
    fn create_at_slot(&self, slot: usize, data: T) -> Self {
        let id = self.core_mut().insert_child(self.id, slot, data);
        self.sibling_handle(id)
    }

    /// Creates a child at the given slot without aborting on allocation
    /// failure.
    pub(crate) fn try_create_at_slot(
        &self,
        slot: usize,
        data: T,
    ) -> Result<Self, AllocationFailure> {
        let id = self.core_mut().try_insert_child(self.id, slot, data)?;
        Ok(self.sibling_handle(id))
    }

    /// Detaches the node and its descendants from the parent and removes them
    /// from the tree.
    ///
    /// The data of the removed nodes is dropped and their arena slots are
    /// reused by nodes created later. Handles to the removed nodes stay
    /// valid to hold, see [`is_removed`][`Self::is_removed`]. Does nothing for
    /// the root or for an already removed node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::nary_tree;
    ///
    /// let tree = nary_tree! { "root", ["0", ("1", ["1-0"]), "2"] };
    /// let child1 = tree.root().child(1).expect("has three children");
    /// let grandchild = child1.first_child().expect("has a child");
    ///
    /// child1.detach_subtree();
    /// assert!(child1.is_removed());
    /// assert!(grandchild.is_removed());
    /// assert!(grandchild.parent().is_none());
    /// assert_eq!(tree.size(), 3);
    /// assert_eq!(tree, nary_tree! { "root", ["0", "2"] });
    /// ```
    pub fn detach_subtree(&self) {
        self.core_mut().remove_subtree(self.id);
    }

    /// Returns a double-ended iterator over the subtree in the given order.
    ///
    /// For [`Siblings`][`crate::traverse::Siblings`], the children of this
    /// node are iterated.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::nary_tree;
    /// use sylvan::traverse::{PostOrder, PreOrder};
    ///
    /// let tree = nary_tree! { "a", [("b", ["c", "d"]), "e"] };
    /// let values = |iter: &mut dyn Iterator<Item = sylvan::NaryNode<&'static str>>| {
    ///     iter.map(|node| *node.borrow_data()).collect::<Vec<_>>()
    /// };
    ///
    /// assert_eq!(values(&mut tree.root().traverse(PreOrder)), ["a", "b", "c", "d", "e"]);
    /// assert_eq!(values(&mut tree.root().traverse(PostOrder)), ["c", "d", "b", "e", "a"]);
    /// assert_eq!(
    ///     values(&mut tree.root().traverse(PreOrder).rev()),
    ///     ["e", "d", "c", "b", "a"]
    /// );
    /// ```
    #[must_use]
    pub fn traverse<O>(&self, order: O) -> Nodes<DirectNavigator<Self>, O::Policy>
    where
        O: OrderTag<DirectNavigator<Self>>,
    {
        Traverser::new(order, DirectNavigator::new(), self.clone()).nodes()
    }

    /// Returns a bidirectional cursor over the subtree, placed at the first
    /// node of the given order.
    #[must_use]
    pub fn cursor<O>(&self, order: O) -> Cursor<DirectNavigator<Self>, O::Policy>
    where
        O: OrderTag<DirectNavigator<Self>>,
    {
        match Cursor::front(order, DirectNavigator::new(), self.clone()) {
            Ok(cursor) => cursor,
            Err(never) => match never {},
        }
    }
}

impl<T> Node<T, Binary> {
    /// Returns the left child.
    #[must_use]
    pub fn left_child(&self) -> Option<Self> {
        self.child_at_slot(LEFT)
    }

    /// Returns the right child.
    #[must_use]
    pub fn right_child(&self) -> Option<Self> {
        self.child_at_slot(RIGHT)
    }

    /// Creates a node as the left child, and returns the new node.
    ///
    /// A node previously at the left slot is removed together with its
    /// descendants.
    ///
    /// # Panics
    ///
    /// Panics if this node has been removed.
    pub fn create_left_child(&self, data: T) -> Self {
        self.create_at_slot(LEFT, data)
    }

    /// Creates a node as the right child, and returns the new node.
    ///
    /// A node previously at the right slot is removed together with its
    /// descendants.
    ///
    /// # Panics
    ///
    /// Panics if this node has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::BinaryTree;
    ///
    /// let tree = BinaryTree::new(1);
    /// let right = tree.root().create_right_child(3);
    ///
    /// assert!(tree.root().left_child().is_none());
    /// assert!(tree.root().first_child().expect("has a child").ptr_eq(&right));
    /// ```
    pub fn create_right_child(&self, data: T) -> Self {
        self.create_at_slot(RIGHT, data)
    }
}

impl<T> Node<T, Nary> {
    /// Creates a node as the first child, and returns the new node.
    pub fn create_first_child(&self, data: T) -> Self {
        self.create_at_slot(0, data)
    }

    /// Creates a node as the last child, and returns the new node.
    pub fn create_last_child(&self, data: T) -> Self {
        let slot = self.core().slot_count(self.id);
        self.create_at_slot(slot, data)
    }

    /// Creates a node as the `index`-th child, and returns the new node.
    ///
    /// If `index` is larger than the number of children, the node is created
    /// as the last child.
    pub fn create_child_at(&self, index: usize, data: T) -> Self {
        self.create_at_slot(index, data)
    }
}

impl<T, S: Shape> TreeNode for Node<T, S> {
    #[inline]
    fn shape(&self) -> ShapeKind {
        S::KIND
    }

    #[inline]
    fn ptr_eq(&self, other: &Self) -> bool {
        Node::ptr_eq(self, other)
    }

    #[inline]
    fn parent(&self) -> Option<Self> {
        Node::parent(self)
    }

    #[inline]
    fn prev_sibling(&self) -> Option<Self> {
        Node::prev_sibling(self)
    }

    #[inline]
    fn next_sibling(&self) -> Option<Self> {
        Node::next_sibling(self)
    }

    #[inline]
    fn first_child(&self) -> Option<Self> {
        Node::first_child(self)
    }

    #[inline]
    fn last_child(&self) -> Option<Self> {
        Node::last_child(self)
    }

    #[inline]
    fn child(&self, index: usize) -> Option<Self> {
        Node::child(self, index)
    }
}

impl<T> BinaryTreeNode for Node<T, Binary> {
    #[inline]
    fn left_child(&self) -> Option<Self> {
        Node::left_child(self)
    }

    #[inline]
    fn right_child(&self) -> Option<Self> {
        Node::right_child(self)
    }
}

/// A node of either shape, decided at runtime.
#[derive(Debug)]
pub enum AnyNode<T> {
    /// Binary node.
    Binary(BinaryNode<T>),
    /// N-ary node.
    Nary(NaryNode<T>),
}

impl<T> Clone for AnyNode<T> {
    #[inline]
    fn clone(&self) -> Self {
        match self {
            Self::Binary(node) => Self::Binary(node.clone()),
            Self::Nary(node) => Self::Nary(node.clone()),
        }
    }
}

impl<T> From<BinaryNode<T>> for AnyNode<T> {
    #[inline]
    fn from(node: BinaryNode<T>) -> Self {
        Self::Binary(node)
    }
}

impl<T> From<NaryNode<T>> for AnyNode<T> {
    #[inline]
    fn from(node: NaryNode<T>) -> Self {
        Self::Nary(node)
    }
}

/// Implements a relation of `AnyNode` by delegating to the variant.
macro_rules! delegate_any_node_relation {
    ($($method:ident($($arg:ident: $ty:ty),*)),* $(,)?) => {
        $(
            #[inline]
            fn $method(&self $(, $arg: $ty)*) -> Option<Self> {
                match self {
                    Self::Binary(node) => node.$method($($arg),*).map(Self::Binary),
                    Self::Nary(node) => node.$method($($arg),*).map(Self::Nary),
                }
            }
        )*
    };
}

impl<T> TreeNode for AnyNode<T> {
    #[inline]
    fn shape(&self) -> ShapeKind {
        match self {
            Self::Binary(_) => ShapeKind::Binary,
            Self::Nary(_) => ShapeKind::Nary,
        }
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Binary(lhs), Self::Binary(rhs)) => lhs.ptr_eq(rhs),
            (Self::Nary(lhs), Self::Nary(rhs)) => lhs.ptr_eq(rhs),
            _ => false,
        }
    }

    delegate_any_node_relation!(
        parent(),
        prev_sibling(),
        next_sibling(),
        first_child(),
        last_child(),
        child(index: usize),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tree::NaryTree;
    use crate::{binary_tree, nary_tree};

    #[test]
    fn binary_relations_follow_present_slots() {
        let tree = binary_tree! { 'd', ['h', _] };
        let root = tree.root();
        let h = root.first_child().expect("left child exists");

        assert!(root.last_child().expect("left child exists").ptr_eq(&h));
        assert!(root.right_child().is_none());
        assert!(h.next_sibling().is_none());
        assert!(h.prev_sibling().is_none());
        assert!(h.parent().expect("has parent").ptr_eq(&root));
        assert_eq!(h.slot_in_parent(), Some(LEFT));
    }

    #[test]
    fn nary_child_creation() {
        let tree = NaryTree::new(0);
        let root = tree.root();
        root.create_last_child(2);
        root.create_first_child(1);
        root.create_child_at(10, 3);

        assert_eq!(tree, nary_tree! { 0, [1, 2, 3] });
        let middle = root.child(1).expect("has three children");
        assert_eq!(*middle.borrow_data(), 2);
        assert_eq!(
            middle.prev_sibling().map(|node| *node.borrow_data()),
            Some(1)
        );
        assert_eq!(
            middle.next_sibling().map(|node| *node.borrow_data()),
            Some(3)
        );
    }

    #[test]
    fn any_node_compares_shapes() {
        let binary = AnyNode::from(binary_tree! { 0 }.root());
        let nary = AnyNode::from(nary_tree! { 0 }.root());

        assert_eq!(binary.shape(), ShapeKind::Binary);
        assert_eq!(nary.shape(), ShapeKind::Nary);
        assert!(!binary.ptr_eq(&nary));
        assert!(binary.ptr_eq(&binary.clone()));
    }

    #[test]
    fn removed_node_has_no_relations() {
        let tree = binary_tree! { 0, [(1, [2]), 3] };
        let one = tree.root().left_child().expect("left child exists");
        let two = one.first_child().expect("`1` has a child");

        one.detach_subtree();
        assert!(one.is_removed());
        assert!(two.is_removed());
        assert!(!one.is_root());
        assert!(one.parent().is_none());
        assert!(one.first_child().is_none());
        assert!(two.parent().is_none());
        assert!(one.next_sibling().is_none());
        assert_eq!(one.count_subtree(), 0);
        assert_eq!(
            alloc::format!("{one:?}"),
            alloc::format!("Node {{ id: {:?}, .. }}", one.id())
        );

        // The arena slot is reused, but the old handle stays removed.
        let new = tree.root().create_left_child(4);
        assert!(one.is_removed());
        assert!(!new.ptr_eq(&one));
        assert_eq!(tree, binary_tree! { 0, [4, 3] });
    }

    #[test]
    fn data_can_be_edited() {
        let tree = nary_tree! { 1, [2] };
        *tree.root().borrow_data_mut() += 10;
        assert_eq!(*tree.root().borrow_data(), 11);
    }
}
