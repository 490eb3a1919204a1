//! Pointer bundles.
//!
//! A bundle is a fixed number of node handles into structurally parallel
//! trees, moved as a single unit: every relation is applied slot by slot,
//! and a null slot stays null.

use crate::node::{BinaryTreeNode, ShapeKind, TreeNode};

/// Error on bundle construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum BundleError {
    /// Slots hold nodes of different shapes.
    #[error("slot {slot} holds a {found} node while the preceding slots hold {expected} nodes")]
    TypeMismatch {
        /// Slot of the first mismatching node. The main slot is slot 0.
        slot: usize,
        /// Shape of the nodes in the preceding slots.
        expected: ShapeKind,
        /// Shape of the mismatching node.
        found: ShapeKind,
    },
    /// A slot required to be non-null is null.
    #[error("slot {slot} is null")]
    NullSlot {
        /// The null slot. The main slot is slot 0.
        slot: usize,
    },
}

/// A main node and `K` other nodes, navigated in lock-step.
///
/// Identity and truthiness of a bundle are those of its main slot.
#[derive(Debug, Clone)]
pub struct Bundle<N, const K: usize> {
    /// Main slot.
    main: Option<N>,
    /// Other slots.
    others: [Option<N>; K],
}

impl<N: TreeNode, const K: usize> Bundle<N, K> {
    /// Creates a new bundle.
    ///
    /// # Failures
    ///
    /// Fails with [`BundleError::TypeMismatch`] if the non-null slots hold
    /// nodes of different shapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::{binary_tree, nary_tree, AnyNode, Bundle, BundleError, ShapeKind};
    ///
    /// let binary = AnyNode::from(binary_tree! { 0 }.root());
    /// let nary = AnyNode::from(nary_tree! { 0 }.root());
    ///
    /// assert!(Bundle::new(Some(binary.clone()), [None, Some(binary.clone())]).is_ok());
    /// assert_eq!(
    ///     Bundle::new(Some(binary), [None, Some(nary)]).map(|_| ()),
    ///     Err(BundleError::TypeMismatch {
    ///         slot: 2,
    ///         expected: ShapeKind::Binary,
    ///         found: ShapeKind::Nary,
    ///     })
    /// );
    /// ```
    pub fn new(main: Option<N>, others: [Option<N>; K]) -> Result<Self, BundleError> {
        let bundle = Self { main, others };
        let mut expected = None;
        for (slot, node) in bundle.slots().enumerate() {
            let found = match node {
                Some(node) => node.shape(),
                None => continue,
            };
            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(BundleError::TypeMismatch {
                        slot,
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(bundle)
    }

    /// Returns `true` if the two bundles have identical main slots.
    ///
    /// Two bundles with null main slots are identical.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.main, &other.main) {
            (Some(lhs), Some(rhs)) => lhs.ptr_eq(rhs),
            (None, None) => true,
            _ => false,
        }
    }

    /// Applies the relation to every non-null slot.
    #[must_use]
    fn map_slots<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&N) -> Option<N>,
    {
        Self {
            main: self.main.as_ref().and_then(&mut f),
            others: self.others.each_ref().map(|slot| slot.as_ref().and_then(&mut f)),
        }
    }

    /// Returns the bundle of parents.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Self {
        self.map_slots(N::parent)
    }

    /// Returns the bundle of previous siblings.
    #[inline]
    #[must_use]
    pub fn prev_sibling(&self) -> Self {
        self.map_slots(N::prev_sibling)
    }

    /// Returns the bundle of next siblings.
    #[inline]
    #[must_use]
    pub fn next_sibling(&self) -> Self {
        self.map_slots(N::next_sibling)
    }

    /// Returns the bundle of first children.
    #[inline]
    #[must_use]
    pub fn first_child(&self) -> Self {
        self.map_slots(N::first_child)
    }

    /// Returns the bundle of last children.
    #[inline]
    #[must_use]
    pub fn last_child(&self) -> Self {
        self.map_slots(N::last_child)
    }

    /// Returns the bundle of `index`-th children.
    #[inline]
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        self.map_slots(|node| node.child(index))
    }
}

impl<N: BinaryTreeNode, const K: usize> Bundle<N, K> {
    /// Returns the bundle of left children.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylvan::{binary_tree, Bundle};
    ///
    /// let lhs = binary_tree! { 1, [2, 3] };
    /// let rhs = binary_tree! { 1, [_, 3] };
    /// let root = Bundle::new(Some(lhs.root()), [Some(rhs.root())])?;
    ///
    /// let left = root.left_child();
    /// assert_eq!(left.main().map(|node| *node.borrow_data()), Some(2));
    /// assert!(left.other(0).is_none());
    ///
    /// // Null slots stay null.
    /// assert!(left.right_child().other(0).is_none());
    /// # Ok::<_, sylvan::BundleError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn left_child(&self) -> Self {
        self.map_slots(N::left_child)
    }

    /// Returns the bundle of right children.
    #[inline]
    #[must_use]
    pub fn right_child(&self) -> Self {
        self.map_slots(N::right_child)
    }
}

impl<N, const K: usize> Bundle<N, K> {
    /// Creates a bundle without checking the shapes.
    #[inline]
    #[must_use]
    pub(crate) fn from_parts_unchecked(main: Option<N>, others: [Option<N>; K]) -> Self {
        Self { main, others }
    }

    /// Returns the main slot.
    #[inline]
    #[must_use]
    pub fn main(&self) -> Option<&N> {
        self.main.as_ref()
    }

    /// Returns the `index`-th slot of the other slots.
    ///
    /// Returns `None` if the slot is null or out of range.
    #[inline]
    #[must_use]
    pub fn other(&self, index: usize) -> Option<&N> {
        self.others.get(index)?.as_ref()
    }

    /// Returns an iterator of all slots, starting from the main slot.
    pub fn slots(&self) -> impl DoubleEndedIterator<Item = Option<&N>> + '_ {
        core::iter::once(&self.main)
            .chain(self.others.iter())
            .map(Option::as_ref)
    }

    /// Decomposes the bundle into the main slot and the other slots.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Option<N>, [Option<N>; K]) {
        (self.main, self.others)
    }

    /// Returns `true` if the main slot is null.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.main.is_none()
    }

    /// Returns `true` if the main slot is not null.
    #[inline]
    #[must_use]
    pub fn is_some(&self) -> bool {
        self.main.is_some()
    }
}
