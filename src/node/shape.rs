//! Node shapes.

use core::fmt;

use alloc::vec::Vec;

use crate::node::NodeId;

/// Runtime tag of a node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Two fixed child slots (left and right), either of which may be empty.
    Binary,
    /// Ordered list of children.
    Nary,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Binary => "binary",
            Self::Nary => "n-ary",
        };
        f.write_str(s)
    }
}

/// Sealing of [`Shape`].
mod private {
    /// A trait only implementable inside this crate.
    pub trait Sealed {}
}

/// Shape of the nodes in a tree.
///
/// This is implemented only by [`Binary`] and [`Nary`].
///
/// Children are addressed by "slot numbers": `0` and `1` are the left and
/// right slots of binary nodes, and the child index is the slot of n-ary
/// nodes.
pub trait Shape: private::Sealed + 'static {
    /// Runtime tag of the shape.
    const KIND: ShapeKind;

    /// Child links stored in each node.
    #[doc(hidden)]
    type Links: Default + Clone + fmt::Debug;

    /// Returns the first child.
    #[doc(hidden)]
    fn first_child(links: &Self::Links) -> Option<NodeId>;

    /// Returns the last child.
    #[doc(hidden)]
    fn last_child(links: &Self::Links) -> Option<NodeId>;

    /// Returns the `index`-th present child.
    #[doc(hidden)]
    fn child(links: &Self::Links, index: usize) -> Option<NodeId>;

    /// Returns the child next to the given child.
    #[doc(hidden)]
    fn next_of(links: &Self::Links, child: NodeId) -> Option<NodeId>;

    /// Returns the child previous to the given child.
    #[doc(hidden)]
    fn prev_of(links: &Self::Links, child: NodeId) -> Option<NodeId>;

    /// Returns the slot number of the given child.
    #[doc(hidden)]
    fn slot_of(links: &Self::Links, child: NodeId) -> Option<usize>;

    /// Returns the child at the given slot.
    #[doc(hidden)]
    fn at_slot(links: &Self::Links, slot: usize) -> Option<NodeId>;

    /// Returns the number of slots, including empty ones.
    #[doc(hidden)]
    fn slot_count(links: &Self::Links) -> usize;

    /// Puts the child at the given slot, and returns the displaced child if
    /// any.
    #[doc(hidden)]
    fn insert_at(links: &mut Self::Links, slot: usize, child: NodeId) -> Option<NodeId>;

    /// Removes the given child from the links.
    #[doc(hidden)]
    fn remove(links: &mut Self::Links, child: NodeId);
}

/// Binary node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binary {}

impl private::Sealed for Binary {}

/// Slot number of the left child.
pub(crate) const LEFT: usize = 0;
/// Slot number of the right child.
pub(crate) const RIGHT: usize = 1;

impl Shape for Binary {
    const KIND: ShapeKind = ShapeKind::Binary;

    type Links = [Option<NodeId>; 2];

    #[inline]
    fn first_child(links: &Self::Links) -> Option<NodeId> {
        links[LEFT].or(links[RIGHT])
    }

    #[inline]
    fn last_child(links: &Self::Links) -> Option<NodeId> {
        links[RIGHT].or(links[LEFT])
    }

    fn child(links: &Self::Links, index: usize) -> Option<NodeId> {
        links.iter().flatten().nth(index).copied()
    }

    fn next_of(links: &Self::Links, child: NodeId) -> Option<NodeId> {
        if links[LEFT] == Some(child) {
            links[RIGHT]
        } else {
            None
        }
    }

    fn prev_of(links: &Self::Links, child: NodeId) -> Option<NodeId> {
        if links[RIGHT] == Some(child) {
            links[LEFT]
        } else {
            None
        }
    }

    fn slot_of(links: &Self::Links, child: NodeId) -> Option<usize> {
        links.iter().position(|slot| *slot == Some(child))
    }

    #[inline]
    fn at_slot(links: &Self::Links, slot: usize) -> Option<NodeId> {
        links.get(slot).copied().flatten()
    }

    #[inline]
    fn slot_count(_links: &Self::Links) -> usize {
        2
    }

    fn insert_at(links: &mut Self::Links, slot: usize, child: NodeId) -> Option<NodeId> {
        links
            .get_mut(slot)
            .expect("[validity] binary nodes have only the left and right slots")
            .replace(child)
    }

    fn remove(links: &mut Self::Links, child: NodeId) {
        for slot in links.iter_mut() {
            if *slot == Some(child) {
                *slot = None;
            }
        }
    }
}

/// N-ary node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nary {}

impl private::Sealed for Nary {}

impl Shape for Nary {
    const KIND: ShapeKind = ShapeKind::Nary;

    type Links = Vec<NodeId>;

    #[inline]
    fn first_child(links: &Self::Links) -> Option<NodeId> {
        links.first().copied()
    }

    #[inline]
    fn last_child(links: &Self::Links) -> Option<NodeId> {
        links.last().copied()
    }

    #[inline]
    fn child(links: &Self::Links, index: usize) -> Option<NodeId> {
        links.get(index).copied()
    }

    fn next_of(links: &Self::Links, child: NodeId) -> Option<NodeId> {
        let pos = Self::slot_of(links, child)?;
        links.get(pos + 1).copied()
    }

    fn prev_of(links: &Self::Links, child: NodeId) -> Option<NodeId> {
        let pos = Self::slot_of(links, child)?;
        pos.checked_sub(1).and_then(|prev| links.get(prev).copied())
    }

    #[inline]
    fn slot_of(links: &Self::Links, child: NodeId) -> Option<usize> {
        links.iter().position(|id| *id == child)
    }

    #[inline]
    fn at_slot(links: &Self::Links, slot: usize) -> Option<NodeId> {
        links.get(slot).copied()
    }

    #[inline]
    fn slot_count(links: &Self::Links) -> usize {
        links.len()
    }

    fn insert_at(links: &mut Self::Links, slot: usize, child: NodeId) -> Option<NodeId> {
        links.insert(slot.min(links.len()), child);
        None
    }

    fn remove(links: &mut Self::Links, child: NodeId) {
        links.retain(|id| *id != child);
    }
}
