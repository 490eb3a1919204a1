//! Internals of a tree.

use alloc::vec;
use alloc::vec::Vec;

use crate::node::shape::Shape;
use crate::node::{AllocationFailure, NodeId};

/// A single node stored in the arena.
#[derive(Debug, Clone)]
struct Entry<T, S: Shape> {
    /// Data associated to the node.
    data: T,
    /// Parent.
    ///
    /// `None` only for the root node.
    parent: Option<NodeId>,
    /// Links to the children.
    links: S::Links,
}

/// State of an arena slot.
#[derive(Debug, Clone)]
enum SlotState<T, S: Shape> {
    /// The slot holds a node.
    Occupied(Entry<T, S>),
    /// The slot is free.
    Vacant {
        /// Next free slot.
        next_free: Option<usize>,
    },
}

/// An arena slot.
#[derive(Debug, Clone)]
struct Slot<T, S: Shape> {
    /// Number of times the slot has been vacated.
    generation: u32,
    /// Content.
    state: SlotState<T, S>,
}

/// Arena storage of a tree.
///
/// Removed nodes leave vacant slots, which are chained into a free list and
/// reused by nodes created later. A reused slot gets a new generation, so
/// `NodeId`s of removed nodes never refer to live nodes.
#[derive(Debug)]
pub(crate) struct TreeCore<T, S: Shape> {
    /// Arena slots.
    slots: Vec<Slot<T, S>>,
    /// Root node.
    root: NodeId,
    /// First free slot.
    free_head: Option<usize>,
}

impl<T, S: Shape> TreeCore<T, S> {
    /// Creates a new tree core with a single root node.
    #[must_use]
    pub(crate) fn new(root_data: T) -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                state: SlotState::Occupied(Entry {
                    data: root_data,
                    parent: None,
                    links: Default::default(),
                }),
            }],
            root: NodeId::new(0),
            free_head: None,
        }
    }

    /// Returns the root node.
    #[inline]
    #[must_use]
    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of arena slots, including vacant ones.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn arena_len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the entry for the node if the node is alive.
    #[must_use]
    fn get(&self, id: NodeId) -> Option<&Entry<T, S>> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        match &slot.state {
            SlotState::Occupied(entry) => Some(entry),
            SlotState::Vacant { .. } => None,
        }
    }

    /// Returns the mutable entry for the node if the node is alive.
    #[must_use]
    fn get_mut(&mut self, id: NodeId) -> Option<&mut Entry<T, S>> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        match &mut slot.state {
            SlotState::Occupied(entry) => Some(entry),
            SlotState::Vacant { .. } => None,
        }
    }

    /// Returns the entry for the live node.
    #[must_use]
    fn entry(&self, id: NodeId) -> &Entry<T, S> {
        self.get(id)
            .expect("[validity] the node should not have been removed from the tree")
    }

    /// Returns the mutable entry for the live node.
    #[must_use]
    fn entry_mut(&mut self, id: NodeId) -> &mut Entry<T, S> {
        self.get_mut(id)
            .expect("[validity] the node should not have been removed from the tree")
    }

    /// Returns `true` if the node is alive.
    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns a reference to the data associated to the node.
    #[inline]
    #[must_use]
    pub(crate) fn data(&self, id: NodeId) -> &T {
        &self.entry(id).data
    }

    /// Returns a mutable reference to the data associated to the node.
    #[inline]
    #[must_use]
    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.entry_mut(id).data
    }

    /// Returns the parent.
    #[inline]
    #[must_use]
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Returns the first child.
    #[inline]
    #[must_use]
    pub(crate) fn first_child(&self, id: NodeId) -> Option<NodeId> {
        S::first_child(&self.get(id)?.links)
    }

    /// Returns the last child.
    #[inline]
    #[must_use]
    pub(crate) fn last_child(&self, id: NodeId) -> Option<NodeId> {
        S::last_child(&self.get(id)?.links)
    }

    /// Returns the `index`-th child.
    #[inline]
    #[must_use]
    pub(crate) fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        S::child(&self.get(id)?.links, index)
    }

    /// Returns the next sibling.
    #[must_use]
    pub(crate) fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        S::next_of(&self.entry(parent).links, id)
    }

    /// Returns the previous sibling.
    #[must_use]
    pub(crate) fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        S::prev_of(&self.entry(parent).links, id)
    }

    /// Returns the slot number of the node in its parent.
    #[must_use]
    pub(crate) fn slot_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        S::slot_of(&self.entry(parent).links, id)
    }

    /// Returns the child at the given slot.
    #[inline]
    #[must_use]
    pub(crate) fn child_at_slot(&self, id: NodeId, slot: usize) -> Option<NodeId> {
        S::at_slot(&self.get(id)?.links, slot)
    }

    /// Returns the number of slots of the node, including empty ones.
    ///
    /// Removed nodes have no slots.
    #[inline]
    #[must_use]
    pub(crate) fn slot_count(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, |entry| S::slot_count(&entry.links))
    }

    /// Puts the entry into a free slot, and returns its ID.
    fn occupy(&mut self, entry: Entry<T, S>) -> NodeId {
        let index = match self.free_head {
            Some(v) => v,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Occupied(entry),
                });
                return NodeId::new(self.slots.len() - 1);
            }
        };
        let slot = self
            .slots
            .get_mut(index)
            .expect("[consistency] the free list should only hold indices of the arena");
        self.free_head = match slot.state {
            SlotState::Vacant { next_free } => next_free,
            SlotState::Occupied(_) => {
                unreachable!("[consistency] the free list should only hold vacant slots")
            }
        };
        slot.state = SlotState::Occupied(entry);
        NodeId::with_generation(index, slot.generation)
    }

    /// Drops the node and puts its slot into the free list.
    ///
    /// The node should already be unlinked from its parent and have no
    /// children.
    fn vacate(&mut self, id: NodeId) {
        let slot = self
            .slots
            .get_mut(id.index())
            .expect("[validity] node IDs handed out by the tree should point into the arena");
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = SlotState::Vacant {
            next_free: self.free_head,
        };
        self.free_head = Some(id.index());
    }

    /// Creates a new node at the given slot of `parent`.
    ///
    /// A node displaced from the slot (if any) is removed together with its
    /// descendants.
    pub(crate) fn insert_child(&mut self, parent: NodeId, slot: usize, data: T) -> NodeId {
        assert!(
            self.contains(parent),
            "[validity] children cannot be created under a removed node"
        );
        let id = self.occupy(Entry {
            data,
            parent: Some(parent),
            links: Default::default(),
        });
        let displaced = S::insert_at(&mut self.entry_mut(parent).links, slot, id);
        if let Some(displaced) = displaced {
            self.entry_mut(displaced).parent = None;
            self.free_subtree(displaced);
        }
        id
    }

    /// Creates a new node at the given slot of `parent`, without aborting on
    /// allocation failure.
    ///
    /// The tree is left untouched on failure.
    pub(crate) fn try_insert_child(
        &mut self,
        parent: NodeId,
        slot: usize,
        data: T,
    ) -> Result<NodeId, AllocationFailure> {
        if self.free_head.is_none() {
            self.slots
                .try_reserve(1)
                .map_err(|_| AllocationFailure::new())?;
        }
        Ok(self.insert_child(parent, slot, data))
    }

    /// Detaches the node from its parent, and removes it together with its
    /// descendants.
    ///
    /// Does nothing for the root node and for removed nodes.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) {
        let parent = match self.get_mut(id).and_then(|entry| entry.parent.take()) {
            Some(v) => v,
            None => return,
        };
        S::remove(&mut self.entry_mut(parent).links, id);
        self.free_subtree(id);
    }

    /// Vacates all the nodes of the subtree whose root is already unlinked
    /// from its parent.
    fn free_subtree(&mut self, top: NodeId) {
        let mut current = top;
        loop {
            if let Some(child) = self.first_child(current) {
                current = child;
                continue;
            }
            let parent = self.entry(current).parent;
            self.vacate(current);
            if current == top {
                return;
            }
            let parent =
                parent.expect("[consistency] non-top nodes of the subtree should have parents");
            S::remove(&mut self.entry_mut(parent).links, current);
            current = parent;
        }
    }

    /// Returns the number of nodes in the subtree.
    #[must_use]
    pub(crate) fn count_subtree(&self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            count += 1;
            let links = &self.entry(current).links;
            stack.extend((0..S::slot_count(links)).filter_map(|slot| S::at_slot(links, slot)));
        }
        count
    }

    /// Compares two subtrees, possibly in different trees.
    ///
    /// Shapes of the subtrees are compared including empty slots.
    #[must_use]
    pub(crate) fn subtree_eq<U>(&self, id: NodeId, other: &TreeCore<U, S>, other_id: NodeId) -> bool
    where
        T: PartialEq<U>,
    {
        let mut stack = vec![(id, other_id)];
        while let Some((lhs, rhs)) = stack.pop() {
            let (lhs, rhs) = (self.entry(lhs), other.entry(rhs));
            if lhs.data != rhs.data {
                return false;
            }
            let num_slots = S::slot_count(&lhs.links);
            if num_slots != S::slot_count(&rhs.links) {
                return false;
            }
            for slot in 0..num_slots {
                match (S::at_slot(&lhs.links, slot), S::at_slot(&rhs.links, slot)) {
                    (Some(l), Some(r)) => stack.push((l, r)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::node::shape::{Binary, Nary, LEFT, RIGHT};

    #[test]
    fn removed_subtree_is_not_counted() {
        let mut core = TreeCore::<_, Nary>::new("root");
        let root = core.root();
        let a = core.insert_child(root, 0, "a");
        let a0 = core.insert_child(a, 0, "a0");
        core.insert_child(root, 1, "b");
        assert_eq!(core.count_subtree(root), 4);

        core.remove_subtree(a);
        assert_eq!(core.count_subtree(root), 2);
        assert!(!core.contains(a));
        assert!(!core.contains(a0));
        assert_eq!(core.parent(a0), None);
        assert_eq!(core.count_subtree(a), 0);
        assert_eq!(core.first_child(root).map(|id| *core.data(id)), Some("b"));
    }

    #[test]
    fn empty_slots_matter_for_equality() {
        let mut lhs = TreeCore::<_, Binary>::new(1);
        let root = lhs.root();
        lhs.insert_child(root, LEFT, 2);
        let mut rhs = TreeCore::<_, Binary>::new(1);
        let other_root = rhs.root();
        rhs.insert_child(other_root, RIGHT, 2);

        assert!(!lhs.subtree_eq(root, &rhs, other_root));
        assert!(lhs.subtree_eq(root, &lhs, root));
    }

    #[test]
    fn displaced_node_is_removed() {
        let mut core = TreeCore::<_, Binary>::new(0);
        let root = core.root();
        let old = core.insert_child(root, RIGHT, 1);
        core.insert_child(old, LEFT, 3);
        let new = core
            .try_insert_child(root, RIGHT, 2)
            .expect("small allocation should succeed");
        assert!(!core.contains(old));
        assert_eq!(core.child_at_slot(root, RIGHT), Some(new));
        assert_eq!(core.slot_in_parent(new), Some(RIGHT));
        assert_eq!(core.count_subtree(root), 2);
    }

    #[test]
    fn vacant_slots_are_reused_with_new_generation() {
        let mut core = TreeCore::<_, Binary>::new(0);
        let root = core.root();
        let first = core.insert_child(root, LEFT, 1);
        core.insert_child(first, RIGHT, 2);
        assert_eq!(core.arena_len(), 3);
        core.remove_subtree(first);

        for value in 10..100 {
            let child = core.insert_child(root, LEFT, value);
            core.insert_child(child, LEFT, value + 1);
            core.remove_subtree(child);
        }
        assert_eq!(core.arena_len(), 3);
        assert_eq!(core.count_subtree(root), 1);

        let reused = core.insert_child(root, RIGHT, 7);
        assert_eq!(core.arena_len(), 3);
        assert_ne!(reused, first);
        assert!(!core.contains(first));
        assert_eq!(*core.data(reused), 7);
    }

    #[test]
    fn root_is_never_removed() {
        let mut core = TreeCore::<_, Nary>::new("root");
        let root = core.root();
        core.remove_subtree(root);
        assert!(core.contains(root));
        assert_eq!(core.count_subtree(root), 1);
    }
}
