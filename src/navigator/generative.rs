//! Generative navigator.
//!
//! The generative navigator walks a target tree, and builds a filtered mirror
//! of it (the generated tree) on demand. Navigation happens over two-slot
//! bundles: the main slot is the target node, and the other slot is the
//! generated counterpart (or null if the target node is rejected).

use core::fmt;

use alloc::collections::BTreeMap;

use crate::bundle::{Bundle, BundleError};
use crate::navigator::{BinaryNavigator, Navigator};
use crate::node::shape::{LEFT, RIGHT};
use crate::node::{AllocationFailure, Binary, Node, NodeId, Shape, ShapeKind};

/// Strategy to create the data of generated nodes.
///
/// Closures `FnMut(&T) -> Result<T, AllocationFailure>` are allocators.
pub trait NodeAllocator<T> {
    /// Creates the data of the generated node for the given target data.
    ///
    /// # Failures
    ///
    /// Fails if the node cannot be allocated. The navigation triggering the
    /// allocation fails with the returned error.
    fn allocate(&mut self, source: &T) -> Result<T, AllocationFailure>;
}

impl<T, F> NodeAllocator<T> for F
where
    F: FnMut(&T) -> Result<T, AllocationFailure>,
{
    #[inline]
    fn allocate(&mut self, source: &T) -> Result<T, AllocationFailure> {
        self(source)
    }
}

/// Allocator cloning the target data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloningAllocator;

impl<T: Clone> NodeAllocator<T> for CloningAllocator {
    #[inline]
    fn allocate(&mut self, source: &T) -> Result<T, AllocationFailure> {
        Ok(source.clone())
    }
}

/// Allocator failing after the given number of allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LimitedAllocator<A> {
    /// Allocator to delegate to.
    inner: A,
    /// Remaining number of allowed allocations.
    remaining: usize,
}

impl<A> LimitedAllocator<A> {
    /// Creates a new allocator allowing `limit` allocations.
    #[inline]
    #[must_use]
    pub fn new(inner: A, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }

    /// Returns the remaining number of allowed allocations.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Allows more allocations.
    #[inline]
    pub fn extend(&mut self, additional: usize) {
        self.remaining = self.remaining.saturating_add(additional);
    }
}

impl<T, A: NodeAllocator<T>> NodeAllocator<T> for LimitedAllocator<A> {
    fn allocate(&mut self, source: &T) -> Result<T, AllocationFailure> {
        if self.remaining == 0 {
            return Err(AllocationFailure::new());
        }
        let data = self.inner.allocate(source)?;
        self.remaining -= 1;
        Ok(data)
    }
}

/// Navigator building a filtered mirror of the target tree while navigating.
///
/// The predicate decides which target nodes get generated counterparts. A
/// generated node is created at most once per target node as long as it
/// stays at the corresponding place in the generated tree; if the caller
/// removes it (or an ancestor) with [`Node::detach_subtree`], it is generated
/// again on the next visit.
///
/// Relations are interpreted as follows:
///
/// * `first_child`, `last_child`, `next_sibling`, and `prev_sibling` skip
///   rejected target nodes, so traversals only visit accepted nodes.
/// * `left_child`, `right_child`, and `child` return the target node even if
///   it is rejected, with a null generated slot.
/// * `parent` never consults the predicate.
///
/// The seed is the boundary of the navigation: its parent and siblings are
/// null.
///
/// [`InOrder`][`crate::traverse::InOrder`] moves only through `left_child`
/// and `right_child`, so an in-order traversal over this navigator is not
/// filtered: rejected target nodes and their descendants are visited with
/// null generated slots.
///
/// # Examples
///
/// ```
/// use sylvan::navigator::{CloningAllocator, GenerativeNavigator};
/// use sylvan::traverse::PreOrder;
/// use sylvan::{binary_tree, BinaryTree, Bundle, Traverser};
///
/// let target = binary_tree! { 3, [(-5, [7]), (6, [-1, 8])] };
/// let generated = BinaryTree::new(3);
/// let seed = Bundle::new(Some(target.root()), [Some(generated.root())])?;
/// let nav = GenerativeNavigator::new(
///     seed.clone(),
///     |node: &sylvan::BinaryNode<i32>| *node.borrow_data() >= 0,
///     CloningAllocator,
/// )?;
///
/// let visited = Traverser::new(PreOrder, nav, seed)
///     .map(|bundle| bundle.map(|bundle| *bundle.main().expect("non-null").borrow_data()))
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(visited, [3, 6, 8]);
/// assert_eq!(generated, binary_tree! { 3, [_, (6, [_, 8])] });
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct GenerativeNavigator<T, S: Shape, P, A> {
    /// Seed node of the target tree.
    seed_target: Node<T, S>,
    /// Seed node of the generated tree.
    seed_generated: Node<T, S>,
    /// Predicate deciding which target nodes are mirrored.
    predicate: P,
    /// Allocator of generated node data.
    allocator: A,
    /// Generated nodes, keyed by the IDs of their target nodes.
    memo: BTreeMap<NodeId, Node<T, S>>,
}

impl<T, S: Shape, P, A: fmt::Debug> fmt::Debug for GenerativeNavigator<T, S, P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerativeNavigator")
            .field("seed_target", &self.seed_target.id())
            .field("seed_generated", &self.seed_generated.id())
            .field("allocator", &self.allocator)
            .field("memo_len", &self.memo.len())
            .finish_non_exhaustive()
    }
}

impl<T, S, P, A> GenerativeNavigator<T, S, P, A>
where
    S: Shape,
    P: FnMut(&Node<T, S>) -> bool,
    A: NodeAllocator<T>,
{
    /// Creates a new navigator from the seed pair of target and generated
    /// nodes.
    ///
    /// # Failures
    ///
    /// Fails with [`BundleError::NullSlot`] if a slot of the seed is null.
    pub fn new(
        seed: Bundle<Node<T, S>, 1>,
        predicate: P,
        allocator: A,
    ) -> Result<Self, BundleError> {
        let (target, [generated]) = seed.into_parts();
        let seed_target = target.ok_or(BundleError::NullSlot { slot: 0 })?;
        let seed_generated = generated.ok_or(BundleError::NullSlot { slot: 1 })?;
        let mut memo = BTreeMap::new();
        memo.insert(seed_target.id(), seed_generated.clone());
        Ok(Self {
            seed_target,
            seed_generated,
            predicate,
            allocator,
            memo,
        })
    }

    /// Returns the generated counterpart of the target node, if it is still
    /// at the corresponding place in the generated tree.
    #[must_use]
    pub fn counterpart(&self, target: &Node<T, S>) -> Option<Node<T, S>> {
        let generated = self.memo.get(&target.id())?;
        if generated.is_removed() {
            return None;
        }
        let mut target = target.clone();
        let mut current = generated.clone();
        while !target.ptr_eq(&self.seed_target) {
            let memoized = self.memo.get(&target.id())?;
            if !memoized.ptr_eq(&current) {
                return None;
            }
            if S::KIND == ShapeKind::Binary && target.slot_in_parent() != current.slot_in_parent()
            {
                return None;
            }
            target = target.parent()?;
            current = current.parent()?;
        }
        if current.ptr_eq(&self.seed_generated) {
            Some(generated.clone())
        } else {
            None
        }
    }

    /// Returns the seed target node.
    #[inline]
    #[must_use]
    pub fn seed_target(&self) -> &Node<T, S> {
        &self.seed_target
    }

    /// Returns the seed generated node.
    #[inline]
    #[must_use]
    pub fn seed_generated(&self) -> &Node<T, S> {
        &self.seed_generated
    }

    /// Returns the allocator.
    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Returns the allocator mutably.
    #[inline]
    #[must_use]
    pub fn allocator_mut(&mut self) -> &mut A {
        &mut self.allocator
    }

    /// Decomposes the navigator into the seed pair.
    #[must_use]
    pub fn into_seed(self) -> Bundle<Node<T, S>, 1> {
        Bundle::from_parts_unchecked(Some(self.seed_target), [Some(self.seed_generated)])
    }

    /// Returns the generated node to be used as the parent of the generated
    /// counterparts of the children of `target`.
    #[must_use]
    fn generated_for(
        &self,
        target: &Node<T, S>,
        generated: Option<&Node<T, S>>,
    ) -> Option<Node<T, S>> {
        match generated {
            Some(generated) if !generated.is_removed() => Some(generated.clone()),
            _ => self.counterpart(target),
        }
    }

    /// Returns the generated node to be used as the parent of the generated
    /// counterparts of the siblings of `target`.
    #[must_use]
    fn generated_parent_for(
        &self,
        target: &Node<T, S>,
        generated: Option<&Node<T, S>>,
    ) -> Option<Node<T, S>> {
        if let Some(parent) = generated.and_then(Node::parent) {
            return Some(parent);
        }
        self.counterpart(&target.parent()?)
    }

    /// Returns `true` if the target node should be mirrored under the
    /// generated parent.
    fn accepts(&mut self, candidate: &Node<T, S>, generated_parent: Option<&Node<T, S>>) -> bool {
        if let Some(generated_parent) = generated_parent {
            if self.memoized_under(candidate, generated_parent).is_some() {
                return true;
            }
        }
        (self.predicate)(candidate)
    }

    /// Returns the memoized generated node for the target if it is attached
    /// to the corresponding slot of the generated parent.
    #[must_use]
    fn memoized_under(
        &self,
        target: &Node<T, S>,
        generated_parent: &Node<T, S>,
    ) -> Option<Node<T, S>> {
        let generated = self.memo.get(&target.id())?;
        let attached = generated
            .parent()
            .is_some_and(|parent| parent.ptr_eq(generated_parent));
        let same_slot =
            S::KIND != ShapeKind::Binary || generated.slot_in_parent() == target.slot_in_parent();
        if attached && same_slot {
            Some(generated.clone())
        } else {
            None
        }
    }

    /// Returns the generated counterpart of an accepted target node, creating
    /// it under the given generated parent if necessary.
    ///
    /// # Failures
    ///
    /// Fails if the node cannot be allocated. Neither the generated tree nor
    /// the memo is modified in that case.
    fn materialize(
        &mut self,
        target: &Node<T, S>,
        generated_parent: &Node<T, S>,
    ) -> Result<Node<T, S>, AllocationFailure> {
        if let Some(generated) = self.memoized_under(target, generated_parent) {
            log::trace!(
                "reusing generated node {:?} for target {:?}",
                generated.id(),
                target.id()
            );
            return Ok(generated);
        }
        if let Some(stale) = self.memo.get(&target.id()) {
            log::debug!(
                "generated node {:?} for target {:?} is no longer attached",
                stale.id(),
                target.id()
            );
        }

        let slot = self.slot_for(target, generated_parent);
        let data = self.allocator.allocate(&target.borrow_data());
        let generated = data
            .and_then(|data| generated_parent.try_create_at_slot(slot, data))
            .map_err(|e| {
                log::debug!(
                    "failed to generate a node for target {:?}: {e}",
                    target.id()
                );
                e
            })?;
        log::trace!(
            "generated node {:?} for target {:?} at slot {slot} of {:?}",
            generated.id(),
            target.id(),
            generated_parent.id()
        );
        self.memo.insert(target.id(), generated.clone());
        Ok(generated)
    }

    /// Returns the slot of the generated parent where the counterpart of the
    /// target should be put.
    #[must_use]
    fn slot_for(&self, target: &Node<T, S>, generated_parent: &Node<T, S>) -> usize {
        if S::KIND == ShapeKind::Binary {
            let slot = target
                .slot_in_parent()
                .expect("[consistency] only non-seed target nodes are materialized");
            if let Some(occupant) = generated_parent.child_at_slot(slot) {
                log::debug!(
                    "displacing generated node {:?} at slot {slot} of {:?}",
                    occupant.id(),
                    generated_parent.id()
                );
            }
            return slot;
        }
        let mut prev = target.prev_sibling();
        while let Some(sibling) = prev {
            if let Some(generated) = self.memoized_under(&sibling, generated_parent) {
                if let Some(slot) = generated.slot_in_parent() {
                    return slot + 1;
                }
            }
            prev = sibling.prev_sibling();
        }
        0
    }

    /// Creates a bundle of the target node and its generated counterpart.
    #[inline]
    #[must_use]
    fn pair(target: Node<T, S>, generated: Option<Node<T, S>>) -> Bundle<Node<T, S>, 1> {
        Bundle::from_parts_unchecked(Some(target), [generated])
    }

    /// Walks the target tree from `start` with `step` until an accepted node
    /// is found, and returns the pair for it.
    fn filtered<F>(
        &mut self,
        start: Option<Node<T, S>>,
        generated_parent: Option<Node<T, S>>,
        mut step: F,
    ) -> Result<Option<Bundle<Node<T, S>, 1>>, AllocationFailure>
    where
        F: FnMut(&Node<T, S>) -> Option<Node<T, S>>,
    {
        let mut candidate = start;
        while let Some(target) = candidate {
            if self.accepts(&target, generated_parent.as_ref()) {
                let generated = match &generated_parent {
                    Some(generated_parent) => Some(self.materialize(&target, generated_parent)?),
                    None => None,
                };
                return Ok(Some(Self::pair(target, generated)));
            }
            candidate = step(&target);
        }
        Ok(None)
    }

    /// Returns the pair for the target node at a fixed position.
    fn positional(
        &mut self,
        target: Option<Node<T, S>>,
        generated_parent: Option<Node<T, S>>,
    ) -> Result<Option<Bundle<Node<T, S>, 1>>, AllocationFailure> {
        let target = match target {
            Some(v) => v,
            None => return Ok(None),
        };
        let generated = match generated_parent {
            Some(generated_parent) if self.accepts(&target, Some(&generated_parent)) => {
                Some(self.materialize(&target, &generated_parent)?)
            }
            _ => None,
        };
        Ok(Some(Self::pair(target, generated)))
    }

    /// Splits a bundle into the target and generated nodes.
    ///
    /// Returns `None` for a bundle with a null target slot.
    #[must_use]
    fn split(bundle: &Bundle<Node<T, S>, 1>) -> Option<(&Node<T, S>, Option<&Node<T, S>>)> {
        Some((bundle.main()?, bundle.other(0)))
    }
}

impl<T, S, P, A> Navigator for GenerativeNavigator<T, S, P, A>
where
    S: Shape,
    P: FnMut(&Node<T, S>) -> bool,
    A: NodeAllocator<T>,
{
    type Node = Bundle<Node<T, S>, 1>;
    type Error = AllocationFailure;

    #[inline]
    fn ptr_eq(&self, lhs: &Self::Node, rhs: &Self::Node) -> bool {
        lhs.ptr_eq(rhs)
    }

    fn parent(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        if target.ptr_eq(&self.seed_target) {
            return Ok(None);
        }
        let parent = match target.parent() {
            Some(v) => v,
            None => return Ok(None),
        };
        let generated_parent = self.generated_parent_for(target, generated);
        Ok(Some(Self::pair(parent, generated_parent)))
    }

    fn prev_sibling(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        if target.ptr_eq(&self.seed_target) {
            return Ok(None);
        }
        let generated_parent = self.generated_parent_for(target, generated);
        self.filtered(target.prev_sibling(), generated_parent, Node::prev_sibling)
    }

    fn next_sibling(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        if target.ptr_eq(&self.seed_target) {
            return Ok(None);
        }
        let generated_parent = self.generated_parent_for(target, generated);
        self.filtered(target.next_sibling(), generated_parent, Node::next_sibling)
    }

    fn first_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        let generated = self.generated_for(target, generated);
        self.filtered(target.first_child(), generated, Node::next_sibling)
    }

    fn last_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        let generated = self.generated_for(target, generated);
        self.filtered(target.last_child(), generated, Node::prev_sibling)
    }

    fn child(
        &mut self,
        node: &Self::Node,
        index: usize,
    ) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        let generated = self.generated_for(target, generated);
        self.positional(target.child(index), generated)
    }
}

impl<T, P, A> BinaryNavigator for GenerativeNavigator<T, Binary, P, A>
where
    P: FnMut(&Node<T, Binary>) -> bool,
    A: NodeAllocator<T>,
{
    fn left_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        let generated = self.generated_for(target, generated);
        self.positional(target.child_at_slot(LEFT), generated)
    }

    fn right_child(&mut self, node: &Self::Node) -> Result<Option<Self::Node>, AllocationFailure> {
        let (target, generated) = match Self::split(node) {
            Some(v) => v,
            None => return Ok(None),
        };
        let generated = self.generated_for(target, generated);
        self.positional(target.child_at_slot(RIGHT), generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::binary_tree;
    use crate::node::BinaryNode;
    use crate::tree::BinaryTree;

    /// Accepts non-negative values.
    fn non_negative(node: &BinaryNode<i32>) -> bool {
        *node.borrow_data() >= 0
    }

    /// Returns the data of the target and generated slots.
    fn values(bundle: &Bundle<BinaryNode<i32>, 1>) -> (Option<i32>, Option<i32>) {
        (
            bundle.main().map(|node| *node.borrow_data()),
            bundle.other(0).map(|node| *node.borrow_data()),
        )
    }

    #[test]
    fn positional_relation_keeps_rejected_target() {
        let target = binary_tree! { 0, [-1, 2] };
        let generated = BinaryTree::new(0);
        let seed = Bundle::new(Some(target.root()), [Some(generated.root())])
            .expect("both slots are binary");
        let mut nav = GenerativeNavigator::new(seed.clone(), non_negative, CloningAllocator)
            .expect("seed is not null");

        let left = nav
            .left_child(&seed)
            .expect("no allocation")
            .expect("target has left");
        assert_eq!(values(&left), (Some(-1), None));
        assert_eq!(generated.size(), 1);

        let first = nav
            .first_child(&seed)
            .expect("allocation succeeds")
            .expect("accepted child");
        assert_eq!(values(&first), (Some(2), Some(2)));
        assert_eq!(generated, binary_tree! { 0, [_, 2] });
    }

    #[test]
    fn seed_has_no_parent_nor_siblings() {
        let target = binary_tree! { 0, [1, 2] };
        let generated = BinaryTree::new(1);
        let left = target.root().left_child().expect("left child exists");
        let seed =
            Bundle::new(Some(left), [Some(generated.root())]).expect("both slots are binary");
        let mut nav = GenerativeNavigator::new(seed.clone(), non_negative, CloningAllocator)
            .expect("seed is not null");

        assert!(nav.parent(&seed).expect("no allocation").is_none());
        assert!(nav.next_sibling(&seed).expect("no allocation").is_none());
    }

    #[test]
    fn null_seed_is_rejected() {
        let target = binary_tree! { 0 };
        let seed = Bundle::new(Some(target.root()), [None]).expect("single shape");
        let result = GenerativeNavigator::new(seed, non_negative, CloningAllocator);
        assert_eq!(result.map(|_| ()).err(), Some(BundleError::NullSlot { slot: 1 }));
    }

    #[test]
    fn regeneration_reuses_arena_slots() {
        let target = binary_tree! { 0, [1, 2] };
        let generated = BinaryTree::new(0);
        let seed = Bundle::new(Some(target.root()), [Some(generated.root())])
            .expect("both slots are binary");
        let mut nav = GenerativeNavigator::new(seed.clone(), non_negative, CloningAllocator)
            .expect("seed is not null");

        let mut previous: Option<Bundle<BinaryNode<i32>, 1>> = None;
        for _ in 0..1000 {
            let left = nav
                .left_child(&seed)
                .expect("allocation succeeds")
                .expect("target has left");
            assert_eq!(values(&left), (Some(1), Some(1)));
            let left_generated = left.other(0).expect("accepted child");
            if let Some(previous) = &previous {
                let stale = previous.other(0).expect("accepted child");
                assert!(stale.is_removed());
                assert!(!stale.ptr_eq(left_generated));
            }
            left_generated.detach_subtree();
            previous = Some(left);
        }

        assert_eq!(generated.size(), 1);
        assert_eq!(generated.arena_len(), 2);
        assert_eq!(nav.memo.len(), 2);
    }

    #[test]
    fn stale_bundle_falls_back_to_memo() {
        let target = binary_tree! { 0, [(1, [2])] };
        let generated = BinaryTree::new(0);
        let seed = Bundle::new(Some(target.root()), [Some(generated.root())])
            .expect("both slots are binary");
        let mut nav = GenerativeNavigator::new(seed.clone(), non_negative, CloningAllocator)
            .expect("seed is not null");

        let stale = nav
            .left_child(&seed)
            .expect("allocation succeeds")
            .expect("target has left");
        stale.other(0).expect("accepted child").detach_subtree();
        let fresh = nav
            .left_child(&seed)
            .expect("allocation succeeds")
            .expect("target has left");

        // The removed generated node is replaced by its regenerated one.
        let below = nav
            .first_child(&stale)
            .expect("allocation succeeds")
            .expect("target has a child");
        assert_eq!(values(&below), (Some(2), Some(2)));
        assert!(below
            .other(0)
            .and_then(|node| node.parent())
            .is_some_and(|parent| parent.ptr_eq(fresh.other(0).expect("accepted child"))));
        assert_eq!(generated, binary_tree! { 0, [(1, [2])] });
    }

    #[test]
    fn limited_allocator_counts_down() {
        let mut allocator = LimitedAllocator::new(CloningAllocator, 1);
        assert_eq!(allocator.allocate(&1), Ok(1));
        assert_eq!(allocator.remaining(), 0);
        assert_eq!(allocator.allocate(&2), Err(AllocationFailure::new()));
        allocator.extend(1);
        assert_eq!(allocator.allocate(&3), Ok(3));
    }
}
