//! Cursors and iterators over order policies.

use core::convert::Infallible;
use core::iter;

use crate::navigator::Navigator;
use crate::traverse::{OrderPolicy, OrderTag};

/// Bidirectional cursor moving in some order.
///
/// # Examples
///
/// ```
/// use sylvan::nary_tree;
/// use sylvan::traverse::PreOrder;
///
/// let tree = nary_tree! { "root", [("0", ["0-0"]), "1"] };
/// let mut cursor = tree.root().cursor(PreOrder);
/// let data = |node: Option<&sylvan::NaryNode<&'static str>>| node.map(|node| *node.borrow_data());
///
/// assert_eq!(data(cursor.current()), Some("root"));
/// assert_eq!(data(cursor.move_next()?), Some("0"));
/// assert_eq!(data(cursor.move_next()?), Some("0-0"));
/// assert_eq!(data(cursor.move_prev()?), Some("0"));
/// assert_eq!(data(cursor.move_last()?), Some("1"));
/// assert_eq!(data(cursor.move_next()?), None);
/// assert!(cursor.is_exhausted());
/// # Ok::<_, core::convert::Infallible>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<Nav, P> {
    /// Navigator.
    nav: Nav,
    /// Order policy.
    policy: P,
}

impl<Nav: Navigator, P: OrderPolicy<Nav>> Cursor<Nav, P> {
    /// Creates an exhausted cursor over the subtree of the given root.
    #[must_use]
    pub fn new<O>(order: O, nav: Nav, root: Nav::Node) -> Self
    where
        O: OrderTag<Nav, Policy = P>,
    {
        Self {
            nav,
            policy: order.policy(root),
        }
    }

    /// Creates a cursor placed at the first node.
    pub fn front<O>(order: O, nav: Nav, root: Nav::Node) -> Result<Self, Nav::Error>
    where
        O: OrderTag<Nav, Policy = P>,
    {
        let mut this = Self::new(order, nav, root);
        this.move_first()?;
        Ok(this)
    }

    /// Creates a cursor placed at the last node.
    pub fn back<O>(order: O, nav: Nav, root: Nav::Node) -> Result<Self, Nav::Error>
    where
        O: OrderTag<Nav, Policy = P>,
    {
        let mut this = Self::new(order, nav, root);
        this.move_last()?;
        Ok(this)
    }

    /// Creates a cursor placed at the given node.
    pub fn with_position<O>(
        order: O,
        nav: Nav,
        root: Nav::Node,
        position: Nav::Node,
    ) -> Result<Self, Nav::Error>
    where
        O: OrderTag<Nav, Policy = P>,
    {
        let mut this = Self::new(order, nav, root);
        this.policy.reset_to(&mut this.nav, Some(position))?;
        Ok(this)
    }

    /// Returns the current node.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Nav::Node> {
        self.policy.current()
    }

    /// Returns the root of the traversal.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Nav::Node {
        self.policy.root()
    }

    /// Returns `true` if the cursor is not placed at any node.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.policy.is_exhausted()
    }

    /// Moves to the next node, and returns it.
    pub fn move_next(&mut self) -> Result<Option<&Nav::Node>, Nav::Error> {
        self.policy.increment(&mut self.nav)?;
        Ok(self.policy.current())
    }

    /// Moves to the previous node, and returns it.
    pub fn move_prev(&mut self) -> Result<Option<&Nav::Node>, Nav::Error> {
        self.policy.decrement(&mut self.nav)?;
        Ok(self.policy.current())
    }

    /// Moves to the first node, and returns it.
    pub fn move_first(&mut self) -> Result<Option<&Nav::Node>, Nav::Error> {
        self.policy.go_first(&mut self.nav)?;
        Ok(self.policy.current())
    }

    /// Moves to the last node, and returns it.
    pub fn move_last(&mut self) -> Result<Option<&Nav::Node>, Nav::Error> {
        self.policy.go_last(&mut self.nav)?;
        Ok(self.policy.current())
    }

    /// Returns the navigator.
    #[inline]
    #[must_use]
    pub fn navigator(&self) -> &Nav {
        &self.nav
    }

    /// Returns the navigator mutably.
    #[inline]
    #[must_use]
    pub fn navigator_mut(&mut self) -> &mut Nav {
        &mut self.nav
    }

    /// Returns the navigator.
    #[inline]
    #[must_use]
    pub fn into_navigator(self) -> Nav {
        self.nav
    }
}

/// Double-ended iterator in some order.
///
/// Items are `Err(_)` when the navigator fails. Once an error is returned,
/// the iterator returns `None` from both ends.
///
/// The first and last nodes are looked up on the first call to
/// [`next`][`Iterator::next`] and [`next_back`][`DoubleEndedIterator::next_back`]
/// respectively, so creating a traverser does not navigate at all.
#[derive(Debug, Clone)]
pub struct Traverser<Nav, P> {
    /// Navigator shared by both ends.
    nav: Nav,
    /// Policy of the front end.
    front: P,
    /// Policy of the back end.
    back: P,
    /// Whether the front end is positioned.
    front_started: bool,
    /// Whether the back end is positioned.
    back_started: bool,
    /// Whether the iteration is completed.
    finished: bool,
}

impl<Nav: Navigator, P: OrderPolicy<Nav>> Traverser<Nav, P> {
    /// Creates a traverser over the subtree of the given root.
    #[must_use]
    pub fn new<O>(order: O, nav: Nav, root: Nav::Node) -> Self
    where
        O: OrderTag<Nav, Policy = P>,
    {
        Self {
            nav,
            front: order.policy(root.clone()),
            back: order.policy(root),
            front_started: false,
            back_started: false,
            finished: false,
        }
    }

    /// Returns the navigator.
    #[inline]
    #[must_use]
    pub fn navigator(&self) -> &Nav {
        &self.nav
    }

    /// Returns the navigator.
    #[inline]
    #[must_use]
    pub fn into_navigator(self) -> Nav {
        self.nav
    }

    /// Advances one end, and returns the node unless the two ends met.
    fn advance(&mut self, from_back: bool) -> Option<Result<Nav::Node, Nav::Error>> {
        if self.finished {
            return None;
        }
        let (this, this_started, other, other_started) = if from_back {
            (&mut self.back, &mut self.back_started, &self.front, self.front_started)
        } else {
            (&mut self.front, &mut self.front_started, &self.back, self.back_started)
        };
        let moved = match (*this_started, from_back) {
            (false, false) => this.go_first(&mut self.nav),
            (false, true) => this.go_last(&mut self.nav),
            (true, false) => this.increment(&mut self.nav),
            (true, true) => this.decrement(&mut self.nav),
        };
        *this_started = true;
        if let Err(e) = moved {
            self.finished = true;
            return Some(Err(e));
        }
        let node = match this.current() {
            Some(v) => v.clone(),
            None => {
                self.finished = true;
                return None;
            }
        };
        if other_started {
            let met = other
                .current()
                .map_or(true, |other| self.nav.ptr_eq(&node, other));
            if met {
                self.finished = true;
                return None;
            }
        }
        Some(Ok(node))
    }
}

impl<Nav: Navigator<Error = Infallible>, P: OrderPolicy<Nav>> Traverser<Nav, P> {
    /// Converts the traverser into an iterator of plain nodes.
    #[inline]
    #[must_use]
    pub fn nodes(self) -> Nodes<Nav, P> {
        Nodes { inner: self }
    }
}

impl<Nav: Navigator, P: OrderPolicy<Nav>> Iterator for Traverser<Nav, P> {
    type Item = Result<Nav::Node, Nav::Error>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.advance(false)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<Nav: Navigator, P: OrderPolicy<Nav>> DoubleEndedIterator for Traverser<Nav, P> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.advance(true)
    }
}

impl<Nav: Navigator, P: OrderPolicy<Nav>> iter::FusedIterator for Traverser<Nav, P> {}

/// Double-ended iterator of nodes in some order, over an infallible
/// navigator.
#[derive(Debug, Clone)]
pub struct Nodes<Nav, P> {
    /// Inner traverser.
    inner: Traverser<Nav, P>,
}

impl<Nav: Navigator<Error = Infallible>, P: OrderPolicy<Nav>> Nodes<Nav, P> {
    /// Returns the inner traverser.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Traverser<Nav, P> {
        self.inner
    }
}

impl<Nav: Navigator<Error = Infallible>, P: OrderPolicy<Nav>> Iterator for Nodes<Nav, P> {
    type Item = Nav::Node;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|res| match res {
            Ok(node) => node,
            Err(never) => match never {},
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<Nav: Navigator<Error = Infallible>, P: OrderPolicy<Nav>> DoubleEndedIterator
    for Nodes<Nav, P>
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|res| match res {
            Ok(node) => node,
            Err(never) => match never {},
        })
    }
}

impl<Nav: Navigator<Error = Infallible>, P: OrderPolicy<Nav>> iter::FusedIterator
    for Nodes<Nav, P>
{
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;

    use crate::nary_tree;
    use crate::traverse::PreOrder;

    #[test]
    fn ends_meet_in_the_middle() {
        let tree = nary_tree! { 0, [1, (2, [3, 4]), 5] };
        let mut iter = tree.root().traverse(PreOrder);
        let data = |node: Option<crate::NaryNode<i32>>| node.map(|node| *node.borrow_data());

        assert_eq!(data(iter.next()), Some(0));
        assert_eq!(data(iter.next_back()), Some(5));
        assert_eq!(data(iter.next_back()), Some(4));
        assert_eq!(data(iter.next()), Some(1));
        assert_eq!(data(iter.next()), Some(2));
        assert_eq!(data(iter.next_back()), Some(3));
        assert_eq!(data(iter.next()), None);
        assert_eq!(data(iter.next_back()), None);
    }

    #[test]
    fn single_node_is_yielded_once() {
        let tree = nary_tree! { 0 };
        let mut iter = tree.root().traverse(PreOrder);
        assert!(iter.next().is_some());
        assert!(iter.next_back().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn back_only_iteration() {
        let tree = nary_tree! { 0, [1, 2] };
        let values = tree
            .root()
            .traverse(PreOrder)
            .rev()
            .map(|node| *node.borrow_data())
            .collect::<Vec<_>>();
        assert_eq!(values, [2, 1, 0]);
    }
}
