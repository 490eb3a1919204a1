//! Breadth-first traversal.

use crate::navigator::Navigator;
use crate::traverse::base::PolicyBase;
use crate::traverse::{OrderPolicy, OrderTag};

/// Breadth-first (level) order: the root, then the nodes of depth 1 from
/// left to right, then the nodes of depth 2, and so on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BreadthFirst;

/// Policy of [`BreadthFirst`].
///
/// This policy keeps no queue of pending nodes. Each step searches the next
/// node of the same depth, so a whole traversal is `O(n * h)` for a tree of
/// `n` nodes and height `h`, not `O(n)`.
#[derive(Debug, Clone)]
pub struct BreadthFirstPolicy<N> {
    /// Position.
    base: PolicyBase<N>,
    /// Depth of the current node relative to the root.
    depth: usize,
}

impl<Nav: Navigator> OrderTag<Nav> for BreadthFirst {
    type Policy = BreadthFirstPolicy<Nav::Node>;

    #[inline]
    fn policy(&self, root: Nav::Node) -> Self::Policy {
        BreadthFirstPolicy {
            base: PolicyBase::new(root),
            depth: 0,
        }
    }
}

/// Direction of a search inside a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Left to right.
    Forward,
    /// Right to left.
    Backward,
}

impl Direction {
    /// Returns the first child in the direction.
    fn first_child<Nav: Navigator>(
        self,
        nav: &mut Nav,
        node: &Nav::Node,
    ) -> Result<Option<Nav::Node>, Nav::Error> {
        match self {
            Self::Forward => nav.first_child(node),
            Self::Backward => nav.last_child(node),
        }
    }

    /// Returns the next sibling in the direction.
    fn next_sibling<Nav: Navigator>(
        self,
        nav: &mut Nav,
        node: &Nav::Node,
    ) -> Result<Option<Nav::Node>, Nav::Error> {
        match self {
            Self::Forward => nav.next_sibling(node),
            Self::Backward => nav.prev_sibling(node),
        }
    }
}

impl<N: Clone> BreadthFirstPolicy<N> {
    /// Returns the first node in the direction at the given depth relative to
    /// `top`, searching only the subtree of `top`.
    fn first_at_depth<Nav>(
        nav: &mut Nav,
        dir: Direction,
        top: &N,
        depth: usize,
    ) -> Result<Option<N>, Nav::Error>
    where
        Nav: Navigator<Node = N>,
    {
        let mut node = top.clone();
        let mut current_depth = 0;
        loop {
            if current_depth == depth {
                return Ok(Some(node));
            }
            if let Some(child) = dir.first_child(nav, &node)? {
                node = child;
                current_depth += 1;
                continue;
            }
            // Dead end. Move to the next branch.
            loop {
                if current_depth == 0 {
                    return Ok(None);
                }
                if let Some(next) = dir.next_sibling(nav, &node)? {
                    node = next;
                    break;
                }
                node = match nav.parent(&node)? {
                    Some(v) => v,
                    None => return Ok(None),
                };
                current_depth -= 1;
            }
        }
    }

    /// Returns the next node in the direction with the same depth.
    fn same_depth_neighbor<Nav>(
        &self,
        nav: &mut Nav,
        dir: Direction,
        node: &N,
    ) -> Result<Option<N>, Nav::Error>
    where
        Nav: Navigator<Node = N>,
    {
        let mut node = node.clone();
        let mut height = 0;
        loop {
            if self.base.is_root(nav, &node) {
                return Ok(None);
            }
            let mut sibling = dir.next_sibling(nav, &node)?;
            while let Some(current) = sibling {
                if let Some(found) = Self::first_at_depth(nav, dir, &current, height)? {
                    return Ok(Some(found));
                }
                sibling = dir.next_sibling(nav, &current)?;
            }
            node = match nav.parent(&node)? {
                Some(v) => v,
                None => return Ok(None),
            };
            height += 1;
        }
    }

    /// Moves to the first node in the direction at the given depth, or makes
    /// the policy exhausted if there is no such node.
    fn go_to_depth<Nav>(
        &mut self,
        nav: &mut Nav,
        dir: Direction,
        depth: usize,
    ) -> Result<(), Nav::Error>
    where
        Nav: Navigator<Node = N>,
    {
        let node = Self::first_at_depth(nav, dir, self.base.root(), depth)?;
        if node.is_some() {
            self.depth = depth;
        }
        self.base.set_current(node);
        Ok(())
    }
}

impl<Nav: Navigator> OrderPolicy<Nav> for BreadthFirstPolicy<Nav::Node> {
    #[inline]
    fn root(&self) -> &Nav::Node {
        self.base.root()
    }

    #[inline]
    fn current(&self) -> Option<&Nav::Node> {
        self.base.current()
    }

    fn increment(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let current = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        if let Some(next) = self.same_depth_neighbor(nav, Direction::Forward, &current)? {
            self.base.set_current(Some(next));
            return Ok(());
        }
        self.go_to_depth(nav, Direction::Forward, self.depth + 1)
    }

    fn decrement(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let current = match self.base.cloned_current() {
            Some(v) => v,
            None => return Ok(()),
        };
        if let Some(prev) = self.same_depth_neighbor(nav, Direction::Backward, &current)? {
            self.base.set_current(Some(prev));
            return Ok(());
        }
        match self.depth.checked_sub(1) {
            Some(depth) => self.go_to_depth(nav, Direction::Backward, depth),
            None => {
                self.base.set_current(None);
                Ok(())
            }
        }
    }

    #[inline]
    fn go_first(&mut self, _nav: &mut Nav) -> Result<(), Nav::Error> {
        self.base.set_current_to_root();
        self.depth = 0;
        Ok(())
    }

    fn go_last(&mut self, nav: &mut Nav) -> Result<(), Nav::Error> {
        let mut last = self.base.root().clone();
        let mut depth = 0;
        while let Some(deeper) =
            Self::first_at_depth(nav, Direction::Backward, self.base.root(), depth + 1)?
        {
            last = deeper;
            depth += 1;
        }
        self.base.set_current(Some(last));
        self.depth = depth;
        Ok(())
    }

    fn reset_to(&mut self, nav: &mut Nav, node: Option<Nav::Node>) -> Result<(), Nav::Error> {
        let depth = match &node {
            Some(node) => self.base.depth_of(nav, node)?,
            None => None,
        };
        match depth {
            Some(depth) => {
                self.depth = depth;
                self.base.set_current(node);
            }
            None => self.base.set_current(None),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;

    use crate::navigator::DirectNavigator;
    use crate::traverse::Cursor;
    use crate::{binary_tree, nary_tree};

    #[test]
    fn levels_skip_over_empty_branches() {
        let tree = nary_tree! { 0, [(1, [(3, [6])]), 2, (4, [(5, [7, 8])])] };
        let values = tree
            .root()
            .traverse(BreadthFirst)
            .map(|node| *node.borrow_data())
            .collect::<Vec<_>>();
        assert_eq!(values, [0, 1, 2, 4, 3, 5, 6, 7, 8]);

        let reversed = tree
            .root()
            .traverse(BreadthFirst)
            .rev()
            .map(|node| *node.borrow_data())
            .collect::<Vec<_>>();
        assert_eq!(reversed, [8, 7, 6, 5, 3, 4, 2, 1, 0]);
    }

    #[test]
    fn reset_computes_depth() {
        let tree = binary_tree! { 'a', [('b', ['d']), ('c', [_, 'e'])] };
        let d = tree
            .root()
            .left_child()
            .and_then(|b| b.left_child())
            .expect("d exists");
        let mut cursor =
            Cursor::with_position(BreadthFirst, DirectNavigator::new(), tree.root(), d)
                .expect("infallible");

        let prev = cursor
            .move_prev()
            .expect("infallible")
            .map(|node| *node.borrow_data());
        assert_eq!(prev, Some('c'));
        cursor.move_next().expect("infallible");
        let next = cursor
            .move_next()
            .expect("infallible")
            .map(|node| *node.borrow_data());
        assert_eq!(next, Some('e'));
        assert!(cursor.move_next().expect("infallible").is_none());
    }
}
