//! State shared by the order policies.

use crate::navigator::Navigator;

/// Cursor position and traversal root.
///
/// Relations looked up through the `*_within` methods never leave the
/// subtree of the root: the root has neither parent nor siblings.
#[derive(Debug, Clone)]
pub struct PolicyBase<N> {
    /// Root of the traversal.
    root: N,
    /// Current node.
    ///
    /// `None` if exhausted.
    current: Option<N>,
}

impl<N: Clone> PolicyBase<N> {
    /// Creates an exhausted base for the subtree of the given root.
    #[inline]
    #[must_use]
    pub fn new(root: N) -> Self {
        Self {
            root,
            current: None,
        }
    }

    /// Returns the root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &N {
        &self.root
    }

    /// Returns the current node.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&N> {
        self.current.as_ref()
    }

    /// Returns a clone of the current node.
    #[inline]
    #[must_use]
    pub fn cloned_current(&self) -> Option<N> {
        self.current.clone()
    }

    /// Sets the current node.
    #[inline]
    pub fn set_current(&mut self, current: Option<N>) {
        self.current = current;
    }

    /// Moves the current node to the root.
    #[inline]
    pub fn set_current_to_root(&mut self) {
        self.current = Some(self.root.clone());
    }

    /// Returns `true` if the node is the root.
    #[inline]
    #[must_use]
    pub fn is_root<Nav>(&self, nav: &Nav, node: &N) -> bool
    where
        Nav: Navigator<Node = N>,
    {
        nav.ptr_eq(node, &self.root)
    }

    /// Returns the parent, unless the node is the root.
    pub fn parent_within<Nav>(&self, nav: &mut Nav, node: &N) -> Result<Option<N>, Nav::Error>
    where
        Nav: Navigator<Node = N>,
    {
        if self.is_root(nav, node) {
            return Ok(None);
        }
        nav.parent(node)
    }

    /// Returns the next sibling, unless the node is the root.
    pub fn next_sibling_within<Nav>(
        &self,
        nav: &mut Nav,
        node: &N,
    ) -> Result<Option<N>, Nav::Error>
    where
        Nav: Navigator<Node = N>,
    {
        if self.is_root(nav, node) {
            return Ok(None);
        }
        nav.next_sibling(node)
    }

    /// Returns the previous sibling, unless the node is the root.
    pub fn prev_sibling_within<Nav>(
        &self,
        nav: &mut Nav,
        node: &N,
    ) -> Result<Option<N>, Nav::Error>
    where
        Nav: Navigator<Node = N>,
    {
        if self.is_root(nav, node) {
            return Ok(None);
        }
        nav.prev_sibling(node)
    }

    /// Returns the depth of the node relative to the root.
    ///
    /// Returns `None` if the node is not a descendant-or-self of the root.
    pub fn depth_of<Nav>(&self, nav: &mut Nav, node: &N) -> Result<Option<usize>, Nav::Error>
    where
        Nav: Navigator<Node = N>,
    {
        let mut node = node.clone();
        let mut depth = 0;
        while !self.is_root(nav, &node) {
            node = match nav.parent(&node)? {
                Some(v) => v,
                None => return Ok(None),
            };
            depth += 1;
        }
        Ok(Some(depth))
    }
}

/// Follows `step` from the node repeatedly while it returns a node, and
/// returns the last node reached.
pub(crate) fn descend<Nav, F>(
    nav: &mut Nav,
    node: Nav::Node,
    mut step: F,
) -> Result<Nav::Node, Nav::Error>
where
    Nav: Navigator,
    F: FnMut(&mut Nav, &Nav::Node) -> Result<Option<Nav::Node>, Nav::Error>,
{
    let mut node = node;
    while let Some(next) = step(nav, &node)? {
        node = next;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::nary_tree;
    use crate::navigator::DirectNavigator;

    #[test]
    fn relations_stop_at_root() {
        let tree = nary_tree! { 0, [(1, [2, 3]), 4] };
        let child = tree.root().first_child().expect("has children");
        let base = PolicyBase::new(child.clone());
        let mut nav = DirectNavigator::new();

        assert!(base.parent_within(&mut nav, &child).expect("infallible").is_none());
        assert!(base.next_sibling_within(&mut nav, &child).expect("infallible").is_none());

        let grandchild = child.last_child().expect("has children");
        assert!(base
            .prev_sibling_within(&mut nav, &grandchild)
            .expect("infallible")
            .is_some());
        assert_eq!(base.depth_of(&mut nav, &grandchild).expect("infallible"), Some(1));
        assert_eq!(base.depth_of(&mut nav, &tree.root()).expect("infallible"), None);
    }

    #[test]
    fn descend_reaches_leaf() {
        let tree = nary_tree! { 0, [1, (2, [3, (4, [5])])] };
        let mut nav = DirectNavigator::new();
        let last =
            descend(&mut nav, tree.root(), DirectNavigator::last_child).expect("infallible");
        assert_eq!(*last.borrow_data(), 5);
    }
}
