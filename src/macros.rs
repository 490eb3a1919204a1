//! Macros.

/// A macro that evaluates to a new binary tree.
///
/// Children are listed in `[left, right]` order. `_` is an empty slot, and
/// `[left]` is the same as `[left, _]`. A child is either a bare expression,
/// `(data)`, or `(data, [children])`.
///
/// # Examples
///
/// ```
/// use sylvan::binary_tree;
/// use sylvan::traverse::InOrder;
///
/// let tree = binary_tree! {
///     "a", [
///         ("b", [
///             ("d", ["h"]),
///             "e",
///         ]),
///         ("c", [
///             ("f", ["j", "k"]),
///             "g",
///         ]),
///     ]
/// };
///
/// assert_eq!(tree.size(), 10);
/// assert_eq!(
///     tree.root()
///         .traverse(InOrder)
///         .map(|node| *node.borrow_data())
///         .collect::<Vec<_>>(),
///     ["h", "d", "b", "e", "a", "j", "f", "k", "c", "g"]
/// );
///
/// let right_only = binary_tree! { 1, [_, 2] };
/// assert!(right_only.root().left_child().is_none());
/// ```
#[macro_export]
macro_rules! binary_tree {
    (@@child $parent:ident, [$($slots:ident)*];) => {};
    (@@child $parent:ident, [$slot:ident $($slots:ident)*]; _ $(, $($rest:tt)*)?) => {
        $crate::binary_tree!(@@child $parent, [$($slots)*]; $($($rest)*)?);
    };
    (
        @@child $parent:ident, [$slot:ident $($slots:ident)*];
        ($data:expr, [$($children:tt)*]) $(, $($rest:tt)*)?
    ) => {
        {
            let node = $parent.$slot($data);
            $crate::binary_tree!(
                @@child node, [create_left_child create_right_child]; $($children)*
            );
        }
        $crate::binary_tree!(@@child $parent, [$($slots)*]; $($($rest)*)?);
    };
    (@@child $parent:ident, [$slot:ident $($slots:ident)*]; ($data:expr) $(, $($rest:tt)*)?) => {
        $parent.$slot($data);
        $crate::binary_tree!(@@child $parent, [$($slots)*]; $($($rest)*)?);
    };
    (@@child $parent:ident, [$slot:ident $($slots:ident)*]; $data:expr $(, $($rest:tt)*)?) => {
        $parent.$slot($data);
        $crate::binary_tree!(@@child $parent, [$($slots)*]; $($($rest)*)?);
    };
    () => {
        compile_error!("tree should have a root node")
    };
    ($data:expr) => {
        $crate::BinaryTree::new($data)
    };
    ($data:expr, [$($children:tt)*]) => {{
        let tree = $crate::BinaryTree::new($data);
        {
            let root = tree.root();
            $crate::binary_tree!(
                @@child root, [create_left_child create_right_child]; $($children)*
            );
        }
        tree
    }};
}

/// A macro that evaluates to a new n-ary tree.
///
/// A child is either a bare expression, `(data)`, or `(data, [children])`.
///
/// # Examples
///
/// ```
/// use sylvan::nary_tree;
/// use sylvan::traverse::BreadthFirst;
///
/// let tree = nary_tree! {
///     "root", [
///         ("0", ["0-0", "0-1"]),
///         "1",
///         ("2", [("2-0", ["2-0-0"])]),
///     ]
/// };
///
/// assert_eq!(
///     tree.root()
///         .traverse(BreadthFirst)
///         .map(|node| *node.borrow_data())
///         .collect::<Vec<_>>(),
///     ["root", "0", "1", "2", "0-0", "0-1", "2-0", "2-0-0"]
/// );
/// ```
#[macro_export]
macro_rules! nary_tree {
    (@@child $parent:ident;) => {};
    (@@child $parent:ident; ($data:expr, [$($children:tt)*]) $(, $($rest:tt)*)?) => {
        {
            let node = $parent.create_last_child($data);
            $crate::nary_tree!(@@child node; $($children)*);
        }
        $crate::nary_tree!(@@child $parent; $($($rest)*)?);
    };
    (@@child $parent:ident; ($data:expr) $(, $($rest:tt)*)?) => {
        $parent.create_last_child($data);
        $crate::nary_tree!(@@child $parent; $($($rest)*)?);
    };
    (@@child $parent:ident; $data:expr $(, $($rest:tt)*)?) => {
        $parent.create_last_child($data);
        $crate::nary_tree!(@@child $parent; $($($rest)*)?);
    };
    () => {
        compile_error!("tree should have a root node")
    };
    ($data:expr) => {
        $crate::NaryTree::new($data)
    };
    ($data:expr, [$($children:tt)*]) => {{
        let tree = $crate::NaryTree::new($data);
        {
            let root = tree.root();
            $crate::nary_tree!(@@child root; $($children)*);
        }
        tree
    }};
}
