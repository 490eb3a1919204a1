//! Tests for lock-step traversal of pointer bundles.

use pretty_assertions::assert_eq;

use sylvan::navigator::ZipNavigator;
use sylvan::traverse::{BreadthFirst, InOrder, PostOrder, PreOrder};
use sylvan::{
    binary_tree, nary_tree, AnyNode, BinaryNode, Bundle, BundleError, Navigator, ShapeKind,
    Traverser,
};

/// Returns the data of every slot of the bundle.
fn slot_values(bundle: &Bundle<BinaryNode<i32>, 2>) -> [Option<i32>; 3] {
    let mut values = [None; 3];
    for (value, slot) in values.iter_mut().zip(bundle.slots()) {
        *value = slot.map(|node| *node.borrow_data());
    }
    values
}

#[test]
fn zip_traversal_follows_main_tree() {
    let main = binary_tree! { 1, [(2, [4, 5]), 3] };
    let partial = binary_tree! { 10, [(20, [40])] };
    let mirrored = binary_tree! { 100, [(200, [400, 500]), 300] };
    let root = Bundle::new(
        Some(main.root()),
        [Some(partial.root()), Some(mirrored.root())],
    )
    .expect("all trees are binary");

    let visited = Traverser::new(PreOrder, ZipNavigator::new(), root.clone())
        .nodes()
        .map(|bundle| slot_values(&bundle))
        .collect::<Vec<_>>();
    assert_eq!(
        visited,
        [
            [Some(1), Some(10), Some(100)],
            [Some(2), Some(20), Some(200)],
            [Some(4), Some(40), Some(400)],
            [Some(5), None, Some(500)],
            [Some(3), None, Some(300)],
        ]
    );

    let in_order = Traverser::new(InOrder, ZipNavigator::new(), root.clone())
        .nodes()
        .map(|bundle| slot_values(&bundle)[2])
        .collect::<Vec<_>>();
    assert_eq!(in_order, [Some(400), Some(200), Some(500), Some(100), Some(300)]);

    let post_order_rev = Traverser::new(PostOrder, ZipNavigator::new(), root)
        .nodes()
        .rev()
        .map(|bundle| slot_values(&bundle)[0])
        .collect::<Vec<_>>();
    assert_eq!(post_order_rev, [Some(1), Some(3), Some(2), Some(5), Some(4)]);
}

#[test]
fn null_slot_stays_null_below() {
    let main = nary_tree! { 0, [(1, [(2, [3])])] };
    let short = nary_tree! { 0, [1] };
    let root = Bundle::new(Some(main.root()), [Some(short.root())]).expect("all trees are n-ary");

    let mut nav = ZipNavigator::new();
    let mut current = root;
    let mut depths = Vec::new();
    while let Some(child) = nav.first_child(&current).expect("infallible") {
        depths.push(child.other(0).is_some());
        current = child;
    }
    assert_eq!(depths, [true, false, false]);

    // Climbing back never resurrects the null slot.
    let parent = nav
        .parent(&current)
        .expect("infallible")
        .expect("`3` has a parent");
    assert_eq!(parent.main().map(|node| *node.borrow_data()), Some(2));
    assert!(parent.other(0).is_none());
}

#[test]
fn breadth_first_over_bundles() {
    let lhs = nary_tree! { "a", [("b", ["d"]), ("c", ["e", "f"])] };
    let rhs = nary_tree! { "A", [("B", ["D"]), ("C", ["E", "F"])] };
    let root = Bundle::new(Some(lhs.root()), [Some(rhs.root())]).expect("all trees are n-ary");

    let visited = Traverser::new(BreadthFirst, ZipNavigator::new(), root)
        .nodes()
        .map(|bundle| {
            let lhs = bundle.main().map(|node| *node.borrow_data());
            let rhs = bundle.other(0).map(|node| *node.borrow_data());
            (lhs, rhs)
        })
        .collect::<Vec<_>>();
    assert_eq!(
        visited,
        ["a", "b", "c", "d", "e", "f"]
            .iter()
            .zip(["A", "B", "C", "D", "E", "F"])
            .map(|(lhs, rhs)| (Some(*lhs), Some(rhs)))
            .collect::<Vec<_>>()
    );
}

#[test]
fn mixed_shapes_are_rejected() {
    let binary = AnyNode::from(binary_tree! { 0, [1] }.root());
    let nary = AnyNode::from(nary_tree! { 0, [1] }.root());

    assert_eq!(
        Bundle::new(Some(nary.clone()), [Some(binary.clone())]).map(|_| ()),
        Err(BundleError::TypeMismatch {
            slot: 1,
            expected: ShapeKind::Nary,
            found: ShapeKind::Binary,
        })
    );

    // Shapes are checked only for non-null slots.
    let bundle = Bundle::new(None, [Some(binary), None]).expect("single shape");
    assert!(bundle.is_null());
    assert!(bundle.first_child().other(0).is_some());
    assert!(bundle.first_child().other(1).is_none());
}
