//! Debug printing of a subtree.

use core::fmt;

use crate::node::internal::TreeCore;
use crate::node::shape::Shape;
use crate::node::NodeId;

/// Raw string for debug printing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct RawStr<'a>(&'a str);

impl fmt::Debug for RawStr<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A wrapper to make a subtree debug-printable.
#[derive(Clone, Copy)]
pub(crate) struct DebugPrintSubtree<'a, T, S: Shape> {
    /// Tree core.
    core: &'a TreeCore<T, S>,
    /// Root of the subtree to print.
    id: NodeId,
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for DebugPrintSubtree<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("Node");
        ds.field("data", self.core.data(self.id));
        if self.core.first_child(self.id).is_some() {
            ds.field(
                "children",
                &DebugPrintSubtreeChildren {
                    core: self.core,
                    id: self.id,
                },
            );
        }
        ds.finish()
    }
}

impl<'a, T, S: Shape> DebugPrintSubtree<'a, T, S> {
    /// Creates a new `DebugPrintSubtree`.
    #[inline]
    #[must_use]
    pub(crate) fn new(core: &'a TreeCore<T, S>, id: NodeId) -> Self {
        Self { core, id }
    }
}

/// An internal wrapper for children of `DebugPrintSubtree` target.
///
/// Empty slots of binary nodes are printed as `_`.
#[derive(Clone, Copy)]
struct DebugPrintSubtreeChildren<'a, T, S: Shape> {
    /// Tree core.
    core: &'a TreeCore<T, S>,
    /// Parent of the children to print.
    id: NodeId,
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for DebugPrintSubtreeChildren<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dl = f.debug_list();
        for slot in 0..self.core.slot_count(self.id) {
            match self.core.child_at_slot(self.id, slot) {
                Some(child) => dl.entry(&DebugPrintSubtree::new(self.core, child)),
                None => dl.entry(&RawStr("_")),
            };
        }
        dl.finish()
    }
}
