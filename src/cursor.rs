//! A position inside a rope, expressed in a chosen measure's units.

use crate::internals::node::Value;
use crate::internals::NodeLink;
use crate::measure::Measure;

#[cfg(not(feature = "atomic"))]
use std::rc::Rc as Ref;
#[cfg(feature = "atomic")]
use std::sync::Arc as Ref;

/// One level of a cursor's root-to-leaf path: the node the cursor is
/// currently inside, and its position within that node's subtree,
/// expressed in `M`'s units.
struct Frame<T, M> {
    node: NodeLink<T, M>,
    target: M::Unit,
}

/// An ordered stack of frames from the root of a rope down to the leaf the
/// cursor currently addresses.
///
/// A cursor is anchored to one root; comparing or subtracting two cursors
/// anchored to different roots is a contract violation.
pub struct Cursor<T, M> {
    root: NodeLink<T, M>,
    frames: Vec<Frame<T, M>>,
}

impl<T, M> Cursor<T, M>
where
    T: Clone,
    M: Measure<T>,
{
    /// A cursor at `target` units from the start of `root`.
    pub(crate) fn new(root: NodeLink<T, M>, target: M::Unit) -> Self {
        let mut cursor = Cursor { frames: vec![Frame { node: root.clone(), target }], root };
        cursor.push_to_leaf();
        cursor
    }

    /// A cursor at the start of `root`.
    pub(crate) fn begin(root: NodeLink<T, M>) -> Self {
        Self::new(root, M::Unit::default())
    }

    /// A cursor one past the last addressable unit of `root` — forward
    /// iteration from `begin()` to `end()` terminates cleanly.
    pub(crate) fn end(root: NodeLink<T, M>) -> Self {
        let past_last = root.measure.unit_of() + M::unit_one();
        Self::new(root, past_last)
    }

    /// Descend from the current tip of the stack to the leaf that contains
    /// `target`, pushing one frame per level.
    fn push_to_leaf(&mut self) {
        loop {
            let (node, target) = {
                let top = self.frames.last().unwrap();
                (top.node.clone(), top.target)
            };
            match &node.value {
                Value::Leaf(_) => return,
                Value::Branch { left, right } => {
                    let lcap = left.measure.unit_of();
                    if target < lcap {
                        self.frames.push(Frame { node: left.clone(), target });
                    } else {
                        self.frames.push(Frame { node: right.clone(), target: target - lcap });
                    }
                }
            }
        }
    }

    /// The absolute item index the cursor currently sits at.
    pub fn raw_index(&self) -> usize {
        let mut index = 0usize;
        for i in 0..self.frames.len() {
            let frame = &self.frames[i];
            match &frame.node.value {
                Value::Leaf(slice) => {
                    index += M::locate(slice.as_slice(), frame.target);
                }
                Value::Branch { left, right: _ } => {
                    if let Some(next) = self.frames.get(i + 1) {
                        if !Ref::ptr_eq(&next.node, left) {
                            index += left.size;
                        }
                    }
                }
            }
        }
        index
    }

    /// The item the cursor currently addresses.
    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        let frame = self.frames.last().unwrap();
        match &frame.node.value {
            Value::Leaf(slice) => {
                let i = M::locate(slice.as_slice(), frame.target);
                slice.as_slice().get(i).cloned()
            }
            Value::Branch { .. } => unreachable!("push_to_leaf always lands on a leaf"),
        }
    }

    /// Advance the cursor forward by `n` units, saturating at `end()`.
    pub fn advance(&mut self, n: M::Unit) {
        while self.frames.len() > 1 {
            let top_exceeds = {
                let top = self.frames.last().unwrap();
                top.target + n > top.node.measure.unit_of()
            };
            if !top_exceeds {
                break;
            }
            self.frames.pop();
        }
        for frame in &mut self.frames {
            frame.target = frame.target + n;
        }
        self.push_to_leaf();
    }

    /// Retreat the cursor backward by `n` units, saturating at `begin()`.
    pub fn retreat(&mut self, n: M::Unit) {
        let zero = M::Unit::default();
        while self.frames.len() > 1 {
            let below = {
                let top = self.frames.last().unwrap();
                top.target < n
            };
            if !below {
                break;
            }
            self.frames.pop();
        }
        for frame in &mut self.frames {
            frame.target = if frame.target < n { zero } else { frame.target - n };
        }
        self.push_to_leaf();
    }

    /// Whether `self` and `other` are anchored to the same tree.
    pub fn same_root(&self, other: &Self) -> bool {
        Ref::ptr_eq(&self.root, &other.root)
    }

    /// Position, in units, from the start of the shared root.
    pub fn position(&self) -> M::Unit {
        self.frames[0].target
    }
}

impl<T, M> PartialEq for Cursor<T, M>
where
    T: Clone,
    M: Measure<T>,
{
    fn eq(&self, other: &Self) -> bool {
        assert!(self.same_root(other), "cannot compare cursors anchored to different roots");
        self.position() == other.position()
    }
}

impl<T, M> Eq for Cursor<T, M>
where
    T: Clone,
    M: Measure<T>,
{
}

impl<T, M> PartialOrd for Cursor<T, M>
where
    T: Clone,
    M: Measure<T>,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        assert!(self.same_root(other), "cannot compare cursors anchored to different roots");
        self.position().partial_cmp(&other.position())
    }
}

/// One level of an [`ItemCursor`]'s root-to-leaf path.
struct ItemFrame<T, M> {
    node: NodeLink<T, M>,
    target: usize,
}

/// A cursor addressing a rope purely by raw item index, independent of
/// whatever measure `M` the tree was built under.
///
/// This walks the same tree `Cursor` does, but compares against each
/// node's `size` rather than `measure.unit_of()`, so it never needs `M` to
/// implement anything beyond what `Node` itself already requires.
pub struct ItemCursor<T, M> {
    root: NodeLink<T, M>,
    frames: Vec<ItemFrame<T, M>>,
}

impl<T: Clone, M> ItemCursor<T, M> {
    pub(crate) fn new(root: NodeLink<T, M>, target: usize) -> Self {
        let mut cursor = ItemCursor { frames: vec![ItemFrame { node: root.clone(), target }], root };
        cursor.push_to_leaf();
        cursor
    }

    pub(crate) fn begin(root: NodeLink<T, M>) -> Self {
        Self::new(root, 0)
    }

    pub(crate) fn end(root: NodeLink<T, M>) -> Self {
        let size = root.size;
        Self::new(root, size)
    }

    fn push_to_leaf(&mut self) {
        loop {
            let (node, target) = {
                let top = self.frames.last().unwrap();
                (top.node.clone(), top.target)
            };
            match &node.value {
                Value::Leaf(_) => return,
                Value::Branch { left, right } => {
                    if target < left.size {
                        self.frames.push(ItemFrame { node: left.clone(), target });
                    } else {
                        self.frames.push(ItemFrame { node: right.clone(), target: target - left.size });
                    }
                }
            }
        }
    }

    /// The raw item index this cursor addresses.
    pub fn raw_index(&self) -> usize {
        self.frames[0].target
    }

    /// The item this cursor addresses, or `None` at `end()`.
    pub fn get(&self) -> Option<T> {
        let frame = self.frames.last().unwrap();
        match &frame.node.value {
            Value::Leaf(slice) => slice.as_slice().get(frame.target).cloned(),
            Value::Branch { .. } => unreachable!("push_to_leaf always lands on a leaf"),
        }
    }

    pub fn same_root(&self, other: &Self) -> bool {
        Ref::ptr_eq(&self.root, &other.root)
    }
}

impl<T: Clone, M> PartialEq for ItemCursor<T, M> {
    fn eq(&self, other: &Self) -> bool {
        assert!(self.same_root(other), "cannot compare cursors anchored to different roots");
        self.raw_index() == other.raw_index()
    }
}

impl<T: Clone, M> Eq for ItemCursor<T, M> {}
