//! # persist-rope
//!
//! A persistent, balanced rope over generic items and user-defined
//! monoidal measures.
//!
//! A rope is an efficient data structure for large immutable sequences:
//! essentially a binary tree whose leaves hold contiguous runs of items.
//! Concatenation, splitting, and substring extraction share structure with
//! their inputs rather than copying them; occasional rebalancing keeps
//! the tree's depth logarithmic.
//!
//! What makes this rope generic is the [`Measure`](measure::Measure)
//! trait: a rope can be addressed by raw item count, by UTF-8 code-point
//! count, or by line count, all over the same tree shape, by choosing a
//! different measure type parameter.
//!
//! For more information, see the following resources:
//!
//! + http://scienceblogs.com/goodmath/2009/01/26/ropes-twining-together-strings/
//! + https://www.ibm.com/developerworks/library/j-ropes/
//! + http://citeseer.ist.psu.edu/viewdoc/download?doi=10.1.1.14.9450&rep=rep1&type=pdf

pub mod cursor;
pub mod error;
pub mod internals;
pub mod measure;
pub mod slice;

#[cfg(test)]
mod test;

use cursor::{Cursor, ItemCursor};
use error::RopeError;
use internals::node::Node;
use internals::NodeLink;
use measure::{Measure, Utf8};
use slice::Slice;

/// A persistent, balanced rope over items of type `T`, addressed by
/// measure `M`.
///
/// `Rope` is a thin handle around a shared tree root; every transformation
/// below returns a new `Rope` sharing structure with its inputs rather
/// than mutating anything.
#[derive(Clone)]
pub struct Rope<T, M> {
    root: NodeLink<T, M>,
}

impl<T, M> Rope<T, M>
where
    T: Clone,
    M: Measure<T>,
{
    /// The empty rope.
    pub fn empty() -> Self {
        Rope { root: Node::empty() }
    }

    /// Build a rope from an iterator of items.
    pub fn from_sequence<I: IntoIterator<Item = T>>(seq: I) -> Self {
        let items: Vec<T> = seq.into_iter().collect();
        Self::from_buffer(&items)
    }

    /// Build a rope by copying the contents of `items`.
    pub fn from_buffer(items: &[T]) -> Self {
        Rope { root: Node::from_slice(Slice::from_vec(items.to_vec())) }
    }

    fn from_root(root: NodeLink<T, M>) -> Self {
        Rope { root }
    }

    /// Number of items in the rope.
    pub fn size(&self) -> usize {
        self.root.size
    }

    /// Whether the rope contains no items.
    pub fn is_empty(&self) -> bool {
        self.root.size == 0
    }

    /// This rope's aggregate measure.
    pub fn measure(&self) -> M {
        self.root.measure
    }

    /// Invoke `visitor` once per leaf slice, in order — the way to stream
    /// a rope's contents without materializing a single contiguous
    /// buffer.
    pub fn each_chunk<F: FnMut(&[T])>(&self, mut visitor: F) {
        fn walk<T: Clone, M: Measure<T>>(node: &NodeLink<T, M>, visitor: &mut dyn FnMut(&[T])) {
            match &node.value {
                internals::node::Value::Leaf(slice) => {
                    if !slice.is_empty() {
                        visitor(slice.as_slice());
                    }
                }
                internals::node::Value::Branch { left, right } => {
                    walk(left, visitor);
                    walk(right, visitor);
                }
            }
        }
        walk(&self.root, &mut visitor);
    }

    /// Collect the rope's contents into a fresh `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.size());
        self.each_chunk(|chunk| out.extend_from_slice(chunk));
        out
    }

    /// A cursor at the start of the rope, in `M`'s units.
    pub fn begin(&self) -> Cursor<T, M> {
        Cursor::begin(self.root.clone())
    }

    /// A cursor one past the rope's last unit.
    pub fn end(&self) -> Cursor<T, M> {
        Cursor::end(self.root.clone())
    }

    /// A cursor at the start of the rope, addressed by raw item index.
    pub fn begin_items(&self) -> ItemCursor<T, M> {
        ItemCursor::begin(self.root.clone())
    }

    /// A cursor one past the rope's last item.
    pub fn end_items(&self) -> ItemCursor<T, M> {
        ItemCursor::end(self.root.clone())
    }

    /// Concatenate `self` and `other` into a new rope sharing both their
    /// structures.
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_root(Node::branch(self.root.clone(), other.root.clone()))
    }

    /// Rebuild this rope's tree into a balanced shape over the same
    /// sequence of items.
    pub fn balance(&self) -> Self {
        Self::from_root(internals::rebalance(&self.root))
    }

    /// The new rope containing items `[0, index)`.
    pub fn split_before_index(&self, index: usize) -> Self {
        Self::from_root(internals::split_before(&self.root, index))
    }

    /// The new rope containing items `[index, size)`.
    pub fn split_after_index(&self, index: usize) -> Self {
        Self::from_root(internals::split_after(&self.root, index))
    }

    /// The ropes before and after `cursor`'s position.
    pub fn split_before(&self, cursor: &Cursor<T, M>) -> (Self, Self) {
        let index = cursor.raw_index();
        (self.split_before_index(index), self.split_after_index(index))
    }

    /// The ropes before and after one unit past `cursor`'s position.
    pub fn split_after(&self, cursor: &Cursor<T, M>) -> (Self, Self) {
        let next = Cursor::new(self.root.clone(), cursor.position() + M::unit_one());
        let index = next.raw_index();
        (self.split_before_index(index), self.split_after_index(index))
    }

    /// The new rope containing raw items `[start, end)`.
    pub fn substr(&self, start: usize, end: usize) -> Self {
        Self::from_root(internals::substring(&self.root, start, end))
    }

    /// Iterate over this rope's items, in order.
    pub fn iter(&self) -> RopeIter<T, M> {
        RopeIter { root: self.root.clone(), index: 0, size: self.size() }
    }
}

impl Rope<u8, Utf8> {
    /// Decode `bytes` as UTF-8 and build a rope over it.
    ///
    /// # Errors
    /// Returns [`RopeError::InvalidUtf8`] if `bytes` is not valid UTF-8.
    pub fn from_utf8(bytes: &[u8]) -> Result<Self, RopeError> {
        match std::str::from_utf8(bytes) {
            Ok(_) => Ok(Self::from_buffer(bytes)),
            Err(e) => {
                log::debug!("from_utf8: invalid sequence at offset {}", e.valid_up_to());
                Err(RopeError::InvalidUtf8 { offset: e.valid_up_to() })
            }
        }
    }
}

impl<T, M> Default for Rope<T, M>
where
    T: Clone,
    M: Measure<T>,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, M> PartialEq for Rope<T, M>
where
    T: Clone + PartialEq,
    M: Measure<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.to_vec() == other.to_vec()
    }
}

impl<T, M> std::fmt::Debug for Rope<T, M>
where
    T: Clone + std::fmt::Debug,
    M: Measure<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Streaming, item-by-item iteration over a [`Rope`].
pub struct RopeIter<T, M> {
    root: NodeLink<T, M>,
    index: usize,
    size: usize,
}

impl<T: Clone, M> Iterator for RopeIter<T, M> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.size {
            return None;
        }
        let item = ItemCursor::new(self.root.clone(), self.index).get();
        self.index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size - self.index;
        (remaining, Some(remaining))
    }
}
