// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Node Indices
//!
//! A `usize` newtype for graph nodes so node ids are never confused with
//! ranks, tour lengths or slot offsets. `#[repr(transparent)]`, so it costs
//! nothing at runtime.

/// The index of a node in the Edge Cost Model.
///
/// # Examples
///
/// ```rust
/// use drover_model::index::NodeIndex;
///
/// let n = NodeIndex::new(3);
/// assert_eq!(n.get(), 3);
/// assert_eq!(format!("{}", n), "3");
/// assert_eq!(format!("{:?}", n), "NodeIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// The start (and end) node of every tour.
    pub const ORIGIN: NodeIndex = NodeIndex(0);

    /// Creates a new `NodeIndex`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize`.
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns `true` if this is the origin node `0`.
    #[inline(always)]
    pub const fn is_origin(self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for NodeIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<NodeIndex> for usize {
    #[inline(always)]
    fn from(index: NodeIndex) -> Self {
        index.0
    }
}

impl std::fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::NodeIndex;

    #[test]
    fn test_origin_and_conversions() {
        assert!(NodeIndex::ORIGIN.is_origin());
        assert!(!NodeIndex::new(2).is_origin());
        let n: NodeIndex = 7usize.into();
        let raw: usize = n.into();
        assert_eq!(raw, 7);
        assert_eq!(NodeIndex::default(), NodeIndex::ORIGIN);
    }

    #[test]
    fn test_ordering_follows_usize() {
        assert!(NodeIndex::new(1) < NodeIndex::new(2));
        let mut v = vec![NodeIndex::new(3), NodeIndex::new(0), NodeIndex::new(2)];
        v.sort();
        assert_eq!(v, vec![NodeIndex::new(0), NodeIndex::new(2), NodeIndex::new(3)]);
    }
}
