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

//! # Partial Tours
//!
//! A `PartialTour<T>` is a prefix of a tour: the visited node sequence
//! (always starting at node `0`), its accumulated distance, and a visited
//! bitset for constant-time membership checks.
//!
//! ## Invariants
//!
//! - `1 <= len <= N + 1` and `nodes[0] == 0`.
//! - No node appears twice, except that a closed tour (`len == N + 1`)
//!   ends with node `0` again.
//! - Storage for `N + 1` nodes is reserved on creation and carried over to
//!   every child and clone, so extending a tour never reallocates.
//!
//! Tours are values: expansion produces a child copy, the parent is left
//! untouched and can be dropped once all of its children were generated.

use crate::{error::TourError, index::NodeIndex, num::Weight};
use fixedbitset::FixedBitSet;

/// A prefix of a tour rooted at node `0`.
#[derive(PartialEq, Eq, Hash)]
pub struct PartialTour<T> {
    /// Visited nodes in order. Capacity is always `num_nodes + 1`.
    nodes: Vec<NodeIndex>,
    /// `visited[i]` is set iff node `i` is in `nodes`.
    visited: FixedBitSet,
    /// Sum of edge weights along `nodes`.
    dist: T,
}

impl<T> PartialTour<T>
where
    T: Weight,
{
    /// Creates the seed tour `[0]` with distance `0`.
    ///
    /// # Panics
    ///
    /// Panics if `num_nodes == 0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use drover_model::tour::PartialTour;
    /// let root = PartialTour::<i64>::root(4);
    /// assert_eq!(root.len(), 1);
    /// assert_eq!(root.dist(), 0);
    /// assert_eq!(root.to_string(), "0,0");
    /// ```
    pub fn root(num_nodes: usize) -> Self {
        assert!(
            num_nodes > 0,
            "called `PartialTour::root` for a graph with zero nodes"
        );

        let mut nodes = Vec::with_capacity(num_nodes + 1);
        nodes.push(NodeIndex::ORIGIN);
        let mut visited = FixedBitSet::with_capacity(num_nodes);
        visited.insert(0);

        Self {
            nodes,
            visited,
            dist: T::zero(),
        }
    }

    /// Rebuilds a tour from its node sequence and distance, validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns a `TourError` if the sequence is empty or too long, does not
    /// start at node `0`, references a node outside the graph, or revisits a node.
    pub fn from_parts(num_nodes: usize, sequence: &[NodeIndex], dist: T) -> Result<Self, TourError> {
        let max = num_nodes + 1;
        if sequence.is_empty() || sequence.len() > max {
            return Err(TourError::Length {
                len: sequence.len(),
                max,
            });
        }
        if !sequence[0].is_origin() {
            return Err(TourError::NotRooted(sequence[0]));
        }

        let mut tour = Self::root(num_nodes);
        for (position, &node) in sequence.iter().enumerate().skip(1) {
            if node.get() >= num_nodes {
                return Err(TourError::NodeOutOfRange { node, num_nodes });
            }
            let closes = position == num_nodes && node.is_origin();
            if tour.visited.contains(node.get()) && !closes {
                return Err(TourError::Revisited(node));
            }
            tour.nodes.push(node);
            tour.visited.insert(node.get());
        }
        tour.dist = dist;

        Ok(tour)
    }

    /// Returns the number of nodes `N` of the graph this tour belongs to.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.visited.len()
    }

    /// Returns the number of entries in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tour contains at least node `0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the accumulated distance.
    #[inline]
    pub fn dist(&self) -> T {
        self.dist
    }

    /// Returns the last visited node.
    #[inline]
    pub fn last(&self) -> NodeIndex {
        debug_assert!(!self.nodes.is_empty());
        self.nodes[self.nodes.len() - 1]
    }

    /// Returns the visited node sequence.
    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Returns the reserved capacity (always `N + 1`).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns `true` if `node` was already visited.
    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.visited.contains(node.get())
    }

    /// Returns `true` if every node is visited but the tour is not yet closed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.nodes.len() == self.num_nodes()
    }

    /// Returns `true` if the tour has returned to node `0`.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.nodes.len() == self.num_nodes() + 1
    }

    /// Returns a child tour that additionally visits `node` over an edge of cost `weight`.
    ///
    /// The distance saturates at `T::max_value()`.
    #[inline]
    pub fn extended(&self, node: NodeIndex, weight: T) -> Self {
        debug_assert!(
            !self.contains(node),
            "called `PartialTour::extended` with an already visited node {}",
            node
        );
        debug_assert!(
            self.nodes.len() < self.num_nodes(),
            "called `PartialTour::extended` on a complete tour"
        );

        let mut child = self.clone();
        child.nodes.push(node);
        child.visited.insert(node.get());
        child.dist = child.dist.saturating_add(weight);
        child
    }

    /// Returns the closed tour obtained by returning to node `0` over an edge of cost `weight`.
    #[inline]
    pub fn closed(&self, weight: T) -> Self {
        debug_assert!(
            self.is_complete(),
            "called `PartialTour::closed` on a tour of length {} for {} nodes",
            self.nodes.len(),
            self.num_nodes()
        );

        let mut tour = self.clone();
        tour.nodes.push(NodeIndex::ORIGIN);
        tour.dist = tour.dist.saturating_add(weight);
        tour
    }
}

impl<T> Clone for PartialTour<T>
where
    T: Clone,
{
    // A derived clone would shrink `nodes` to its length.
    fn clone(&self) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.capacity());
        nodes.extend_from_slice(&self.nodes);
        Self {
            nodes,
            visited: self.visited.clone(),
            dist: self.dist.clone(),
        }
    }
}

impl<T> std::fmt::Debug for PartialTour<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialTour")
            .field("nodes", &self.nodes)
            .field("dist", &self.dist)
            .finish()
    }
}

impl<T> std::fmt::Display for PartialTour<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, "->")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, ",{}", self.dist)
    }
}
