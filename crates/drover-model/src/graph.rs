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

//! # Edge Cost Model
//!
//! `Graph<T>` is the immutable N×N weight matrix every participant reads.
//! It is built once (from rows, a `GraphBuilder`, or a generator) and is
//! never mutated afterwards, so it can be shared by reference across all
//! participant threads without synchronization.
//!
//! A weight of `0` encodes the absence of an edge. Self-loops are never
//! traversed, the only exception being the trivial tour `[0, 0]` of a
//! single-node graph, which closes at cost `0`.

use crate::{error::GraphError, index::NodeIndex, num::Weight};

/// Flattens a `(from, to)` pair into the row-major weight vector.
#[inline(always)]
fn flatten_index(num_nodes: usize, from: NodeIndex, to: NodeIndex) -> usize {
    from.get() * num_nodes + to.get()
}

/// The immutable Edge Cost Model of a directed TSP instance.
///
/// Weights are stored in a single row-major vector:
/// `weights[from * num_nodes + to]` is the cost of edge `from -> to`.
#[derive(Clone, PartialEq, Eq)]
pub struct Graph<T> {
    num_nodes: usize,
    weights: Vec<T>, // len = num_nodes * num_nodes
}

impl<T> Graph<T>
where
    T: Weight,
{
    /// Builds a graph from a square matrix given row by row.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty, not square, or contains
    /// a negative weight.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use drover_model::graph::Graph;
    /// # use drover_model::index::NodeIndex;
    ///
    /// let g = Graph::<i64>::from_rows(&[[0, 4], [2, 0]]).unwrap();
    /// assert_eq!(g.num_nodes(), 2);
    /// assert_eq!(g.edge(NodeIndex::new(0), NodeIndex::new(1)), Some(4));
    /// assert_eq!(g.edge(NodeIndex::new(0), NodeIndex::new(0)), None);
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, GraphError>
    where
        R: AsRef<[T]>,
    {
        let num_nodes = rows.len();
        if num_nodes == 0 {
            return Err(GraphError::Empty);
        }

        let mut weights = Vec::with_capacity(num_nodes * num_nodes);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != num_nodes {
                return Err(GraphError::Ragged {
                    row: row_index,
                    len: row.len(),
                    expected: num_nodes,
                });
            }
            for (col_index, &w) in row.iter().enumerate() {
                if w < T::zero() {
                    return Err(GraphError::NegativeWeight {
                        from: NodeIndex::new(row_index),
                        to: NodeIndex::new(col_index),
                    });
                }
            }
            weights.extend_from_slice(row);
        }

        Ok(Self { num_nodes, weights })
    }

    /// Returns the number of nodes `N`.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the raw weight of `from -> to` (`0` if there is no edge).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> T {
        debug_assert!(
            from.get() < self.num_nodes && to.get() < self.num_nodes,
            "called `Graph::weight` with node index out of bounds: the len is {} but the indices are {} and {}",
            self.num_nodes,
            from,
            to
        );

        self.weights[flatten_index(self.num_nodes, from, to)]
    }

    /// Returns the weight of `from -> to`, or `None` if the edge is absent.
    #[inline]
    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<T> {
        let w = self.weight(from, to);
        if w.is_zero() { None } else { Some(w) }
    }

    /// Returns the cost of closing a tour whose last node is `last`,
    /// i.e. the edge `last -> 0`.
    ///
    /// A single-node graph has exactly one tour, `[0, 0]`, which closes at cost `0`.
    #[inline]
    pub fn closing_weight(&self, last: NodeIndex) -> Option<T> {
        if self.num_nodes == 1 {
            return Some(T::zero());
        }
        self.edge(last, NodeIndex::ORIGIN)
    }

    /// Returns the weights leaving `from`.
    #[inline]
    pub fn row(&self, from: NodeIndex) -> &[T] {
        let start = flatten_index(self.num_nodes, from, NodeIndex::ORIGIN);
        &self.weights[start..start + self.num_nodes]
    }

    /// Returns the flattened row-major weight matrix.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Returns the number of edges present (non-zero off-diagonal weights).
    pub fn num_edges(&self) -> usize {
        (0..self.num_nodes)
            .flat_map(|i| (0..self.num_nodes).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j && !self.weights[i * self.num_nodes + j].is_zero())
            .count()
    }

    /// Returns a helper that renders the matrix in a boxed, fixed-width layout.
    #[inline]
    pub fn matrix(&self) -> MatrixDisplay<'_, T> {
        MatrixDisplay { graph: self }
    }
}

impl<T> std::fmt::Debug for Graph<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("num_nodes", &self.num_nodes)
            .field("weights", &self.weights)
            .finish()
    }
}

impl<T> std::fmt::Display for Graph<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph(num_nodes: {}, num_edges: {})",
            self.num_nodes,
            self.num_edges()
        )
    }
}

/// Renders a `Graph` as an edge matrix, one row per line.
pub struct MatrixDisplay<'a, T> {
    graph: &'a Graph<T>,
}

impl<T> std::fmt::Display for MatrixDisplay<'_, T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Edge Matrix:")?;
        for row in self.graph.weights.chunks_exact(self.graph.num_nodes) {
            write!(f, "|")?;
            for w in row {
                write!(f, " {:>2}", w)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

/// Mutable construction helper for `Graph`.
///
/// The builder starts **disconnected**: every weight is `0`, so no edge
/// exists until it is set explicitly.
#[derive(Clone, Debug)]
pub struct GraphBuilder<T> {
    num_nodes: usize,
    weights: Vec<T>,
}

impl<T> GraphBuilder<T>
where
    T: Weight,
{
    /// Creates a builder for a graph with `num_nodes` nodes and no edges.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use drover_model::graph::GraphBuilder;
    /// # use drover_model::index::NodeIndex;
    ///
    /// let mut builder = GraphBuilder::<i64>::new(3);
    /// builder.set_edge(NodeIndex::new(0), NodeIndex::new(2), 7);
    /// let g = builder.build();
    /// assert_eq!(g.edge(NodeIndex::new(0), NodeIndex::new(2)), Some(7));
    /// assert_eq!(g.edge(NodeIndex::new(2), NodeIndex::new(0)), None);
    /// ```
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            weights: vec![T::zero(); num_nodes * num_nodes],
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Sets the weight of `from -> to`. A weight of `0` removes the edge.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range or `weight` is negative.
    #[inline]
    pub fn set_edge(&mut self, from: NodeIndex, to: NodeIndex, weight: T) -> &mut Self {
        assert!(
            from.get() < self.num_nodes && to.get() < self.num_nodes,
            "called `GraphBuilder::set_edge` with node index out of bounds: the len is {} but the indices are {} and {}",
            self.num_nodes,
            from,
            to
        );
        assert!(
            weight >= T::zero(),
            "called `GraphBuilder::set_edge` with a negative weight for {} -> {}",
            from,
            to
        );

        self.weights[flatten_index(self.num_nodes, from, to)] = weight;
        self
    }

    /// Removes the edge `from -> to`.
    #[inline]
    pub fn remove_edge(&mut self, from: NodeIndex, to: NodeIndex) -> &mut Self {
        self.set_edge(from, to, T::zero())
    }

    /// Builds the immutable `Graph`.
    ///
    /// # Panics
    ///
    /// Panics if the builder was created with zero nodes.
    pub fn build(self) -> Graph<T> {
        assert!(
            self.num_nodes > 0,
            "called `GraphBuilder::build` on a builder with zero nodes"
        );

        Graph {
            num_nodes: self.num_nodes,
            weights: self.weights,
        }
    }
}
