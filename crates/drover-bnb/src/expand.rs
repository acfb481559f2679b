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

//! One-level expansion of a partial tour.
//!
//! This is the single branching rule of the solver. The worker engine uses
//! it for every node it pops; the manager uses it to split a pending tour
//! when its global stack runs dry. A child visits an unvisited node `i`
//! reachable from the last node; it is cut when pruning is enabled and its
//! distance already exceeds the bound.

use drover_model::{graph::Graph, index::NodeIndex, num::Weight, tour::PartialTour};

/// Whether branches are cut against the known bound.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Pruning {
    #[default]
    Enabled,
    Disabled,
}

impl Pruning {
    #[inline(always)]
    pub fn is_enabled(self) -> bool {
        matches!(self, Pruning::Enabled)
    }
}

impl From<bool> for Pruning {
    #[inline]
    fn from(enabled: bool) -> Self {
        if enabled {
            Pruning::Enabled
        } else {
            Pruning::Disabled
        }
    }
}

impl std::fmt::Display for Pruning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pruning::Enabled => write!(f, "Enabled"),
            Pruning::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Outcome of considering one candidate node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Branch<T> {
    /// A child tour to explore.
    Child(PartialTour<T>),
    /// The extension to `node` was cut: `candidate` exceeds `bound`.
    Pruned {
        node: NodeIndex,
        candidate: T,
        bound: T,
    },
}

/// Iterator over the branches of a tour, in increasing node order.
///
/// Visited nodes and missing edges are skipped silently.
pub struct Branches<'a, T> {
    graph: &'a Graph<T>,
    tour: &'a PartialTour<T>,
    bound: T,
    pruning: Pruning,
    next: usize,
}

/// Returns the branches of `tour` against `bound`.
///
/// # Examples
///
/// ```rust
/// # use drover_bnb::expand::{branches, Branch, Pruning};
/// # use drover_model::{generate::example_graph, tour::PartialTour};
/// let g = example_graph();
/// let root = PartialTour::root(g.num_nodes());
/// let children: Vec<_> = branches(&g, &root, i64::MAX, Pruning::Enabled)
///     .filter_map(|b| match b {
///         Branch::Child(c) => Some(c),
///         Branch::Pruned { .. } => None,
///     })
///     .collect();
/// assert_eq!(children.len(), 3);
/// ```
#[inline]
pub fn branches<'a, T>(
    graph: &'a Graph<T>,
    tour: &'a PartialTour<T>,
    bound: T,
    pruning: Pruning,
) -> Branches<'a, T> {
    Branches {
        graph,
        tour,
        bound,
        pruning,
        next: 0,
    }
}

impl<T> Iterator for Branches<'_, T>
where
    T: Weight,
{
    type Item = Branch<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let num_nodes = self.graph.num_nodes();
        if self.tour.is_complete() || self.tour.is_closed() {
            return None;
        }

        let last = self.tour.last();
        while self.next < num_nodes {
            let node = NodeIndex::new(self.next);
            self.next += 1;

            if self.tour.contains(node) {
                continue;
            }
            let Some(weight) = self.graph.edge(last, node) else {
                continue;
            };

            let candidate = self.tour.dist().saturating_add(weight);
            if self.pruning.is_enabled() && candidate > self.bound {
                return Some(Branch::Pruned {
                    node,
                    candidate,
                    bound: self.bound,
                });
            }
            return Some(Branch::Child(self.tour.extended(node, weight)));
        }
        None
    }
}

/// Collects only the children of `tour`, discarding pruned branches.
#[inline]
pub fn children<T>(
    graph: &Graph<T>,
    tour: &PartialTour<T>,
    bound: T,
    pruning: Pruning,
) -> Vec<PartialTour<T>>
where
    T: Weight,
{
    branches(graph, tour, bound, pruning)
        .filter_map(|branch| match branch {
            Branch::Child(child) => Some(child),
            Branch::Pruned { .. } => None,
        })
        .collect()
}
