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

//! # Instance Generation
//!
//! The fixed four-node example instance and seeded random instances.
//! Random generation is reproducible: the same seed, size and population
//! always produce the same matrix.

use crate::{
    graph::{Graph, GraphBuilder},
    index::NodeIndex,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Edge weights are drawn from `0..MAX_DISTANCE`.
pub const MAX_DISTANCE: i64 = 100;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// The four-node example instance. Its optimal tour is `0->3->1->2->0` with distance `15`.
pub const EXAMPLE_EDGES: [[i64; 4]; 4] = [
    [0, 1, 3, 8],
    [5, 0, 2, 6],
    [1, 18, 0, 10],
    [7, 4, 12, 0],
];

/// Returns the four-node example graph.
///
/// # Examples
///
/// ```rust
/// # use drover_model::generate::example_graph;
/// let g = example_graph();
/// assert_eq!(g.num_nodes(), 4);
/// ```
pub fn example_graph() -> Graph<i64> {
    let mut builder = GraphBuilder::new(EXAMPLE_EDGES.len());
    for (from, row) in EXAMPLE_EDGES.iter().enumerate() {
        for (to, &w) in row.iter().enumerate() {
            builder.set_edge(NodeIndex::new(from), NodeIndex::new(to), w);
        }
    }
    builder.build()
}

/// Generates a random graph using the given RNG.
///
/// Every off-diagonal pair `(from, to)` receives an edge with probability
/// `population_percent / 100`; its weight is uniform in `0..MAX_DISTANCE`,
/// so a drawn weight of `0` still means "no edge". Diagonal entries stay `0`.
///
/// # Panics
///
/// Panics if `num_nodes == 0`.
pub fn random_graph<R>(num_nodes: usize, population_percent: u8, rng: &mut R) -> Graph<i64>
where
    R: Rng + ?Sized,
{
    let mut builder = GraphBuilder::new(num_nodes);
    for from in 0..num_nodes {
        for to in 0..num_nodes {
            if from == to {
                continue;
            }
            if rng.gen_range(0..100u8) < population_percent {
                let w = rng.gen_range(0..MAX_DISTANCE);
                builder.set_edge(NodeIndex::new(from), NodeIndex::new(to), w);
            }
        }
    }
    builder.build()
}

/// Generates a random graph from a fixed seed (see `random_graph`).
pub fn seeded_random_graph(num_nodes: usize, population_percent: u8, seed: u64) -> Graph<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_graph(num_nodes, population_percent, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_graph_matches_table() {
        let g = example_graph();
        assert_eq!(g.weight(NodeIndex::new(2), NodeIndex::new(1)), 18);
        assert_eq!(g.weight(NodeIndex::new(3), NodeIndex::new(0)), 7);
        assert_eq!(g.num_edges(), 12);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = seeded_random_graph(7, 60, 7);
        let b = seeded_random_graph(7, 60, 7);
        assert_eq!(a, b);
        assert_eq!(a.num_nodes(), 7);
    }

    #[test]
    fn test_population_extremes() {
        let none = seeded_random_graph(6, 0, DEFAULT_SEED);
        assert_eq!(none.num_edges(), 0);

        let full = seeded_random_graph(6, 100, DEFAULT_SEED);
        for i in 0..6 {
            assert_eq!(full.weight(NodeIndex::new(i), NodeIndex::new(i)), 0);
        }
        assert!(full.weights().iter().all(|&w| (0..MAX_DISTANCE).contains(&w)));
    }
}
