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

//! Depth-first branch-and-bound over a single subtree.
//!
//! `SearchEngine` explores every completion of a seed `PartialTour` with an
//! explicit LIFO `WorkStack`, never recursing. Children are pushed in
//! increasing node order so the highest-numbered child is explored first.
//! A branch is cut when its accumulated distance exceeds the current bound;
//! a closed tour is reported when it is strictly shorter than the bound.
//!
//! Improvements flow through an `IncumbentStore`. The store answers every
//! report with its authoritative bound, and the engine adopts the smaller of
//! that answer and its own. Before every pop the store may tighten the bound
//! further. The engine keeps its stack between runs so repeated subtrees do
//! not reallocate.

use crate::{
    error::SearchError,
    expand::{Branch, Pruning, branches},
    incumbent::IncumbentStore,
    monitor::search_monitor::{DeadEnd, SearchMonitor},
    stack::WorkStack,
    stats::EngineStatistics,
};
use drover_model::{graph::Graph, num::Weight, tour::PartialTour};

/// The result of exhausting one subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    /// The last improvement this run reported, if any.
    pub best: Option<PartialTour<T>>,
    /// The bound when the stack ran empty.
    pub bound: T,
    pub statistics: EngineStatistics,
}

impl<T> std::fmt::Display for SearchOutcome<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.best {
            Some(tour) => write!(f, "SearchOutcome(best: {}, bound: {})", tour, self.bound),
            None => write!(f, "SearchOutcome(best: none, bound: {})", self.bound),
        }
    }
}

/// Reusable depth-first search engine.
#[derive(Clone, Debug)]
pub struct SearchEngine<T> {
    stack: WorkStack<T>,
    pruning: Pruning,
}

impl<T> Default for SearchEngine<T> {
    fn default() -> Self {
        Self::new(Pruning::Enabled)
    }
}

impl<T> SearchEngine<T> {
    /// Creates an engine. The stack is sized on the first `solve`.
    #[inline]
    pub fn new(pruning: Pruning) -> Self {
        Self {
            stack: WorkStack::new(),
            pruning,
        }
    }

    /// Creates an engine whose stack is already sized for `num_nodes`.
    #[inline]
    pub fn preallocated(num_nodes: usize, pruning: Pruning) -> Self {
        Self {
            stack: WorkStack::preallocated(num_nodes),
            pruning,
        }
    }

    #[inline]
    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    /// Capacity of the local stack.
    #[inline]
    pub fn stack_capacity(&self) -> usize {
        self.stack.capacity()
    }
}

impl<T> SearchEngine<T>
where
    T: Weight,
{
    /// Explores every completion of `seed`, starting from `bound`.
    ///
    /// Returns once the local stack is empty. Fails only if a push would
    /// overflow the stack or the store cannot take a report.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `seed` was built for a different number of
    /// nodes than `graph` has.
    pub fn solve<S, M>(
        &mut self,
        graph: &Graph<T>,
        seed: PartialTour<T>,
        bound: T,
        store: &mut S,
        monitor: &mut M,
    ) -> Result<SearchOutcome<T>, SearchError<S::Error>>
    where
        S: IncumbentStore<T>,
        M: SearchMonitor<T>,
    {
        debug_assert_eq!(
            seed.num_nodes(),
            graph.num_nodes(),
            "called `SearchEngine::solve` with a seed for {} nodes on a graph of {} nodes",
            seed.num_nodes(),
            graph.num_nodes()
        );

        self.stack.clear();
        self.stack.ensure_capacity(graph.num_nodes());

        let session = SearchSession {
            graph,
            stack: &mut self.stack,
            pruning: self.pruning,
            store,
            monitor,
            bound,
            best: None,
            stats: EngineStatistics::default(),
            start_time: std::time::Instant::now(),
        };
        let result = session.run(seed);
        self.stack.clear();
        result
    }
}

/// Per-run state of the engine.
struct SearchSession<'a, T, S, M> {
    graph: &'a Graph<T>,
    stack: &'a mut WorkStack<T>,
    pruning: Pruning,
    store: &'a mut S,
    monitor: &'a mut M,
    bound: T,
    best: Option<PartialTour<T>>,
    stats: EngineStatistics,
    start_time: std::time::Instant,
}

impl<T, S, M> SearchSession<'_, T, S, M>
where
    T: Weight,
    S: IncumbentStore<T>,
    M: SearchMonitor<T>,
{
    fn run(mut self, seed: PartialTour<T>) -> Result<SearchOutcome<T>, SearchError<S::Error>> {
        self.stats.on_subtree();
        self.monitor.on_enter_search(&seed, self.bound, &self.stats);
        self.stack.push(seed)?;

        loop {
            self.bound = self.store.tighten(self.bound);
            let Some(tour) = self.stack.pop() else {
                break;
            };

            self.stats.on_node_explored(tour.len());
            self.monitor.on_node(&tour, self.bound, &self.stats);

            if tour.is_complete() {
                self.close(&tour)?;
            } else {
                self.expand(&tour)?;
            }
        }

        self.stats.add_time(self.start_time.elapsed());
        self.monitor.on_exit_search(self.bound, &self.stats);
        Ok(SearchOutcome {
            best: self.best,
            bound: self.bound,
            statistics: self.stats,
        })
    }

    /// Appends the edge back to node `0` and reports the tour if it improves
    /// the bound.
    fn close(&mut self, tour: &PartialTour<T>) -> Result<(), SearchError<S::Error>> {
        let Some(weight) = self.graph.closing_weight(tour.last()) else {
            self.stats.on_dead_end();
            self.monitor
                .on_dead_end(tour, DeadEnd::NoClosingEdge, &self.stats);
            return Ok(());
        };

        let closed = tour.closed(weight);
        if closed.dist() >= self.bound {
            self.stats.on_closure_rejected();
            self.monitor
                .on_closure_rejected(&closed, self.bound, &self.stats);
            return Ok(());
        }

        self.bound = closed.dist();
        self.stats.on_solution_found();
        let acknowledged = self
            .store
            .on_solution_found(&closed)
            .map_err(SearchError::Report)?;
        self.bound = self.bound.min(acknowledged);
        self.monitor
            .on_solution_found(&closed, acknowledged, &self.stats);
        self.best = Some(closed);
        Ok(())
    }

    /// Pushes every admissible child of `tour`.
    fn expand(&mut self, tour: &PartialTour<T>) -> Result<(), SearchError<S::Error>> {
        let mut branched = false;
        for branch in branches(self.graph, tour, self.bound, self.pruning) {
            branched = true;
            match branch {
                Branch::Child(child) => {
                    self.stack.push(child)?;
                    self.stats.on_child_generated();
                }
                Branch::Pruned {
                    node,
                    candidate,
                    bound,
                } => {
                    self.stats.on_pruning_bound();
                    self.monitor
                        .on_prune(tour, node, candidate, bound, &self.stats);
                }
            }
        }

        if !branched {
            self.stats.on_dead_end();
            self.monitor
                .on_dead_end(tour, DeadEnd::NoExtension, &self.stats);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{incumbent::LocalIncumbent, monitor::no_op::NoOpMonitor};
    use drover_model::{
        generate::{example_graph, seeded_random_graph},
        graph::GraphBuilder,
        index::NodeIndex,
    };

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn run(graph: &Graph<i64>, pruning: Pruning) -> (SearchOutcome<i64>, LocalIncumbent<i64>) {
        let mut engine = SearchEngine::new(pruning);
        let mut store = LocalIncumbent::new();
        let outcome = engine
            .solve(
                graph,
                PartialTour::root(graph.num_nodes()),
                i64::MAX,
                &mut store,
                &mut NoOpMonitor,
            )
            .expect("local search cannot fail");
        (outcome, store)
    }

    /// Exhaustive search over all permutations of `1..n`.
    fn brute_force(graph: &Graph<i64>) -> Option<i64> {
        fn rec(
            graph: &Graph<i64>,
            path: &mut Vec<usize>,
            used: &mut Vec<bool>,
            dist: i64,
            best: &mut Option<i64>,
        ) {
            let n = graph.num_nodes();
            let last = *path.last().unwrap();
            if path.len() == n {
                if let Some(w) = graph.closing_weight(ni(last)) {
                    let total = dist + w;
                    if best.is_none_or(|b| total < b) {
                        *best = Some(total);
                    }
                }
                return;
            }
            for next in 0..n {
                if used[next] {
                    continue;
                }
                if let Some(w) = graph.edge(ni(last), ni(next)) {
                    used[next] = true;
                    path.push(next);
                    rec(graph, path, used, dist + w, best);
                    path.pop();
                    used[next] = false;
                }
            }
        }

        let mut used = vec![false; graph.num_nodes()];
        used[0] = true;
        let mut best = None;
        rec(graph, &mut vec![0], &mut used, 0, &mut best);
        best
    }

    #[test]
    fn test_example_graph_optimum() {
        let g = example_graph();
        let (outcome, store) = run(&g, Pruning::Enabled);
        let best = store.best().expect("example has a tour");
        assert_eq!(best.dist(), 15);
        assert_eq!(best.nodes(), &[ni(0), ni(3), ni(1), ni(2), ni(0)]);
        assert_eq!(outcome.bound, 15);
        assert_eq!(outcome.best.as_ref().map(|t| t.dist()), Some(15));
        assert_eq!(outcome.statistics.subtrees, 1);
    }

    #[test]
    fn test_pruning_disabled_finds_same_optimum() {
        let g = example_graph();
        let (on, _) = run(&g, Pruning::Enabled);
        let (off, _) = run(&g, Pruning::Disabled);
        assert_eq!(on.bound, off.bound);
        assert_eq!(off.statistics.prunings_bound, 0);
        assert!(off.statistics.nodes_explored >= on.statistics.nodes_explored);
    }

    #[test]
    fn test_single_node_closes_trivially() {
        let g = GraphBuilder::<i64>::new(1).build();
        let (outcome, store) = run(&g, Pruning::Enabled);
        let best = store.best().expect("single node has the trivial tour");
        assert_eq!(best.nodes(), &[ni(0), ni(0)]);
        assert_eq!(best.dist(), 0);
        assert_eq!(outcome.bound, 0);
    }

    #[test]
    fn test_no_edge_into_origin_is_infeasible() {
        let mut b = GraphBuilder::<i64>::new(3);
        b.set_edge(ni(0), ni(1), 2)
            .set_edge(ni(1), ni(2), 3)
            .set_edge(ni(2), ni(1), 3)
            .set_edge(ni(0), ni(2), 4);
        let g = b.build();
        let (outcome, store) = run(&g, Pruning::Enabled);
        assert!(store.best().is_none());
        assert!(outcome.best.is_none());
        assert_eq!(outcome.bound, i64::MAX);
        assert_eq!(outcome.statistics.dead_ends, 2);
    }

    #[test]
    fn test_matches_brute_force_on_random_graphs() {
        for seed in 0..12u64 {
            let n = 3 + (seed as usize % 5);
            let g = seeded_random_graph(n, 70, seed);
            let expected = brute_force(&g);
            let (on, store) = run(&g, Pruning::Enabled);
            let (off, _) = run(&g, Pruning::Disabled);
            assert_eq!(store.best().map(|t| t.dist()), expected, "seed {}", seed);
            assert_eq!(on.bound, off.bound, "seed {}", seed);
        }
    }

    #[test]
    fn test_subtree_search_from_seed() {
        let g = example_graph();
        let seed = PartialTour::root(4).extended(ni(1), 1);
        let (mut engine, mut store) = (SearchEngine::new(Pruning::Enabled), LocalIncumbent::new());
        engine
            .solve(&g, seed, i64::MAX, &mut store, &mut NoOpMonitor)
            .expect("local search cannot fail");
        let best = store.best().expect("subtree 0->1 has tours");
        // Both completions cost 20; the first one found is kept.
        assert_eq!(best.nodes(), &[ni(0), ni(1), ni(3), ni(2), ni(0)]);
        assert_eq!(best.dist(), 20);
    }

    #[test]
    fn test_initial_bound_cuts_everything() {
        let g = example_graph();
        let mut engine = SearchEngine::new(Pruning::Enabled);
        let mut store = LocalIncumbent::new();
        let outcome = engine
            .solve(&g, PartialTour::root(4), 15, &mut store, &mut NoOpMonitor)
            .expect("local search cannot fail");
        assert!(outcome.best.is_none());
        assert_eq!(outcome.bound, 15);
        assert_eq!(outcome.statistics.solutions_found, 0);
    }

    /// Answers every report with a fixed, better bound.
    struct Oracle(i64, usize);

    impl IncumbentStore<i64> for Oracle {
        type Error = std::convert::Infallible;

        fn on_solution_found(&mut self, _: &PartialTour<i64>) -> Result<i64, Self::Error> {
            self.1 += 1;
            Ok(self.0)
        }
    }

    #[test]
    fn test_acknowledged_bound_is_adopted() {
        let g = example_graph();
        let mut engine = SearchEngine::new(Pruning::Enabled);
        let mut store = Oracle(5, 0);
        let outcome = engine
            .solve(&g, PartialTour::root(4), i64::MAX, &mut store, &mut NoOpMonitor)
            .expect("oracle cannot fail");
        assert_eq!(store.1, 1);
        assert_eq!(outcome.bound, 5);
    }

    struct Broken;

    impl IncumbentStore<i64> for Broken {
        type Error = &'static str;

        fn on_solution_found(&mut self, _: &PartialTour<i64>) -> Result<i64, Self::Error> {
            Err("manager gone")
        }
    }

    #[test]
    fn test_report_failure_aborts() {
        let g = example_graph();
        let mut engine = SearchEngine::new(Pruning::Enabled);
        let err = engine
            .solve(&g, PartialTour::root(4), i64::MAX, &mut Broken, &mut NoOpMonitor)
            .unwrap_err();
        assert!(matches!(err, SearchError::Report("manager gone")));
    }

    #[test]
    fn test_engine_is_reusable() {
        let g = example_graph();
        let mut engine = SearchEngine::preallocated(4, Pruning::Enabled);
        for _ in 0..3 {
            let mut store = LocalIncumbent::new();
            let outcome = engine
                .solve(&g, PartialTour::root(4), i64::MAX, &mut store, &mut NoOpMonitor)
                .expect("local search cannot fail");
            assert_eq!(outcome.bound, 15);
        }
        assert_eq!(engine.stack_capacity(), 6);
    }
}
