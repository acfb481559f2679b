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

//! Single-participant baseline.
//!
//! `SequentialSolver` runs the search engine once from the root tour `[0]`
//! with a `LocalIncumbent`. It shares the expansion rule and the stack
//! discipline with the cluster workers, which makes it a natural reference
//! for the distributed solver's answers.

use crate::{
    engine::SearchEngine,
    error::{SearchError, WorkStackFull},
    expand::Pruning,
    incumbent::LocalIncumbent,
    monitor::{log::LogMonitor, no_op::NoOpMonitor, search_monitor::SearchMonitor},
    result::SolverResult,
    stats::EngineStatistics,
};
use drover_model::{graph::Graph, num::Weight, tour::PartialTour};
use std::time::{Duration, Instant};

/// The outcome of a sequential run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialOutcome<T> {
    pub result: SolverResult<T>,
    pub statistics: EngineStatistics,
    pub elapsed: Duration,
}

impl<T> std::fmt::Display for SequentialOutcome<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SequentialOutcome(result: {}, elapsed: {:.3}s)",
            self.result,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Solves a graph on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSolver {
    pruning: Pruning,
    verbose: bool,
}

impl SequentialSolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables bound pruning.
    #[inline]
    pub fn with_pruning(mut self, pruning: impl Into<Pruning>) -> Self {
        self.pruning = pruning.into();
        self
    }

    /// Logs every engine event through `LogMonitor`.
    #[inline]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[inline]
    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    /// Finds an optimal tour of `graph` or proves there is none.
    pub fn solve<T>(&self, graph: &Graph<T>) -> Result<SequentialOutcome<T>, WorkStackFull>
    where
        T: Weight,
    {
        if self.verbose {
            self.solve_with_monitor(graph, &mut LogMonitor::new(0))
        } else {
            self.solve_with_monitor(graph, &mut NoOpMonitor)
        }
    }

    /// Like `solve`, reporting engine events to `monitor`.
    pub fn solve_with_monitor<T, M>(
        &self,
        graph: &Graph<T>,
        monitor: &mut M,
    ) -> Result<SequentialOutcome<T>, WorkStackFull>
    where
        T: Weight,
        M: SearchMonitor<T>,
    {
        let start = Instant::now();
        let mut engine = SearchEngine::preallocated(graph.num_nodes(), self.pruning);
        let mut store = LocalIncumbent::new();
        let root = PartialTour::root(graph.num_nodes());

        let outcome = match engine.solve(graph, root, T::infinity(), &mut store, monitor) {
            Ok(outcome) => outcome,
            Err(SearchError::WorkStackFull(full)) => return Err(full),
            Err(SearchError::Report(never)) => match never {},
        };

        Ok(SequentialOutcome {
            result: SolverResult::from_best(store.into_best()),
            statistics: outcome.statistics,
            elapsed: start.elapsed(),
        })
    }
}
