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

//! # Cluster Orchestration
//!
//! `Cluster` runs one manager and `K` workers as threads of the calling
//! process, connected by a `ChannelNetwork`.
//!
//! ## Lifecycle
//!
//! - Build a star network: rank `0` is the manager, ranks `1..=K` are workers.
//! - Spawn every participant with `std::thread::scope`. Each thread owns its
//!   endpoint and its own search state; only the graph is shared, read-only.
//! - Join all threads. The manager's Global Best becomes the result.
//!
//! A participant that panics is reported as `ClusterError::ParticipantPanicked`.
//! When a participant fails, its endpoint is dropped with it and its peers
//! observe a disconnected inbox instead of waiting forever.

use crate::{
    error::ClusterError,
    manager::{ManagerProcess, ManagerReport},
    stats::ManagerStatistics,
    transport::{ChannelEndpoint, ChannelNetwork, MANAGER, Transport},
    worker::{WorkerProcess, WorkerReport},
};
use drover_bnb::{
    expand::Pruning,
    monitor::{log::LogMonitor, no_op::NoOpMonitor},
    result::SolverResult,
    stats::EngineStatistics,
};
use drover_model::{graph::Graph, num::Weight};
use std::time::{Duration, Instant};

/// Default number of worker ranks.
pub const DEFAULT_WORKERS: usize = 3;

/// Everything a cluster run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterOutcome<T> {
    pub result: SolverResult<T>,
    pub manager: ManagerStatistics,
    /// One report per worker, in rank order.
    pub workers: Vec<WorkerReport>,
    /// Wall time from network setup to the last join.
    pub elapsed: Duration,
}

impl<T> ClusterOutcome<T>
where
    T: Weight,
{
    /// Engine statistics merged over every worker.
    pub fn engine_statistics(&self) -> EngineStatistics {
        let mut total = EngineStatistics::default();
        for report in &self.workers {
            total.merge(&report.statistics);
        }
        total
    }
}

impl<T> std::fmt::Display for ClusterOutcome<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ClusterOutcome(result: {}, workers: {}, elapsed: {:.3}s)",
            self.result,
            self.workers.len(),
            self.elapsed.as_secs_f64()
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClusterBuilder {
    workers: usize,
    pruning: Pruning,
    verbose: bool,
}

impl Default for ClusterBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            pruning: Pruning::Enabled,
            verbose: false,
        }
    }

    #[inline]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[inline]
    pub fn with_pruning(mut self, pruning: impl Into<Pruning>) -> Self {
        self.pruning = pruning.into();
        self
    }

    /// Attaches a `LogMonitor` to every worker's engine.
    #[inline]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// # Errors
    ///
    /// Returns `ClusterError::NoWorkers` if zero workers were requested.
    #[inline]
    pub fn build(self) -> Result<Cluster, ClusterError> {
        if self.workers == 0 {
            return Err(ClusterError::NoWorkers);
        }
        Ok(Cluster {
            workers: self.workers,
            pruning: self.pruning,
            verbose: self.verbose,
        })
    }
}

/// A configured manager plus workers.
#[derive(Debug, Clone, Copy)]
pub struct Cluster {
    workers: usize,
    pruning: Pruning,
    verbose: bool,
}

impl Cluster {
    #[inline]
    pub fn builder() -> ClusterBuilder {
        ClusterBuilder::new()
    }

    #[inline]
    pub fn num_workers(&self) -> usize {
        self.workers
    }

    #[inline]
    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    /// Finds an optimal tour of `graph` or proves there is none.
    ///
    /// # Errors
    ///
    /// Returns the first failure among the participants. Panics take
    /// precedence over the errors they cause in their peers, and the
    /// manager's error over the workers'.
    pub fn solve<T>(&self, graph: &Graph<T>) -> Result<ClusterOutcome<T>, ClusterError>
    where
        T: Weight,
    {
        let start = Instant::now();
        let (manager_end, worker_ends) = ChannelNetwork::star(self.workers).into_endpoints();
        log::debug!(
            "starting cluster: {} workers, {} nodes, pruning {}",
            self.workers,
            graph.num_nodes(),
            self.pruning
        );

        let (manager, workers) = std::thread::scope(|scope| {
            let manager =
                scope.spawn(move || ManagerProcess::new(graph, manager_end, self.pruning)?.run());

            let handles: Vec<_> = worker_ends
                .into_iter()
                .map(|end| {
                    let rank = end.rank();
                    (rank, scope.spawn(move || self.run_worker(graph, end)))
                })
                .collect();

            let manager = manager
                .join()
                .map_err(|_| ClusterError::ParticipantPanicked { rank: MANAGER });
            let workers: Vec<_> = handles
                .into_iter()
                .map(|(rank, handle)| {
                    handle
                        .join()
                        .map_err(|_| ClusterError::ParticipantPanicked { rank })
                })
                .collect();
            (manager, workers)
        });

        let manager = manager?;
        let workers = workers.into_iter().collect::<Result<Vec<_>, _>>()?;
        let ManagerReport { best, statistics } = manager?;
        let workers = workers.into_iter().collect::<Result<Vec<_>, _>>()?;

        let outcome = ClusterOutcome {
            result: SolverResult::from_best(best),
            manager: statistics,
            workers,
            elapsed: start.elapsed(),
        };
        log::debug!("{}", outcome);
        Ok(outcome)
    }

    fn run_worker<T>(
        &self,
        graph: &Graph<T>,
        end: ChannelEndpoint,
    ) -> Result<WorkerReport, ClusterError>
    where
        T: Weight,
    {
        if self.verbose {
            let monitor = LogMonitor::new(end.rank());
            WorkerProcess::new(graph, end, self.pruning, monitor).run()
        } else {
            WorkerProcess::new(graph, end, self.pruning, NoOpMonitor).run()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_model::{generate::example_graph, graph::GraphBuilder, index::NodeIndex};

    #[test]
    fn test_builder_defaults() {
        let cluster = Cluster::builder().build().unwrap();
        assert_eq!(cluster.num_workers(), DEFAULT_WORKERS);
        assert_eq!(cluster.pruning(), Pruning::Enabled);
        assert!(matches!(
            ClusterBuilder::new().with_workers(0).build(),
            Err(ClusterError::NoWorkers)
        ));
    }

    #[test]
    fn test_example_graph() {
        let outcome = Cluster::builder()
            .with_workers(3)
            .build()
            .unwrap()
            .solve(&example_graph())
            .unwrap();
        let tour = outcome.result.tour().expect("example is feasible");
        assert_eq!(tour.to_string(), "0->3->1->2->0,15");
        assert_eq!(outcome.workers.len(), 3);
        assert_eq!(outcome.manager.terminations_sent, 3);
        let ranks: Vec<_> = outcome.workers.iter().map(|w| w.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_infeasible_graph() {
        let mut b = GraphBuilder::<i64>::new(3);
        b.set_edge(NodeIndex::new(0), NodeIndex::new(1), 4)
            .set_edge(NodeIndex::new(1), NodeIndex::new(2), 4);
        let outcome = Cluster::builder()
            .with_workers(2)
            .with_verbose(true)
            .build()
            .unwrap()
            .solve(&b.build())
            .unwrap();
        assert!(outcome.result.is_infeasible());
        assert_eq!(outcome.manager.improvements_accepted, 0);
    }

    #[test]
    fn test_engine_statistics_are_merged() {
        let outcome = Cluster::builder()
            .with_workers(2)
            .with_pruning(false)
            .build()
            .unwrap()
            .solve(&example_graph())
            .unwrap();
        let merged = outcome.engine_statistics();
        let subtrees: u64 = outcome.workers.iter().map(|w| w.subtrees_solved).sum();
        assert_eq!(merged.subtrees, subtrees);
        assert_eq!(subtrees, outcome.manager.paths_assigned);
    }
}
