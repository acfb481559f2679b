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

//! The worker's request loop.
//!
//! A worker repeatedly asks the manager for a subtree, exhausts it with the
//! `SearchEngine`, and asks again until it receives a terminate notice. It
//! has at most one outstanding request. Every improved tour is reported
//! through `ManagerLink`, which blocks for the manager's acknowledgment and
//! hands the acknowledged distance back to the engine as its new bound.

use crate::{
    error::{ClusterError, ProtocolError},
    message::{Message, Tag},
    transport::{MANAGER, TagFilter, Transport},
};
use drover_bnb::{
    engine::SearchEngine, expand::Pruning, incumbent::IncumbentStore,
    monitor::search_monitor::SearchMonitor, stats::EngineStatistics,
};
use drover_model::{graph::Graph, num::Weight, tour::PartialTour};

/// Summary of one worker's run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub rank: usize,
    /// Subtrees received from the manager.
    pub subtrees_solved: u64,
    /// Improvements this worker reported.
    pub reports_sent: u64,
    /// Engine statistics merged over every subtree.
    pub statistics: EngineStatistics,
}

impl std::fmt::Display for WorkerReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "T{}: {} subtrees, {} nodes explored, {} reports",
            self.rank, self.subtrees_solved, self.statistics.nodes_explored, self.reports_sent
        )
    }
}

/// Forwards the engine's improvements to the manager.
#[derive(Debug)]
pub struct ManagerLink<'a, X> {
    transport: &'a X,
    num_nodes: usize,
    reports_sent: u64,
}

impl<'a, X> ManagerLink<'a, X>
where
    X: Transport,
{
    #[inline]
    pub fn new(transport: &'a X, num_nodes: usize) -> Self {
        Self {
            transport,
            num_nodes,
            reports_sent: 0,
        }
    }

    #[inline]
    pub fn reports_sent(&self) -> u64 {
        self.reports_sent
    }
}

impl<T, X> IncumbentStore<T> for ManagerLink<'_, X>
where
    T: Weight,
    X: Transport,
{
    type Error = ClusterError;

    fn on_solution_found(&mut self, tour: &PartialTour<T>) -> Result<T, Self::Error> {
        let payload = Message::report(tour.clone()).encode(self.num_nodes)?;
        self.transport.send(MANAGER, Tag::ReportBest, payload)?;
        self.reports_sent += 1;

        let envelope = self.transport.receive(TagFilter::Only(Tag::AckBest))?;
        let ack = Message::<T>::decode(&envelope.payload, self.num_nodes)?;
        Ok(ack.best)
    }
}

/// Ranks `1..` of a cluster.
pub struct WorkerProcess<'a, T, X, M> {
    graph: &'a Graph<T>,
    transport: X,
    engine: SearchEngine<T>,
    monitor: M,
}

impl<'a, T, X, M> WorkerProcess<'a, T, X, M>
where
    T: Weight,
    X: Transport,
    M: SearchMonitor<T>,
{
    pub fn new(graph: &'a Graph<T>, transport: X, pruning: Pruning, monitor: M) -> Self {
        Self {
            graph,
            transport,
            engine: SearchEngine::preallocated(graph.num_nodes(), pruning),
            monitor,
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.transport.rank()
    }

    /// Requests and searches subtrees until the manager says stop.
    ///
    /// # Errors
    ///
    /// Returns a `ClusterError` if the transport fails, the manager sends a
    /// malformed reply, or the local stack overflows.
    pub fn run(mut self) -> Result<WorkerReport, ClusterError> {
        let rank = self.transport.rank();
        let num_nodes = self.graph.num_nodes();
        let mut report = WorkerReport {
            rank,
            ..Default::default()
        };
        let mut bound = T::infinity();

        loop {
            let request = Message::request(bound).encode(num_nodes)?;
            self.transport.send(MANAGER, Tag::RequestPath, request)?;
            let envelope = self.transport.receive(TagFilter::Only(Tag::RequestPath))?;
            let reply = Message::<T>::decode(&envelope.payload, num_nodes)?;

            bound = bound.min(reply.best);
            if reply.done {
                log::debug!("T{}: terminating", rank);
                break;
            }
            let seed = reply.tour.ok_or(ProtocolError::MissingTour)?;
            log::debug!("T{}: received {}", rank, seed);

            let mut link = ManagerLink::new(&self.transport, num_nodes);
            let outcome = self
                .engine
                .solve(self.graph, seed, bound, &mut link, &mut self.monitor)?;

            bound = outcome.bound;
            report.subtrees_solved += 1;
            report.reports_sent += link.reports_sent();
            report.statistics.merge(&outcome.statistics);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ChannelNetwork;
    use drover_bnb::monitor::no_op::NoOpMonitor;
    use drover_model::{generate::example_graph, index::NodeIndex};

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    /// Plays the manager for a single worker by hand.
    #[test]
    fn test_worker_against_scripted_manager() {
        let graph = example_graph();
        let n = graph.num_nodes();
        let (manager, workers) = ChannelNetwork::star(1).into_endpoints();
        let worker_end = workers.into_iter().next().unwrap();

        let report = std::thread::scope(|s| {
            let worker = s.spawn(|| {
                WorkerProcess::new(&graph, worker_end, Pruning::Enabled, NoOpMonitor).run()
            });

            // First request: hand out the subtree below 0->1 with no bound.
            let request = manager.receive(TagFilter::Any).unwrap();
            assert_eq!(request.tag, Tag::RequestPath);
            assert_eq!(request.source, 1);
            let seed = PartialTour::root(n).extended(ni(1), 1);
            manager
                .send(1, Tag::RequestPath, Message::assign(seed, i64::MAX).encode(n).unwrap())
                .unwrap();

            // The worker finds 0->1->3->2->0 first; claim a better tour is known.
            let first = manager.receive(TagFilter::Any).unwrap();
            assert_eq!(first.tag, Tag::ReportBest);
            let reported = Message::<i64>::decode(&first.payload, n).unwrap();
            assert_eq!(reported.tour.unwrap().to_string(), "0->1->3->2->0,20");
            manager
                .send(1, Tag::AckBest, Message::ack(15i64).encode(n).unwrap())
                .unwrap();

            // With bound 15 nothing else in the subtree improves.
            let next = manager.receive(TagFilter::Any).unwrap();
            assert_eq!(next.tag, Tag::RequestPath);
            let carried = Message::<i64>::decode(&next.payload, n).unwrap();
            assert_eq!(carried.best, 15);
            manager
                .send(1, Tag::RequestPath, Message::terminate(15i64).encode(n).unwrap())
                .unwrap();

            worker.join().unwrap()
        });

        let report = report.unwrap();
        assert_eq!(report.rank, 1);
        assert_eq!(report.subtrees_solved, 1);
        assert_eq!(report.reports_sent, 1);
        assert_eq!(report.statistics.solutions_found, 1);
    }

    #[test]
    fn test_malformed_assignment_is_an_error() {
        let graph = example_graph();
        let (manager, workers) = ChannelNetwork::star(1).into_endpoints();
        let worker_end = workers.into_iter().next().unwrap();

        let result = std::thread::scope(|s| {
            let worker = s.spawn(|| {
                WorkerProcess::new(&graph, worker_end, Pruning::Enabled, NoOpMonitor).run()
            });
            manager.receive(TagFilter::Any).unwrap();
            manager.send(1, Tag::RequestPath, vec![0; 3]).unwrap();
            worker.join().unwrap()
        });

        assert!(matches!(
            result,
            Err(ClusterError::Protocol(ProtocolError::PayloadLength {
                expected: 9,
                actual: 3
            }))
        ));
    }

    #[test]
    fn test_missing_manager_is_an_error() {
        let graph = example_graph();
        let (manager, workers) = ChannelNetwork::star(1).into_endpoints();
        drop(manager);
        let worker_end = workers.into_iter().next().unwrap();
        let result = WorkerProcess::new(&graph, worker_end, Pruning::Enabled, NoOpMonitor).run();
        assert!(matches!(result, Err(ClusterError::Transport(_))));
    }
}
