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

//! The manager's receive loop.
//!
//! `ManagerProcess` performs one blocking receive per iteration, from any
//! worker and with any tag, and dispatches on the tag:
//!
//! - `REQUEST_PATH`: ask the `Coordinator` for a tour or a terminate notice
//!   and send it back under the same tag.
//! - `REPORT_BEST`: hand the tour to the `Coordinator` and answer with
//!   `ACK_BEST` carrying the Global Best distance. Malformed reports are
//!   logged, counted and still acknowledged so the reporter never stalls.
//! - anything else: logged and ignored.
//!
//! A request from a rank that is not a worker gets no reply.
//!
//! The loop ends once the `Coordinator` is finished.

use crate::{
    coordinator::{Coordinator, Reply},
    error::{ClusterError, ProtocolError},
    message::{Message, Tag},
    stats::ManagerStatistics,
    transport::{Envelope, TagFilter, Transport},
};
use drover_bnb::expand::Pruning;
use drover_model::{graph::Graph, num::Weight, tour::PartialTour};

/// What the manager knows when the run ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerReport<T> {
    pub best: Option<PartialTour<T>>,
    pub statistics: ManagerStatistics,
}

/// Rank `0` of a cluster.
pub struct ManagerProcess<'a, T, X> {
    coordinator: Coordinator<'a, T>,
    transport: X,
}

impl<'a, T, X> ManagerProcess<'a, T, X>
where
    T: Weight,
    X: Transport,
{
    /// Creates the manager for every worker rank of `transport`.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::NoWorkers` if the network has no worker ranks.
    pub fn new(graph: &'a Graph<T>, transport: X, pruning: Pruning) -> Result<Self, ClusterError> {
        let num_workers = transport.size().saturating_sub(1);
        let coordinator = Coordinator::new(graph, num_workers, pruning)?;
        Ok(Self {
            coordinator,
            transport,
        })
    }

    /// Serves requests and reports until every worker has been told to stop.
    ///
    /// # Errors
    ///
    /// Returns a `ClusterError` if the transport fails or a split overflows
    /// the manager's stack. Requests from unknown ranks are counted as
    /// protocol violations and dropped.
    pub fn run(mut self) -> Result<ManagerReport<T>, ClusterError> {
        log::debug!(
            "T0: serving {} workers, pruning {}",
            self.coordinator.num_workers(),
            self.coordinator.pruning()
        );

        while !self.coordinator.is_finished() {
            let envelope = self.transport.receive(TagFilter::Any)?;
            match envelope.tag {
                Tag::RequestPath => self.on_request(envelope.source)?,
                Tag::ReportBest => self.on_report(envelope)?,
                Tag::AckBest => {
                    log::warn!("T0: ignoring {} from T{}", envelope.tag, envelope.source);
                    self.coordinator.record_violation();
                }
            }
        }

        let (best, statistics) = self.coordinator.finish();
        match &best {
            Some(tour) => log::debug!("T0: all workers done, best {}", tour),
            None => log::debug!("T0: all workers done, no tour"),
        }
        Ok(ManagerReport { best, statistics })
    }

    fn on_request(&mut self, worker: usize) -> Result<(), ClusterError> {
        let reply = match self.coordinator.on_request(worker) {
            Ok(reply) => reply,
            Err(ClusterError::Protocol(err)) => {
                log::warn!("T0: ignoring request from T{}: {}", worker, err);
                self.coordinator.record_violation();
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        match &reply {
            Reply::Assign { tour, .. } => log::debug!("T0: sending {} to T{}", tour, worker),
            Reply::Terminate { .. } => log::debug!("T0: terminating T{}", worker),
        }

        let payload = reply.into_message().encode(self.coordinator.num_nodes())?;
        self.transport.send(worker, Tag::RequestPath, payload)?;
        Ok(())
    }

    fn on_report(&mut self, envelope: Envelope) -> Result<(), ClusterError> {
        let worker = envelope.source;
        let ack = match decode_report::<T>(&envelope.payload, self.coordinator.num_nodes()) {
            Ok(tour) => match self.coordinator.on_report(worker, &tour) {
                Ok(ack) => ack,
                Err(err) => {
                    log::warn!("T0: ignoring report from T{}: {}", worker, err);
                    self.coordinator.best_distance()
                }
            },
            Err(err) => {
                log::warn!("T0: ignoring report from T{}: {}", worker, err);
                self.coordinator.record_violation();
                self.coordinator.best_distance()
            }
        };

        let payload = Message::ack(ack).encode(self.coordinator.num_nodes())?;
        self.transport.send(worker, Tag::AckBest, payload)?;
        Ok(())
    }
}

#[inline]
fn decode_report<T>(payload: &[i64], num_nodes: usize) -> Result<PartialTour<T>, ProtocolError>
where
    T: Weight,
{
    Message::<T>::decode(payload, num_nodes)?
        .tour
        .ok_or(ProtocolError::MissingTour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::TransportError,
        transport::{ChannelEndpoint, ChannelNetwork, MANAGER, Packet},
        worker::WorkerProcess,
    };
    use drover_bnb::monitor::no_op::NoOpMonitor;
    use drover_model::{generate::example_graph, index::NodeIndex};

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    /// Drives the manager from the worker side of a one-worker network.
    #[test]
    fn test_manager_loop_with_scripted_worker() {
        let graph = example_graph();
        let (manager_end, mut workers) = ChannelNetwork::star(1).into_endpoints();
        let worker = workers.remove(0);

        let report = std::thread::scope(|s| {
            let manager = s.spawn(|| {
                ManagerProcess::new(&graph, manager_end, Pruning::Enabled)
                    .unwrap()
                    .run()
            });

            let n = graph.num_nodes();
            let request = |best: i64| Message::request(best).encode(n).unwrap();
            let mut bound = i64::MAX;
            let mut served = Vec::new();
            loop {
                worker.send(MANAGER, Tag::RequestPath, request(bound)).unwrap();
                let reply = worker.receive(TagFilter::Only(Tag::RequestPath)).unwrap();
                let msg = Message::<i64>::decode(&reply.payload, n).unwrap();
                bound = bound.min(msg.best);
                if msg.done {
                    break;
                }
                let tour = msg.tour.unwrap();
                served.push(tour.to_string());

                // Report the optimum once, plus a malformed payload.
                if served.len() == 1 {
                    let best = PartialTour::root(n)
                        .extended(ni(3), 8)
                        .extended(ni(1), 4)
                        .extended(ni(2), 2)
                        .closed(1);
                    worker
                        .send(MANAGER, Tag::ReportBest, Message::report(best).encode(n).unwrap())
                        .unwrap();
                    let ack = worker.receive(TagFilter::Only(Tag::AckBest)).unwrap();
                    assert_eq!(Message::<i64>::decode(&ack.payload, n).unwrap().best, 15);

                    worker.send(MANAGER, Tag::ReportBest, vec![1, 2, 3]).unwrap();
                    let ack = worker.receive(TagFilter::Only(Tag::AckBest)).unwrap();
                    assert_eq!(Message::<i64>::decode(&ack.payload, n).unwrap().best, 15);

                    worker.send(MANAGER, Tag::AckBest, request(0)).unwrap();
                }
            }
            assert_eq!(bound, 15);
            assert!(!served.is_empty());
            manager.join().unwrap()
        });

        let report = report.unwrap();
        assert_eq!(report.best.map(|t| t.dist()), Some(15));
        assert_eq!(report.statistics.terminations_sent, 1);
        assert_eq!(report.statistics.improvements_accepted, 1);
        assert_eq!(report.statistics.protocol_violations, 2);
    }

    /// Hides every rank above `size - 1` from the manager.
    struct Narrowed {
        inner: ChannelEndpoint,
        size: usize,
    }

    impl Transport for Narrowed {
        fn rank(&self) -> usize {
            self.inner.rank()
        }

        fn size(&self) -> usize {
            self.size
        }

        fn send_raw(&self, to: usize, tag: i32, payload: Vec<i64>) -> Result<(), TransportError> {
            self.inner.send_raw(to, tag, payload)
        }

        fn receive_raw(&self) -> Result<Packet, TransportError> {
            self.inner.receive_raw()
        }
    }

    #[test]
    fn test_request_from_unknown_rank_is_ignored() {
        let graph = example_graph();
        let (manager_end, mut workers) = ChannelNetwork::star(2).into_endpoints();
        let stranger = workers.pop().unwrap();
        let worker_end = workers.pop().unwrap();

        // Queued before the manager starts, so it is the first message served.
        let n = graph.num_nodes();
        stranger
            .send(MANAGER, Tag::RequestPath, Message::request(i64::MAX).encode(n).unwrap())
            .unwrap();

        let (manager, worker) = std::thread::scope(|s| {
            let manager = s.spawn(|| {
                let transport = Narrowed {
                    inner: manager_end,
                    size: 2,
                };
                ManagerProcess::new(&graph, transport, Pruning::Enabled)
                    .unwrap()
                    .run()
            });
            let worker = s.spawn(|| {
                WorkerProcess::new(&graph, worker_end, Pruning::Enabled, NoOpMonitor).run()
            });
            (manager.join().unwrap(), worker.join().unwrap())
        });

        let report = manager.unwrap();
        assert_eq!(report.best.map(|t| t.dist()), Some(15));
        assert_eq!(report.statistics.protocol_violations, 1);
        assert_eq!(report.statistics.terminations_sent, 1);
        assert_eq!(worker.unwrap().subtrees_solved, report.statistics.paths_assigned);
    }

    #[test]
    fn test_lost_workers_surface_as_transport_error() {
        let graph = example_graph();
        let (manager_end, workers) = ChannelNetwork::star(2).into_endpoints();
        drop(workers);
        let result = ManagerProcess::new(&graph, manager_end, Pruning::Enabled)
            .unwrap()
            .run();
        assert!(matches!(
            result,
            Err(ClusterError::Transport(TransportError::Disconnected {
                rank: 0
            }))
        ));
    }
}
