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

//! The manager's decision logic.
//!
//! `Coordinator` owns the manager's work stack, the Global Best and the
//! per-worker notification flags. It performs no I/O: `ManagerProcess`
//! feeds it the requests and reports it receives and sends back the replies
//! it produces, which keeps every interleaving reproducible in tests.
//!
//! Work is split lazily. Stack entries are handed out as they are until the
//! pop that empties the stack; that entry is expanded one level (pruned
//! against the Global Best) and its last child is handed out while the
//! siblings are pushed. Once nothing is left to hand out the coordinator is
//! done, and every later request is answered with a terminate notice.
//! The run is finished when it is done and every worker has been told.

use crate::{
    best::GlobalBest,
    error::{ClusterError, ProtocolError},
    message::Message,
    stats::ManagerStatistics,
};
use drover_bnb::{
    expand::{Pruning, children},
    stack::WorkStack,
};
use drover_model::{graph::Graph, num::Weight, tour::PartialTour};

/// The answer to a worker's request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply<T> {
    /// Search this subtree, starting from `best`.
    Assign { tour: PartialTour<T>, best: T },
    /// Stop; no work remains.
    Terminate { best: T },
}

impl<T> Reply<T>
where
    T: Weight,
{
    #[inline]
    pub fn is_terminate(&self) -> bool {
        matches!(self, Reply::Terminate { .. })
    }

    #[inline]
    pub fn into_message(self) -> Message<T> {
        match self {
            Reply::Assign { tour, best } => Message::assign(tour, best),
            Reply::Terminate { best } => Message::terminate(best),
        }
    }
}

/// Manager state machine.
pub struct Coordinator<'a, T> {
    graph: &'a Graph<T>,
    pruning: Pruning,
    stack: WorkStack<T>,
    best: GlobalBest<T>,
    done: bool,
    notified: Vec<bool>,
    num_notified: usize,
    stats: ManagerStatistics,
}

impl<T> std::fmt::Debug for Coordinator<'_, T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("pruning", &self.pruning)
            .field("pending", &self.stack.len())
            .field("best", &self.best)
            .field("done", &self.done)
            .field("notified", &self.notified)
            .finish()
    }
}

impl<'a, T> Coordinator<'a, T>
where
    T: Weight,
{
    /// Creates a coordinator for workers `1..=num_workers`, its stack
    /// seeded with the root tour `[0]`.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::NoWorkers` if `num_workers == 0`.
    pub fn new(
        graph: &'a Graph<T>,
        num_workers: usize,
        pruning: Pruning,
    ) -> Result<Self, ClusterError> {
        if num_workers == 0 {
            return Err(ClusterError::NoWorkers);
        }

        let mut stack = WorkStack::preallocated(graph.num_nodes());
        stack.push(PartialTour::root(graph.num_nodes()))?;

        Ok(Self {
            graph,
            pruning,
            stack,
            best: GlobalBest::new(),
            done: false,
            notified: vec![false; num_workers],
            num_notified: 0,
            stats: ManagerStatistics::default(),
        })
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    #[inline]
    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    #[inline]
    pub fn num_workers(&self) -> usize {
        self.notified.len()
    }

    /// `true` once no work remains to hand out.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// `true` once done and every worker has received its terminate notice.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.done && self.num_notified == self.notified.len()
    }

    /// Returns `true` if `worker` was sent its terminate notice.
    #[inline]
    pub fn is_notified(&self, worker: usize) -> bool {
        self.slot(worker)
            .map(|slot| self.notified[slot])
            .unwrap_or(false)
    }

    /// Number of tours waiting on the manager's stack.
    #[inline]
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn best_distance(&self) -> T {
        self.best.distance()
    }

    #[inline]
    pub fn global_best(&self) -> &GlobalBest<T> {
        &self.best
    }

    #[inline]
    pub fn statistics(&self) -> &ManagerStatistics {
        &self.stats
    }

    /// Counts a message that was ignored.
    #[inline]
    pub fn record_violation(&mut self) {
        self.stats.on_protocol_violation();
    }

    /// Answers a request for work from `worker`.
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError` for a rank outside `1..=num_workers` and
    /// `ClusterError::WorkStackFull` if a split overflows the stack.
    pub fn on_request(&mut self, worker: usize) -> Result<Reply<T>, ClusterError> {
        let slot = self.slot(worker)?;
        if self.done {
            return Ok(self.terminate(slot));
        }

        let Some(entry) = self.stack.pop() else {
            self.done = true;
            return Ok(self.terminate(slot));
        };

        let tour = if self.stack.is_empty() && entry.len() < self.graph.num_nodes() {
            let mut kids = children(self.graph, &entry, self.best.distance(), self.pruning);
            self.stats.on_split(kids.len());
            log::debug!("T0: split {} into {} subtrees", entry, kids.len());

            let Some(last) = kids.pop() else {
                self.done = true;
                return Ok(self.terminate(slot));
            };
            self.stack.extend(kids)?;
            last
        } else {
            entry
        };

        if self.stack.is_empty() {
            self.done = true;
        }
        self.stats.on_path_assigned();

        Ok(Reply::Assign {
            tour,
            best: self.best.distance(),
        })
    }

    /// Handles an improved tour reported by `worker` and returns the
    /// distance to acknowledge.
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError`, and counts a violation, if `worker` is not
    /// a worker rank or `tour` is not a closed tour of the graph with the
    /// distance it claims. The Global Best is unchanged in that case.
    pub fn on_report(&mut self, worker: usize, tour: &PartialTour<T>) -> Result<T, ProtocolError> {
        if let Err(err) = self.slot(worker).and_then(|_| verify_closed(self.graph, tour)) {
            self.stats.on_protocol_violation();
            return Err(err);
        }

        let accepted = self.best.try_install(tour);
        self.stats.on_report(accepted);
        if accepted {
            log::debug!("T0: new best {} from T{}", tour, worker);
        }
        Ok(self.best.distance())
    }

    /// Consumes the coordinator, returning the Global Best and statistics.
    #[inline]
    pub fn finish(self) -> (Option<PartialTour<T>>, ManagerStatistics) {
        (self.best.into_tour(), self.stats)
    }

    fn terminate(&mut self, slot: usize) -> Reply<T> {
        if self.notified[slot] {
            log::warn!("T0: T{} asked for work after its terminate notice", slot + 1);
            self.stats.on_protocol_violation();
        } else {
            self.notified[slot] = true;
            self.num_notified += 1;
        }
        self.stats.on_termination_sent();
        Reply::Terminate {
            best: self.best.distance(),
        }
    }

    #[inline]
    fn slot(&self, worker: usize) -> Result<usize, ProtocolError> {
        if worker == 0 || worker > self.notified.len() {
            return Err(ProtocolError::UnknownWorker(worker));
        }
        Ok(worker - 1)
    }
}

/// Checks that `tour` is closed and that its distance matches the graph.
fn verify_closed<T>(graph: &Graph<T>, tour: &PartialTour<T>) -> Result<(), ProtocolError>
where
    T: Weight,
{
    let inconsistent = || ProtocolError::InconsistentTour(tour.to_string());
    if tour.num_nodes() != graph.num_nodes() || !tour.is_closed() {
        return Err(inconsistent());
    }

    let nodes = tour.nodes();
    let last = nodes.len() - 2;
    let mut dist = T::zero();
    for (position, pair) in nodes.windows(2).enumerate() {
        let weight = if position == last {
            graph.closing_weight(pair[0])
        } else {
            graph.edge(pair[0], pair[1])
        };
        dist = dist.saturating_add(weight.ok_or_else(inconsistent)?);
    }

    if dist != tour.dist() {
        return Err(inconsistent());
    }
    Ok(())
}
