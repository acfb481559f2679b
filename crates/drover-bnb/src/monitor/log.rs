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

//! Logging monitor
//!
//! `LogMonitor` writes the engine's events through the `log` facade, each
//! line prefixed with the participant label (`T<rank>:`). Visited paths and
//! prune decisions go to `trace`, improvements and subtree boundaries to
//! `debug`.

use crate::{
    monitor::search_monitor::{DeadEnd, SearchMonitor},
    stats::EngineStatistics,
};
use drover_model::{index::NodeIndex, num::Weight, tour::PartialTour};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct LogMonitor {
    rank: usize,
    start_time: Instant,
}

impl LogMonitor {
    /// Creates a monitor that labels its lines with `T<rank>:`.
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }
}

impl<T> SearchMonitor<T> for LogMonitor
where
    T: Weight,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, seed: &PartialTour<T>, bound: T, _: &EngineStatistics) {
        self.start_time = Instant::now();
        if bound.is_infinite() {
            log::debug!("T{}: searching subtree {} (no bound)", self.rank, seed);
        } else {
            log::debug!("T{}: searching subtree {} (bound {})", self.rank, seed, bound);
        }
    }

    fn on_exit_search(&mut self, bound: T, statistics: &EngineStatistics) {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        log::debug!(
            "T{}: subtree exhausted after {:.3}s, {} nodes explored, {} pruned, bound {}",
            self.rank,
            elapsed,
            statistics.nodes_explored,
            statistics.prunings_bound,
            bound
        );
    }

    fn on_node(&mut self, tour: &PartialTour<T>, _: T, _: &EngineStatistics) {
        log::trace!("T{}: {}", self.rank, tour);
    }

    fn on_prune(
        &mut self,
        tour: &PartialTour<T>,
        node: NodeIndex,
        candidate: T,
        bound: T,
        _: &EngineStatistics,
    ) {
        log::trace!(
            "T{}: pruning {}->{} ({} > {})",
            self.rank,
            tour,
            node,
            candidate,
            bound
        );
    }

    fn on_dead_end(&mut self, tour: &PartialTour<T>, reason: DeadEnd, _: &EngineStatistics) {
        log::trace!("T{}: dead end at {} ({})", self.rank, tour, reason);
    }

    fn on_closure_rejected(&mut self, tour: &PartialTour<T>, bound: T, _: &EngineStatistics) {
        log::trace!("T{}: closure {} does not beat {}", self.rank, tour, bound);
    }

    fn on_solution_found(&mut self, tour: &PartialTour<T>, acknowledged: T, _: &EngineStatistics) {
        if acknowledged < tour.dist() {
            log::debug!(
                "T{}: found {} but a better tour of {} is known",
                self.rank,
                tour,
                acknowledged
            );
        } else {
            log::debug!("T{}: found {}", self.rank, tour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_keeps_rank_and_name() {
        let m = LogMonitor::new(3);
        assert_eq!(m.rank(), 3);
        assert_eq!(<LogMonitor as SearchMonitor<i64>>::name(&m), "LogMonitor");
    }

    #[test]
    fn test_callbacks_do_not_panic_without_logger() {
        let mut m = LogMonitor::new(1);
        let stats = EngineStatistics::default();
        let root = PartialTour::<i64>::root(3);
        let child = root.extended(NodeIndex::new(1), 4);
        m.on_enter_search(&root, i64::MAX, &stats);
        m.on_node(&child, 10, &stats);
        m.on_prune(&child, NodeIndex::new(2), 12, 10, &stats);
        m.on_dead_end(&child, DeadEnd::NoExtension, &stats);
        m.on_exit_search(10, &stats);
    }
}
