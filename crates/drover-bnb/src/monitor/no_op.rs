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

use crate::{
    monitor::search_monitor::{DeadEnd, SearchMonitor},
    stats::EngineStatistics,
};
use drover_model::{index::NodeIndex, num::Weight, tour::PartialTour};

/// A monitor that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> SearchMonitor<T> for NoOpMonitor
where
    T: Weight,
{
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _: &PartialTour<T>, _: T, _: &EngineStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _: T, _: &EngineStatistics) {}

    #[inline(always)]
    fn on_node(&mut self, _: &PartialTour<T>, _: T, _: &EngineStatistics) {}

    #[inline(always)]
    fn on_prune(&mut self, _: &PartialTour<T>, _: NodeIndex, _: T, _: T, _: &EngineStatistics) {}

    #[inline(always)]
    fn on_dead_end(&mut self, _: &PartialTour<T>, _: DeadEnd, _: &EngineStatistics) {}

    #[inline(always)]
    fn on_closure_rejected(&mut self, _: &PartialTour<T>, _: T, _: &EngineStatistics) {}

    #[inline(always)]
    fn on_solution_found(&mut self, _: &PartialTour<T>, _: T, _: &EngineStatistics) {}
}
