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

use std::time::Duration;

/// Statistics collected by the search engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStatistics {
    /// Tours popped from the local stack.
    pub nodes_explored: u64,
    /// Child tours pushed onto the local stack.
    pub children_generated: u64,
    /// Branches cut because their distance exceeded the bound.
    pub prunings_bound: u64,
    /// Tours without any way forward (no child, or no edge back to `0`).
    pub dead_ends: u64,
    /// Closed tours that did not beat the bound.
    pub closures_rejected: u64,
    /// Improved tours reported to the incumbent store.
    pub solutions_found: u64,
    /// The longest tour prefix popped.
    pub max_depth: u64,
    /// Number of subtrees (seeds) searched.
    pub subtrees: u64,
    /// Total time spent searching.
    pub time_total: Duration,
}

impl EngineStatistics {
    #[inline]
    pub fn on_node_explored(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn on_child_generated(&mut self) {
        self.children_generated = self.children_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_dead_end(&mut self) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }

    #[inline]
    pub fn on_closure_rejected(&mut self) {
        self.closures_rejected = self.closures_rejected.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_subtree(&mut self) {
        self.subtrees = self.subtrees.saturating_add(1);
    }

    #[inline]
    pub fn add_time(&mut self, duration: Duration) {
        self.time_total = self.time_total.saturating_add(duration);
    }

    /// Accumulates `other` into `self` (counters add, depth takes the maximum).
    pub fn merge(&mut self, other: &EngineStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.children_generated = self
            .children_generated
            .saturating_add(other.children_generated);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.dead_ends = self.dead_ends.saturating_add(other.dead_ends);
        self.closures_rejected = self
            .closures_rejected
            .saturating_add(other.closures_rejected);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.subtrees = self.subtrees.saturating_add(other.subtrees);
        self.time_total = self.time_total.saturating_add(other.time_total);
    }
}

impl std::fmt::Display for EngineStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Drover Engine Statistics:")?;
        writeln!(f, "  Subtrees searched:    {}", self.subtrees)?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Children generated:   {}", self.children_generated)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Dead ends:            {}", self.dead_ends)?;
        writeln!(f, "  Closures rejected:    {}", self.closures_rejected)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
