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

//! Search monitoring interface
//!
//! Declares the `SearchMonitor` trait for observing the depth-first
//! branch-and-bound of a single subtree. Callbacks follow the engine's
//! lifecycle:
//!
//! - enter → {node → (prune | dead end | solution)*}* → exit
//! - `EngineStatistics` is provided to every callback for telemetry.
//!
//! Methods take `&mut self`; a monitor belongs to one participant and is
//! never shared across threads. Monitors observe only: they cannot alter the
//! course of the search.

use crate::stats::EngineStatistics;
use drover_model::{index::NodeIndex, num::Weight, tour::PartialTour};

/// Why a tour was abandoned without producing children or a solution.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeadEnd {
    /// No unvisited node is reachable from the last node.
    NoExtension,
    /// The tour visits every node but has no edge back to node `0`.
    NoClosingEdge,
}

impl std::fmt::Display for DeadEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeadEnd::NoExtension => write!(f, "NoExtension"),
            DeadEnd::NoClosingEdge => write!(f, "NoClosingEdge"),
        }
    }
}

/// Trait for observing the search engine.
pub trait SearchMonitor<T>
where
    T: Weight,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the engine starts on a new seed.
    fn on_enter_search(&mut self, seed: &PartialTour<T>, bound: T, statistics: &EngineStatistics);
    /// Called when the engine has emptied its stack.
    fn on_exit_search(&mut self, bound: T, statistics: &EngineStatistics);
    /// Called for every tour popped from the stack.
    fn on_node(&mut self, tour: &PartialTour<T>, bound: T, statistics: &EngineStatistics);
    /// Called when the extension of `tour` by `node` is cut because
    /// `candidate` exceeds `bound`.
    fn on_prune(
        &mut self,
        tour: &PartialTour<T>,
        node: NodeIndex,
        candidate: T,
        bound: T,
        statistics: &EngineStatistics,
    );
    /// Called when a tour cannot be continued.
    fn on_dead_end(&mut self, tour: &PartialTour<T>, reason: DeadEnd, statistics: &EngineStatistics);
    /// Called when a closed tour is not strictly better than `bound`.
    fn on_closure_rejected(&mut self, tour: &PartialTour<T>, bound: T, statistics: &EngineStatistics);
    /// Called after an improved closed tour was reported.
    /// `acknowledged` is the bound the incumbent store answered with.
    fn on_solution_found(
        &mut self,
        tour: &PartialTour<T>,
        acknowledged: T,
        statistics: &EngineStatistics,
    );
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
