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

//! Drover-BnB: depth-first branch-and-bound for the directed TSP
//!
//! Implements the search that every drover worker runs on the subtree it was
//! handed, and the single-threaded solver built on the same engine.
//!
//! Core flow
//! - Provide a `drover_model::graph::Graph<T>` and a seed `PartialTour<T>`.
//! - Choose an `incumbent::IncumbentStore` (local, or a link to a manager).
//! - Optionally attach a `monitor::search_monitor::SearchMonitor`.
//! - Run `engine::SearchEngine::solve` until the local stack is empty.
//!
//! Design highlights
//! - Iterative: an explicit bounded `stack::WorkStack` replaces recursion.
//! - One pruning rule: a branch whose distance exceeds the bound is cut.
//! - `expand` is shared with the manager, which splits work one level at a time.
//!
//! Module map
//! - `engine`: the search loop and its session state.
//! - `expand`: child generation in increasing node order.
//! - `incumbent`: the reporting seam and the local store.
//! - `monitor`: search monitors (log, no-op).
//! - `result`: optimal or infeasible.
//! - `sequential`: the single-participant solver.
//! - `stack`: the bounded LIFO of partial tours.
//! - `stats`: lightweight counters and timing.

pub mod engine;
pub mod error;
pub mod expand;
pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod sequential;
pub mod stack;
pub mod stats;
