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

//! # Drover Cluster
//!
//! **Manager/worker distribution of the drover branch-and-bound search.**
//!
//! One manager hands subtrees of the search tree to a fixed set of workers on
//! demand, keeps the best tour any worker has reported, and detects the end
//! of the search without a global barrier: it is done once nothing is left to
//! hand out, and the run ends once every worker has been told so.
//! Participants share no mutable state and talk only through a `Transport`.
//!
//! ## Architecture
//!
//! * **`message`**: Protocol tags and the fixed-size integer wire form.
//! * **`transport`**: The `Transport` trait and the in-process channel network.
//! * **`coordinator`**: The manager's pure state machine (splitting, Global Best, termination).
//! * **`best`**: `GlobalBest`, the monotone best-tour holder.
//! * **`manager`** / **`worker`**: The receive loops of both roles.
//! * **`cluster`**: Spawning, joining and collecting a whole run.
//! * **`stats`** / **`error`**: Manager counters and error types.
//!
//! ## Example
//!
//! ```rust
//! use drover_cluster::cluster::Cluster;
//! use drover_model::generate::example_graph;
//!
//! let outcome = Cluster::builder()
//!     .with_workers(2)
//!     .build()
//!     .unwrap()
//!     .solve(&example_graph())
//!     .unwrap();
//! assert_eq!(outcome.result.distance(), Some(15));
//! ```

pub mod best;
pub mod cluster;
pub mod coordinator;
pub mod error;
pub mod manager;
pub mod message;
pub mod stats;
pub mod transport;
pub mod worker;
