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

//! # Drover Model
//!
//! **The problem data shared by every drover participant.**
//!
//! This crate defines the read-only Edge Cost Model of a directed Traveling
//! Salesman instance and the `PartialTour` record that the search engine,
//! the manager and the wire codec pass around.
//!
//! ## Architecture
//!
//! * **`num`**: The `Weight` trait collecting the integer capabilities the solver needs.
//! * **`index`**: `NodeIndex`, a strongly typed node id.
//! * **`graph`**: `Graph` (immutable, flattened row-major matrix) and `GraphBuilder`.
//! * **`generate`**: Seeded random instances and the fixed example instance.
//! * **`tour`**: `PartialTour`, a bounded prefix of a tour rooted at node `0`.
//! * **`error`**: Validation errors for graphs and tours.
//!
//! ## Conventions
//!
//! 1.  A weight of `0` at `(i, j)` means there is **no** edge `i -> j`.
//! 2.  Every tour starts at node `0` and, once closed, ends at node `0`.
//! 3.  `T::max_value()` is the "no tour found yet" distance.

pub mod error;
pub mod generate;
pub mod graph;
pub mod index;
pub mod num;
pub mod tour;
