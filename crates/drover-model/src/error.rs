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

use crate::index::NodeIndex;
use thiserror::Error;

/// Errors raised while validating an Edge Cost Model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("graph must contain at least one node")]
    Empty,
    #[error("row {row} has {len} entries but the matrix has {expected} columns")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("edge {from} -> {to} has a negative weight")]
    NegativeWeight { from: NodeIndex, to: NodeIndex },
}

/// Errors raised while rebuilding a `PartialTour` from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("tour length {len} is outside 1..={max}")]
    Length { len: usize, max: usize },
    #[error("tour must start at node 0 but starts at {0}")]
    NotRooted(NodeIndex),
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: NodeIndex, num_nodes: usize },
    #[error("node {0} is visited twice")]
    Revisited(NodeIndex),
}
