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

use thiserror::Error;

/// A push onto a full `WorkStack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("work stack is full ({capacity} slots)")]
pub struct WorkStackFull {
    pub capacity: usize,
}

/// Errors that abort a search before its stack is exhausted.
///
/// `E` is the error type of the `IncumbentStore` the engine reports to.
#[derive(Debug, Error)]
pub enum SearchError<E> {
    #[error(transparent)]
    WorkStackFull(#[from] WorkStackFull),
    #[error("failed to report an improved tour: {0}")]
    Report(#[source] E),
}
