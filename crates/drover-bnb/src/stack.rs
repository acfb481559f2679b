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

use crate::error::WorkStackFull;
use drover_model::{num::Weight, tour::PartialTour};

/// Returns the slot count reserved for a graph with `num_nodes` nodes:
/// `N·(N−1)/2`, but at least one slot so the seed always fits.
#[inline]
pub fn capacity_for(num_nodes: usize) -> usize {
    (num_nodes.saturating_mul(num_nodes.saturating_sub(1)) / 2).max(1)
}

/// A bounded LIFO stack of pending partial tours.
///
/// Used by the manager for the global pending work and by every worker as
/// its local depth-first frontier. The capacity is fixed when the stack is
/// sized for a graph; `push` reports `WorkStackFull` instead of growing.
///
/// Performance notes:
/// - `preallocated` reserves every slot up front.
/// - `clear()` keeps the allocation for the next subtree.
#[derive(Clone, Debug)]
pub struct WorkStack<T> {
    entries: Vec<PartialTour<T>>,
    capacity: usize,
}

impl<T> Default for WorkStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkStack<T> {
    /// Creates an empty stack with zero capacity. Call `ensure_capacity`
    /// (or use `preallocated`) before pushing.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            capacity: 0,
        }
    }

    /// Creates a stack sized for a graph with `num_nodes` nodes.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self::with_capacity(capacity_for(num_nodes))
    }

    /// Creates a stack holding at most `capacity` tours.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Ensures the stack can hold the pending work of a graph with `num_nodes` nodes.
    #[inline]
    pub fn ensure_capacity(&mut self, num_nodes: usize) {
        let capacity = capacity_for(num_nodes);
        if self.capacity < capacity {
            self.entries.reserve(capacity - self.entries.len());
            self.capacity = capacity;
        }
    }

    /// Returns the number of pending tours.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no tour is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of pending tours.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pushes a tour on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns `WorkStackFull` if all slots are taken; the tour is dropped.
    #[inline]
    pub fn push(&mut self, tour: PartialTour<T>) -> Result<(), WorkStackFull> {
        if self.entries.len() >= self.capacity {
            return Err(WorkStackFull {
                capacity: self.capacity,
            });
        }
        self.entries.push(tour);
        Ok(())
    }

    /// Pops the most recently pushed tour.
    #[inline]
    pub fn pop(&mut self) -> Option<PartialTour<T>> {
        self.entries.pop()
    }

    /// Drops all pending tours but keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> WorkStack<T>
where
    T: Weight,
{
    /// Pushes every tour of `tours` in iteration order (the last one ends on top).
    ///
    /// # Errors
    ///
    /// Stops at the first tour that does not fit.
    pub fn extend<I>(&mut self, tours: I) -> Result<(), WorkStackFull>
    where
        I: IntoIterator<Item = PartialTour<T>>,
    {
        for tour in tours {
            self.push(tour)?;
        }
        Ok(())
    }
}

impl<T> std::fmt::Display for WorkStack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorkStack(entries: {}, capacity: {})",
            self.entries.len(),
            self.capacity
        )
    }
}
