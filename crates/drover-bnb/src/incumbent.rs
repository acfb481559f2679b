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

//! Incumbent management for the search engine
//!
//! Declares `IncumbentStore<T>`, the seam through which the engine learns
//! about tighter bounds and publishes improved closed tours. This abstracts
//! over a local, single-process search and a worker that forwards every
//! improvement to a remote manager.
//!
//! Implementations
//! - `LocalIncumbent<T>`: keeps the best closed tour itself. The
//!   acknowledged bound is simply its own best distance.
//! - `drover_cluster`'s manager link: sends the tour to the manager and
//!   returns the distance the manager acknowledges.

use drover_model::{num::Weight, tour::PartialTour};
use std::convert::Infallible;

/// Trait for the owner of the best-known tour during a search.
pub trait IncumbentStore<T>
where
    T: Weight,
{
    /// Error raised when an improvement cannot be delivered.
    type Error;

    /// Synchronizes the engine's local bound with whatever the store knows.
    /// The default keeps the local bound.
    #[inline(always)]
    fn tighten(&self, current_local_bound: T) -> T {
        current_local_bound
    }

    /// Publishes an improved closed tour and returns the authoritative bound
    /// after the report. A returned value smaller than `tour.dist()` means
    /// the store already knew a better tour.
    fn on_solution_found(&mut self, tour: &PartialTour<T>) -> Result<T, Self::Error>;
}

/// A store that keeps the best closed tour of a single-process search.
#[derive(Clone, Debug, Default)]
pub struct LocalIncumbent<T> {
    best: Option<PartialTour<T>>,
}

impl<T> LocalIncumbent<T>
where
    T: Weight,
{
    /// Creates an empty store.
    #[inline]
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Returns the best distance, or `T::max_value()` if no tour was installed.
    #[inline]
    pub fn upper_bound(&self) -> T {
        self.best.as_ref().map_or_else(T::infinity, |t| t.dist())
    }

    /// Returns the best closed tour, if any.
    #[inline]
    pub fn best(&self) -> Option<&PartialTour<T>> {
        self.best.as_ref()
    }

    /// Consumes the store and returns the best closed tour, if any.
    #[inline]
    pub fn into_best(self) -> Option<PartialTour<T>> {
        self.best
    }

    /// Installs `tour` if it is strictly better than the current best.
    /// Returns `true` on installation.
    #[inline]
    pub fn try_install(&mut self, tour: &PartialTour<T>) -> bool {
        if tour.dist() >= self.upper_bound() {
            return false;
        }
        self.best = Some(tour.clone());
        true
    }
}

impl<T> IncumbentStore<T> for LocalIncumbent<T>
where
    T: Weight,
{
    type Error = Infallible;

    #[inline(always)]
    fn tighten(&self, current_local_bound: T) -> T {
        self.upper_bound().min(current_local_bound)
    }

    #[inline]
    fn on_solution_found(&mut self, tour: &PartialTour<T>) -> Result<T, Self::Error> {
        self.try_install(tour);
        Ok(self.upper_bound())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_model::index::NodeIndex;

    fn closed(dist: i64) -> PartialTour<i64> {
        PartialTour::root(2)
            .extended(NodeIndex::new(1), dist - 1)
            .closed(1)
    }

    #[test]
    fn test_initial_state() {
        let store = LocalIncumbent::<i64>::new();
        assert_eq!(store.upper_bound(), i64::MAX);
        assert!(store.best().is_none());
        assert_eq!(store.tighten(17), 17);
    }

    #[test]
    fn test_install_better_and_reject_worse_or_equal() {
        let mut store = LocalIncumbent::<i64>::new();
        assert!(store.try_install(&closed(100)));
        assert_eq!(store.upper_bound(), 100);
        assert!(!store.try_install(&closed(150)));
        assert!(!store.try_install(&closed(100)));
        assert!(store.try_install(&closed(40)));
        assert_eq!(store.best().map(|t| t.dist()), Some(40));
        assert_eq!(store.into_best().map(|t| t.dist()), Some(40));
    }

    #[test]
    fn test_acknowledgment_reports_the_better_of_both() {
        let mut store = LocalIncumbent::<i64>::new();
        assert_eq!(store.on_solution_found(&closed(30)), Ok(30));
        // A worse report is acknowledged with the incumbent distance.
        assert_eq!(store.on_solution_found(&closed(50)), Ok(30));
        assert_eq!(store.tighten(45), 30);
        assert_eq!(store.tighten(10), 10);
    }
}
