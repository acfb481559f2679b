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

use drover_model::{num::Weight, tour::PartialTour};

/// The best closed tour known to the manager.
///
/// The distance never increases: `try_install` accepts a tour only if it is
/// strictly shorter than the current one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalBest<T> {
    tour: Option<PartialTour<T>>,
}

impl<T> GlobalBest<T>
where
    T: Weight,
{
    #[inline]
    pub fn new() -> Self {
        Self { tour: None }
    }

    /// The best distance, or `T::max_value()` while no tour is known.
    #[inline]
    pub fn distance(&self) -> T {
        self.tour.as_ref().map_or_else(T::infinity, |tour| tour.dist())
    }

    #[inline]
    pub fn tour(&self) -> Option<&PartialTour<T>> {
        self.tour.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tour.is_none()
    }

    /// Installs `tour` if it is strictly shorter. Returns `true` on installation.
    #[inline]
    pub fn try_install(&mut self, tour: &PartialTour<T>) -> bool {
        if tour.dist() >= self.distance() {
            return false;
        }
        self.tour = Some(tour.clone());
        true
    }

    #[inline]
    pub fn into_tour(self) -> Option<PartialTour<T>> {
        self.tour
    }
}

impl<T> std::fmt::Display for GlobalBest<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tour {
            Some(tour) => write!(f, "GlobalBest({})", tour),
            None => write!(f, "GlobalBest(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_model::index::NodeIndex;

    fn closed(dist: i64) -> PartialTour<i64> {
        PartialTour::root(2).extended(NodeIndex::new(1), dist - 1).closed(1)
    }

    #[test]
    fn test_distance_is_monotone() {
        let mut best = GlobalBest::new();
        assert!(best.is_empty());
        assert_eq!(best.distance(), i64::MAX);

        let mut seen = Vec::new();
        for d in [30, 40, 25, 25, 31, 10] {
            best.try_install(&closed(d));
            seen.push(best.distance());
        }
        assert_eq!(seen, vec![30, 30, 25, 25, 25, 10]);
        assert!(seen.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(best.to_string(), "GlobalBest(0->1->0,10)");
    }

    #[test]
    fn test_ties_are_rejected() {
        let mut best = GlobalBest::new();
        assert!(best.try_install(&closed(12)));
        assert!(!best.try_install(&closed(12)));
        assert_eq!(best.into_tour().map(|t| t.dist()), Some(12));
    }
}
