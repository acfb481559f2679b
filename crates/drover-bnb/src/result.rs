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

/// The answer of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// Every branch was exhausted without a closed tour.
    Infeasible,
    /// The best closed tour, proven optimal by exhaustion.
    Optimal(PartialTour<T>),
}

impl<T> SolverResult<T>
where
    T: Weight,
{
    /// Builds the result from the incumbent left after exhaustion.
    #[inline]
    pub fn from_best(best: Option<PartialTour<T>>) -> Self {
        match best {
            Some(tour) => SolverResult::Optimal(tour),
            None => SolverResult::Infeasible,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolverResult::Infeasible)
    }

    /// Returns the optimal tour, if any.
    #[inline]
    pub fn tour(&self) -> Option<&PartialTour<T>> {
        match self {
            SolverResult::Optimal(tour) => Some(tour),
            SolverResult::Infeasible => None,
        }
    }

    /// Returns the optimal distance, if any.
    #[inline]
    pub fn distance(&self) -> Option<T> {
        self.tour().map(|tour| tour.dist())
    }

    #[inline]
    pub fn into_tour(self) -> Option<PartialTour<T>> {
        match self {
            SolverResult::Optimal(tour) => Some(tour),
            SolverResult::Infeasible => None,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(tour) => write!(f, "Optimal(distance={})", tour.dist()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_model::index::NodeIndex;

    #[test]
    fn test_from_best() {
        let tour = PartialTour::<i64>::root(2)
            .extended(NodeIndex::new(1), 3)
            .closed(4);
        let optimal = SolverResult::from_best(Some(tour.clone()));
        assert!(optimal.is_optimal());
        assert_eq!(optimal.distance(), Some(7));
        assert_eq!(optimal.tour(), Some(&tour));
        assert_eq!(format!("{}", optimal), "Optimal(distance=7)");

        let none = SolverResult::<i64>::from_best(None);
        assert!(none.is_infeasible());
        assert_eq!(none.distance(), None);
        assert_eq!(format!("{}", none), "Infeasible");
        assert!(none.into_tour().is_none());
    }
}
