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

//! # Weight Trait
//!
//! Unified numeric bounds for edge weights and tour distances. `Weight`
//! collects the integer capabilities required across the workspace so that
//! generic signatures stay short.
//!
//! ## Highlights
//!
//! - Requires `PrimInt + Signed`, which brings saturating arithmetic and
//!   `NumCast` conversions used by the wire codec.
//! - `T::max_value()` doubles as the "infinite" distance sentinel.
//! - `Send + Sync + 'static` so graphs and tours can cross participant threads.

use num_traits::{PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for integer types usable as edge weights and distances.
/// In practice these are `i16`, `i32`, `i64` and `isize`.
pub trait Weight:
    PrimInt + Signed + std::fmt::Debug + std::fmt::Display + Hash + Send + Sync + 'static
{
    /// The distance that stands for "no tour found".
    #[inline(always)]
    fn infinity() -> Self {
        Self::max_value()
    }

    /// Returns `true` if `self` is the infinite distance sentinel.
    #[inline(always)]
    fn is_infinite(self) -> bool {
        self == Self::max_value()
    }
}

impl<T> Weight for T where
    T: PrimInt + Signed + std::fmt::Debug + std::fmt::Display + Hash + Send + Sync + 'static
{
}
