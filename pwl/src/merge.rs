// This file is part of Searchcost.
// Copyright © 2025 The Searchcost developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Walk over the union of the breakpoints of two piecewise functions.
use crate::piecewise::Piecewise;

/// Position reached after one step of the breakpoint merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Advance {
    /// Next breakpoint of either function.
    pub(crate) bound: i64,
    /// Index of the segment of the first function active at `bound`.
    pub(crate) first: usize,
    /// Index of the segment of the second function active at `bound`.
    pub(crate) second: usize,
}

/// Given the segments `i` of `f` and `j` of `g` that are active on the current interval, returns
/// the smallest of their upper bounds and the indices of the segments active from there.
///
/// Both indices move forward when the two functions share the breakpoint.
/// Returns `None` when `i` and `j` are both the last segment of their function.
pub(crate) fn advance_indexes(f: &Piecewise, g: &Piecewise, i: usize, j: usize) -> Option<Advance> {
    let advance = |bound, first, second| Advance {
        bound,
        first,
        second,
    };
    match (f.upper_bound(i), g.upper_bound(j)) {
        (None, None) => None,
        (Some(x), None) => Some(advance(x, i + 1, j)),
        (None, Some(y)) => Some(advance(y, i, j + 1)),
        (Some(x), Some(y)) if x < y => Some(advance(x, i + 1, j)),
        (Some(x), Some(y)) if x > y => Some(advance(y, i, j + 1)),
        (Some(x), Some(_)) => Some(advance(x, i + 1, j + 1)),
    }
}

/// An interval `[start, end)` over which two piecewise functions are both affine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergedInterval {
    /// First `x` value of the interval.
    pub start: i64,
    /// First `x` value after the interval, `None` for the last (unbounded) interval.
    pub end: Option<i64>,
    /// Index of the segment of the first function active on the interval.
    pub first: usize,
    /// Index of the segment of the second function active on the interval.
    pub second: usize,
}

/// Iterator over the [MergedInterval]s of two piecewise functions, in increasing order.
///
/// The intervals cover all `x >= 1` and the last one is unbounded.
#[derive(Clone, Debug)]
pub struct MergedIntervals<'a> {
    f: &'a Piecewise,
    g: &'a Piecewise,
    next: Option<(i64, usize, usize)>,
}

impl<'a> MergedIntervals<'a> {
    /// Creates an iterator over the merged intervals of `f` and `g`.
    pub fn new(f: &'a Piecewise, g: &'a Piecewise) -> Self {
        MergedIntervals {
            f,
            g,
            next: Some((1, 0, 0)),
        }
    }
}

impl Iterator for MergedIntervals<'_> {
    type Item = MergedInterval;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, first, second) = self.next?;
        let advance = advance_indexes(self.f, self.g, first, second);
        self.next = advance.map(|a| (a.bound, a.first, a.second));
        Some(MergedInterval {
            start,
            end: advance.map(|a| a.bound),
            first,
            second,
        })
    }
}
