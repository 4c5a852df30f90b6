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

//! Piecewise-linear functions defined on the integers `x >= 1`.
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::linear::Linear;
use crate::merge::MergedIntervals;

/// A segment of a [Piecewise] function.
///
/// Starting at `lower_bound`, the function is equal to `f`, until the lower bound of the next
/// segment (or for all `x >= lower_bound` if this is the last segment).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// First `x` value where the segment is active.
    pub lower_bound: i64,
    /// Affine function of the segment.
    pub f: Linear,
}

impl Segment {
    /// Creates a new segment.
    pub const fn new(lower_bound: i64, f: Linear) -> Self {
        Segment { lower_bound, f }
    }
}

/// A function defined for all integers `x >= 1`, represented as a list of [Segment]s ordered by
/// lower bound.
///
/// The value at `x` is the value of the segment with the largest lower bound lower than or equal
/// to `x`.
/// The following properties always hold:
///
/// - There is at least 1 segment.
/// - The first segment starts at `x = 1`.
/// - The lower bounds are strictly increasing.
///
/// A function is _normalized_ when no two adjacent segments share the same affine function.
/// All the operations of the algebra return normalized functions (given normalized inputs for
/// [Piecewise::offset_x] and [Piecewise::offset_y]).
///
/// Two functions are equal (`==`) if and only if their segments are identical, so two
/// non-normalized functions can be different while taking the same values.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Piecewise {
    segments: Vec<Segment>,
}

impl Piecewise {
    /// Creates a new piecewise function from a vector of segments.
    ///
    /// Return an error if:
    ///
    /// - There is no segment.
    /// - The first segment does not start at `x = 1`.
    /// - The lower bounds are not strictly increasing.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self> {
        let Some(first) = segments.first() else {
            bail!("A piecewise function must have at least 1 segment");
        };
        if first.lower_bound != 1 {
            bail!(
                "The first segment must start at x = 1, got x = {}",
                first.lower_bound
            );
        }
        if let Some((s, t)) = segments
            .iter()
            .tuple_windows()
            .find(|(s, t)| s.lower_bound >= t.lower_bound)
        {
            bail!(
                "The lower bounds must be strictly increasing, got {} followed by {}",
                s.lower_bound,
                t.lower_bound
            );
        }
        Ok(Piecewise { segments })
    }

    /// Returns the constant function `f(x) = c`.
    pub fn constant(c: i64) -> Self {
        Linear::constant(c).into()
    }

    /// Returns the function `f(x) = 0`.
    pub fn zero() -> Self {
        Linear::ZERO.into()
    }

    /// Returns the segments of the function.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments of the function.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Returns the lower bound of the last segment.
    pub fn last_lower_bound(&self) -> i64 {
        self.segments[self.segments.len() - 1].lower_bound
    }

    /// Returns the first `x` value where segment `i` is no longer active, or `None` if `i` is the
    /// last segment.
    pub fn upper_bound(&self, i: usize) -> Option<i64> {
        self.segments.get(i + 1).map(|s| s.lower_bound)
    }

    /// Returns the index of the segment active at `x`, i.e., the segment with the largest lower
    /// bound lower than or equal to `x`.
    ///
    /// *Panics* if `x < 1`.
    pub fn active_segment(&self, x: i64) -> usize {
        assert!(
            x >= 1,
            "Piecewise functions are only defined for x >= 1, got x = {x}"
        );
        if x == 1 {
            return 0;
        }
        // Queries beyond the last breakpoint are the most common ones.
        let last = self.segments.len() - 1;
        if x >= self.segments[last].lower_bound {
            return last;
        }
        // At least one segment (the first one) starts at or before `x`.
        self.segments.partition_point(|s| s.lower_bound <= x) - 1
    }

    /// Evaluates the function at `x`.
    ///
    /// *Panics* if `x < 1`.
    pub fn eval(&self, x: i64) -> i64 {
        self.segments[self.active_segment(x)].f.eval(x)
    }

    /// Returns the function `g(x) = f(x + n)`.
    ///
    /// The segments that end before `x = n + 1` disappear so the result can have fewer segments.
    ///
    /// *Panics* if `n < 0`.
    #[must_use]
    pub fn offset_x(&self, n: i64) -> Self {
        assert!(n >= 0, "Cannot shift a piecewise function by {n} < 0");
        if n == 0 {
            return self.clone();
        }
        // The segment active at `x = n + 1` becomes the leading segment.
        let first = self.active_segment(n + 1);
        let mut segments = Vec::with_capacity(self.segments.len() - first);
        segments.push(Segment::new(1, self.segments[first].f.offset_x(n)));
        segments.extend(
            self.segments[first + 1..]
                .iter()
                .map(|s| Segment::new(s.lower_bound - n, s.f.offset_x(n))),
        );
        Piecewise { segments }
    }

    /// Returns the function `g(x) = f(x) + n`.
    #[must_use]
    pub fn offset_y(&self, n: i64) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|s| Segment::new(s.lower_bound, s.f.offset_y(n)))
            .collect();
        Piecewise { segments }
    }

    /// Returns the function `h(x) = f(x) + g(x)`.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, |f, g| f + g)
    }

    /// Returns the function `h(x) = f(x) - g(x)`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.combine(other, |f, g| f - g)
    }

    /// Applies `op` to the affine functions active on each interval of the merged breakpoints.
    fn combine<F: Fn(Linear, Linear) -> Linear>(&self, other: &Self, op: F) -> Self {
        let mut h = PiecewiseBuilder::with_capacity(self.segments.len() + other.segments.len());
        for interval in MergedIntervals::new(self, other) {
            h.push(
                interval.start,
                op(
                    self.segments[interval.first].f,
                    other.segments[interval.second].f,
                ),
            );
        }
        h.finish()
    }

    /// Returns `true` if no two adjacent segments share the same affine function.
    pub fn is_normalized(&self) -> bool {
        self.segments.iter().tuple_windows().all(|(s, t)| s.f != t.f)
    }

    /// Returns the normalized version of the function, where adjacent segments with the same
    /// affine function are merged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut h = PiecewiseBuilder::with_capacity(self.segments.len());
        for s in self.segments.iter() {
            h.push(s.lower_bound, s.f);
        }
        h.finish()
    }

    /// Returns `true` if the function is equal to `0` for all `x >= 1`.
    pub fn is_zero(&self) -> bool {
        self.segments.iter().all(|s| s.f == Linear::ZERO)
    }
}

impl From<Linear> for Piecewise {
    fn from(f: Linear) -> Self {
        Piecewise {
            segments: vec![Segment::new(1, f)],
        }
    }
}

impl TryFrom<Vec<Segment>> for Piecewise {
    type Error = anyhow::Error;

    fn try_from(segments: Vec<Segment>) -> Result<Self> {
        Piecewise::from_segments(segments)
    }
}

impl From<Piecewise> for Vec<Segment> {
    fn from(f: Piecewise) -> Self {
        f.segments
    }
}

impl fmt::Display for Piecewise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.segments.len() - 1;
        for (i, s) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if i == last {
                write!(f, "{} (x>={})", s.f, s.lower_bound)?;
            } else {
                let upper_bound = self.segments[i + 1].lower_bound;
                write!(f, "{} ({}<=x<{})", s.f, s.lower_bound, upper_bound)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Piecewise {
    type Err = anyhow::Error;

    /// Parses the representation produced by [Display](fmt::Display), e.g.,
    /// `"4x+5 (1<=x<5), 3x+11 (x>=5)"`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(", ").collect();
        let mut segments = Vec::with_capacity(parts.len());
        // Upper bound written in the previous segment.
        let mut expected_bound = None;
        for (i, part) in parts.iter().enumerate() {
            let (f, bounds) = part
                .strip_suffix(')')
                .and_then(|p| p.split_once(" ("))
                .ok_or_else(|| anyhow!("Invalid segment `{part}`"))?;
            let f: Linear = f
                .parse::<Linear>()
                .with_context(|| format!("Invalid function in segment `{part}`"))?;
            let (lower_bound, upper_bound) = if i == parts.len() - 1 {
                let lb = bounds
                    .strip_prefix("x>=")
                    .ok_or_else(|| anyhow!("The last segment must be of the form `x>=n`"))?;
                let lb = lb
                    .parse::<i64>()
                    .with_context(|| format!("Invalid bound in segment `{part}`"))?;
                (lb, None)
            } else {
                let (lb, ub) = bounds
                    .split_once("<=x<")
                    .ok_or_else(|| anyhow!("Expected bounds of the form `m<=x<n` in `{part}`"))?;
                let lb: i64 = lb
                    .parse::<i64>()
                    .with_context(|| format!("Invalid lower bound in segment `{part}`"))?;
                let ub: i64 = ub
                    .parse::<i64>()
                    .with_context(|| format!("Invalid upper bound in segment `{part}`"))?;
                if ub <= lb {
                    bail!("Empty segment `{part}`");
                }
                (lb, Some(ub))
            };
            if let Some(prev) = expected_bound {
                if prev != lower_bound {
                    bail!(
                        "Segment ending at x = {prev} is followed by a segment starting at \
                        x = {lower_bound}"
                    );
                }
            }
            expected_bound = upper_bound;
            segments.push(Segment::new(lower_bound, f));
        }
        Piecewise::from_segments(segments)
    }
}

/// A struct to conveniently build a normalized [Piecewise] function, segment by segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PiecewiseBuilder {
    segments: Vec<Segment>,
}

impl PiecewiseBuilder {
    /// Creates a new [PiecewiseBuilder] with no segment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [PiecewiseBuilder] with no segment, that can hold at least the given
    /// capacity of segments.
    pub fn with_capacity(capacity: usize) -> Self {
        PiecewiseBuilder {
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Returns `true` if no segment was pushed yet.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments pushed so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Pushes a segment starting at `lower_bound`.
    ///
    /// The segment is skipped if its function is equal to the function of the previous segment.
    pub fn push(&mut self, lower_bound: i64, f: Linear) {
        debug_assert!(
            !self.is_empty() || lower_bound == 1,
            "The first segment must start at x = 1, got x = {lower_bound}"
        );
        if let Some(last) = self.segments.last() {
            debug_assert!(
                last.lower_bound < lower_bound,
                "{} >= {}",
                last.lower_bound,
                lower_bound
            );
            if last.f == f {
                return;
            }
        }
        self.segments.push(Segment::new(lower_bound, f));
    }

    /// Consumes the [PiecewiseBuilder] and returns a [Piecewise] function.
    ///
    /// *Panics* if the [PiecewiseBuilder] has no segment.
    pub fn finish(mut self) -> Piecewise {
        assert!(
            !self.is_empty(),
            "The piecewise function must have at least 1 segment"
        );
        self.segments.shrink_to_fit();
        Piecewise {
            segments: self.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(segments: &[(i64, i64, i64)]) -> Piecewise {
        Piecewise::from_segments(
            segments
                .iter()
                .map(|&(lb, a, b)| Segment::new(lb, Linear::new(a, b)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn active_segment_test() {
        let f = pw(&[(1, 4, 5), (5, 3, 11), (9, 2, 21), (12, 1, 34)]);
        for x in 1..=15 {
            let expected = match x {
                1..=4 => 0,
                5..=8 => 1,
                9..=11 => 2,
                _ => 3,
            };
            assert_eq!(f.active_segment(x), expected, "x = {x}");
        }
        let f = pw(&[(1, 0, 0), (2, 1, 0), (3, 2, 0)]);
        assert_eq!(f.active_segment(1), 0);
        assert_eq!(f.active_segment(2), 1);
        assert_eq!(f.active_segment(3), 2);
        assert_eq!(f.active_segment(1000), 2);
    }

    #[test]
    #[should_panic]
    fn active_segment_panic_test() {
        pw(&[(1, 4, 5), (5, 3, 11)]).eval(0);
    }

    #[test]
    fn eval_test() {
        let f = pw(&[(1, 4, 5), (5, 3, 11), (9, 2, 21), (12, 1, 34)]);
        assert_eq!(f.eval(1), 9);
        assert_eq!(f.eval(4), 21);
        assert_eq!(f.eval(5), 26);
        assert_eq!(f.eval(11), 43);
        assert_eq!(f.eval(100), 134);
    }

    #[test]
    fn from_segments_test() {
        assert!(Piecewise::from_segments(Vec::new()).is_err());
        assert!(Piecewise::from_segments(vec![Segment::new(2, Linear::ZERO)]).is_err());
        assert!(Piecewise::from_segments(vec![
            Segment::new(1, Linear::ZERO),
            Segment::new(4, Linear::new(1, 0)),
            Segment::new(4, Linear::new(2, 0)),
        ])
        .is_err());
        assert_eq!(
            Piecewise::from_segments(vec![Segment::new(1, Linear::new(1, 0))]).unwrap(),
            Piecewise::from(Linear::new(1, 0))
        );
    }

    #[test]
    fn display_test() {
        let f = pw(&[(1, 4, 5), (5, 3, 11), (9, 2, 21), (12, 1, 34)]);
        assert_eq!(
            f.to_string(),
            "4x+5 (1<=x<5), 3x+11 (5<=x<9), 2x+21 (9<=x<12), x+34 (x>=12)"
        );
        assert_eq!(pw(&[(1, 2, 3)]).to_string(), "2x+3 (x>=1)");
        assert_eq!(Piecewise::zero().to_string(), "0 (x>=1)");
    }

    #[test]
    fn parse_test() {
        for s in [
            "4x+5 (1<=x<5), 3x+11 (5<=x<9), 2x+21 (9<=x<12), x+34 (x>=12)",
            "2x+3 (x>=1)",
            "0 (x>=1)",
            "x-5 (1<=x<3), -2x (3<=x<4), 7 (x>=4)",
        ] {
            let f: Piecewise = s.parse().unwrap();
            assert_eq!(f.to_string(), s);
        }
        for s in [
            "",
            "2x+3 (x>=2)",
            "2x+3 (1<=x<5)",
            "2x+3 (1<=x<5), x (x>=6)",
            "2x+3 (1<=x<1), x (x>=1)",
            "2x+3 (x>=1), x (x>=5)",
            "2x+3 x>=1",
            "2y+3 (x>=1)",
        ] {
            assert!(s.parse::<Piecewise>().is_err(), "{s:?} should not parse");
        }
    }

    #[test]
    fn offset_x_test() {
        let f = pw(&[(1, 4, 5), (5, 3, 11), (9, 2, 21), (12, 1, 34)]);
        assert_eq!(f.offset_x(0), f);
        // Shift by 3: `x = 1` now maps to the first segment at `x = 4`.
        let g = f.offset_x(3);
        assert_eq!(g, pw(&[(1, 4, 17), (2, 3, 20), (6, 2, 27), (9, 1, 37)]));
        // Shift by 4: the first segment disappears.
        let g = f.offset_x(4);
        assert_eq!(g, pw(&[(1, 3, 23), (5, 2, 29), (8, 1, 38)]));
        // Shift beyond all bounds.
        let g = f.offset_x(20);
        assert_eq!(g, pw(&[(1, 1, 54)]));
        for n in 0..15 {
            let g = f.offset_x(n);
            for x in 1..30 {
                assert_eq!(g.eval(x), f.eval(x + n), "n = {n}, x = {x}");
            }
        }
    }

    #[test]
    #[should_panic]
    fn offset_x_panic_test() {
        let _ = Piecewise::zero().offset_x(-1);
    }

    #[test]
    fn offset_y_test() {
        let f = pw(&[(1, 4, 5), (5, 3, 11)]);
        assert_eq!(f.offset_y(-5), pw(&[(1, 4, 0), (5, 3, 6)]));
        for x in 1..10 {
            assert_eq!(f.offset_y(7).eval(x), f.eval(x) + 7);
        }
    }

    #[test]
    fn add_subtract_test() {
        let f = pw(&[(1, 4, 5), (5, 3, 11), (9, 2, 21)]);
        let g = pw(&[(1, 1, 0), (5, 0, 3), (7, 2, 0)]);
        let sum = f.add(&g);
        assert_eq!(sum, pw(&[(1, 5, 5), (5, 3, 14), (7, 5, 11), (9, 4, 21)]));
        let diff = f.subtract(&g);
        assert_eq!(diff, pw(&[(1, 3, 5), (5, 3, 8), (7, 1, 11), (9, 0, 21)]));
        for x in 1..20 {
            assert_eq!(sum.eval(x), f.eval(x) + g.eval(x));
            assert_eq!(diff.eval(x), f.eval(x) - g.eval(x));
        }
        // Equal adjacent results are merged.
        let h = pw(&[(1, 2, 0), (4, 1, 4)]);
        let k = pw(&[(1, 1, 0), (4, 0, 4)]);
        assert_eq!(h.subtract(&k), pw(&[(1, 1, 0)]));
        assert!(f.subtract(&f).is_zero());
        assert_eq!(f.subtract(&f), Piecewise::zero());
    }

    #[test]
    fn normalized_test() {
        let f = pw(&[(1, 1, 0), (3, 1, 0), (5, 2, 0), (8, 2, 0)]);
        assert!(!f.is_normalized());
        let g = f.normalized();
        assert!(g.is_normalized());
        assert_eq!(g, pw(&[(1, 1, 0), (5, 2, 0)]));
        for x in 1..12 {
            assert_eq!(f.eval(x), g.eval(x));
        }
        assert!(pw(&[(1, 0, 0), (3, 0, 0)]).is_zero());
        assert!(!pw(&[(1, 0, 0), (3, 0, 1)]).is_zero());
    }

    #[test]
    fn builder_test() {
        let mut builder = PiecewiseBuilder::new();
        builder.push(1, Linear::new(1, 0));
        builder.push(3, Linear::new(1, 0));
        builder.push(4, Linear::new(2, 1));
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.finish(), pw(&[(1, 1, 0), (4, 2, 1)]));
    }

    #[test]
    #[should_panic]
    fn builder_panic_test() {
        PiecewiseBuilder::new().finish();
    }

    #[test]
    fn serde_test() {
        let f = pw(&[(1, 4, 5), (5, 3, 11)]);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(
            json,
            r#"[{"lower_bound":1,"f":{"a":4,"b":5}},{"lower_bound":5,"f":{"a":3,"b":11}}]"#
        );
        assert_eq!(serde_json::from_str::<Piecewise>(&json).unwrap(), f);
        assert!(serde_json::from_str::<Piecewise>("[]").is_err());
        assert!(serde_json::from_str::<Piecewise>(
            r#"[{"lower_bound":1,"f":{"a":4,"b":5}},{"lower_bound":1,"f":{"a":3,"b":11}}]"#
        )
        .is_err());
    }
}
