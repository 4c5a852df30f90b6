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

//! Pointwise minimum and maximum of two piecewise functions.
//!
//! Computing `min(f, g)` (or `max(f, g)`) is done in two steps:
//!
//! 1. [min_max_plan] walks over the merged breakpoints of `f` and `g` and records, in a
//!    [ComposePlan], which function must be used on each part of the domain.
//! 2. [compose] builds the resulting function by copying the segments of `f` and `g`, following
//!    the plan.
use serde::{Deserialize, Serialize};

use crate::linear::{Linear, LinearOrdering};
use crate::merge::{MergedInterval, MergedIntervals};
use crate::piecewise::{Piecewise, PiecewiseBuilder};

/// The function a part of a composed function is copied from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// The first function (`f` in `compose(f, g, plan)`).
    First,
    /// The second function (`g` in `compose(f, g, plan)`).
    Second,
}

impl Source {
    /// Returns the other source.
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Which of the two functions must be kept at each `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extremum {
    /// Keep the lowest function.
    Min,
    /// Keep the highest function.
    Max,
}

impl Extremum {
    /// Returns the source to keep, given that the first function is [LessOrEqual] or
    /// [GreaterOrEqual] than the second one.
    ///
    /// [LessOrEqual]: LinearOrdering::LessOrEqual
    /// [GreaterOrEqual]: LinearOrdering::GreaterOrEqual
    fn preferred(self, ordering: LinearOrdering) -> Source {
        debug_assert!(matches!(
            ordering,
            LinearOrdering::LessOrEqual | LinearOrdering::GreaterOrEqual
        ));
        match (self, ordering == LinearOrdering::LessOrEqual) {
            (Self::Min, true) | (Self::Max, false) => Source::First,
            (Self::Min, false) | (Self::Max, true) => Source::Second,
        }
    }
}

/// An alternation schedule between two functions.
///
/// The composed function is equal to the `start` function on `[1, switches[0])`, to the other
/// function on `[switches[0], switches[1])`, and so on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComposePlan {
    /// Function used from `x = 1`.
    pub start: Source,
    /// Strictly increasing `x` values (all larger than 1) where the function used is swapped.
    pub switches: Vec<i64>,
}

impl ComposePlan {
    /// Creates a plan that uses a single function for all `x`.
    pub const fn constant(start: Source) -> Self {
        ComposePlan {
            start,
            switches: Vec::new(),
        }
    }

    /// Creates a new plan.
    ///
    /// *Panics* if the switches are not strictly increasing or if a switch is not larger than 1.
    pub fn new(start: Source, switches: Vec<i64>) -> Self {
        assert!(
            switches.first().map_or(true, |&x| x > 1),
            "Switches must occur after x = 1"
        );
        assert!(
            switches.windows(2).all(|w| w[0] < w[1]),
            "Switches must be strictly increasing: {switches:?}"
        );
        ComposePlan { start, switches }
    }

    /// Returns the source used at `x`.
    pub fn source_at(&self, x: i64) -> Source {
        // Number of switches at or before `x`.
        let n = self.switches.partition_point(|&s| s <= x);
        if n % 2 == 0 {
            self.start
        } else {
            self.start.other()
        }
    }

    /// Iterates over the windows `(source, from, to)` of the plan, where `to` is `None` for the
    /// last window.
    fn windows(&self) -> impl Iterator<Item = (Source, i64, Option<i64>)> + '_ {
        let starts = std::iter::once(1).chain(self.switches.iter().copied());
        let ends = self.switches.iter().copied().map(Some).chain(std::iter::once(None));
        let mut source = self.start.other();
        starts.zip(ends).map(move |(from, to)| {
            source = source.other();
            (source, from, to)
        })
    }
}

/// Builds the function equal to `f` or `g` on each window of the plan.
///
/// On each window, the segment of the source active at the window start is copied (starting at
/// the window start), followed by the other segments of the source starting inside the window.
/// Adjacent segments with the same affine function are merged so the result is always normalized.
pub fn compose(f: &Piecewise, g: &Piecewise, plan: &ComposePlan) -> Piecewise {
    let mut h = PiecewiseBuilder::with_capacity(
        f.num_segments() + g.num_segments() + plan.switches.len(),
    );
    for (source, from, to) in plan.windows() {
        let p = match source {
            Source::First => f,
            Source::Second => g,
        };
        let first = p.active_segment(from);
        h.push(from, p.segments()[first].f);
        for s in p.segments()[first + 1..]
            .iter()
            .take_while(|s| to.map_or(true, |to| s.lower_bound < to))
        {
            h.push(s.lower_bound, s.f);
        }
    }
    h.finish()
}

/// Returns the source to use at `x = 1`.
///
/// When both functions take the same value at `x = 1`, the function with the best slope is
/// chosen (the lowest for [Extremum::Min], the highest for [Extremum::Max]).
/// When the slopes are also equal, the first function is chosen.
fn initial_source(f: &Piecewise, g: &Piecewise, extremum: Extremum) -> Source {
    let (f1, g1) = (f.eval(1), g.eval(1));
    let (fa, ga) = (f.segments()[0].f.slope(), g.segments()[0].f.slope());
    let first_wins = match extremum {
        Extremum::Min => f1 < g1 || (f1 == g1 && fa <= ga),
        Extremum::Max => f1 > g1 || (f1 == g1 && fa >= ga),
    };
    if first_wins {
        Source::First
    } else {
        Source::Second
    }
}

/// Switches required on a single merged interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Resolution {
    /// Source to switch to at the start of the interval.
    at_start: Option<Source>,
    /// Interior point where the source must be swapped.
    interior: Option<i64>,
}

/// Finds which of `fl` and `gl` must be kept on the interval, given that `current` is the source
/// used just before the interval start.
fn resolve_interval(
    fl: &Linear,
    gl: &Linear,
    interval: &MergedInterval,
    extremum: Extremum,
    current: Source,
) -> Resolution {
    let start = interval.start;
    let ordering = match interval.end {
        Some(end) => fl.compare_between(gl, start, end - 1),
        None => fl.compare_from(gl, start),
    };
    let switch_to = |source: Source| (source != current).then_some(source);
    match ordering {
        LinearOrdering::Equal => Resolution::default(),
        LinearOrdering::LessOrEqual | LinearOrdering::GreaterOrEqual => Resolution {
            at_start: switch_to(extremum.preferred(ordering)),
            interior: None,
        },
        LinearOrdering::Intersects => {
            // The two functions are strictly ordered at `start` and the order is reversed after
            // the crossing point.
            let before = if fl.eval(start) < gl.eval(start) {
                LinearOrdering::LessOrEqual
            } else {
                LinearOrdering::GreaterOrEqual
            };
            let crossing = fl.intersection(gl);
            debug_assert!(crossing >= start, "{crossing} < {start}");
            debug_assert_eq!(fl.compare_between(gl, start, crossing), before);
            debug_assert!(interval.end.map_or(true, |end| {
                crossing + 1 >= end
                    || fl.compare_between(gl, crossing + 1, end - 1) == before.reverse()
            }));
            let interior = if interval.end.map_or(true, |end| crossing + 1 < end) {
                Some(crossing + 1)
            } else {
                None
            };
            Resolution {
                at_start: switch_to(extremum.preferred(before)),
                interior,
            }
        }
    }
}

/// Computes the [ComposePlan] such that `compose(f, g, plan)` is the pointwise minimum (or
/// maximum) of `f` and `g`.
pub fn min_max_plan(f: &Piecewise, g: &Piecewise, extremum: Extremum) -> ComposePlan {
    let mut plan = ComposePlan::constant(initial_source(f, g, extremum));
    let mut current = plan.start;
    for interval in MergedIntervals::new(f, g) {
        let fl = &f.segments()[interval.first].f;
        let gl = &g.segments()[interval.second].f;
        let resolution = resolve_interval(fl, gl, &interval, extremum, current);
        if let Some(source) = resolution.at_start {
            if interval.start == 1 {
                plan.start = source;
            } else {
                plan.switches.push(interval.start);
            }
            current = source;
        }
        if let Some(x) = resolution.interior {
            plan.switches.push(x);
            current = current.other();
        }
    }
    debug_assert!(plan.switches.windows(2).all(|w| w[0] < w[1]));
    plan
}

impl Piecewise {
    /// Returns the function `h(x) = min(f(x), g(x))`.
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        let plan = min_max_plan(self, other, Extremum::Min);
        compose(self, other, &plan)
    }

    /// Returns the function `h(x) = max(f(x), g(x))`.
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        let plan = min_max_plan(self, other, Extremum::Max);
        compose(self, other, &plan)
    }
}
