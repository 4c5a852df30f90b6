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

//! Exact algebra of piecewise-linear functions with integer coefficients, defined on the integers
//! `x >= 1`.
//!
//! The building blocks are:
//!
//! - [Linear]: an affine function `a * x + b`.
//! - [Piecewise]: a sequence of [Segment]s, each one holding a [Linear] function from its lower
//!   bound until the lower bound of the next segment.
//!
//! On top of evaluation, piecewise functions support shifts ([Piecewise::offset_x],
//! [Piecewise::offset_y]), pointwise sums and differences ([Piecewise::add],
//! [Piecewise::subtract]) and pointwise minimum and maximum ([Piecewise::min],
//! [Piecewise::max]).
//! All computations are exact.
mod compose;
mod linear;
mod merge;
mod piecewise;

pub use self::compose::{compose, min_max_plan, ComposePlan, Extremum, Source};
pub use self::linear::{Linear, LinearOrdering};
pub use self::merge::{MergedInterval, MergedIntervals};
pub use self::piecewise::{Piecewise, PiecewiseBuilder, Segment};
