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

//! Affine functions `a * x + b` with integer coefficients.
use std::fmt;
use std::ops;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

/// Result of the comparison of two [Linear] functions `f` and `g` over a range of integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinearOrdering {
    /// `f(x) <= g(x)` for all `x` in the range.
    LessOrEqual,
    /// `f` and `g` have the same coefficients.
    Equal,
    /// `f(x) >= g(x)` for all `x` in the range.
    GreaterOrEqual,
    /// `f` is strictly below `g` for some `x` of the range and strictly above for some other `x`.
    Intersects,
}

impl LinearOrdering {
    /// Reverses the role of `f` and `g` in the ordering.
    pub fn reverse(self) -> Self {
        match self {
            Self::LessOrEqual => Self::GreaterOrEqual,
            Self::GreaterOrEqual => Self::LessOrEqual,
            other => other,
        }
    }
}

/// An affine function `f(x) = a * x + b`, with integer coefficients.
///
/// The function is defined for all integers but the piecewise functions built on top of it only
/// evaluate it for `x >= 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Linear {
    /// Slope.
    a: i64,
    /// Value at `x = 0`.
    b: i64,
}

impl Linear {
    /// The function `f(x) = 0`.
    pub const ZERO: Linear = Linear { a: 0, b: 0 };

    /// Creates the function `f(x) = a * x + b`.
    pub const fn new(a: i64, b: i64) -> Self {
        Linear { a, b }
    }

    /// Creates the constant function `f(x) = b`.
    pub const fn constant(b: i64) -> Self {
        Linear { a: 0, b }
    }

    /// Returns the slope `a` of the function.
    pub const fn slope(&self) -> i64 {
        self.a
    }

    /// Evaluates the function at `x`.
    pub const fn eval(&self, x: i64) -> i64 {
        self.a * x + self.b
    }

    /// Returns the function `g(x) = f(x + n)`.
    #[must_use]
    pub const fn offset_x(&self, n: i64) -> Self {
        Linear {
            a: self.a,
            b: self.b + self.a * n,
        }
    }

    /// Returns the function `g(x) = f(x) + n`.
    #[must_use]
    pub const fn offset_y(&self, n: i64) -> Self {
        Linear {
            a: self.a,
            b: self.b + n,
        }
    }

    /// Compares the two functions for all integers `x >= 1`.
    pub fn compare(&self, other: &Self) -> LinearOrdering {
        self.compare_from(other, 1)
    }

    /// Compares the two functions for all integers `x >= n`.
    ///
    /// The ordering at `x = n` and the ordering of the slopes must agree for the functions to be
    /// ordered on the whole half-line.
    pub fn compare_from(&self, other: &Self, n: i64) -> LinearOrdering {
        if self == other {
            return LinearOrdering::Equal;
        }
        let f_n = self.eval(n);
        let g_n = other.eval(n);
        if f_n >= g_n && self.a >= other.a {
            LinearOrdering::GreaterOrEqual
        } else if f_n <= g_n && self.a <= other.a {
            LinearOrdering::LessOrEqual
        } else {
            LinearOrdering::Intersects
        }
    }

    /// Compares the two functions for all integers `s <= x <= t`.
    ///
    /// Both functions are linear so the ordering at the two endpoints holds on the whole closed
    /// interval when the endpoints agree.
    pub fn compare_between(&self, other: &Self, s: i64, t: i64) -> LinearOrdering {
        debug_assert!(1 <= s && s <= t, "Invalid interval [{s}, {t}]");
        let (f_s, f_t) = (self.eval(s), self.eval(t));
        let (g_s, g_t) = (other.eval(s), other.eval(t));
        if f_s == g_s && f_t == g_t {
            LinearOrdering::Equal
        } else if f_s >= g_s && f_t >= g_t {
            LinearOrdering::GreaterOrEqual
        } else if f_s <= g_s && f_t <= g_t {
            LinearOrdering::LessOrEqual
        } else {
            LinearOrdering::Intersects
        }
    }

    /// Returns the largest integer `x` lower than or equal to the (real) crossing point of the two
    /// functions.
    ///
    /// The result is clamped to the domain: `1` is returned when the crossing point is below `1`.
    ///
    /// *Panics* if the two functions have the same slope.
    pub fn intersection(&self, other: &Self) -> i64 {
        assert_ne!(
            self.a, other.a,
            "Cannot intersect `{self}` and `{other}`: the functions are parallel"
        );
        // Normalize the fraction so that the denominator is positive, then round down.
        let (num, den) = if self.a > other.a {
            (other.b - self.b, self.a - other.a)
        } else {
            (self.b - other.b, other.a - self.a)
        };
        num.div_euclid(den).max(1)
    }
}

impl ops::Add for Linear {
    type Output = Linear;

    #[inline]
    fn add(self, other: Self) -> Self {
        Linear {
            a: self.a + other.a,
            b: self.b + other.b,
        }
    }
}

impl ops::Sub for Linear {
    type Output = Linear;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Linear {
            a: self.a - other.a,
            b: self.b - other.b,
        }
    }
}

impl fmt::Display for Linear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (0, b) => write!(f, "{b}"),
            (1, 0) => write!(f, "x"),
            (1, b) => write!(f, "x{b:+}"),
            (a, 0) => write!(f, "{a}x"),
            (a, b) => write!(f, "{a}x{b:+}"),
        }
    }
}

impl FromStr for Linear {
    type Err = anyhow::Error;

    /// Parses the representation produced by [Display](fmt::Display), e.g., `"3x-5"`, `"x"` or
    /// `"7"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((slope, constant)) = s.split_once('x') else {
            let b = s
                .parse::<i64>()
                .with_context(|| format!("Invalid constant function `{s}`"))?;
            return Ok(Linear::constant(b));
        };
        let a = match slope {
            "" => 1,
            "-" => -1,
            _ => slope
                .parse::<i64>()
                .map_err(|_| anyhow!("Invalid slope `{slope}` in `{s}`"))?,
        };
        let b = if constant.is_empty() {
            0
        } else if constant.starts_with(|c| c == '+' || c == '-') {
            constant
                .parse::<i64>()
                .map_err(|_| anyhow!("Invalid constant term `{constant}` in `{s}`"))?
        } else {
            bail!("Expected a sign after `x` in `{s}`");
        };
        Ok(Linear::new(a, b))
    }
}
