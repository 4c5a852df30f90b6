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

//! Direct evaluation of the search-cost recurrence for given values.
use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cache::SingleFlightCache;

/// Worst-case cost of a search range, with the first guesses achieving it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCost {
    /// Minimal worst-case cost.
    pub cost: i64,
    /// Offsets `k` such that guessing `x + k` first achieves the minimal cost.
    pub optimal_splits: Vec<usize>,
}

/// Memoized evaluation of `F(x, n)`, the minimal worst-case cost of finding a hidden number
/// among `x, x + 1, ..., x + n`.
///
/// The recurrence is:
///
/// - `F(x, 0) = 0`,
/// - `F(x, 1) = x`,
/// - `F(x, 2) = x + 1`,
/// - `F(x, n) = min_{1 <= k < n} (x + k + max(F(x, k - 1), F(x + k + 1, n - k - 1)))`.
///
/// The memoization table can be shared by several threads.
#[derive(Debug, Default)]
pub struct NumericSearchCost {
    cache: SingleFlightCache<(i64, usize), RangeCost>,
}

impl NumericSearchCost {
    /// Creates a new [NumericSearchCost] with an empty memoization table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `F(x, n)` and the optimal first guesses.
    pub fn range_cost(&self, x: i64, n: usize) -> RangeCost {
        match n {
            0 => RangeCost::default(),
            1 => RangeCost {
                cost: x,
                optimal_splits: vec![0],
            },
            2 => RangeCost {
                cost: x + 1,
                optimal_splits: vec![1],
            },
            _ => self
                .cache
                .get_or_compute((x, n), || self.compute_range_cost(x, n)),
        }
    }

    fn compute_range_cost(&self, x: i64, n: usize) -> RangeCost {
        debug_assert!(n >= 3);
        let mut best = RangeCost {
            cost: i64::MAX,
            optimal_splits: Vec::new(),
        };
        for k in 1..n {
            let left = self.range_cost(x, k - 1).cost;
            let right = self.range_cost(x + k as i64 + 1, n - k - 1).cost;
            let cost = x + k as i64 + left.max(right);
            match cost.cmp(&best.cost) {
                Ordering::Less => {
                    best.cost = cost;
                    best.optimal_splits.clear();
                    best.optimal_splits.push(k);
                }
                Ordering::Equal => best.optimal_splits.push(k),
                Ordering::Greater => {}
            }
        }
        best
    }

    /// Returns `C(n) = F(1, n - 1)`, the worst-case cost of finding a number among `1, ..., n`.
    ///
    /// *Panics* if `n` is zero.
    pub fn search_cost(&self, n: usize) -> i64 {
        assert!(n >= 1, "Cannot search an empty range");
        self.range_cost(1, n - 1).cost
    }

    /// Returns `[C(1), ..., C(max_n)]`, computed in parallel.
    pub fn search_costs(&self, max_n: usize) -> Vec<i64> {
        (1..=max_n)
            .into_par_iter()
            .map(|n| self.search_cost(n))
            .collect()
    }

    /// Returns the number of ranges stored in the memoization table.
    pub fn nb_memoized(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cases_test() {
        let numeric = NumericSearchCost::new();
        for x in 1..10 {
            assert_eq!(numeric.range_cost(x, 0).cost, 0);
            assert_eq!(numeric.range_cost(x, 1).cost, x);
            assert_eq!(numeric.range_cost(x, 2).cost, x + 1);
            assert_eq!(numeric.range_cost(x, 3).cost, 2 * x + 2);
        }
        assert_eq!(
            numeric.range_cost(1, 3),
            RangeCost {
                cost: 4,
                optimal_splits: vec![2]
            }
        );
    }

    #[test]
    fn known_values_test() {
        let numeric = NumericSearchCost::new();
        for (n, expected) in [(1, 0), (2, 1), (3, 2), (8, 12), (100, 400)] {
            assert_eq!(numeric.search_cost(n), expected, "C({n})");
        }
    }

    #[test]
    fn known_values_no_sharing_test() {
        for (n, expected) in [(1, 0), (2, 1), (3, 2), (8, 12), (100, 400)] {
            assert_eq!(NumericSearchCost::new().search_cost(n), expected, "C({n})");
        }
    }

    #[test]
    fn sum_test() {
        let numeric = NumericSearchCost::new();
        let costs = numeric.search_costs(100);
        assert_eq!(costs.len(), 100);
        assert_eq!(costs.iter().sum::<i64>(), 17575);
        assert!(numeric.nb_memoized() > 0);
    }

    #[test]
    #[should_panic]
    fn empty_range_test() {
        NumericSearchCost::new().search_cost(0);
    }
}
