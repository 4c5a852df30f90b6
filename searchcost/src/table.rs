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

//! Table of search costs `F(·, n)` as exact piecewise-linear functions of the range start.
use anyhow::{anyhow, Result};
use log::debug;
use pwl::{Linear, Piecewise};
use serde::{Deserialize, Serialize};

/// Number of entries of the table that are known in closed form.
const NB_BASE_CASES: usize = 4;

/// Diagnostics recorded when an entry of the table is computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthReport {
    /// Index `n` of the entry.
    pub size: usize,
    /// Number of segments of `F(·, n)`.
    pub segments: usize,
    /// Splits `k` whose candidate function reached the running minimum when it was merged.
    pub optimal_splits: Vec<usize>,
}

impl GrowthReport {
    /// Returns `true` if the split `n - 2` (guessing the second largest value first) is optimal.
    pub fn has_expected_split(&self) -> bool {
        self.size < 2 || self.optimal_splits.contains(&(self.size - 2))
    }
}

/// Append-only table of the functions `x -> F(x, n)`, for `n = 0, 1, ...`.
///
/// The table starts with the base cases `F(x, 0) = 0`, `F(x, 1) = x`, `F(x, 2) = x + 1` and
/// `F(x, 3) = 2x + 2`.
/// Larger entries are computed on demand by [PiecewiseSearchCost::grow], with
///
/// `F(·, n) = min_{1 <= k < n} ((x + k) + max(F(·, k - 1), F(· + k + 1, n - k - 1)))`
///
/// where the minimum and maximum are taken pointwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PiecewiseSearchCost {
    costs: Vec<Piecewise>,
    reports: Vec<GrowthReport>,
}

impl Default for PiecewiseSearchCost {
    fn default() -> Self {
        Self::new()
    }
}

impl PiecewiseSearchCost {
    /// Creates a table holding the base cases only.
    pub fn new() -> Self {
        let costs = vec![
            Piecewise::zero(),
            Linear::new(1, 0).into(),
            Linear::new(1, 1).into(),
            Linear::new(2, 2).into(),
        ];
        debug_assert_eq!(costs.len(), NB_BASE_CASES);
        PiecewiseSearchCost {
            costs,
            reports: Vec::new(),
        }
    }

    /// Returns the number of entries computed so far (entries `0, ..., num_entries() - 1` are
    /// available).
    pub fn num_entries(&self) -> usize {
        self.costs.len()
    }

    /// Computes the entries of the table until entry `v` is available.
    ///
    /// Does nothing if entry `v` is already computed.
    pub fn grow(&mut self, v: usize) {
        while self.costs.len() <= v {
            self.grow_once();
        }
    }

    /// Computes the next entry of the table and returns its index.
    pub fn grow_once(&mut self) -> usize {
        let n = self.costs.len();
        let (cost, report) = self.compute_entry(n);
        debug!("F(x,{n}) has {} segment(s)", report.segments);
        if !report.has_expected_split() {
            debug!(
                "Split {} is not optimal for F(x,{n}), optimal splits: {:?}",
                n - 2,
                report.optimal_splits
            );
        }
        self.costs.push(cost);
        self.reports.push(report);
        n
    }

    /// Returns the candidate function where the first guess is `x + k`.
    fn candidate(&self, n: usize, k: usize) -> Piecewise {
        debug_assert!(1 <= k && k < n);
        let left = &self.costs[k - 1];
        let right = self.costs[n - k - 1].offset_x(k as i64 + 1);
        left.max(&right).add(&Linear::new(1, k as i64).into())
    }

    fn compute_entry(&self, n: usize) -> (Piecewise, GrowthReport) {
        debug_assert!(n >= NB_BASE_CASES);
        let mut best = self.candidate(n, 1);
        let mut optimal_splits = vec![1];
        for k in 2..n {
            let candidate = self.candidate(n, k);
            let merged = best.min(&candidate);
            if merged == best && merged == candidate {
                optimal_splits.push(k);
            } else if merged == candidate {
                // The candidate is lower than or equal to all the previous ones.
                optimal_splits.clear();
                optimal_splits.push(k);
            } else if merged != best {
                optimal_splits.push(k);
            }
            best = merged;
        }
        let report = GrowthReport {
            size: n,
            segments: best.num_segments(),
            optimal_splits,
        };
        (best, report)
    }

    /// Returns the function `x -> F(x, n)`.
    ///
    /// Returns an error if entry `n` was not computed yet (see [PiecewiseSearchCost::grow]).
    pub fn cost(&self, n: usize) -> Result<&Piecewise> {
        self.costs.get(n).ok_or_else(|| {
            anyhow!(
                "F(x,{n}) is not computed yet, the table only holds entries up to {}",
                self.costs.len() - 1
            )
        })
    }

    /// Returns the [GrowthReport] of entry `n`.
    ///
    /// Returns `None` for the base cases and for the entries that were not computed yet.
    pub fn report(&self, n: usize) -> Option<&GrowthReport> {
        n.checked_sub(NB_BASE_CASES)
            .and_then(|i| self.reports.get(i))
    }

    /// Iterates over the entries of the table, with their index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Piecewise)> {
        self.costs.iter().enumerate()
    }

    /// Returns the [GrowthReport]s of the computed (non-base) entries.
    pub fn reports(&self) -> &[GrowthReport] {
        &self.reports
    }
}
