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

//! Execution of the tasks described by the [Parameters].
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use pwl::Piecewise;
use serde::Serialize;

use crate::export;
use crate::io;
use crate::numeric::NumericSearchCost;
use crate::parameters::{Parameters, SavingFormat, Task};
use crate::progress_bar::{SearchProgressBar, Spinner};
use crate::table::{GrowthReport, PiecewiseSearchCost};

/// Runs the task of the parameters and saves its results to the output directory.
pub fn run(parameters: &Parameters) -> Result<()> {
    let t0 = Instant::now();
    let output_dir = parameters.output_directory.as_path();
    match parameters.task {
        Task::CostTable { size } => {
            run_cost_table(size, output_dir, parameters.saving_format)?;
        }
        Task::Differences { size, margin } => {
            run_differences(size, margin, output_dir)?;
        }
        Task::Numeric { size, threads } => {
            run_numeric(size, threads, output_dir, parameters.saving_format)?;
        }
    }
    info!("Task completed in {:.1?}", t0.elapsed());
    Ok(())
}

/// Returns a [PiecewiseSearchCost] grown until entry `size`, showing the progress.
fn grow_table(size: usize) -> PiecewiseSearchCost {
    let mut table = PiecewiseSearchCost::new();
    let remaining = (size + 1).saturating_sub(table.num_entries());
    let bp = SearchProgressBar::new(remaining).with_message("Growing cost table");
    while table.num_entries() <= size {
        let n = table.grow_once();
        bp.set_message(format!("F(x,{n})"));
        bp.inc();
    }
    bp.finish();
    table
}

#[derive(Serialize)]
struct CostTableEntry<'a> {
    size: usize,
    function: &'a Piecewise,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a GrowthReport>,
}

/// Computes the cost table until entry `size` and saves it in the output directory.
pub fn run_cost_table(
    size: usize,
    output_dir: &Path,
    format: SavingFormat,
) -> Result<PiecewiseSearchCost> {
    info!("Computing F(x,n) for n = 0, ..., {size}");
    let table = grow_table(size);
    let path = match format {
        SavingFormat::Json => {
            let entries: Vec<_> = table
                .iter()
                .map(|(n, function)| CostTableEntry {
                    size: n,
                    function,
                    report: table.report(n),
                })
                .collect();
            io::write_json(entries, output_dir, "cost_table")?
        }
        SavingFormat::Text => {
            let lines = table.iter().map(|(n, f)| match table.report(n) {
                Some(report) => format!(
                    "F(x,{n}) = {f} [optimal splits: {}]",
                    report.optimal_splits.iter().join(", ")
                ),
                None => format!("F(x,{n}) = {f}"),
            });
            io::write_lines(lines, output_dir, "cost_table")?
        }
    };
    info!("Cost table saved to `{path:?}`");
    Ok(table)
}

/// Returns `true` if `f(x) = 0` for all `x >= 1`.
///
/// Segments of a single point can have a non-zero affine function while evaluating to zero.
fn vanishes(f: &Piecewise) -> bool {
    f.is_zero() || (1..f.last_lower_bound() + 2).all(|x| f.eval(x) == 0)
}

/// Computes the differences `F(·, t + 1) - F(· + 1, t)` for `t = 1, ..., size - 1` and exports
/// the non-zero ones as gnuplot data files and scripts.
///
/// Returns the values of `t` with a non-zero difference.
pub fn run_differences(size: usize, margin: i64, output_dir: &Path) -> Result<Vec<usize>> {
    info!("Computing F(x,t+1)-F(x+1,t) for t = 1, ..., {}", size - 1);
    let table = grow_table(size);
    let mut exported = Vec::new();
    for t in 1..size {
        let shifted = table.cost(t)?.offset_x(1);
        let diff = table.cost(t + 1)?.subtract(&shifted);
        if vanishes(&diff) {
            continue;
        }
        let title = format!("F(x,{})-F(x+1,{t})", t + 1);
        let data_filename = output_dir.join(format!("{t:05}.data"));
        let max_value = export::write_values(&data_filename, &diff, margin)?;
        let script_filename = output_dir.join(format!("{t:05}.gnuplot"));
        export::write_gnuplot_script(&script_filename, &title, t, &diff, max_value)?;
        info!("{title}={diff}");
        exported.push(t);
    }
    info!("{} non-zero difference(s) exported", exported.len());
    Ok(exported)
}

#[derive(Serialize)]
struct NumericResults<'a> {
    values: &'a [i64],
    sum: i64,
}

/// Computes `C(n)` for `n = 1, ..., size` with the given number of threads and saves the values
/// and their sum in the output directory.
///
/// Returns the sum of the values.
pub fn run_numeric(
    size: usize,
    threads: usize,
    output_dir: &Path,
    format: SavingFormat,
) -> Result<i64> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build the thread pool")?;
    let numeric = NumericSearchCost::new();
    let mut spinner = Spinner::new(&format!("Computing C(n) for n = 1, ..., {size}"));
    let values = pool.install(|| numeric.search_costs(size));
    spinner.finish();
    let sum: i64 = values.iter().sum();
    info!(
        "sum(C(n), n = 1..{size}) = {sum} ({} memoized ranges)",
        numeric.nb_memoized()
    );
    let path = match format {
        SavingFormat::Json => io::write_json(
            NumericResults {
                values: &values,
                sum,
            },
            output_dir,
            "search_costs",
        )?,
        SavingFormat::Text => {
            let lines = values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("C({}) = {v}", i + 1))
                .chain(std::iter::once(format!("sum = {sum}")));
            io::write_lines(lines, output_dir, "search_costs")?
        }
    };
    info!("Search costs saved to `{path:?}`");
    Ok(sum)
}
