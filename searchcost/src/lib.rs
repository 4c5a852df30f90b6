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

//! Searchcost: worst-case cost of guessing a hidden number when every guess costs its own value.
//!
//! `F(x, n)` is the minimal worst-case cost of finding a hidden number among
//! `x, x + 1, ..., x + n`, where guessing `y` costs `y` and each wrong guess reveals whether the
//! hidden number is lower or higher.
//! For a fixed `n`, `F(·, n)` is piecewise linear in `x`: [PiecewiseSearchCost] computes these
//! functions exactly while [NumericSearchCost] evaluates the recurrence for given values of `x`.
#![doc(html_no_source)]

pub mod cache;
pub mod export;
pub mod io;
pub mod logging;
pub mod numeric;
pub mod parameters;
pub mod progress_bar;
pub mod table;
pub mod tasks;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
// Dependencies only used in the bins.
use clap as _;
use log::{error, log_enabled};

pub use self::numeric::{NumericSearchCost, RangeCost};
pub use self::table::{GrowthReport, PiecewiseSearchCost};

/// Reads the parameters, runs the requested task and stores the results to the output directory.
///
/// This function takes as argument the path to the `parameters.json` file.
pub fn run(path: &Path) -> Result<()> {
    report_error(run_imp(path, None::<std::io::Empty>))
}

/// Reads the parameters, runs the requested task and stores the results to the output directory.
///
/// This function takes as argument the path to the `parameters.json` file and a writer for the
/// logs.
pub fn run_with_writer<W: std::io::Write + Send + 'static>(path: &Path, writer: W) -> Result<()> {
    report_error(run_imp(path, Some(writer)))
}

fn report_error(res: Result<()>) -> Result<()> {
    match res {
        Err(err) if log_enabled!(log::Level::Error) => {
            // Use the `error` macro so that the error is logged to all the loggers.
            error!("{err:?}");
            Ok(())
        }
        // Return the error so that it is printed to console.
        Err(err) => Err(anyhow!(err)),
        Ok(()) => Ok(()),
    }
}

fn run_imp<W: std::io::Write + Send + 'static>(path: &Path, writer: Option<W>) -> Result<()> {
    println!(
        "
        Searchcost v{}
        This program comes with ABSOLUTELY NO WARRANTY.
        This is free software, and you are welcome to redistribute it
        under certain conditions; see `https://www.gnu.org/licenses/' for details.
        ",
        env!("CARGO_PKG_VERSION")
    );
    let mut parameters = io::get_parameters_from_json(path)?;
    parameters.validate()?;

    // The output directory is relative to the directory of the `parameters.json` file.
    if parameters.output_directory.is_relative() {
        if let Some(parent_dir) = path.parent() {
            parameters.output_directory = parent_dir.join(&parameters.output_directory);
        }
    }

    // Create output directory if it does not exists yet.
    std::fs::create_dir_all(&parameters.output_directory).with_context(|| {
        format!(
            "Failed to create output directory `{:?}`",
            parameters.output_directory
        )
    })?;

    logging::initialize_logging(&parameters.output_directory, writer)?;

    tasks::run(&parameters)
}
