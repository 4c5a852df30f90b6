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

//! Parameters of a run, read from a `parameters.json` file.
use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Default number of `x` values written after the last breakpoint of an exported function.
const fn default_margin() -> i64 {
    15
}

/// Set of parameters.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// Directory where the output files are stored.
    ///
    /// Relative paths are interpreted relative to the directory of the parameters file.
    pub output_directory: PathBuf,
    /// Computation to run.
    pub task: Task,
    /// Format to use for saving the output files.
    #[serde(default)]
    pub saving_format: SavingFormat,
}

impl Parameters {
    /// Returns an error if the parameters are not valid.
    pub fn validate(&self) -> Result<()> {
        if self.output_directory.as_os_str().is_empty() {
            bail!("The output directory cannot be empty");
        }
        if self.task.size() == 0 {
            bail!("The size of the task must be positive");
        }
        Ok(())
    }
}

/// Computation to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Task {
    /// Computes `F(·, n)` for `n = 0, ..., size` and saves the functions.
    CostTable {
        /// Largest entry of the table.
        size: usize,
    },
    /// Computes the differences `F(·, t + 1) - F(· + 1, t)` for `t = 1, ..., size - 1` and
    /// exports the non-zero ones as gnuplot data files and scripts.
    Differences {
        /// Upper bound (excluded) of `t`.
        size: usize,
        /// Number of `x` values written after the last breakpoint of each difference.
        #[serde(default = "default_margin")]
        margin: i64,
    },
    /// Evaluates `C(n) = F(1, n - 1)` for `n = 1, ..., size`.
    Numeric {
        /// Largest `n`.
        size: usize,
        /// Number of threads to use.
        ///
        /// Default (0) is to use all the threads of the CPU.
        #[serde(default)]
        threads: usize,
    },
}

impl Task {
    /// Returns the size parameter of the task.
    pub const fn size(&self) -> usize {
        match *self {
            Self::CostTable { size } | Self::Differences { size, .. } | Self::Numeric { size, .. } => {
                size
            }
        }
    }
}

/// Format to be used when saving files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum SavingFormat {
    /// JSON files.
    #[serde(rename = "JSON")]
    Json,
    /// Plain-text files, one line per entry.
    #[default]
    Text,
}
