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

//! Imports / exports through JSON and text files.
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::parameters::Parameters;

/// Deserializes parameters from a JSON file.
pub fn get_parameters_from_json(path: &Path) -> Result<Parameters> {
    read_json(path).context("Failed to read parameters")
}

/// Reads some deserializable data from a JSON file.
pub fn read_json<D: DeserializeOwned>(filename: &Path) -> Result<D> {
    let mut bytes = Vec::new();
    File::open(filename)
        .with_context(|| format!("Unable to open file `{filename:?}`"))?
        .read_to_end(&mut bytes)
        .with_context(|| format!("Unable to read file `{filename:?}`"))?;
    let data = serde_json::from_slice(&bytes)
        .with_context(|| format!("Unable to parse file `{filename:?}`"))?;
    Ok(data)
}

/// Writes some serializable data as a JSON file.
///
/// The file is stored in the given directory, with filename "{name}.json".
/// Returns the path of the file.
pub fn write_json<D: Serialize>(data: D, output_dir: &Path, name: &str) -> Result<PathBuf> {
    let filename = output_dir.join(format!("{name}.json"));
    let writer = BufWriter::new(
        File::create(&filename)
            .with_context(|| format!("Unable to create file `{filename:?}`"))?,
    );
    serde_json::to_writer_pretty(writer, &data)
        .with_context(|| format!("Unable to write file `{filename:?}`"))?;
    Ok(filename)
}

/// Writes some lines to a text file.
///
/// The file is stored in the given directory, with filename "{name}.txt".
/// Returns the path of the file.
pub fn write_lines<I, S>(lines: I, output_dir: &Path, name: &str) -> Result<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: std::fmt::Display,
{
    let filename = output_dir.join(format!("{name}.txt"));
    let mut writer = BufWriter::new(
        File::create(&filename)
            .with_context(|| format!("Unable to create file `{filename:?}`"))?,
    );
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer
        .flush()
        .with_context(|| format!("Unable to write file `{filename:?}`"))?;
    Ok(filename)
}
