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

//! Export of piecewise functions as gnuplot data files and scripts.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pwl::Piecewise;

/// Writes the values of `f` to a data file, one line `"x f(x)"` for each `x` from 1 to
/// `last_lower_bound + margin` (excluded).
///
/// Returns the largest value written (or 0 if all values are negative).
pub fn write_values(path: &Path, f: &Piecewise, margin: i64) -> Result<i64> {
    let mut writer = BufWriter::new(
        File::create(path).with_context(|| format!("Unable to create file `{path:?}`"))?,
    );
    let mut max_value = 0;
    for x in 1..f.last_lower_bound() + margin {
        let y = f.eval(x);
        max_value = max_value.max(y);
        writeln!(writer, "{x} {y}")?;
    }
    writer
        .flush()
        .with_context(|| format!("Unable to write file `{path:?}`"))?;
    Ok(max_value)
}

/// Writes a gnuplot script drawing the data file `{index:05}.data` as boxes into
/// `{index:05}.png`, then converting the image to the animation frame `{index:05}.gif` (with
/// ImageMagick `convert`) and removing the PNG file.
///
/// `max_value` is the largest value of the data file, used to space the ticks of the y axis.
pub fn write_gnuplot_script(
    path: &Path,
    title: &str,
    index: usize,
    f: &Piecewise,
    max_value: i64,
) -> Result<()> {
    let ytics = (max_value / 25).max(1);
    let script = format!(
        "set title \"{title}\"\n\
         set out \"{index:05}.png\"\n\
         set terminal png font \"arial\" 30\n\
         set terminal png size 1280,800\n\
         set xrange [1:{}]\n\
         set style fill solid border -1\n\
         set ytics {ytics}\n\
         unset key\n\
         plot \"{index:05}.data\" with boxes\n\
         !convert \"{index:05}.png\" \"{index:05}.gif\"\n\
         !rm -f \"{index:05}.png\"\n",
        f.last_lower_bound() + 10,
    );
    std::fs::write(path, script).with_context(|| format!("Unable to write file `{path:?}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("searchcost-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn write_values_test() {
        let dir = temp_dir("values");
        let f: Piecewise = "2x (1<=x<3), -x+9 (x>=3)".parse().unwrap();
        let path = dir.join("00001.data");
        let max_value = write_values(&path, &f, 3).unwrap();
        assert_eq!(max_value, 6);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1 2\n2 4\n3 6\n4 5\n5 4\n");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn write_gnuplot_script_test() {
        let dir = temp_dir("gnuplot");
        let f: Piecewise = "2x (1<=x<3), -x+9 (x>=3)".parse().unwrap();
        let path = dir.join("00007.gnuplot");
        write_gnuplot_script(&path, "F(x,8)-F(x+1,7)", 7, &f, 100).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "set title \"F(x,8)-F(x+1,7)\"");
        assert_eq!(lines[1], "set out \"00007.png\"");
        assert!(lines.contains(&"set xrange [1:13]"));
        assert!(lines.contains(&"set ytics 4"));
        let n = lines.len();
        assert_eq!(lines[n - 3], "plot \"00007.data\" with boxes");
        assert_eq!(lines[n - 2], "!convert \"00007.png\" \"00007.gif\"");
        assert_eq!(lines[n - 1], "!rm -f \"00007.png\"");
        write_gnuplot_script(&path, "t", 7, &f, 3).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("set ytics 1\n"));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
