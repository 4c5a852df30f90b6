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

//! Integration test of a full run from a `parameters.json` file.
use searchcost::logging::LOG_FILENAME;

#[test]
fn run_test() {
    let dir = std::env::temp_dir().join(format!("searchcost-run-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let parameters = dir.join("parameters.json");
    std::fs::write(
        &parameters,
        r#"{
            "output_directory": "output",
            "task": {"type": "CostTable", "value": {"size": 8}},
            "saving_format": "Text"
        }"#,
    )
    .unwrap();
    searchcost::run(&parameters).unwrap();
    // The output directory is relative to the parameters file.
    let output = dir.join("output");
    assert!(output.join(LOG_FILENAME).exists());
    let content = std::fs::read_to_string(output.join("cost_table.txt")).unwrap();
    assert_eq!(content.lines().count(), 9);

    // Invalid parameters are reported through the logger once it is initialized.
    std::fs::write(&parameters, r#"{"output_directory": "output"}"#).unwrap();
    assert!(searchcost::run(&parameters).is_ok());
    std::fs::remove_dir_all(dir).unwrap();
}
