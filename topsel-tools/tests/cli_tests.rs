// SPDX-License-Identifier: AGPL-3.0-or-later
// TopSel - Streaming Top-K Row Selection
// Copyright (C) 2026 Sushanth Reddy Vanagala (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! End-to-end tests of the select and validate subcommands over real files

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use topsel_core::{Table, Value};
use topsel_tools::{OrderArg, PolicyArg, SelectArgs, ValidateArgs, run_select, run_validate};

const FILES: &str = "\
files[5]{name:text,size:int}:
f1,Test1,10
f2,Test2,20
f3,Test1,30
f4,Test10,
f5,Test3,50
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn keys(path: &Path) -> Vec<String> {
    Table::read_file(path)
        .unwrap()
        .rows
        .into_iter()
        .map(|row| row.key.to_string())
        .collect()
}

#[test]
fn test_select_writes_sorted_table() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.tbl", FILES);
    let output = dir.path().join("out.tbl");

    let args = SelectArgs {
        input,
        by: vec!["size".into()],
        k: Some(2),
        output: Some(output.clone()),
        ..Default::default()
    };
    let stats = run_select(&args).unwrap();

    assert_eq!(stats.input_rows, 5);
    assert_eq!(stats.output_rows, 2);
    // Missing size ranks highest under ascending order
    assert_eq!(keys(&output), vec!["f5", "f4"]);

    let table = Table::read_file(&output).unwrap();
    assert_eq!(table.schema.name, "files");
    assert_eq!(table.rows[1].values[1], Value::Null);
}

#[test]
fn test_select_unique_groups_alphanumeric() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.tbl", FILES);
    let output = dir.path().join("out.tbl");

    let args = SelectArgs {
        input,
        by: vec!["name:desc:alnum".into()],
        k: Some(2),
        policy: Some(PolicyArg::UniqueGroups),
        order: Some(OrderArg::Input),
        output: Some(output.clone()),
        ..Default::default()
    };
    run_select(&args).unwrap();

    // Natural order descending: Test1 < Test2 < ... so Test1 and Test2 rank best
    assert_eq!(keys(&output), vec!["f1", "f2", "f3"]);
}

#[test]
fn test_select_with_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.tbl", FILES);
    let config = write(
        &dir,
        "select.json",
        r#"{
            "ranking": {
                "criteria": [{"key": {"column": "size"}, "direction": "descending"}],
                "missings_always_last": true
            },
            "k": 2
        }"#,
    );
    let output = dir.path().join("out.tbl");

    let args = SelectArgs {
        input,
        config: Some(config),
        output: Some(output.clone()),
        ..Default::default()
    };
    run_select(&args).unwrap();

    // Descending puts the smallest size near the top; missing outranks everything
    assert_eq!(keys(&output), vec!["f1", "f4"]);
}

#[test]
fn test_select_zero_k_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.tbl", FILES);
    let output = dir.path().join("out.tbl");

    let args = SelectArgs {
        input,
        by: vec!["size".into()],
        k: Some(0),
        output: Some(output.clone()),
        ..Default::default()
    };
    run_select(&args).unwrap();

    let table = Table::read_file(&output).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.schema.len(), 2);
}

#[test]
fn test_select_rejects_unknown_column() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.tbl", FILES);
    let output = dir.path().join("out.tbl");

    let args = SelectArgs {
        input,
        by: vec!["owner".into()],
        output: Some(output.clone()),
        ..Default::default()
    };
    let err = run_select(&args).unwrap_err();

    assert!(format!("{err:#}").contains("owner"));
    assert!(!output.exists());
}

#[test]
fn test_select_rejects_negative_k() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.tbl", FILES);

    let args = SelectArgs {
        input,
        by: vec!["size".into()],
        k: Some(-1),
        ..Default::default()
    };
    let err = run_select(&args).unwrap_err();
    assert!(format!("{err:#}").contains("non-negative"));
}

#[test]
fn test_validate_accepts_and_rejects() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.tbl", FILES);

    let good = write(
        &dir,
        "good.json",
        r#"{"ranking": {"criteria": [{"key": {"column": 1}}, {"key": "row_id"}]}}"#,
    );
    let config = run_validate(&ValidateArgs {
        input: input.clone(),
        config: good,
    })
    .unwrap();
    assert_eq!(config.ranking.len(), 2);
    assert_eq!(config.k, 5);

    let bad = write(&dir, "bad.json", r#"{"ranking": {"criteria": [{"key": {"column": 4}}]}}"#);
    let err = run_validate(&ValidateArgs { input, config: bad }).unwrap_err();
    assert!(format!("{err:#}").contains("out of range"));
}

#[test]
fn test_missing_input_reports_path() {
    let dir = TempDir::new().unwrap();
    let args = SelectArgs {
        input: dir.path().join("nope.tbl"),
        by: vec!["size".into()],
        ..Default::default()
    };
    let err = run_select(&args).unwrap_err();
    assert!(format!("{err:#}").contains("nope.tbl"));
}
