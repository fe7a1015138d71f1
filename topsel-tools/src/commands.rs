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

//! Subcommand implementations

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use topsel_core::Table;
use topsel_query::{SelectionConfig, SelectionExecutor, SelectionStats};
use tracing::info;

use crate::args::{SelectArgs, ValidateArgs};

/// Run a selection over an in-memory table
pub fn select_table(table: Table, config: &SelectionConfig) -> Result<(Table, SelectionStats)> {
    let executor =
        SelectionExecutor::new(config, &table.schema).context("Invalid selection config")?;
    let output = executor.execute(table.rows);
    Ok((Table::with_rows(table.schema, output.rows), output.stats))
}

/// `topsel select`
pub fn run_select(args: &SelectArgs) -> Result<SelectionStats> {
    let config = args.to_config()?;
    let table = Table::read_file(&args.input)
        .with_context(|| format!("Failed to read table {}", args.input.display()))?;

    let start = Instant::now();
    let (selected, stats) = select_table(table, &config)?;
    info!(
        input_rows = stats.input_rows,
        output_rows = stats.output_rows,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "selection complete"
    );

    match &args.output {
        Some(path) => selected
            .write_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", selected.format()).context("Failed to write to stdout")?;
        }
    }
    Ok(stats)
}

/// `topsel validate`
pub fn run_validate(args: &ValidateArgs) -> Result<SelectionConfig> {
    let config = SelectionConfig::from_json_file(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    let table = Table::read_file(&args.input)
        .with_context(|| format!("Failed to read table {}", args.input.display()))?;

    config
        .validate(&table.schema)
        .with_context(|| format!("Config does not fit table '{}'", table.schema.name))?;
    info!(criteria = config.ranking.len(), k = config.k, "config is valid");
    Ok(config)
}
