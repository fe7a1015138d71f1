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

//! TopSel CLI
//!
//! Streams a table file through a bounded top-K selector.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use topsel_tools::{SelectArgs, ValidateArgs, run_select, run_validate};

/// TopSel - keep the K best rows of a table in one pass
#[derive(Parser)]
#[command(name = "topsel")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the top-K rows of a table
    Select(SelectArgs),

    /// Check a selection config against a table without running it
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Select(args) => {
            let stats = run_select(&args)?;
            eprintln!(
                "Selected {} of {} rows ({} units retained, {} evicted)",
                stats.output_rows, stats.input_rows, stats.retained_units, stats.evicted_units
            );
        }
        Commands::Validate(args) => {
            let config = run_validate(&args)?;
            eprintln!(
                "Config OK: {} criteria, k = {}, policy {:?}",
                config.ranking.len(),
                config.k,
                config.policy
            );
        }
    }
    Ok(())
}
