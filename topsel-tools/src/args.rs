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

//! Command-line arguments and their mapping onto [`SelectionConfig`]
//!
//! Sort terms use the form `column[:asc|:desc][:lex|:alnum]`. A column that
//! parses as an integer is taken as a zero-based index, anything else as a
//! name. Modifiers may appear in either order.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use topsel_query::{
    ColumnRef, OutputOrder, RankingSpec, SelectionConfig, SelectionPolicy, SortCriterion,
    SortDirection, SortKey, StringMode,
};

/// Selection policy as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    ExactRows,
    UniqueGroups,
}

impl From<PolicyArg> for SelectionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::ExactRows => SelectionPolicy::ExactRows,
            PolicyArg::UniqueGroups => SelectionPolicy::UniqueGroups,
        }
    }
}

/// Output order as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Sorted,
    Input,
    Unordered,
}

impl From<OrderArg> for OutputOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Sorted => OutputOrder::Sorted,
            OrderArg::Input => OutputOrder::Input,
            OrderArg::Unordered => OutputOrder::Unordered,
        }
    }
}

/// Arguments of `topsel select`
#[derive(Debug, Clone, Default, Args)]
pub struct SelectArgs {
    /// Input table file
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON selection config; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of units to keep
    #[arg(short, long, allow_negative_numbers = true)]
    pub k: Option<i64>,

    /// Unit granularity
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Order of emitted rows
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Sort term `column[:asc|:desc][:lex|:alnum]`, highest priority first
    #[arg(long = "by", value_name = "TERM")]
    pub by: Vec<String>,

    /// Append a row identifier criterion, e.g. `--by-row-id desc:alnum`
    #[arg(long, value_name = "MODIFIERS", num_args = 0..=1, default_missing_value = "asc")]
    pub by_row_id: Option<String>,

    /// Missing values rank last regardless of direction
    #[arg(long)]
    pub missings_last: bool,

    /// Output table file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments of `topsel validate`
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Input table file; only its header is needed
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON selection config
    #[arg(short, long)]
    pub config: PathBuf,
}

impl SelectArgs {
    /// Merge the config file (if any) with command-line overrides
    pub fn to_config(&self) -> Result<SelectionConfig> {
        let mut config = match &self.config {
            Some(path) => SelectionConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SelectionConfig::default(),
        };

        if !self.by.is_empty() || self.by_row_id.is_some() {
            let mut criteria = self
                .by
                .iter()
                .map(|term| parse_sort_term(term))
                .collect::<Result<Vec<_>>>()?;
            if let Some(modifiers) = &self.by_row_id {
                criteria.push(parse_modifiers(SortKey::RowId, modifiers.split(':'))?);
            }
            config.ranking = RankingSpec {
                criteria,
                missings_always_last: config.ranking.missings_always_last,
            };
        }
        if self.missings_last {
            config.ranking.missings_always_last = true;
        }
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(policy) = self.policy {
            config.policy = policy.into();
        }
        if let Some(order) = self.order {
            config.output_order = order.into();
        }
        Ok(config)
    }
}

/// Parse `column[:asc|:desc][:lex|:alnum]`
pub fn parse_sort_term(term: &str) -> Result<SortCriterion> {
    let mut parts = term.split(':');
    let column = match parts.next() {
        Some(column) if !column.is_empty() => column,
        _ => bail!("Sort term '{term}' has no column"),
    };
    let column = match column.parse::<usize>() {
        Ok(index) => ColumnRef::Index(index),
        Err(_) => ColumnRef::Name(column.to_string()),
    };
    parse_modifiers(SortKey::Column(column), parts)
        .with_context(|| format!("Invalid sort term '{term}'"))
}

fn parse_modifiers<'a>(
    key: SortKey,
    modifiers: impl Iterator<Item = &'a str>,
) -> Result<SortCriterion> {
    let mut criterion = SortCriterion::new(key, SortDirection::Ascending);
    for modifier in modifiers {
        match modifier.to_ascii_lowercase().as_str() {
            "" => {}
            "asc" => criterion.direction = SortDirection::Ascending,
            "desc" => criterion.direction = SortDirection::Descending,
            "lex" => criterion.string_mode = StringMode::Lexicographic,
            "alnum" => criterion.string_mode = StringMode::Alphanumeric,
            other => bail!("Unknown sort modifier '{other}'"),
        }
    }
    Ok(criterion)
}
