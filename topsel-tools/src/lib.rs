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

//! TopSel Tools
//!
//! Library half of the `topsel` CLI: argument types and subcommand bodies,
//! kept out of `main.rs` so they can be driven from tests.
//!
//! ## Usage
//!
//! ```bash
//! # Three highest scores, best last
//! topsel select --input scores.tbl --by score --k 3
//!
//! # Every row tied with the two best names in natural order
//! topsel select --input files.tbl --by name:desc:alnum --k 2 --policy unique-groups
//!
//! # Check a config against a table header
//! topsel validate --input scores.tbl --config selection.json
//! ```

pub mod args;
pub mod commands;

pub use args::{OrderArg, PolicyArg, SelectArgs, ValidateArgs, parse_sort_term};
pub use commands::{run_select, run_validate, select_table};
