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

//! TopSel Core
//!
//! Fundamental data types shared by the selection engine and its tools.
//!
//! # Core Components
//!
//! - **Values**: typed scalars with a distinguished missing marker
//! - **Schema**: named, typed columns
//! - **Rows**: fixed-arity value tuples carrying a unique [`RowKey`]
//! - **Table format**: line-oriented text encoding used by the CLI
//!
//! # Example
//!
//! ```rust
//! use topsel_core::{FieldType, Row, Schema, Table, Value};
//!
//! let schema = Schema::new("scores")
//!     .field("player", FieldType::Text)
//!     .field("points", FieldType::Int);
//!
//! let mut table = Table::new(schema);
//! table.push(Row::new("r1", vec![Value::from("ada"), Value::Int(42)]));
//!
//! assert_eq!(table.format(), "scores[1]{player:text,points:int}:\nr1,ada,42");
//! ```

pub mod error;
pub mod row;
pub mod table;

pub use error::{Result, TopSelError};
pub use row::{Field, FieldType, Row, RowKey, Schema, Value};
pub use table::Table;

/// Crate version
pub const TOPSEL_VERSION: &str = env!("CARGO_PKG_VERSION");
