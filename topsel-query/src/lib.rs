// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! TopSel Query Engine
//!
//! Single-pass bounded selection of the best-ranked rows of a stream.
//!
//! ## Pipeline
//!
//! ```text
//! RankingSpec ──build(schema)──▶ RankFn
//!                                  │
//! rows ──▶ BoundedSelector (K units, ExactRows | UniqueGroups) ──▶ ordered rows
//! ```
//!
//! Memory stays at O(K) units while the input may be arbitrarily long.
//!
//! ## Example
//!
//! ```rust
//! use topsel_core::{FieldType, Row, Schema, Value};
//! use topsel_query::{RankingSpec, SelectionConfig, SelectionPolicy, SortDirection, select_rows};
//!
//! let schema = Schema::new("scores").field("points", FieldType::Int);
//! let rows = [1, 1, 2, 2, 3, 3]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &p)| Row::new(format!("r{i}"), vec![Value::Int(p)]));
//!
//! let config = SelectionConfig::new(RankingSpec::single("points", SortDirection::Ascending), 2)
//!     .with_policy(SelectionPolicy::UniqueGroups);
//!
//! let output = select_rows(rows, &schema, &config).unwrap();
//! let points: Vec<_> = output.rows.iter().map(|r| r.values[0].clone()).collect();
//! assert_eq!(points, vec![Value::Int(2), Value::Int(2), Value::Int(3), Value::Int(3)]);
//! ```

pub mod collation;
pub mod config;
pub mod error;
pub mod executor;
pub mod ranking;
pub mod selector;

pub use collation::{StringMode, compare_alphanumeric, compare_strings};
pub use config::{DEFAULT_K, OutputOrder, SelectionConfig};
pub use error::{SelectionError, SelectionResult};
pub use executor::{
    CancellationFlag, SelectionExecutor, SelectionOutput, SelectionStats, select_rows,
};
pub use ranking::{ColumnRef, RankFn, RankingSpec, SortCriterion, SortDirection, SortKey};
pub use selector::{BoundedSelector, PushOutcome, SelectionPolicy, SelectorStats};
