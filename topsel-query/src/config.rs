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

//! Selection configuration
//!
//! ```json
//! {
//!   "ranking": {
//!     "criteria": [{"key": {"column": "score"}, "direction": "descending"}],
//!     "missings_always_last": false
//!   },
//!   "k": 5,
//!   "policy": "exact_rows",
//!   "output_order": "sorted"
//! }
//! ```
//!
//! Every field is optional in JSON; an absent ranking still fails
//! [`SelectionConfig::validate`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use topsel_core::{Schema, TopSelError};

use crate::error::{SelectionError, SelectionResult};
use crate::ranking::RankingSpec;
use crate::selector::SelectionPolicy;

/// Default number of units to keep
pub const DEFAULT_K: i64 = 5;

/// Order of the emitted rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOrder {
    /// Ascending by rank; rank-equal rows in arrival order
    #[default]
    Sorted,
    /// Arrival order
    Input,
    /// Whatever order the selector yields
    Unordered,
}

/// Complete configuration of one selection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub ranking: RankingSpec,
    /// Capacity in units; signed so a negative value can be reported
    pub k: i64,
    pub policy: SelectionPolicy,
    pub output_order: OutputOrder,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            ranking: RankingSpec::default(),
            k: DEFAULT_K,
            policy: SelectionPolicy::default(),
            output_order: OutputOrder::default(),
        }
    }
}

impl SelectionConfig {
    pub fn new(ranking: RankingSpec, k: usize) -> Self {
        Self {
            ranking,
            k: i64::try_from(k).unwrap_or(i64::MAX),
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_output_order(mut self, output_order: OutputOrder) -> Self {
        self.output_order = output_order;
        self
    }

    /// Capacity as an unsigned count
    pub fn capacity(&self) -> SelectionResult<usize> {
        usize::try_from(self.k).map_err(|_| SelectionError::NegativeCapacity(self.k))
    }

    /// Check the configuration against a schema without running anything
    pub fn validate(&self, schema: &Schema) -> SelectionResult<()> {
        self.capacity()?;
        self.ranking.build(schema)?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> SelectionResult<Self> {
        serde_json::from_str(json).map_err(|e| SelectionError::InvalidConfig(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SelectionResult<Self> {
        let text = fs::read_to_string(path).map_err(TopSelError::from)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> SelectionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SelectionError::InvalidConfig(e.to_string()))
    }
}
