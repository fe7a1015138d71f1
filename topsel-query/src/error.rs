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

//! Selection error types

use std::convert::Infallible;

use thiserror::Error;
use topsel_core::TopSelError;

/// Selection errors
///
/// Configuration errors are raised before the first row is consumed; a run
/// that fails validation never produces partial output.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Ranking specification must contain at least one criterion")]
    EmptyRankingSpec,

    #[error("Column not found: {0}")]
    UnknownColumn(String),

    #[error("Column index {index} out of range for schema with {arity} columns")]
    ColumnIndexOutOfRange { index: usize, arity: usize },

    #[error("Capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Selection cancelled after {consumed} rows")]
    Cancelled { consumed: usize },

    #[error("Row source error: {0}")]
    Source(#[from] TopSelError),
}

impl SelectionError {
    /// True for errors detected while validating configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SelectionError::EmptyRankingSpec
                | SelectionError::UnknownColumn(_)
                | SelectionError::ColumnIndexOutOfRange { .. }
                | SelectionError::NegativeCapacity(_)
                | SelectionError::InvalidConfig(_)
        )
    }
}

impl From<Infallible> for SelectionError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
