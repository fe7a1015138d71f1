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

//! Ranking specifications and compiled ranking functions
//!
//! A [`RankingSpec`] is an ordered list of [`SortCriterion`]s plus a global
//! missing-value policy. [`RankingSpec::build`] resolves it against a
//! [`Schema`] once and yields a [`RankFn`], a pure comparison over rows:
//!
//! ```text
//! criteria: [score DESC, name ASC (alphanumeric)]
//!
//! compare(a, b):
//!   score(a) vs score(b), inverted   → first non-Equal wins
//!   name(a)  vs name(b)  (natural)
//!   Equal                            → a and b are rank-equal
//! ```
//!
//! Rank-equal rows stay equal: there is no implicit tie-break on the row
//! key unless a criterion asks for it with [`SortKey::RowId`].
//!
//! ## Missing values
//!
//! | `missings_always_last` | Ascending          | Descending          |
//! |------------------------|--------------------|---------------------|
//! | `false`                | missing is maximum | missing is minimum  |
//! | `true`                 | missing is maximum | missing is maximum  |
//!
//! Two missing values are always equal.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use topsel_core::{Row, Schema, Value};

use crate::collation::{StringMode, compare_strings};
use crate::error::{SelectionError, SelectionResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Reference to a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Column by index
    Index(usize),
    /// Column by name
    Name(String),
}

impl ColumnRef {
    /// Resolve to an index in the given schema
    pub fn resolve(&self, schema: &Schema) -> SelectionResult<usize> {
        match self {
            ColumnRef::Index(i) if *i < schema.len() => Ok(*i),
            ColumnRef::Index(i) => Err(SelectionError::ColumnIndexOutOfRange {
                index: *i,
                arity: schema.len(),
            }),
            ColumnRef::Name(name) => schema
                .column_index(name)
                .ok_or_else(|| SelectionError::UnknownColumn(name.clone())),
        }
    }
}

/// What a criterion compares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// A column value
    Column(ColumnRef),
    /// The row identifier
    RowId,
}

impl From<usize> for SortKey {
    fn from(index: usize) -> Self {
        SortKey::Column(ColumnRef::Index(index))
    }
}

impl From<&str> for SortKey {
    fn from(name: &str) -> Self {
        SortKey::Column(ColumnRef::Name(name.to_string()))
    }
}

impl From<String> for SortKey {
    fn from(name: String) -> Self {
        SortKey::Column(ColumnRef::Name(name))
    }
}

impl From<ColumnRef> for SortKey {
    fn from(column: ColumnRef) -> Self {
        SortKey::Column(column)
    }
}

/// A single ranking criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
    /// Applies to string-typed columns and to the row identifier
    #[serde(default)]
    pub string_mode: StringMode,
}

impl SortCriterion {
    pub fn new(key: impl Into<SortKey>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
            string_mode: StringMode::Lexicographic,
        }
    }

    pub fn ascending(key: impl Into<SortKey>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<SortKey>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    pub fn with_string_mode(mut self, string_mode: StringMode) -> Self {
        self.string_mode = string_mode;
        self
    }

    pub fn alphanumeric(self) -> Self {
        self.with_string_mode(StringMode::Alphanumeric)
    }
}

/// Full ranking specification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSpec {
    /// Criteria in order of priority
    pub criteria: Vec<SortCriterion>,
    /// Missing values rank last in ascending output regardless of direction
    #[serde(default)]
    pub missings_always_last: bool,
}

impl RankingSpec {
    pub fn new(criteria: Vec<SortCriterion>) -> Self {
        Self {
            criteria,
            missings_always_last: false,
        }
    }

    /// Create from a single criterion
    pub fn single(key: impl Into<SortKey>, direction: SortDirection) -> Self {
        Self::new(vec![SortCriterion::new(key, direction)])
    }

    /// Add another criterion to the ranking
    pub fn then_by(self, key: impl Into<SortKey>, direction: SortDirection) -> Self {
        self.then(SortCriterion::new(key, direction))
    }

    pub fn then(mut self, criterion: SortCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn missings_last(mut self, missings_always_last: bool) -> Self {
        self.missings_always_last = missings_always_last;
        self
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Resolve against a schema and compile into a ranking function
    ///
    /// Fails on an empty specification or on any column reference the
    /// schema does not contain.
    pub fn build(&self, schema: &Schema) -> SelectionResult<RankFn> {
        if self.criteria.is_empty() {
            return Err(SelectionError::EmptyRankingSpec);
        }

        let criteria = self
            .criteria
            .iter()
            .map(|criterion| {
                let target = match &criterion.key {
                    SortKey::Column(column) => Target::Column(column.resolve(schema)?),
                    SortKey::RowId => Target::RowId,
                };
                Ok(ResolvedCriterion {
                    target,
                    direction: criterion.direction,
                    string_mode: criterion.string_mode,
                })
            })
            .collect::<SelectionResult<Vec<_>>>()?;

        Ok(RankFn {
            criteria: criteria.into(),
            missings_always_last: self.missings_always_last,
            arity: schema.len(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Column(usize),
    RowId,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedCriterion {
    target: Target,
    direction: SortDirection,
    string_mode: StringMode,
}

/// Compiled ranking function
///
/// A strict weak ordering over rows of the schema it was built for. Cloning
/// shares the resolved criteria.
#[derive(Debug, Clone)]
pub struct RankFn {
    criteria: Arc<[ResolvedCriterion]>,
    missings_always_last: bool,
    arity: usize,
}

impl RankFn {
    /// Compare two rows
    ///
    /// # Panics
    ///
    /// If a row is shorter than a referenced column index, i.e. the rows do
    /// not belong to the schema this function was built against.
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        for criterion in self.criteria.iter() {
            let ordering = self.compare_criterion(criterion, a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// True iff the rows compare equal under every criterion
    pub fn rank_equal(&self, a: &Row, b: &Row) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Number of criteria
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Column count of the schema this function was built against
    pub fn arity(&self) -> usize {
        self.arity
    }

    fn compare_criterion(&self, criterion: &ResolvedCriterion, a: &Row, b: &Row) -> Ordering {
        let direction = criterion.direction;
        match criterion.target {
            Target::RowId => direction.apply(compare_strings(
                a.key.as_str(),
                b.key.as_str(),
                criterion.string_mode,
            )),
            Target::Column(index) => {
                let (va, vb) = (&a.values[index], &b.values[index]);
                match (va.is_null(), vb.is_null()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => self.missing_vs_present(direction),
                    (false, true) => self.missing_vs_present(direction).reverse(),
                    (false, false) => {
                        direction.apply(compare_present(va, vb, criterion.string_mode))
                    }
                }
            }
        }
    }

    /// Ordering of a missing value against a present one
    fn missing_vs_present(&self, direction: SortDirection) -> Ordering {
        if self.missings_always_last {
            Ordering::Greater
        } else {
            direction.apply(Ordering::Greater)
        }
    }
}

/// Compare two non-missing values
fn compare_present(a: &Value, b: &Value, string_mode: StringMode) -> Ordering {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => compare_strings(x, y, string_mode),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::UInt(x), Value::UInt(y)) => x.cmp(y),
        (Value::Int(x), Value::UInt(y)) => i128::from(*x).cmp(&i128::from(*y)),
        (Value::UInt(x), Value::Int(y)) => i128::from(*x).cmp(&i128::from(*y)),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(i128::from(*x), *y),
        (Value::UInt(x), Value::Float(y)) => compare_int_float(i128::from(*x), *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(i128::from(*y), *x).reverse(),
        (Value::Float(x), Value::UInt(y)) => compare_int_float(i128::from(*y), *x).reverse(),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Exact order between an integer and a float
///
/// The rounded `f64` comparison is only trusted when it is strict. On a tie
/// the float is integral and within `i128`, so the integers decide.
fn compare_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return Ordering::Less;
    }
    match (int as f64).partial_cmp(&float) {
        Some(Ordering::Equal) | None => int.cmp(&(float as i128)),
        Some(ordering) => ordering,
    }
}

/// Numeric order with NaN equal to itself and above every number
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Order between value kinds that share a column only by schema violation
fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::UInt(_) | Value::Float(_) => 2,
        Value::Text(_) => 3,
    }
}
