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

//! Selection executor
//!
//! Drives one selection run end to end:
//!
//! ```text
//! config ──validate──▶ RankFn + BoundedSelector
//!                            │
//! rows ──tag arrival seq──▶ push ... push
//!                            │
//!                         finish ──order──▶ SelectionOutput
//! ```
//!
//! Validation happens in [`SelectionExecutor::new`], so a run that starts
//! streaming never fails on configuration. An executor is immutable and may
//! be shared across threads; every `execute*` call owns a fresh selector.

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use topsel_core::{Row, Schema};
use tracing::{debug, trace, warn};

use crate::config::{OutputOrder, SelectionConfig};
use crate::error::{SelectionError, SelectionResult};
use crate::ranking::RankFn;
use crate::selector::{BoundedSelector, PushOutcome, SelectionPolicy};

/// Result statistics from one selection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStats {
    /// Rows consumed from the source
    pub input_rows: usize,
    /// Rows emitted
    pub output_rows: usize,
    /// Units held at finish (rows or groups)
    pub retained_units: usize,
    /// Rows appended to an existing group
    pub merged_rows: usize,
    /// Units evicted to make room
    pub evicted_units: usize,
    /// Rows dropped along with evicted units
    pub evicted_rows: usize,
    /// Rows rejected on arrival
    pub discarded_rows: usize,
}

/// Rows selected by one run
#[derive(Debug, Clone)]
pub struct SelectionOutput {
    pub rows: Vec<Row>,
    pub order: OutputOrder,
    pub stats: SelectionStats,
}

impl SelectionOutput {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Shared flag for stopping a run between rows
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Acquire)
    }
}

/// A row tagged with its arrival position
#[derive(Debug)]
struct Sequenced {
    seq: usize,
    row: Row,
}

/// Executor for bounded top-K selection
#[derive(Debug, Clone)]
pub struct SelectionExecutor {
    rank: RankFn,
    capacity: usize,
    policy: SelectionPolicy,
    output_order: OutputOrder,
}

impl SelectionExecutor {
    /// Validate the configuration against the schema and build an executor
    pub fn new(config: &SelectionConfig, schema: &Schema) -> SelectionResult<Self> {
        let capacity = config.capacity()?;
        let rank = config.ranking.build(schema)?;
        Ok(Self {
            rank,
            capacity,
            policy: config.policy,
            output_order: config.output_order,
        })
    }

    pub fn rank_fn(&self) -> &RankFn {
        &self.rank
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn output_order(&self) -> OutputOrder {
        self.output_order
    }

    /// Select from an infallible row source
    ///
    /// # Panics
    ///
    /// If a row's arity differs from the schema the executor was built for.
    pub fn execute<I>(&self, rows: I) -> SelectionOutput
    where
        I: IntoIterator<Item = Row>,
    {
        let mut run = self.start();
        for row in rows {
            run.consume(row);
        }
        run.finish()
    }

    /// Select, checking `cancel` before every row
    ///
    /// A cancelled run drops everything it retained.
    pub fn execute_cancellable<I>(
        &self,
        rows: I,
        cancel: &CancellationFlag,
    ) -> SelectionResult<SelectionOutput>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut run = self.start();
        for row in rows {
            if cancel.is_cancelled() {
                warn!(consumed = run.consumed, "selection cancelled");
                return Err(SelectionError::Cancelled {
                    consumed: run.consumed,
                });
            }
            run.consume(row);
        }
        Ok(run.finish())
    }

    /// Select from a fallible row source; the first source error aborts
    pub fn try_execute<I, E>(&self, rows: I) -> SelectionResult<SelectionOutput>
    where
        I: IntoIterator<Item = Result<Row, E>>,
        E: Into<SelectionError>,
    {
        let mut run = self.start();
        for row in rows {
            let row = row.map_err(Into::into)?;
            run.consume(row);
        }
        Ok(run.finish())
    }

    fn start(&self) -> Run<'_, impl Fn(&Sequenced, &Sequenced) -> Ordering + '_> {
        debug!(
            k = self.capacity,
            policy = ?self.policy,
            order = ?self.output_order,
            criteria = self.rank.len(),
            "starting selection"
        );
        let rank = &self.rank;
        Run {
            executor: self,
            selector: BoundedSelector::new(self.capacity, self.policy, move |a: &Sequenced, b: &Sequenced| {
                rank.compare(&a.row, &b.row)
            }),
            consumed: 0,
        }
    }
}

/// State of one in-flight run
struct Run<'a, F>
where
    F: Fn(&Sequenced, &Sequenced) -> Ordering,
{
    executor: &'a SelectionExecutor,
    selector: BoundedSelector<Sequenced, F>,
    consumed: usize,
}

impl<F> Run<'_, F>
where
    F: Fn(&Sequenced, &Sequenced) -> Ordering,
{
    fn consume(&mut self, row: Row) {
        let arity = self.executor.rank.arity();
        assert_eq!(
            row.arity(),
            arity,
            "row {} has {} values but the schema has {} columns",
            row.key,
            row.arity(),
            arity
        );

        let seq = self.consumed;
        self.consumed += 1;
        if let PushOutcome::Replaced { evicted_items } = self.selector.push(Sequenced { seq, row }) {
            trace!(seq, evicted_items, "evicted minimum unit");
        }
    }

    fn finish(self) -> SelectionOutput {
        let retained_units = self.selector.len();
        let selector_stats = self.selector.stats().clone();
        let mut items = self.selector.finish();

        let rank = &self.executor.rank;
        match self.executor.output_order {
            OutputOrder::Sorted => {
                items.sort_by(|a, b| rank.compare(&a.row, &b.row).then(a.seq.cmp(&b.seq)))
            }
            OutputOrder::Input => items.sort_by_key(|item| item.seq),
            OutputOrder::Unordered => {}
        }

        let rows: Vec<Row> = items.into_iter().map(|item| item.row).collect();
        let stats = SelectionStats {
            input_rows: self.consumed,
            output_rows: rows.len(),
            retained_units,
            merged_rows: selector_stats.merged,
            evicted_units: selector_stats.evicted_units,
            evicted_rows: selector_stats.evicted_items,
            discarded_rows: selector_stats.discarded,
        };

        debug!(
            input_rows = stats.input_rows,
            output_rows = stats.output_rows,
            retained_units = stats.retained_units,
            evicted_units = stats.evicted_units,
            "selection finished"
        );

        SelectionOutput {
            rows,
            order: self.executor.output_order,
            stats,
        }
    }
}

/// Validate, build, and run in one call
pub fn select_rows<I>(
    rows: I,
    schema: &Schema,
    config: &SelectionConfig,
) -> SelectionResult<SelectionOutput>
where
    I: IntoIterator<Item = Row>,
{
    let executor = SelectionExecutor::new(config, schema)?;
    Ok(executor.execute(rows))
}
