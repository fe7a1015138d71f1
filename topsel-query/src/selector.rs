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

//! Bounded streaming selector
//!
//! Keeps the best `K` units seen so far in a single forward pass, where a
//! unit is either one item ([`SelectionPolicy::ExactRows`]) or a group of
//! rank-equal items ([`SelectionPolicy::UniqueGroups`]). "Best" means
//! `Greater` under the supplied comparator.
//!
//! ## Algorithm
//!
//! Units live in a deque sorted ascending by rank, so the eviction
//! candidate is always at the front:
//!
//! ```text
//! push(r):
//!   UniqueGroups and some group == r   → append r to that group
//!   fewer than K units                 → insert r in rank position
//!   r > front                          → evict front, insert r
//!   otherwise                          → discard r
//! ```
//!
//! ## Complexity
//!
//! | Operation        | Comparisons | Slot moves |
//! |------------------|-------------|------------|
//! | find minimum     | 0           | 0          |
//! | find group by key| O(log K)    | 0          |
//! | insert / evict   | O(log K)    | O(K)       |
//!
//! Slot moves are pointer-sized memmoves; the comparator, which is the
//! expensive part, runs O(log K) times per push for O(N log K) total.
//!
//! ## Ties
//!
//! Under `ExactRows`, rank-equal items are ordered newest-first within the
//! deque, so when several held items tie for the minimum the latest arrival
//! is evicted. An incoming item must be strictly greater than the minimum to
//! get in. Together: among rank-equal items at the capacity boundary the
//! earliest arrivals win.

use std::cmp::Ordering;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Keep the K best individual items
    #[default]
    ExactRows,
    /// Keep every item whose rank key is among the K best distinct keys
    UniqueGroups,
}

/// What happened to a pushed item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Stored as a new unit below capacity
    Inserted,
    /// Appended to an existing rank-equal group
    Merged,
    /// Stored as a new unit after evicting the minimum unit
    Replaced { evicted_items: usize },
    /// Dropped
    Discarded,
}

/// Counters for one selector lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorStats {
    /// Items offered through `push`
    pub pushed: usize,
    /// Items stored as a new unit, with or without an eviction
    pub inserted: usize,
    /// Items appended to an existing group
    pub merged: usize,
    /// Units evicted to make room
    pub evicted_units: usize,
    /// Items dropped along with evicted units
    pub evicted_items: usize,
    /// Items rejected on arrival
    pub discarded: usize,
}

/// Rank-equal items in arrival order
#[derive(Debug)]
struct Group<T> {
    members: Vec<T>,
}

impl<T> Group<T> {
    fn singleton(item: T) -> Self {
        Self {
            members: vec![item],
        }
    }

    /// Any member stands for the group's rank key; the first one is used
    fn representative(&self) -> &T {
        &self.members[0]
    }
}

/// Retained units, one variant per policy
#[derive(Debug)]
enum Units<T> {
    Rows(VecDeque<T>),
    Groups(VecDeque<Group<T>>),
}

/// A bounded top-K selector
///
/// Created once per selection run, fed every item through [`push`], and
/// consumed by [`finish`]. Because `finish` takes the selector by value, no
/// item can be pushed after the result has been produced.
///
/// [`push`]: BoundedSelector::push
/// [`finish`]: BoundedSelector::finish
pub struct BoundedSelector<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    capacity: usize,
    units: Units<T>,
    rank: F,
    items: usize,
    stats: SelectorStats,
}

impl<T, F> BoundedSelector<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create a new selector
    ///
    /// - `capacity`: number of units to keep
    /// - `policy`: unit granularity
    /// - `rank`: ranking function (`Greater` = better)
    pub fn new(capacity: usize, policy: SelectionPolicy, rank: F) -> Self {
        let units = match policy {
            SelectionPolicy::ExactRows => Units::Rows(VecDeque::with_capacity(capacity)),
            SelectionPolicy::UniqueGroups => Units::Groups(VecDeque::with_capacity(capacity)),
        };
        Self {
            capacity,
            units,
            rank,
            items: 0,
            stats: SelectorStats::default(),
        }
    }

    /// Offer an item to the selector
    pub fn push(&mut self, item: T) -> PushOutcome {
        self.stats.pushed += 1;

        let outcome = if self.capacity == 0 {
            PushOutcome::Discarded
        } else {
            match &mut self.units {
                Units::Rows(rows) => push_row(rows, self.capacity, &self.rank, item),
                Units::Groups(groups) => push_grouped(groups, self.capacity, &self.rank, item),
            }
        };

        match outcome {
            PushOutcome::Inserted => {
                self.stats.inserted += 1;
                self.items += 1;
            }
            PushOutcome::Merged => {
                self.stats.merged += 1;
                self.items += 1;
            }
            PushOutcome::Replaced { evicted_items } => {
                self.stats.inserted += 1;
                self.stats.evicted_units += 1;
                self.stats.evicted_items += evicted_items;
                self.items = self.items + 1 - evicted_items;
            }
            PushOutcome::Discarded => self.stats.discarded += 1,
        }
        outcome
    }

    /// Representative of the current minimum unit
    ///
    /// This is the rank an incoming item must beat once the selector is full.
    pub fn min_unit(&self) -> Option<&T> {
        match &self.units {
            Units::Rows(rows) => rows.front(),
            Units::Groups(groups) => groups.front().map(Group::representative),
        }
    }

    /// Number of retained units (items or groups)
    pub fn len(&self) -> usize {
        match &self.units {
            Units::Rows(rows) => rows.len(),
            Units::Groups(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of retained items across all units
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Check if the selector is at capacity
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> SelectionPolicy {
        match self.units {
            Units::Rows(_) => SelectionPolicy::ExactRows,
            Units::Groups(_) => SelectionPolicy::UniqueGroups,
        }
    }

    pub fn stats(&self) -> &SelectorStats {
        &self.stats
    }

    /// Drain the retained items
    ///
    /// Units come out in ascending rank order; a group's members come out in
    /// arrival order.
    pub fn finish(self) -> Vec<T> {
        match self.units {
            Units::Rows(rows) => rows.into(),
            Units::Groups(groups) => {
                let mut out = Vec::with_capacity(self.items);
                for group in groups {
                    out.extend(group.members);
                }
                out
            }
        }
    }
}

fn push_row<T, F>(rows: &mut VecDeque<T>, capacity: usize, rank: &F, item: T) -> PushOutcome
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut outcome = PushOutcome::Inserted;
    if rows.len() >= capacity {
        match rows.front() {
            Some(min) if rank(&item, min) == Ordering::Greater => {
                rows.pop_front();
                outcome = PushOutcome::Replaced { evicted_items: 1 };
            }
            _ => return PushOutcome::Discarded,
        }
    }

    // Ahead of rank-equal items: the newest of a tie is evicted first
    let pos = rows.partition_point(|held| rank(held, &item) == Ordering::Less);
    rows.insert(pos, item);
    outcome
}

fn push_grouped<T, F>(
    groups: &mut VecDeque<Group<T>>,
    capacity: usize,
    rank: &F,
    item: T,
) -> PushOutcome
where
    F: Fn(&T, &T) -> Ordering,
{
    match groups.binary_search_by(|group| rank(group.representative(), &item)) {
        Ok(idx) => {
            groups[idx].members.push(item);
            PushOutcome::Merged
        }
        Err(pos) if groups.len() < capacity => {
            groups.insert(pos, Group::singleton(item));
            PushOutcome::Inserted
        }
        // Below every held group, including the minimum
        Err(0) => PushOutcome::Discarded,
        Err(pos) => {
            let evicted_items = groups.pop_front().map_or(0, |group| group.members.len());
            groups.insert(pos - 1, Group::singleton(item));
            PushOutcome::Replaced { evicted_items }
        }
    }
}
