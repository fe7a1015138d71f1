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

//! Property tests for bounded selection
//!
//! Uses proptest to generate random row streams and ranking specifications
//! and checks the streaming result against a brute-force oracle that sorts
//! the whole input:
//!
//! 1. Capacity: the selector never holds more than K units
//! 2. Exact rows: result is the K best rows, ties by earliest arrival
//! 3. Unique groups: result is every row whose key is among the K best keys
//! 4. Sorted output is ascending by rank and stable
//! 5. Runs are deterministic
//! 6. The ranking function is a total preorder

use std::cmp::Ordering;

use proptest::prelude::*;
use topsel_core::{FieldType, Row, Schema, Value};
use topsel_query::{
    BoundedSelector, OutputOrder, RankFn, RankingSpec, SelectionConfig, SelectionExecutor,
    SelectionPolicy, SortCriterion, SortDirection, SortKey,
};

fn schema() -> Schema {
    Schema::new("samples")
        .field("n", FieldType::Int)
        .field("s", FieldType::Text)
}

fn build_rows(cells: &[(Option<i64>, String)]) -> Vec<Row> {
    cells
        .iter()
        .enumerate()
        .map(|(i, (n, s))| Row::new(format!("r{i}"), vec![Value::from(*n), Value::from(s.as_str())]))
        .collect()
}

fn seq(row: &Row) -> usize {
    row.key.as_str()[1..].parse().unwrap()
}

fn sorted_keys<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<String> {
    let mut keys: Vec<String> = rows.into_iter().map(|r| r.key.to_string()).collect();
    keys.sort();
    keys
}

/// All rows, best first; rank-equal rows stay in arrival order
fn best_first<'a>(rows: &'a [Row], rank: &RankFn) -> Vec<&'a Row> {
    let mut sorted: Vec<&Row> = rows.iter().collect();
    sorted.sort_by(|a, b| rank.compare(b, a));
    sorted
}

fn oracle_exact(rows: &[Row], rank: &RankFn, k: usize) -> Vec<String> {
    sorted_keys(best_first(rows, rank).into_iter().take(k))
}

fn oracle_groups(rows: &[Row], rank: &RankFn, k: usize) -> Vec<String> {
    let mut representatives: Vec<&Row> = Vec::new();
    for row in best_first(rows, rank) {
        if representatives.last().is_none_or(|rep| !rank.rank_equal(rep, row)) {
            representatives.push(row);
        }
    }
    representatives.truncate(k);

    sorted_keys(
        rows.iter()
            .filter(|row| representatives.iter().any(|rep| rank.rank_equal(rep, row))),
    )
}

fn cells() -> impl Strategy<Value = Vec<(Option<i64>, String)>> {
    prop::collection::vec(
        (prop::option::weighted(0.85, 0i64..8), "[ab]{0,1}[0-9]{0,2}"),
        0..60,
    )
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn criterion() -> impl Strategy<Value = SortCriterion> {
    (
        prop_oneof![
            4 => Just(SortKey::from("n")),
            4 => Just(SortKey::from("s")),
            1 => Just(SortKey::RowId),
        ],
        direction(),
        any::<bool>(),
    )
        .prop_map(|(key, direction, alnum)| {
            let criterion = SortCriterion::new(key, direction);
            if alnum { criterion.alphanumeric() } else { criterion }
        })
}

fn ranking() -> impl Strategy<Value = RankingSpec> {
    (criterion(), prop::option::of(criterion()), any::<bool>()).prop_map(
        |(first, second, missings_last)| {
            let mut spec = RankingSpec::new(vec![first]).missings_last(missings_last);
            if let Some(second) = second {
                spec = spec.then(second);
            }
            spec
        },
    )
}

fn policy() -> impl Strategy<Value = SelectionPolicy> {
    prop_oneof![Just(SelectionPolicy::ExactRows), Just(SelectionPolicy::UniqueGroups)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The selector never grows past its capacity
    #[test]
    fn test_capacity_invariant(
        values in prop::collection::vec(0i32..20, 0..200),
        k in 0usize..8,
        policy in policy(),
    ) {
        let mut selector = BoundedSelector::new(k, policy, |a: &i32, b: &i32| a.cmp(b));
        for v in values {
            selector.push(v);
            prop_assert!(selector.len() <= k);
        }
    }

    /// Exact rows match a full sort truncated to K
    #[test]
    fn test_exact_rows_matches_oracle(
        cells in cells(),
        spec in ranking(),
        k in 0usize..10,
    ) {
        let rows = build_rows(&cells);
        let rank = spec.build(&schema()).unwrap();
        let config = SelectionConfig::new(spec, k);
        let output = SelectionExecutor::new(&config, &schema()).unwrap().execute(rows.clone());

        prop_assert_eq!(output.len(), k.min(rows.len()));
        prop_assert_eq!(sorted_keys(&output.rows), oracle_exact(&rows, &rank, k));
    }

    /// Unique groups keep every row of the K best keys and nothing else
    #[test]
    fn test_unique_groups_matches_oracle(
        cells in cells(),
        spec in ranking(),
        k in 0usize..6,
    ) {
        let rows = build_rows(&cells);
        let rank = spec.build(&schema()).unwrap();
        let config = SelectionConfig::new(spec, k).with_policy(SelectionPolicy::UniqueGroups);
        let output = SelectionExecutor::new(&config, &schema()).unwrap().execute(rows.clone());

        prop_assert!(output.stats.retained_units <= k);
        prop_assert_eq!(sorted_keys(&output.rows), oracle_groups(&rows, &rank, k));
    }

    /// Sorted output ascends by rank and keeps arrival order among ties
    #[test]
    fn test_sorted_output_is_stable(
        cells in cells(),
        spec in ranking(),
        k in 0usize..10,
        policy in policy(),
    ) {
        let rows = build_rows(&cells);
        let config = SelectionConfig::new(spec, k).with_policy(policy);
        let executor = SelectionExecutor::new(&config, &schema()).unwrap();
        let output = executor.execute(rows);
        let rank = executor.rank_fn();

        for pair in output.rows.windows(2) {
            let ordering = rank.compare(&pair[0], &pair[1]);
            prop_assert_ne!(ordering, Ordering::Greater);
            if ordering == Ordering::Equal {
                prop_assert!(seq(&pair[0]) < seq(&pair[1]));
            }
        }
    }

    /// Input order output is a subsequence of the input
    #[test]
    fn test_input_order_preserves_arrival(
        cells in cells(),
        spec in ranking(),
        k in 0usize..10,
        policy in policy(),
    ) {
        let config = SelectionConfig::new(spec, k)
            .with_policy(policy)
            .with_output_order(OutputOrder::Input);
        let output = SelectionExecutor::new(&config, &schema())
            .unwrap()
            .execute(build_rows(&cells));

        for pair in output.rows.windows(2) {
            prop_assert!(seq(&pair[0]) < seq(&pair[1]));
        }
    }

    /// Identical input and configuration give identical output
    #[test]
    fn test_runs_are_deterministic(
        cells in cells(),
        spec in ranking(),
        k in 0usize..10,
        policy in policy(),
    ) {
        let rows = build_rows(&cells);
        let config = SelectionConfig::new(spec, k)
            .with_policy(policy)
            .with_output_order(OutputOrder::Unordered);
        let executor = SelectionExecutor::new(&config, &schema()).unwrap();

        let first = executor.execute(rows.clone());
        let second = executor.execute(rows);
        prop_assert_eq!(first.rows, second.rows);
        prop_assert_eq!(first.stats, second.stats);
    }

    /// compare is reflexive, antisymmetric and transitive
    #[test]
    fn test_rank_fn_is_total_preorder(
        cells in prop::collection::vec(
            (prop::option::weighted(0.8, 0i64..4), "[ab]{0,1}[0-9]{0,2}"),
            3..=3,
        ),
        spec in ranking(),
    ) {
        let rows = build_rows(&cells);
        let rank = spec.build(&schema()).unwrap();
        let (a, b, c) = (&rows[0], &rows[1], &rows[2]);

        prop_assert_eq!(rank.compare(a, a), Ordering::Equal);
        prop_assert_eq!(rank.compare(a, b), rank.compare(b, a).reverse());

        let ab = rank.compare(a, b);
        let bc = rank.compare(b, c);
        if ab != Ordering::Greater && bc != Ordering::Greater {
            prop_assert_ne!(rank.compare(a, c), Ordering::Greater);
        }
        if ab == Ordering::Equal && bc == Ordering::Equal {
            prop_assert_eq!(rank.compare(a, c), Ordering::Equal);
        }
    }
}
