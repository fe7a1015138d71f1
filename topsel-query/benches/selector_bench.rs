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

//! Selector Microbenchmarks
//!
//! Run with: cargo bench -p topsel-query --bench selector_bench
//!
//! These benchmarks measure:
//! - Raw selector throughput over integers at various K
//! - End-to-end row selection for both policies

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use topsel_core::{FieldType, Row, Schema, Value};
use topsel_query::{
    BoundedSelector, RankingSpec, SelectionConfig, SelectionExecutor, SelectionPolicy,
    SortDirection,
};

const N: usize = 100_000;

fn random_values(n: usize, range: i64) -> Vec<i64> {
    let mut rng = rand::rng();
    (0..n).map(|_| rng.random_range(0..range)).collect()
}

fn bench_selector_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_push");
    let values = random_values(N, i64::MAX);
    group.throughput(Throughput::Elements(N as u64));

    for k in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("k", k), &k, |b, &k| {
            b.iter(|| {
                let mut selector =
                    BoundedSelector::new(k, SelectionPolicy::ExactRows, |x: &i64, y: &i64| x.cmp(y));
                for &v in &values {
                    selector.push(v);
                }
                black_box(selector.finish())
            });
        });
    }

    group.finish();
}

fn bench_select_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_rows");
    let schema = Schema::new("bench").field("score", FieldType::Int);
    // Few distinct keys so groups actually merge
    let rows: Vec<Row> = random_values(N, 1_000)
        .into_iter()
        .enumerate()
        .map(|(i, v)| Row::new(format!("r{i}"), vec![Value::Int(v)]))
        .collect();
    group.throughput(Throughput::Elements(N as u64));

    for policy in [SelectionPolicy::ExactRows, SelectionPolicy::UniqueGroups] {
        let config = SelectionConfig::new(RankingSpec::single("score", SortDirection::Descending), 50)
            .with_policy(policy);
        let executor = SelectionExecutor::new(&config, &schema).unwrap();

        group.bench_function(BenchmarkId::new("policy", format!("{policy:?}")), |b| {
            b.iter(|| black_box(executor.execute(rows.iter().cloned())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selector_push, bench_select_rows);
criterion_main!(benches);
