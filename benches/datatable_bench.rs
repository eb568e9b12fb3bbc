// ABOUTME: Criterion benchmarks for the datatable's client-side passes
// ABOUTME: Measures filtering, sorting, and full page rendering for various page sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! Criterion benchmarks for datatable filtering, sorting, and rendering.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use admin_panel::client::RestTransport;
use admin_panel::datatable::filter::apply_filters;
use admin_panel::datatable::sort::sort_rows;
use admin_panel::datatable::{DataTable, SortDirection, SortState};
use admin_panel::entities::{self, EntityKind};
use admin_panel::test_utils::{rows, MockTransport};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::runtime::Runtime;

const SIZES: [usize; 3] = [100, 1_000, 10_000];
const STATUSES: [&str; 4] = ["pending", "paid", "shipped", "cancelled"];

fn order_rows(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "id": i + 1,
                    "customer": {"name": format!("Customer {}", i % 97), "email": format!("c{i}@example.com")},
                    "total": ((i * 7_919) % 100_000) as f64 / 100.0,
                    "status": STATUSES[i % STATUSES.len()],
                    "notes": "Leave at the front desk if nobody answers the door",
                    "createdAt": "2025-03-14T09:26:53Z"
                })
            })
            .collect(),
    )
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("datatable_filter");
    let mut filters = BTreeMap::new();
    filters.insert("status".to_owned(), json!("PAID"));
    filters.insert("customer.name".to_owned(), json!("customer 4"));

    for size in SIZES {
        let items = rows(order_rows(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| black_box(apply_filters(black_box(items), &filters)));
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("datatable_sort");
    let sort = SortState {
        column: "total".into(),
        direction: SortDirection::Desc,
    };

    for size in SIZES {
        let items = rows(order_rows(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| {
                let mut page = items.clone();
                sort_rows(&mut page, &sort);
                black_box(page)
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("datatable_render");

    for size in [20_usize, 200] {
        let transport = MockTransport::shared();
        transport.push_rows(order_rows(size), size as u64);
        let table = DataTable::builder(transport as Arc<dyn RestTransport>)
            .renderers(Arc::new(entities::renderers()))
            .build();
        let mut config = EntityKind::Orders.definition().table.clone();
        config.items_per_page = size as u32;
        runtime.block_on(table.set_config(config)).unwrap();
        table.handle_sort("total");

        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(table.render()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort, bench_render);
criterion_main!(benches);
