use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vitrine::{
  filter_by_role, sorted, Address, InMemoryLedger, Order, OrderStatus, OrderStore, RawOrder, Role,
  SortDirection, SortKey, ZERO_ADDRESS,
};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Synthetic order books ---

fn account(index: u64) -> Address {
  Address::parse(&format!("0x{:040x}", index + 1)).expect("synthetic account is well-formed")
}

fn synthetic_cache(len: u64) -> Vec<Order> {
  (0..len)
    .map(|i| Order {
      order_id: i,
      product_id: i % 50,
      product_price: u128::from((i * 37) % 1_000) * 1_000,
      courier_fee: 4_000,
      collateral: 0,
      consumer: account(i % 10),
      seller: account(100 + i % 7),
      courier: if i % 3 == 0 {
        None
      } else {
        Some(account(200 + i % 5))
      },
      status: match i % 5 {
        0 => OrderStatus::Placed,
        1 => OrderStatus::CourierAssigned,
        2 => OrderStatus::Dispatched,
        3 => OrderStatus::Delivered,
        _ => OrderStatus::Cancelled,
      },
      order_timestamp: 1_700_000_000 + (i * 13) % 10_000,
      delivery_time: 86_400,
    })
    .collect()
}

fn synthetic_raws(len: u64) -> Vec<RawOrder> {
  (0..len)
    .map(|i| RawOrder {
      product_id: i % 50,
      product_price: 1_000 + u128::from(i),
      courier_fee: 100,
      collateral: 0,
      consumer: account(i % 10).as_str().to_string(),
      seller: account(100 + i % 7).as_str().to_string(),
      courier: ZERO_ADDRESS.to_string(),
      status: 0,
      order_timestamp: 1_700_000_000 + i,
      delivery_time: 86_400,
    })
    .collect()
}

// --- Benchmark Functions ---

fn bench_role_projection(c: &mut Criterion) {
  let mut group = c.benchmark_group("RoleProjection");

  for len in [100u64, 1_000].iter() {
    let cache = synthetic_cache(*len);
    let viewer = account(3); // a consumer/seller account that does occur
    group.throughput(Throughput::Elements(*len));

    for role in Role::ALL {
      group.bench_with_input(
        BenchmarkId::new(format!("{}", role), *len),
        &cache,
        |b, cache| {
          b.iter(|| criterion::black_box(filter_by_role(cache, role, Some(&viewer))));
        },
      );
    }
  }
  group.finish();
}

fn bench_stable_sort(c: &mut Criterion) {
  let mut group = c.benchmark_group("StableSort");

  for len in [100u64, 1_000].iter() {
    let cache = synthetic_cache(*len);
    group.throughput(Throughput::Elements(*len));

    // One numeric key, one address key, and the tie-heavy courier column.
    for (label, key) in [
      ("product_price", SortKey::ProductPrice),
      ("seller", SortKey::Seller),
      ("courier", SortKey::Courier),
    ] {
      group.bench_with_input(BenchmarkId::new(label, *len), &cache, |b, cache| {
        b.iter(|| criterion::black_box(sorted(cache, key, SortDirection::Ascending)));
      });
    }
    group.bench_with_input(
      BenchmarkId::new("product_price_desc", *len),
      &cache,
      |b, cache| {
        b.iter(|| criterion::black_box(sorted(cache, SortKey::ProductPrice, SortDirection::Descending)));
      },
    );
  }
  group.finish();
}

fn bench_viewer_pipeline(c: &mut Criterion) {
  let mut group = c.benchmark_group("ViewerPipeline");
  let rt = Runtime::new().unwrap();

  for len in [100u64, 1_000].iter() {
    let ledger = Arc::new(InMemoryLedger::new());
    for raw in synthetic_raws(*len) {
      ledger.seed_order(raw);
    }
    let store = OrderStore::with_defaults(ledger);
    rt.block_on(store.fetch_all()).unwrap();
    store.sort_by(SortKey::ProductPrice);
    let viewer = account(3);

    group.throughput(Throughput::Elements(*len));
    group.bench_with_input(
      BenchmarkId::new("sort_then_filter", *len),
      &viewer,
      |b, viewer| {
        b.iter(|| criterion::black_box(store.project_for(Role::Consumer, Some(viewer))));
      },
    );
  }
  group.finish();
}

fn bench_fetch_round_trip(c: &mut Criterion) {
  let mut group = c.benchmark_group("FetchRoundTrip");
  let rt = Runtime::new().unwrap();

  for len in [10u64, 100].iter() {
    let ledger = Arc::new(InMemoryLedger::new());
    for raw in synthetic_raws(*len) {
      ledger.seed_order(raw);
    }
    let store = OrderStore::with_defaults(ledger);

    // One count read plus one read per order, then the snapshot swap.
    group.throughput(Throughput::Elements(*len + 1));
    group.bench_with_input(BenchmarkId::from_parameter(*len), &store, |b, store| {
      b.to_async(&rt).iter(|| {
        let store = store.clone();
        async move { store.fetch_all().await.unwrap() }
      });
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_role_projection,
  bench_stable_sort,
  bench_viewer_pipeline,
  bench_fetch_round_trip
);
criterion_main!(benches);
