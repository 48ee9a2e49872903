// tests/common/mod.rs
#![allow(dead_code)] // Not every suite uses every fixture.

use std::sync::Arc;

use vitrine::{
  Address, InMemoryLedger, Order, OrderId, OrderStatus, OrderStore, PlaceOrderArgs, RawOrder, Wei,
  ZERO_ADDRESS,
};

use tracing::Level;

// --- Well-known test accounts ---

/// `0x` plus forty repetitions of `fill`. Distinct fills give distinct
/// accounts; `fill` must be a hex digit.
pub fn account(fill: char) -> Address {
  let body: String = std::iter::repeat(fill).take(40).collect();
  Address::parse(&format!("0x{}", body)).expect("test account is well-formed hex")
}

pub fn consumer() -> Address {
  account('a')
}

pub fn seller() -> Address {
  account('b')
}

pub fn courier() -> Address {
  account('c')
}

/// An account that appears in no seeded order.
pub fn stranger() -> Address {
  account('d')
}

/// The address as a provider might deliver it on the wire: same account,
/// upper-cased hex body. Parsing must erase the difference.
pub fn wire_upper(addr: &Address) -> String {
  format!("0x{}", addr.as_str()[2..].to_ascii_uppercase())
}

// --- Raw order fixtures ---

/// A freshly placed raw order: zero-address courier, status byte 0,
/// addresses stored exactly as given.
pub fn placed_raw(consumer: &Address, seller: &Address, price: Wei, fee: Wei) -> RawOrder {
  RawOrder {
    product_id: 1,
    product_price: price,
    courier_fee: fee,
    collateral: 0,
    consumer: consumer.as_str().to_string(),
    seller: seller.as_str().to_string(),
    courier: ZERO_ADDRESS.to_string(),
    status: 0,
    order_timestamp: 1_700_000_000,
    delivery_time: 86_400,
  }
}

pub fn place_args(seller: &Address, price: Wei, fee: Wei) -> PlaceOrderArgs {
  PlaceOrderArgs {
    seller: seller.clone(),
    product_id: 7,
    product_price: price,
    courier_fee: fee,
    delivery_time: 3_600,
  }
}

// --- Normalized order fixtures (for the pure projection helpers) ---

/// A cached order with unremarkable defaults; tests overwrite the fields
/// they care about.
pub fn order(order_id: OrderId, consumer: &Address, seller: &Address) -> Order {
  Order {
    order_id,
    product_id: 1,
    product_price: 1_000,
    courier_fee: 100,
    collateral: 0,
    consumer: consumer.clone(),
    seller: seller.clone(),
    courier: None,
    status: OrderStatus::Placed,
    order_timestamp: 1_700_000_000,
    delivery_time: 86_400,
  }
}

// --- Store builders ---

/// A store over a fresh ledger; the cache starts empty.
pub fn empty_store() -> (Arc<InMemoryLedger>, OrderStore) {
  let ledger = Arc::new(InMemoryLedger::new());
  let store = OrderStore::with_defaults(ledger.clone());
  (ledger, store)
}

/// A store whose cache already holds `raws`, fetched once.
pub async fn seeded_store(raws: Vec<RawOrder>) -> (Arc<InMemoryLedger>, OrderStore) {
  let (ledger, store) = empty_store();
  for raw in raws {
    ledger.seed_order(raw);
  }
  store.fetch_all().await.expect("seeding fetch succeeds");
  (ledger, store)
}

// --- Tracing setup (once per test binary) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
