// vitrine/examples/failure_modes.rs
//
// What the store surfaces when things go wrong: a missing provider, a
// dismissed wallet prompt, a contract revert, and reads going dark right
// after a write settled. Nothing is retried; the cache never tears.

use std::sync::Arc;

use tracing::info;
use vitrine::{
  Address, Fault, InMemoryLedger, MarketError, OrderStatus, OrderStore, PlaceOrderArgs, RawOrder,
  ZERO_ADDRESS,
};

fn party(fill: char) -> Address {
  let body: String = std::iter::repeat(fill).take(40).collect();
  Address::parse(&format!("0x{}", body)).expect("party address is well-formed")
}

fn placed_raw(consumer: &Address, seller: &Address) -> RawOrder {
  RawOrder {
    product_id: 9,
    product_price: 1_000,
    courier_fee: 100,
    collateral: 0,
    consumer: consumer.as_str().to_string(),
    seller: seller.as_str().to_string(),
    courier: ZERO_ADDRESS.to_string(),
    status: 0,
    order_timestamp: 1_700_000_000,
    delivery_time: 3_600,
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Failure Modes ---");

  info!("\nScenario 1: no wallet provider");
  scenario_provider_offline().await;

  info!("\nScenario 2: the user dismisses the prompt");
  scenario_user_rejected().await;

  info!("\nScenario 3: the contract reverts a write");
  scenario_reverted_write().await;

  info!("\nScenario 4: reads go dark after a settled write");
  scenario_dark_reads().await;

  info!("\nAll failure modes behaved.");
}

async fn scenario_provider_offline() {
  let ledger = Arc::new(InMemoryLedger::new());
  ledger.seed_order(placed_raw(&party('a'), &party('b')));
  let store = OrderStore::with_defaults(ledger.clone());
  store.fetch_all().await.expect("first fetch succeeds");

  // The provider vanishes mid-session (wallet extension disabled).
  ledger.fail_next(Fault::Offline);
  let result = store.fetch_all().await;
  assert!(matches!(result, Err(MarketError::ProviderUnavailable)));

  // The last-known-good snapshot stays readable.
  assert_eq!(store.orders().len(), 1);
  info!(
    "Surfaced: '{}'; cache still holds {} order(s).",
    store.last_error().expect("surfaced"),
    store.orders().len()
  );
}

async fn scenario_user_rejected() {
  // A wallet with no account to offer plays the dismissed prompt.
  let ledger = Arc::new(InMemoryLedger::new());
  let store = OrderStore::with_defaults(ledger);

  let result = store.connect().await;
  assert!(matches!(result, Err(MarketError::UserRejected)));
  info!("Surfaced: '{}'", store.last_error().expect("surfaced"));

  // Dismissing the message leaves the store ready for another attempt.
  store.clear_error();
  assert!(store.last_error().is_none());
}

async fn scenario_reverted_write() {
  let ledger = Arc::new(InMemoryLedger::new());
  ledger.seed_order(placed_raw(&party('a'), &party('b')));
  let store = OrderStore::with_defaults(ledger.clone());
  store.fetch_all().await.expect("first fetch succeeds");

  // Dispatching an order that never got a courier: the contract refuses.
  ledger.connect_as(party('c'));
  let result = store.dispatch_order(0).await;
  assert!(matches!(result, Err(MarketError::Contract { .. })));

  // The write failed, so no refresh ran and the cache is untouched.
  assert_eq!(store.order(0).expect("cached").status, OrderStatus::Placed);
  info!("Surfaced: '{}'", store.last_error().expect("surfaced"));
}

async fn scenario_dark_reads() {
  let ledger = Arc::new(InMemoryLedger::new());
  let store = OrderStore::with_defaults(ledger.clone());

  let consumer = party('a');
  ledger.connect_as(consumer.clone());
  store.resume().await.expect("resume succeeds");
  store
    .place_order(PlaceOrderArgs {
      seller: party('b'),
      product_id: 9,
      product_price: 1_000,
      courier_fee: 100,
      delivery_time: 3_600,
    })
    .await
    .expect("placement succeeds");
  store.clear_error();

  // Every read now fails; the cancel still lands on chain.
  ledger.fail_reads(Fault::Transport("rpc endpoint flaked".into()));
  store
    .cancel_order(0)
    .await
    .expect("the write settled even though the refresh could not");

  // The cache is stale but consistent, and the refresh failure is
  // surfaced on its own.
  assert_eq!(store.order(0).expect("cached").status, OrderStatus::Placed);
  assert_eq!(
    ledger.raw_order(0).expect("on chain").status,
    OrderStatus::Cancelled as u8
  );
  info!(
    "Write landed, refresh failed separately: '{}'",
    store.last_error().expect("surfaced")
  );

  // Recovery is a plain re-fetch once the endpoint answers again.
  ledger.serve_reads();
  store.fetch_all().await.expect("fetch succeeds");
  assert_eq!(store.order(0).expect("cached").status, OrderStatus::Cancelled);
  info!("Cache caught up after the endpoint recovered.");
}
