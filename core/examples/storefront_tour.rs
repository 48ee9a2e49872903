// vitrine/examples/storefront_tour.rs
//
// A full tour of the order lifecycle against the in-memory ledger:
// place -> assign courier -> dispatch -> confirm delivery -> claim funds.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use vitrine::{
  spawn_periodic_refresh, Address, InMemoryLedger, MarketError, OrderStatus, OrderStore,
  PlaceOrderArgs, Role,
};

#[tokio::main]
async fn main() -> Result<(), MarketError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Storefront Tour ---");

  // 1. A simulated wallet + escrow deployment stands in for the chain.
  let ledger = Arc::new(InMemoryLedger::new());
  let store = OrderStore::with_defaults(ledger.clone());

  // The three parties. Mixed-case input is fine; parsing canonicalizes.
  let consumer = Address::parse("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")?;
  let seller = Address::parse("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")?;
  let courier = Address::parse("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC")?;

  // 2. The consumer connects their wallet and picks the consumer lens.
  ledger.connect_as(consumer.clone());
  let account = store.connect().await?;
  info!("Connected as {}", account.short());
  store.set_role(Role::Consumer)?;

  // 3. They place an order: 1_000_000 wei for the product, 50_000 for the
  //    courier. Price plus fee moves into escrow with the call.
  store
    .place_order(PlaceOrderArgs {
      seller: seller.clone(),
      product_id: 42,
      product_price: 1_000_000,
      courier_fee: 50_000,
      delivery_time: 3_600,
    })
    .await?;

  let mine = store.visible_orders();
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].status, OrderStatus::Placed);
  info!(
    "Order {} placed: product {} at {} wei",
    mine[0].order_id, mine[0].product_id, mine[0].product_price
  );

  // 4. A courier (in their own browser) sees the unclaimed order, takes
  //    it, and dispatches with 2x the price as collateral.
  ledger.connect_as(courier.clone());
  store.resume().await?;
  store.set_role(Role::Courier)?;

  let available = store.visible_orders();
  assert_eq!(available.len(), 1, "unassigned orders are up for grabs");

  store.register_courier(0).await?;
  store.dispatch_order(0).await?;

  let in_transit = store.order(0).expect("order 0 is cached");
  assert_eq!(in_transit.status, OrderStatus::Dispatched);
  assert_eq!(in_transit.collateral, 2_000_000);
  info!(
    "Courier {} dispatched with {} wei collateral",
    courier.short(),
    in_transit.collateral
  );

  // 5. The goods arrive; the consumer confirms. Escrow releases the price
  //    to the seller and fee plus collateral back to the courier.
  ledger.connect_as(consumer.clone());
  store.resume().await?;
  store.verify_delivery(0).await?;
  assert_eq!(store.order(0).expect("cached").status, OrderStatus::Delivered);
  info!("Delivery confirmed.");

  // 6. The seller collects their payout.
  ledger.connect_as(seller.clone());
  store.resume().await?;
  assert_eq!(store.balance(), Some(1_000_000));
  store.claim_funds().await?;
  assert_eq!(store.balance(), Some(0));
  info!("Seller withdrew 1000000 wei.");

  // 7. So does the courier: fee plus their collateral back.
  ledger.connect_as(courier.clone());
  store.resume().await?;
  assert_eq!(store.balance(), Some(2_050_000));
  store.claim_funds().await?;
  info!("Courier withdrew 2050000 wei.");

  // 8. A background refresher keeps the cache current between actions;
  //    dropping the guard stops it.
  let reads_before = ledger.reads_served();
  let guard = spawn_periodic_refresh(store.clone(), Duration::from_millis(200));
  tokio::time::sleep(Duration::from_millis(500)).await;
  guard.stop();
  info!(
    "Background refresher served {} reads in half a second.",
    ledger.reads_served() - reads_before
  );

  // 9. The admin lens sees the whole settled book.
  store.set_role(Role::Admin)?;
  let everything = store.visible_orders();
  assert_eq!(everything.len(), 1);
  info!("Tour complete: {} order, fully settled.", everything.len());

  Ok(())
}
