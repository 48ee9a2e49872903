// vitrine/examples/role_views.rs
//
// Seeds a mixed order book and reads it through each role's lens, then
// drives the column-sort toggle the way a table header would.

use std::sync::Arc;

use tracing::info;
use vitrine::{
  Address, InMemoryLedger, MarketError, Order, OrderStore, RawOrder, Role, SortKey, ZERO_ADDRESS,
};

fn raw(consumer: &Address, seller: &Address, courier: Option<&Address>, status: u8, price: u128) -> RawOrder {
  RawOrder {
    product_id: price as u64 % 100,
    product_price: price,
    courier_fee: price / 10,
    collateral: if status == 2 || status == 3 { price * 2 } else { 0 },
    consumer: consumer.as_str().to_string(),
    seller: seller.as_str().to_string(),
    courier: courier.map(|c| c.as_str().to_string()).unwrap_or_else(|| ZERO_ADDRESS.to_string()),
    status,
    order_timestamp: 1_700_000_000 + price as u64,
    delivery_time: 86_400,
  }
}

fn describe(orders: &[Order]) -> String {
  orders
    .iter()
    .map(|o| format!("#{}({}, {} wei)", o.order_id, o.status, o.product_price))
    .collect::<Vec<_>>()
    .join(" ")
}

#[tokio::main]
async fn main() -> Result<(), MarketError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Role Views ---");

  let alice = Address::parse("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")?;
  let bob = Address::parse("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")?;
  let sam = Address::parse("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC")?;
  let sue = Address::parse("0x90F79bf6EB2c4f870365E785982E1f101E93b906")?;
  let carl = Address::parse("0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65")?;

  // 1. Five orders in assorted lifecycle states. Status bytes follow the
  //    contract: 0 Placed .. 4 Cancelled.
  let ledger = Arc::new(InMemoryLedger::new());
  ledger.seed_order(raw(&alice, &sam, None, 0, 500));
  ledger.seed_order(raw(&bob, &sam, Some(&carl), 1, 900));
  ledger.seed_order(raw(&alice, &sue, Some(&carl), 2, 300));
  ledger.seed_order(raw(&bob, &sue, Some(&carl), 3, 300));
  ledger.seed_order(raw(&alice, &sam, None, 4, 100));

  let store = OrderStore::with_defaults(ledger);
  store.fetch_all().await?;

  // 2. Each role projects the same cache differently.
  let all = store.project_for(Role::Admin, None);
  info!("admin          : {}", describe(&all));
  assert_eq!(all.len(), 5);

  let sams = store.project_for(Role::Seller, Some(&sam));
  info!("seller sam     : {}", describe(&sams));
  assert_eq!(sams.len(), 3);

  // Couriers see open orders plus their own claims.
  let carls = store.project_for(Role::Courier, Some(&carl));
  info!("courier carl   : {}", describe(&carls));
  assert_eq!(carls.len(), 5);

  let alices = store.project_for(Role::Consumer, Some(&alice));
  info!("consumer alice : {}", describe(&alices));
  assert_eq!(alices.len(), 3);

  // A wallet that placed nothing sees nothing through the consumer lens.
  let nobody = store.project_for(Role::Consumer, Some(&carl));
  assert!(nobody.is_empty());

  // 3. Clicking a column header sorts ascending; clicking it again flips
  //    the direction; a different column starts ascending again.
  let by_price = store.sort_by(SortKey::ProductPrice);
  info!("price asc      : {}", describe(&by_price));
  assert_eq!(by_price[0].product_price, 100);
  // The two 300 wei orders keep their fetch order: the sort is stable.
  assert_eq!(by_price[1].order_id, 2);
  assert_eq!(by_price[2].order_id, 3);

  let by_price_desc = store.sort_by(SortKey::ProductPrice);
  info!("price desc     : {}", describe(&by_price_desc));
  assert_eq!(by_price_desc[0].product_price, 900);

  let by_status = store.sort_by(SortKey::Status);
  info!("status asc     : {}", describe(&by_status));
  assert_eq!(by_status[0].order_id, 0);

  // 4. The sort feeds the role lens: sam's orders arrive pre-sorted.
  let sams_sorted = store.project_for(Role::Seller, Some(&sam));
  info!("sam, status asc: {}", describe(&sams_sorted));
  let ids: Vec<_> = sams_sorted.iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![0, 1, 4]);

  info!("Role views complete.");
  Ok(())
}
