// tests/view_projection_tests.rs
mod common;

use common::*;
use vitrine::{filter_by_role, sorted, Role, SortDirection, SortKey};

// --- Role filtering (pure) ---

#[test]
fn test_admin_sees_every_order() {
  setup_tracing();
  let cache = vec![
    order(0, &consumer(), &seller()),
    order(1, &stranger(), &seller()),
    order(2, &consumer(), &stranger()),
  ];

  // Admin is account-independent: same view with or without a wallet.
  assert_eq!(filter_by_role(&cache, Role::Admin, None), cache);
  assert_eq!(filter_by_role(&cache, Role::Admin, Some(&stranger())), cache);
}

#[test]
fn test_seller_sees_only_own_orders() {
  setup_tracing();
  let cache = vec![order(0, &consumer(), &seller())];

  let mine = filter_by_role(&cache, Role::Seller, Some(&seller()));
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].order_id, 0);

  // The same cache through another seller's eyes is empty.
  let theirs = filter_by_role(&cache, Role::Seller, Some(&stranger()));
  assert!(theirs.is_empty());
}

#[test]
fn test_courier_sees_unassigned_and_own_orders() {
  setup_tracing();
  let mut claimed_by_me = order(1, &consumer(), &seller());
  claimed_by_me.courier = Some(courier());
  let mut claimed_by_other = order(2, &consumer(), &seller());
  claimed_by_other.courier = Some(stranger());

  let cache = vec![
    order(0, &consumer(), &seller()), // unassigned, up for grabs
    claimed_by_me,
    claimed_by_other,
  ];

  let visible = filter_by_role(&cache, Role::Courier, Some(&courier()));
  let ids: Vec<_> = visible.iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![0, 1]);
}

#[test]
fn test_consumer_sees_only_own_orders() {
  setup_tracing();
  let cache = vec![
    order(0, &consumer(), &seller()),
    order(1, &stranger(), &seller()),
  ];

  let visible = filter_by_role(&cache, Role::Consumer, Some(&consumer()));
  assert_eq!(visible.len(), 1);
  assert_eq!(visible[0].order_id, 0);
}

#[test]
fn test_non_admin_roles_need_an_account() {
  setup_tracing();
  let cache = vec![order(0, &consumer(), &seller())];

  for role in [Role::Seller, Role::Courier, Role::Consumer] {
    assert!(
      filter_by_role(&cache, role, None).is_empty(),
      "{role} without an account should see nothing"
    );
  }
  assert_eq!(filter_by_role(&cache, Role::Admin, None).len(), 1);
}

#[test]
fn test_role_filter_output_is_subset_in_cache_order() {
  setup_tracing();
  let mut dispatched = order(2, &consumer(), &seller());
  dispatched.courier = Some(courier());
  let cache = vec![
    order(0, &consumer(), &seller()),
    order(1, &stranger(), &stranger()),
    dispatched,
    order(3, &consumer(), &seller()),
  ];

  let account = consumer();
  for role in Role::ALL {
    let visible = filter_by_role(&cache, role, Some(&account));
    // Every returned order is a cache entry, and their relative order is
    // the cache's.
    let mut cursor = cache.iter();
    for picked in &visible {
      assert!(
        cursor.any(|cached| cached == picked),
        "{role} projection reordered or invented an order"
      );
    }
  }
}

// --- Stable sorting (pure) ---

#[test]
fn test_sort_preserves_tied_order_both_directions() {
  setup_tracing();
  let mut cheap = order(1, &consumer(), &seller());
  cheap.product_price = 300;
  let mut tied_first = order(0, &consumer(), &seller());
  tied_first.product_price = 500;
  let mut tied_second = order(2, &consumer(), &seller());
  tied_second.product_price = 500;

  let cache = vec![tied_first, cheap, tied_second];

  let ascending = sorted(&cache, SortKey::ProductPrice, SortDirection::Ascending);
  let ids: Vec<_> = ascending.iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![1, 0, 2]);

  // Descending reverses the comparator, not the slice: the tied pair keeps
  // its input order here too.
  let descending = sorted(&cache, SortKey::ProductPrice, SortDirection::Descending);
  let ids: Vec<_> = descending.iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![0, 2, 1]);
}

#[test]
fn test_sort_keys_use_natural_ordering() {
  setup_tracing();
  let mut by_nine = order(0, &consumer(), &account('9'));
  by_nine.product_price = 2;
  let mut by_one = order(1, &consumer(), &account('1'));
  by_one.product_price = 10;
  let cache = vec![by_nine, by_one];

  // Numeric keys compare as numbers: 2 < 10.
  let by_price = sorted(&cache, SortKey::ProductPrice, SortDirection::Ascending);
  assert_eq!(by_price[0].order_id, 0);

  // Address keys compare lexicographically on the canonical hex: "0x1…"
  // before "0x9…".
  let by_seller = sorted(&cache, SortKey::Seller, SortDirection::Ascending);
  assert_eq!(by_seller[0].order_id, 1);
}

#[test]
fn test_status_sorts_along_the_lifecycle() {
  setup_tracing();
  let mut delivered = order(0, &consumer(), &seller());
  delivered.status = vitrine::OrderStatus::Delivered;
  let placed = order(1, &consumer(), &seller());
  let mut assigned = order(2, &consumer(), &seller());
  assigned.status = vitrine::OrderStatus::CourierAssigned;

  let cache = vec![delivered, placed, assigned];
  let by_status = sorted(&cache, SortKey::Status, SortDirection::Ascending);
  let ids: Vec<_> = by_status.iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![1, 2, 0]);
}

#[test]
fn test_unassigned_courier_sorts_as_empty() {
  setup_tracing();
  let mut assigned = order(0, &consumer(), &seller());
  assigned.courier = Some(account('1'));
  let unassigned = order(1, &consumer(), &seller());

  let cache = vec![assigned, unassigned];
  let ascending = sorted(&cache, SortKey::Courier, SortDirection::Ascending);
  // The empty label precedes every real address.
  assert_eq!(ascending[0].order_id, 1);
  let descending = sorted(&cache, SortKey::Courier, SortDirection::Descending);
  assert_eq!(descending[0].order_id, 0);
}

// --- Store-held sort state and the viewer pipeline ---

#[tokio::test]
async fn test_sort_toggle_and_reset_semantics() {
  setup_tracing();
  let mut pricey = placed_raw(&consumer(), &seller(), 900, 10);
  pricey.product_id = 2;
  let (_ledger, store) = seeded_store(vec![
    placed_raw(&consumer(), &seller(), 100, 10),
    pricey,
    placed_raw(&consumer(), &seller(), 500, 10),
  ])
  .await;

  // First selection of a key sorts ascending.
  let first = store.sort_by(SortKey::ProductPrice);
  let ids: Vec<_> = first.iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![0, 2, 1]);
  assert_eq!(
    store.sort_state(),
    Some((SortKey::ProductPrice, SortDirection::Ascending))
  );

  // Selecting the same key again flips the direction.
  let flipped = store.sort_by(SortKey::ProductPrice);
  let ids: Vec<_> = flipped.iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![1, 2, 0]);

  // Toggling twice is back where it started.
  let restored = store.sort_by(SortKey::ProductPrice);
  assert_eq!(restored, first);

  // A different key starts ascending again, even from a descending state.
  store.sort_by(SortKey::ProductPrice); // leave price descending
  store.sort_by(SortKey::OrderId);
  assert_eq!(
    store.sort_state(),
    Some((SortKey::OrderId, SortDirection::Ascending))
  );

  // Clearing returns the view to fetch order.
  store.clear_sort();
  assert_eq!(store.sort_state(), None);
  let ids: Vec<_> = store.sorted_orders().iter().map(|o| o.order_id).collect();
  assert_eq!(ids, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_visible_orders_follow_sort_then_role() {
  setup_tracing();
  let mine_cheap = placed_raw(&consumer(), &seller(), 100, 10);
  let foreign = placed_raw(&consumer(), &stranger(), 1, 1);
  let mine_pricey = placed_raw(&consumer(), &seller(), 700, 10);
  let (ledger, store) = seeded_store(vec![mine_cheap, foreign, mine_pricey]).await;

  ledger.connect_as(seller());
  store.resume().await.expect("resume adopts the wallet account");
  store.set_role(Role::Seller).expect("role selection persists");

  store.sort_by(SortKey::ProductPrice);
  store.sort_by(SortKey::ProductPrice); // descending

  let visible = store.visible_orders();
  let prices: Vec<_> = visible.iter().map(|o| o.product_price).collect();
  assert_eq!(prices, vec![700, 100]);
  assert!(visible.iter().all(|o| o.seller == seller()));
}

#[tokio::test]
async fn test_visible_orders_require_a_role() {
  setup_tracing();
  let (ledger, store) = seeded_store(vec![placed_raw(&consumer(), &seller(), 100, 10)]).await;

  // No role selected: nothing, regardless of the cache.
  assert!(store.visible_orders().is_empty());

  // A per-account role without a wallet session: still nothing.
  store.set_role(Role::Seller).expect("role selection persists");
  assert!(store.visible_orders().is_empty());

  // Admin needs no account.
  store.set_role(Role::Admin).expect("role selection persists");
  assert_eq!(store.visible_orders().len(), 1);

  // With the wallet connected the per-account role sees its own orders.
  ledger.connect_as(seller());
  store.resume().await.expect("resume adopts the wallet account");
  store.set_role(Role::Seller).expect("role selection persists");
  assert_eq!(store.visible_orders().len(), 1);
}

#[tokio::test]
async fn test_order_lookup_by_id() {
  setup_tracing();
  let (_ledger, store) = seeded_store(vec![
    placed_raw(&consumer(), &seller(), 100, 10),
    placed_raw(&stranger(), &seller(), 200, 20),
  ])
  .await;

  let found = store.order(1).expect("order 1 is cached");
  assert_eq!(found.product_price, 200);
  assert!(store.order(99).is_none());
}
