// vitrine/src/store/view.rs

//! Role-scoped, sortable projections over the cached snapshot.
//!
//! The projection pipeline is fixed: sort first, filter by role second, so
//! every role sees the same ordering of the orders it is allowed to see.
//! The pure functions here operate on plain slices; the `OrderStore`
//! methods apply them to the current cache and sort state.

use crate::model::{Address, Order, Role};
use crate::store::definition::OrderStore;

use std::cmp::Ordering;
use tracing::{event, Level};

/// A sortable order column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
  OrderId,
  ProductId,
  ProductPrice,
  CourierFee,
  Collateral,
  Consumer,
  Seller,
  Courier,
  Status,
  OrderTimestamp,
  DeliveryTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
  Ascending,
  Descending,
}

impl SortDirection {
  pub fn flipped(self) -> SortDirection {
    match self {
      SortDirection::Ascending => SortDirection::Descending,
      SortDirection::Descending => SortDirection::Ascending,
    }
  }
}

fn compare_by(a: &Order, b: &Order, key: SortKey) -> Ordering {
  match key {
    SortKey::OrderId => a.order_id.cmp(&b.order_id),
    SortKey::ProductId => a.product_id.cmp(&b.product_id),
    SortKey::ProductPrice => a.product_price.cmp(&b.product_price),
    SortKey::CourierFee => a.courier_fee.cmp(&b.courier_fee),
    SortKey::Collateral => a.collateral.cmp(&b.collateral),
    SortKey::Consumer => a.consumer.cmp(&b.consumer),
    SortKey::Seller => a.seller.cmp(&b.seller),
    // An unassigned courier compares as the empty string, ahead of every
    // real address when ascending.
    SortKey::Courier => a.courier_label().cmp(b.courier_label()),
    SortKey::Status => a.status.cmp(&b.status),
    SortKey::OrderTimestamp => a.order_timestamp.cmp(&b.order_timestamp),
    SortKey::DeliveryTime => a.delivery_time.cmp(&b.delivery_time),
  }
}

/// Stable sort of a snapshot by one column. Orders with equal keys keep
/// their input order in both directions; descending reverses the comparator,
/// not the slice.
pub fn sorted(orders: &[Order], key: SortKey, direction: SortDirection) -> Vec<Order> {
  let mut out = orders.to_vec();
  out.sort_by(|a, b| {
    let ord = compare_by(a, b, key);
    match direction {
      SortDirection::Ascending => ord,
      SortDirection::Descending => ord.reverse(),
    }
  });
  out
}

/// What a role is allowed to see, relative to `account`:
///
/// - admin: every order, whether or not a wallet is connected;
/// - seller: orders where the account is the seller;
/// - courier: unassigned orders plus orders assigned to the account;
/// - consumer: orders the account placed.
///
/// A non-admin role with no connected account sees nothing.
pub fn filter_by_role(orders: &[Order], role: Role, account: Option<&Address>) -> Vec<Order> {
  orders
    .iter()
    .filter(|order| match (role, account) {
      (Role::Admin, _) => true,
      (_, None) => false,
      (Role::Seller, Some(account)) => order.seller == *account,
      (Role::Courier, Some(account)) => {
        order.courier.is_none() || order.courier.as_ref() == Some(account)
      }
      (Role::Consumer, Some(account)) => order.consumer == *account,
    })
    .cloned()
    .collect()
}

impl OrderStore {
  /// Applies the column-header toggle: selecting the current sort key flips
  /// its direction, selecting a new key starts it ascending. Returns the
  /// freshly sorted cache.
  pub fn sort_by(&self, key: SortKey) -> Vec<Order> {
    let mut state = self.state.write();
    let next = match state.sort {
      Some((current, direction)) if current == key => (key, direction.flipped()),
      _ => (key, SortDirection::Ascending),
    };
    state.sort = Some(next);
    event!(Level::DEBUG, key = ?next.0, direction = ?next.1, "Sort selection updated.");
    sorted(&state.orders, next.0, next.1)
  }

  /// The current sort selection, if any.
  pub fn sort_state(&self) -> Option<(SortKey, SortDirection)> {
    self.state.read().sort
  }

  /// Returns the view to unsorted, fetch-order presentation.
  pub fn clear_sort(&self) {
    self.state.write().sort = None;
  }

  /// The cache in the currently selected order: fetch order until a sort
  /// key has been chosen.
  pub fn sorted_orders(&self) -> Vec<Order> {
    let state = self.state.read();
    match state.sort {
      Some((key, direction)) => sorted(&state.orders, key, direction),
      None => state.orders.clone(),
    }
  }

  /// Sorted-then-filtered projection for an explicit role and account,
  /// independent of the viewer state held by the store.
  pub fn project_for(&self, role: Role, account: Option<&Address>) -> Vec<Order> {
    filter_by_role(&self.sorted_orders(), role, account)
  }

  /// What the current viewer sees: current sort applied to the cache, then
  /// the current role and account. No selected role means an empty view.
  pub fn visible_orders(&self) -> Vec<Order> {
    let (role, account) = {
      let state = self.state.read();
      (state.role, state.account.clone())
    };
    let role = match role {
      Some(role) => role,
      None => return Vec::new(),
    };
    filter_by_role(&self.sorted_orders(), role, account.as_ref())
  }
}
