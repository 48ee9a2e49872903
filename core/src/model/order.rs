// vitrine/src/model/order.rs

//! The normalized order snapshot and its lifecycle status.

use crate::error::{MarketError, MarketResult};
use crate::gateway::RawOrder;
use crate::model::address::Address;

use anyhow::anyhow;
use std::fmt;

/// Stable order identifier: the order's index in the contract's storage
/// array. Assigned at placement, never reused.
pub type OrderId = u64;

/// A monetary amount in wei.
pub type Wei = u128;

/// Lifecycle states of an order, in chain order. The discriminants mirror
/// the contract's status codes, so sorting by status follows the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
  Placed,
  CourierAssigned,
  Dispatched,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Placed => "Placed",
      OrderStatus::CourierAssigned => "CourierAssigned",
      OrderStatus::Dispatched => "Dispatched",
      OrderStatus::Delivered => "Delivered",
      OrderStatus::Cancelled => "Cancelled",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl TryFrom<u8> for OrderStatus {
  type Error = MarketError;

  fn try_from(code: u8) -> MarketResult<Self> {
    match code {
      0 => Ok(OrderStatus::Placed),
      1 => Ok(OrderStatus::CourierAssigned),
      2 => Ok(OrderStatus::Dispatched),
      3 => Ok(OrderStatus::Delivered),
      4 => Ok(OrderStatus::Cancelled),
      other => Err(MarketError::Fetch {
        source: anyhow!("unknown order status code {other}"),
      }),
    }
  }
}

/// One order as the cache holds it: addresses canonicalized, the courier
/// sentinel mapped to `None`, and the raw status code decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
  pub order_id: OrderId,
  pub product_id: u64,
  pub product_price: Wei,
  pub courier_fee: Wei,
  /// Collateral locked by the courier at dispatch; zero until then.
  pub collateral: Wei,
  pub consumer: Address,
  pub seller: Address,
  /// `None` while the contract still holds the zero-address sentinel.
  pub courier: Option<Address>,
  pub status: OrderStatus,
  /// Placement time, seconds since the epoch (chain time).
  pub order_timestamp: u64,
  /// Agreed delivery window in seconds, counted from `order_timestamp`.
  pub delivery_time: u64,
}

impl Order {
  /// Normalizes one wire record into its cached form. `order_id` is the
  /// record's index in the contract's storage array.
  pub fn from_raw(order_id: OrderId, raw: RawOrder) -> MarketResult<Self> {
    let consumer = Address::parse(&raw.consumer)?;
    let seller = Address::parse(&raw.seller)?;
    let courier = {
      let parsed = Address::parse(&raw.courier)?;
      if parsed.is_zero() {
        None
      } else {
        Some(parsed)
      }
    };
    Ok(Order {
      order_id,
      product_id: raw.product_id,
      product_price: raw.product_price,
      courier_fee: raw.courier_fee,
      collateral: raw.collateral,
      consumer,
      seller,
      courier,
      status: OrderStatus::try_from(raw.status)?,
      order_timestamp: raw.order_timestamp,
      delivery_time: raw.delivery_time,
    })
  }

  /// Collateral a courier must attach to dispatch this order: twice the
  /// product price.
  pub fn dispatch_collateral(&self) -> MarketResult<Wei> {
    self.product_price.checked_mul(2).ok_or_else(|| MarketError::Contract {
      reason: "dispatch collateral overflows the wei range".to_string(),
    })
  }

  /// The courier column as rendered: canonical address, or the empty string
  /// while unassigned. Sorting by courier uses this form.
  pub fn courier_label(&self) -> &str {
    self.courier.as_ref().map(Address::as_str).unwrap_or("")
  }
}
