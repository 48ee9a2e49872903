// vitrine/src/gateway/mod.rs

//! The contract client seam: everything the store needs from the wallet
//! provider and the deployed escrow contract, behind one async trait.
//!
//! The store never talks to a chain directly. It drives an [`EscrowGateway`]
//! and treats whatever sits behind it (a browser wallet bridge, an RPC
//! client, or the in-memory stand-in) as an opaque, failable service.

pub mod memory;

use crate::error::{MarketError, MarketResult};
use crate::model::{Address, OrderId, Wei};

use async_trait::async_trait;

// Re-export the simulated backend for tests and demos.
pub use memory::{Fault, InMemoryLedger};

/// One on-chain order exactly as the contract returns it, before
/// normalization.
///
/// Addresses arrive in whatever casing the provider produced, the courier
/// field may hold the all-zero sentinel, and `status` is the raw status
/// code. [`crate::model::Order::from_raw`] turns this into the cached form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOrder {
  pub product_id: u64,
  pub product_price: Wei,
  pub courier_fee: Wei,
  pub collateral: Wei,
  pub consumer: String,
  pub seller: String,
  pub courier: String,
  pub status: u8,
  pub order_timestamp: u64,
  pub delivery_time: u64,
}

/// Arguments for placing a new order.
#[derive(Debug, Clone)]
pub struct PlaceOrderArgs {
  pub seller: Address,
  pub product_id: u64,
  pub product_price: Wei,
  pub courier_fee: Wei,
  /// Agreed delivery window in seconds, counted from placement.
  pub delivery_time: u64,
}

impl PlaceOrderArgs {
  /// Funds the consumer escrows at placement: product price plus courier
  /// fee.
  pub fn attached_value(&self) -> MarketResult<Wei> {
    self
      .product_price
      .checked_add(self.courier_fee)
      .ok_or_else(|| MarketError::Contract {
        reason: "attached value overflows the wei range".to_string(),
      })
  }
}

/// The adapter between the store and the external wallet + contract pair.
///
/// Reads are keyed by explicit contract address so the store can be
/// repointed at a different deployment at runtime. Writes sign with whatever
/// account the wallet currently exposes; the contract, not this trait,
/// decides whether that account is allowed to act.
///
/// Implementations map their native failures onto [`MarketError`]: a missing
/// provider to `ProviderUnavailable`, a dismissed signature prompt to
/// `UserRejected`, a revert to `Contract`, transport trouble to `Fetch`.
#[async_trait]
pub trait EscrowGateway: Send + Sync {
  /// The already-authorized account, if the wallet exposes one. Used for
  /// silent session resume; must not prompt the user.
  async fn connected_account(&self) -> MarketResult<Option<Address>>;

  /// Asks the wallet for an account, prompting the user if necessary.
  async fn request_account(&self) -> MarketResult<Address>;

  /// Number of orders ever placed on the given deployment.
  async fn order_count(&self, contract: &Address) -> MarketResult<u64>;

  /// The raw order record at storage index `index`.
  async fn order_at(&self, contract: &Address, index: u64) -> MarketResult<RawOrder>;

  /// Withdrawable escrow balance of `account` on the given deployment.
  async fn balance_of(&self, contract: &Address, account: &Address) -> MarketResult<Wei>;

  /// Places a new order, attaching `value` (price plus fee) in escrow.
  async fn place_order(&self, contract: &Address, args: PlaceOrderArgs, value: Wei)
    -> MarketResult<()>;

  /// Registers the signing account as the order's courier.
  async fn assign_courier(&self, contract: &Address, order_id: OrderId) -> MarketResult<()>;

  /// Marks the order dispatched, attaching `collateral` (twice the price).
  async fn dispatch_order(
    &self,
    contract: &Address,
    order_id: OrderId,
    collateral: Wei,
  ) -> MarketResult<()>;

  /// Confirms delivery, releasing escrowed funds to seller and courier.
  async fn confirm_delivery(&self, contract: &Address, order_id: OrderId) -> MarketResult<()>;

  /// Cancels a not-yet-dispatched order, refunding the consumer.
  async fn cancel_order(&self, contract: &Address, order_id: OrderId) -> MarketResult<()>;

  /// Withdraws the signing account's accumulated escrow balance.
  async fn withdraw(&self, contract: &Address) -> MarketResult<()>;

  /// Claims a refund for an order whose delivery window has lapsed.
  async fn refund_after_timeout(&self, contract: &Address, order_id: OrderId) -> MarketResult<()>;
}
