// vitrine/src/store/actions.rs

//! The write path: one action per state-changing contract call.
//!
//! Every action follows the same contract. It submits exactly one write,
//! and if that write fails it records the error and returns it without
//! refreshing anything, leaving the cache on its last-known-good snapshot.
//! If the write settles, the order cache is refetched (and the balance too,
//! for actions that move withdrawable funds); a refresh failure after a
//! settled write speaks through the error slot but never turns the action
//! into a failure, because the write is already on chain and is neither
//! rolled back nor resubmitted.

use crate::error::{MarketError, MarketResult};
use crate::gateway::PlaceOrderArgs;
use crate::model::OrderId;
use crate::store::definition::OrderStore;

use tracing::{event, instrument, Level};

impl OrderStore {
  /// Places a new order, escrowing product price plus courier fee.
  #[instrument(name = "OrderStore::place_order", skip_all, fields(product_id = args.product_id, seller = %args.seller.short()), err(Display))]
  pub async fn place_order(&self, args: PlaceOrderArgs) -> MarketResult<()> {
    let value = match args.attached_value() {
      Ok(value) => value,
      Err(e) => return self.fail(e),
    };
    let contract = self.contract_address();
    if let Err(e) = self.gateway.place_order(&contract, args, value).await {
      return self.fail(e);
    }
    self.refresh_after_write(true).await;
    Ok(())
  }

  /// Registers the connected account as the order's courier.
  #[instrument(name = "OrderStore::register_courier", skip_all, fields(order_id = order_id), err(Display))]
  pub async fn register_courier(&self, order_id: OrderId) -> MarketResult<()> {
    let contract = self.contract_address();
    if let Err(e) = self.gateway.assign_courier(&contract, order_id).await {
      return self.fail(e);
    }
    self.refresh_after_write(false).await;
    Ok(())
  }

  /// Dispatches an order, attaching twice its product price as collateral.
  /// The collateral is computed from the cached order; an id missing from
  /// the cache fails before anything is submitted.
  #[instrument(name = "OrderStore::dispatch_order", skip_all, fields(order_id = order_id), err(Display))]
  pub async fn dispatch_order(&self, order_id: OrderId) -> MarketResult<()> {
    let order = match self.order(order_id) {
      Some(order) => order,
      None => return self.fail(MarketError::UnknownOrder { order_id }),
    };
    let collateral = match order.dispatch_collateral() {
      Ok(collateral) => collateral,
      Err(e) => return self.fail(e),
    };
    let contract = self.contract_address();
    if let Err(e) = self
      .gateway
      .dispatch_order(&contract, order_id, collateral)
      .await
    {
      return self.fail(e);
    }
    self.refresh_after_write(false).await;
    Ok(())
  }

  /// Confirms delivery of a dispatched order, releasing escrowed funds to
  /// the seller and the courier.
  #[instrument(name = "OrderStore::verify_delivery", skip_all, fields(order_id = order_id), err(Display))]
  pub async fn verify_delivery(&self, order_id: OrderId) -> MarketResult<()> {
    let contract = self.contract_address();
    if let Err(e) = self.gateway.confirm_delivery(&contract, order_id).await {
      return self.fail(e);
    }
    self.refresh_after_write(false).await;
    Ok(())
  }

  /// Cancels a not-yet-dispatched order.
  #[instrument(name = "OrderStore::cancel_order", skip_all, fields(order_id = order_id), err(Display))]
  pub async fn cancel_order(&self, order_id: OrderId) -> MarketResult<()> {
    let contract = self.contract_address();
    if let Err(e) = self.gateway.cancel_order(&contract, order_id).await {
      return self.fail(e);
    }
    self.refresh_after_write(false).await;
    Ok(())
  }

  /// Withdraws the connected account's accumulated escrow balance.
  #[instrument(name = "OrderStore::claim_funds", skip_all, err(Display))]
  pub async fn claim_funds(&self) -> MarketResult<()> {
    let contract = self.contract_address();
    if let Err(e) = self.gateway.withdraw(&contract).await {
      return self.fail(e);
    }
    self.refresh_after_write(true).await;
    Ok(())
  }

  /// Claims a refund for an order whose delivery window has lapsed.
  #[instrument(name = "OrderStore::withdraw_after_timeout", skip_all, fields(order_id = order_id), err(Display))]
  pub async fn withdraw_after_timeout(&self, order_id: OrderId) -> MarketResult<()> {
    let contract = self.contract_address();
    if let Err(e) = self.gateway.refund_after_timeout(&contract, order_id).await {
      return self.fail(e);
    }
    self.refresh_after_write(true).await;
    Ok(())
  }

  /// Records a failed write in the error slot and hands the error back.
  fn fail<T>(&self, e: MarketError) -> MarketResult<T> {
    self.record_error(e.to_string());
    Err(e)
  }

  /// The post-write refresh. Runs only once the write has settled; failures
  /// here are recorded by the refresh operations themselves and do not undo
  /// the write.
  async fn refresh_after_write(&self, refresh_balance: bool) {
    if let Err(e) = self.fetch_all().await {
      event!(Level::WARN, error = %e, "Post-action order refresh failed; the write itself settled.");
    }
    if refresh_balance {
      if let Err(e) = self.refresh_balance().await {
        event!(Level::WARN, error = %e, "Post-action balance refresh failed.");
      }
    }
  }
}
