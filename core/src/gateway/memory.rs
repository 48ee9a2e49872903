// vitrine/src/gateway/memory.rs

//! An in-memory stand-in for the wallet provider and the deployed escrow
//! contract, for tests, demos, and benches.
//!
//! It implements enough of the escrow lifecycle to exercise every store
//! path: placement escrows price plus fee, dispatch locks collateral,
//! delivery releases funds to seller and courier, cancellation and timeout
//! refunds return funds to the consumer. Failures are injected per call via
//! [`Fault`]. It is scaffolding, not a chain: there is a single simulated
//! deployment, and the contract address passed to reads and writes is
//! accepted as given.

use crate::error::{MarketError, MarketResult};
use crate::gateway::{EscrowGateway, PlaceOrderArgs, RawOrder};
use crate::model::{Address, OrderId, OrderStatus, Wei, ZERO_ADDRESS};

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{event, Level};

/// A failure to inject into gateway calls.
#[derive(Debug, Clone)]
pub enum Fault {
  /// No wallet provider detected.
  Offline,
  /// The user dismissed the signature prompt.
  Rejected,
  /// The contract reverted with the given reason.
  Revert(String),
  /// The transport layer failed mid-call.
  Transport(String),
}

impl Fault {
  fn to_error(&self) -> MarketError {
    match self {
      Fault::Offline => MarketError::ProviderUnavailable,
      Fault::Rejected => MarketError::UserRejected,
      Fault::Revert(reason) => MarketError::Contract {
        reason: reason.clone(),
      },
      Fault::Transport(detail) => MarketError::Fetch {
        source: anyhow!("transport failure: {detail}"),
      },
    }
  }
}

struct LedgerState {
  orders: Vec<RawOrder>,
  balances: HashMap<Address, Wei>,
  wallet: Option<Address>,
  /// Simulated chain time, seconds since the epoch. Moves only through
  /// `advance_time`.
  now: u64,
  /// One-shot fault consumed by the next call, read or write.
  next_fault: Option<Fault>,
  /// Persistent fault applied to every read until cleared.
  read_fault: Option<Fault>,
  reads: u64,
  writes: u64,
}

/// The simulated wallet + contract pair.
///
/// All mutation happens synchronously under one lock; no guard is ever held
/// across an await point because the implementation never awaits.
pub struct InMemoryLedger {
  state: Mutex<LedgerState>,
}

impl InMemoryLedger {
  pub fn new() -> Self {
    let now = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_secs())
      .unwrap_or(0);
    InMemoryLedger {
      state: Mutex::new(LedgerState {
        orders: Vec::new(),
        balances: HashMap::new(),
        wallet: None,
        now,
        next_fault: None,
        read_fault: None,
        reads: 0,
        writes: 0,
      }),
    }
  }

  /// Simulates the user approving a wallet connection for `account`.
  pub fn connect_as(&self, account: Address) {
    event!(Level::DEBUG, account = %account, "Simulated wallet connected.");
    self.state.lock().wallet = Some(account);
  }

  /// Simulates the wallet losing its account.
  pub fn disconnect_wallet(&self) {
    self.state.lock().wallet = None;
  }

  /// Appends a raw order exactly as given and returns its id. The wire
  /// shape is not validated, so tests can seed malformed records.
  pub fn seed_order(&self, raw: RawOrder) -> OrderId {
    let mut state = self.state.lock();
    state.orders.push(raw);
    (state.orders.len() - 1) as OrderId
  }

  /// Swaps the simulated order book wholesale, as if a different deployment
  /// were being served.
  pub fn replace_orders(&self, orders: Vec<RawOrder>) {
    self.state.lock().orders = orders;
  }

  /// The raw record currently stored at `index`, if any.
  pub fn raw_order(&self, index: u64) -> Option<RawOrder> {
    self.state.lock().orders.get(index as usize).cloned()
  }

  /// Arms a one-shot fault for the next gateway call of any kind.
  pub fn fail_next(&self, fault: Fault) {
    self.state.lock().next_fault = Some(fault);
  }

  /// Makes every read fail with `fault` until `serve_reads` is called.
  /// Writes are unaffected, which is how "the write settled but the refresh
  /// after it did not" is staged.
  pub fn fail_reads(&self, fault: Fault) {
    self.state.lock().read_fault = Some(fault);
  }

  /// Clears a persistent read fault.
  pub fn serve_reads(&self) {
    self.state.lock().read_fault = None;
  }

  /// Moves the simulated chain clock forward. Timeout refunds compare the
  /// clock against placement time plus delivery window.
  pub fn advance_time(&self, seconds: u64) {
    let mut state = self.state.lock();
    state.now = state.now.saturating_add(seconds);
  }

  /// Contract reads served so far (order count, order fetch, balance).
  /// Faulted calls do not count.
  pub fn reads_served(&self) -> u64 {
    self.state.lock().reads
  }

  /// Writes that reached the simulated contract, reverted ones included.
  /// A call consumed by a `Rejected` or `Offline` fault never reaches it.
  pub fn writes_served(&self) -> u64 {
    self.state.lock().writes
  }

  /// Withdrawable balance of `account`, bypassing the gateway surface.
  pub fn balance_in_escrow(&self, account: &Address) -> Wei {
    self.state.lock().balances.get(account).copied().unwrap_or(0)
  }
}

impl Default for InMemoryLedger {
  fn default() -> Self {
    InMemoryLedger::new()
  }
}

fn take_fault(state: &mut LedgerState, read_path: bool) -> MarketResult<()> {
  if let Some(fault) = state.next_fault.take() {
    return Err(fault.to_error());
  }
  if read_path {
    if let Some(fault) = &state.read_fault {
      return Err(fault.to_error());
    }
  }
  Ok(())
}

fn signer(state: &LedgerState) -> MarketResult<Address> {
  state.wallet.clone().ok_or(MarketError::ProviderUnavailable)
}

fn revert(reason: &str) -> MarketError {
  MarketError::Contract {
    reason: reason.to_string(),
  }
}

/// Whether `raw` names the same account as `account`, ignoring hex casing.
/// Seeded records are not canonicalized, so a plain string compare is not
/// enough.
fn same_account(raw: &str, account: &Address) -> bool {
  raw.eq_ignore_ascii_case(account.as_str())
}

fn credit(state: &mut LedgerState, account: Address, amount: Wei) {
  let balance = state.balances.entry(account).or_insert(0);
  *balance = balance.saturating_add(amount);
}

fn order_mut<'a>(state: &'a mut LedgerState, order_id: OrderId) -> MarketResult<&'a mut RawOrder> {
  state
    .orders
    .get_mut(order_id as usize)
    .ok_or_else(|| revert("order does not exist"))
}

#[async_trait]
impl EscrowGateway for InMemoryLedger {
  async fn connected_account(&self) -> MarketResult<Option<Address>> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    Ok(state.wallet.clone())
  }

  async fn request_account(&self) -> MarketResult<Address> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    // No configured wallet account plays the part of a dismissed prompt.
    state.wallet.clone().ok_or(MarketError::UserRejected)
  }

  async fn order_count(&self, _contract: &Address) -> MarketResult<u64> {
    let mut state = self.state.lock();
    take_fault(&mut state, true)?;
    state.reads += 1;
    Ok(state.orders.len() as u64)
  }

  async fn order_at(&self, _contract: &Address, index: u64) -> MarketResult<RawOrder> {
    let mut state = self.state.lock();
    take_fault(&mut state, true)?;
    state.reads += 1;
    state
      .orders
      .get(index as usize)
      .cloned()
      .ok_or_else(|| revert("order does not exist"))
  }

  async fn balance_of(&self, _contract: &Address, account: &Address) -> MarketResult<Wei> {
    let mut state = self.state.lock();
    take_fault(&mut state, true)?;
    state.reads += 1;
    Ok(state.balances.get(account).copied().unwrap_or(0))
  }

  async fn place_order(
    &self,
    _contract: &Address,
    args: PlaceOrderArgs,
    value: Wei,
  ) -> MarketResult<()> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    let consumer = signer(&state)?;
    state.writes += 1;

    let expected = args.attached_value()?;
    if value != expected {
      return Err(revert("attached value must equal product price plus courier fee"));
    }
    let raw = RawOrder {
      product_id: args.product_id,
      product_price: args.product_price,
      courier_fee: args.courier_fee,
      collateral: 0,
      consumer: consumer.as_str().to_string(),
      seller: args.seller.as_str().to_string(),
      courier: ZERO_ADDRESS.to_string(),
      status: OrderStatus::Placed as u8,
      order_timestamp: state.now,
      delivery_time: args.delivery_time,
    };
    state.orders.push(raw);
    event!(
      Level::DEBUG,
      order_id = state.orders.len() - 1,
      "Simulated order placed."
    );
    Ok(())
  }

  async fn assign_courier(&self, _contract: &Address, order_id: OrderId) -> MarketResult<()> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    let courier = signer(&state)?;
    state.writes += 1;

    let order = order_mut(&mut state, order_id)?;
    if order.status != OrderStatus::Placed as u8 {
      return Err(revert("order is not awaiting a courier"));
    }
    order.courier = courier.as_str().to_string();
    order.status = OrderStatus::CourierAssigned as u8;
    Ok(())
  }

  async fn dispatch_order(
    &self,
    _contract: &Address,
    order_id: OrderId,
    collateral: Wei,
  ) -> MarketResult<()> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    let courier = signer(&state)?;
    state.writes += 1;

    let order = order_mut(&mut state, order_id)?;
    if order.status != OrderStatus::CourierAssigned as u8 {
      return Err(revert("order has no courier to dispatch it"));
    }
    if !same_account(&order.courier, &courier) {
      return Err(revert("only the assigned courier can dispatch"));
    }
    let expected = order
      .product_price
      .checked_mul(2)
      .ok_or_else(|| revert("collateral overflows the wei range"))?;
    if collateral != expected {
      return Err(revert("collateral must equal twice the product price"));
    }
    order.collateral = collateral;
    order.status = OrderStatus::Dispatched as u8;
    Ok(())
  }

  async fn confirm_delivery(&self, _contract: &Address, order_id: OrderId) -> MarketResult<()> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    let consumer = signer(&state)?;
    state.writes += 1;

    let order = order_mut(&mut state, order_id)?;
    if order.status != OrderStatus::Dispatched as u8 {
      return Err(revert("order is not in transit"));
    }
    if !same_account(&order.consumer, &consumer) {
      return Err(revert("only the consumer can confirm delivery"));
    }
    let seller = Address::parse(&order.seller).map_err(|_| revert("seller record is malformed"))?;
    let courier =
      Address::parse(&order.courier).map_err(|_| revert("courier record is malformed"))?;
    let price = order.product_price;
    let fee_and_collateral = order
      .courier_fee
      .checked_add(order.collateral)
      .ok_or_else(|| revert("payout overflows the wei range"))?;
    order.status = OrderStatus::Delivered as u8;
    credit(&mut state, seller, price);
    credit(&mut state, courier, fee_and_collateral);
    Ok(())
  }

  async fn cancel_order(&self, _contract: &Address, order_id: OrderId) -> MarketResult<()> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    let consumer = signer(&state)?;
    state.writes += 1;

    let order = order_mut(&mut state, order_id)?;
    if order.status != OrderStatus::Placed as u8
      && order.status != OrderStatus::CourierAssigned as u8
    {
      return Err(revert("order can no longer be cancelled"));
    }
    if !same_account(&order.consumer, &consumer) {
      return Err(revert("only the consumer can cancel"));
    }
    let refund = order
      .product_price
      .checked_add(order.courier_fee)
      .ok_or_else(|| revert("refund overflows the wei range"))?;
    order.status = OrderStatus::Cancelled as u8;
    credit(&mut state, consumer, refund);
    Ok(())
  }

  async fn withdraw(&self, _contract: &Address) -> MarketResult<()> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    let account = signer(&state)?;
    state.writes += 1;

    match state.balances.get_mut(&account) {
      Some(balance) if *balance > 0 => {
        event!(Level::DEBUG, account = %account, amount = *balance, "Simulated withdrawal.");
        *balance = 0;
        Ok(())
      }
      _ => Err(revert("no funds to withdraw")),
    }
  }

  async fn refund_after_timeout(&self, _contract: &Address, order_id: OrderId) -> MarketResult<()> {
    let mut state = self.state.lock();
    take_fault(&mut state, false)?;
    let consumer = signer(&state)?;
    state.writes += 1;

    let now = state.now;
    let order = order_mut(&mut state, order_id)?;
    if order.status == OrderStatus::Delivered as u8 || order.status == OrderStatus::Cancelled as u8
    {
      return Err(revert("order is already settled"));
    }
    if !same_account(&order.consumer, &consumer) {
      return Err(revert("only the consumer can claim a timeout refund"));
    }
    if now <= order.order_timestamp.saturating_add(order.delivery_time) {
      return Err(revert("delivery window is still open"));
    }
    // The courier's collateral is forfeited to the consumer along with the
    // escrowed payment.
    let refund = order
      .product_price
      .checked_add(order.courier_fee)
      .and_then(|sum| sum.checked_add(order.collateral))
      .ok_or_else(|| revert("refund overflows the wei range"))?;
    order.status = OrderStatus::Cancelled as u8;
    credit(&mut state, consumer, refund);
    Ok(())
  }
}
