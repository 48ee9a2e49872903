// vitrine/src/store/definition.rs

//! Defines the `OrderStore` struct, its owned state, construction, and
//! snapshot accessors.

use crate::config::StoreConfig;
use crate::error::MarketResult;
use crate::gateway::EscrowGateway;
use crate::model::{Address, Order, OrderId, Role, Wei};
use crate::session::{MemorySession, SessionStore};
use crate::store::view::{SortDirection, SortKey};

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{event, Level};

/// Everything the store owns. Mutated only through store operations, always
/// under the one lock in `OrderStore`.
pub(crate) struct StoreState {
  pub(crate) contract_address: Address,
  /// Last complete snapshot, in fetch order. Replaced wholesale by
  /// `fetch_all`, never patched in place.
  pub(crate) orders: Vec<Order>,
  pub(crate) account: Option<Address>,
  pub(crate) balance: Option<Wei>,
  pub(crate) role: Option<Role>,
  pub(crate) sort: Option<(SortKey, SortDirection)>,
  /// Most recent operation failure, as shown to the user. Overwritten by
  /// the next failure, cleared only on request.
  pub(crate) last_error: Option<String>,
}

/// The client-side view-model store over the escrow contract.
///
/// It owns a cached snapshot of the order book, the wallet session, the
/// viewer's role, and the last surfaced error, and exposes role-scoped read
/// projections plus one write-action per contract call.
///
/// Cloning yields another handle to the same store. The internal lock is a
/// blocking `parking_lot::RwLock`; guards are confined to short synchronous
/// sections and MUST NOT be held across an `.await`. Every async operation
/// does its provider round-trips with the lock released and commits results
/// in one short write section afterwards.
pub struct OrderStore {
  pub(crate) state: Arc<RwLock<StoreState>>,
  pub(crate) gateway: Arc<dyn EscrowGateway>,
  pub(crate) session: Arc<dyn SessionStore>,
  pub(crate) poll_interval: Duration,
}

// Manual Clone: a handle copy, regardless of what the trait objects are.
impl Clone for OrderStore {
  fn clone(&self) -> Self {
    OrderStore {
      state: Arc::clone(&self.state),
      gateway: Arc::clone(&self.gateway),
      session: Arc::clone(&self.session),
      poll_interval: self.poll_interval,
    }
  }
}

impl OrderStore {
  /// Creates a store over `gateway`, restoring the persisted role from
  /// `session`. Anything stored outside the fixed role set (or an unreadable
  /// session) is ignored and the store starts with no role selected.
  pub fn new(
    gateway: Arc<dyn EscrowGateway>,
    session: Arc<dyn SessionStore>,
    config: StoreConfig,
  ) -> Self {
    let role = match session.load_role() {
      Ok(Some(saved)) => {
        let parsed = Role::parse(&saved);
        if parsed.is_none() {
          event!(Level::WARN, stored = %saved, "Persisted role is not in the role set, ignoring.");
        }
        parsed
      }
      Ok(None) => None,
      Err(e) => {
        event!(Level::WARN, error = %e, "Could not read persisted session, starting with no role.");
        None
      }
    };

    let state = StoreState {
      contract_address: config.contract_address,
      orders: Vec::new(),
      account: None,
      balance: None,
      role,
      sort: None,
      last_error: None,
    };
    OrderStore {
      state: Arc::new(RwLock::new(state)),
      gateway,
      session,
      poll_interval: config.poll_interval,
    }
  }

  /// A store with default configuration and in-memory role persistence.
  pub fn with_defaults(gateway: Arc<dyn EscrowGateway>) -> Self {
    OrderStore::new(gateway, Arc::new(MemorySession::new()), StoreConfig::default())
  }

  /// The full cached snapshot, in fetch order.
  pub fn orders(&self) -> Vec<Order> {
    self.state.read().orders.clone()
  }

  /// One cached order by id, if present in the snapshot.
  pub fn order(&self, order_id: OrderId) -> Option<Order> {
    self
      .state
      .read()
      .orders
      .iter()
      .find(|o| o.order_id == order_id)
      .cloned()
  }

  pub fn account(&self) -> Option<Address> {
    self.state.read().account.clone()
  }

  /// Last fetched withdrawable balance of the connected account. `None`
  /// until a balance refresh has succeeded.
  pub fn balance(&self) -> Option<Wei> {
    self.state.read().balance
  }

  pub fn role(&self) -> Option<Role> {
    self.state.read().role
  }

  pub fn contract_address(&self) -> Address {
    self.state.read().contract_address.clone()
  }

  /// The user-facing message of the most recent failed operation, if it has
  /// not been dismissed.
  pub fn last_error(&self) -> Option<String> {
    self.state.read().last_error.clone()
  }

  /// Dismisses the surfaced error.
  pub fn clear_error(&self) {
    self.state.write().last_error = None;
  }

  /// Selects the viewer's role and writes it through to the session so it
  /// survives reloads. The role is a client-side lens, not a chain
  /// permission.
  pub fn set_role(&self, role: Role) -> MarketResult<()> {
    event!(Level::INFO, role = %role, "Role selected.");
    self.state.write().role = Some(role);
    if let Err(e) = self.session.save_role(role.as_str()) {
      // The in-memory choice stands; only its persistence failed.
      self.record_error(e.to_string());
      return Err(e);
    }
    Ok(())
  }

  pub(crate) fn record_error(&self, message: impl Into<String>) {
    let message = message.into();
    event!(Level::ERROR, error = %message, "Store operation failed.");
    self.state.write().last_error = Some(message);
  }
}
