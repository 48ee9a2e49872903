// vitrine/src/store/sync.rs

//! The read path: bulk order fetching, balance refresh, wallet session
//! handling, and runtime repointing at a different deployment.

use crate::error::{MarketError, MarketResult};
use crate::model::{Address, Order};
use crate::store::definition::OrderStore;

use tracing::{event, instrument, Level};

impl OrderStore {
  /// Rebuilds the whole order cache from the contract: reads the order
  /// count, then every record by ascending index, normalizes them, and
  /// replaces the cached snapshot in one swap.
  ///
  /// On any failure the cache keeps its previous snapshot untouched and the
  /// error is recorded in the error slot. Overlapping calls are safe: each
  /// builds its own complete snapshot off-lock and the last one to complete
  /// wins the swap.
  #[instrument(name = "OrderStore::fetch_all", skip_all, fields(contract = %self.contract_address()), err(Display))]
  pub async fn fetch_all(&self) -> MarketResult<Vec<Order>> {
    let contract = self.contract_address();
    match self.fetch_snapshot(&contract).await {
      Ok(snapshot) => {
        event!(Level::DEBUG, orders = snapshot.len(), "Order cache replaced.");
        self.state.write().orders = snapshot.clone();
        Ok(snapshot)
      }
      Err(e) => {
        let e = e.into_fetch();
        self.record_error(e.to_string());
        Err(e)
      }
    }
  }

  /// Builds one complete snapshot without touching the cache.
  async fn fetch_snapshot(&self, contract: &Address) -> MarketResult<Vec<Order>> {
    let count = self.gateway.order_count(contract).await?;
    event!(Level::TRACE, count, "Fetching orders by index.");
    // The advertised count is untrusted until the per-index reads bear it
    // out; cap the preallocation so an absurd value cannot abort the fetch.
    let mut snapshot = Vec::with_capacity(count.min(1_024) as usize);
    for index in 0..count {
      let raw = self.gateway.order_at(contract, index).await?;
      snapshot.push(Order::from_raw(index, raw)?);
    }
    Ok(snapshot)
  }

  /// Re-reads the withdrawable balance of the connected account. A no-op
  /// without a connected account.
  #[instrument(name = "OrderStore::refresh_balance", skip_all, err(Display))]
  pub async fn refresh_balance(&self) -> MarketResult<()> {
    let (contract, account) = {
      let state = self.state.read();
      (state.contract_address.clone(), state.account.clone())
    };
    let account = match account {
      Some(account) => account,
      None => {
        event!(Level::TRACE, "No connected account, skipping balance refresh.");
        return Ok(());
      }
    };
    match self.gateway.balance_of(&contract, &account).await {
      Ok(balance) => {
        self.state.write().balance = Some(balance);
        Ok(())
      }
      Err(e) => {
        let e = e.into_fetch();
        self.record_error(e.to_string());
        Err(e)
      }
    }
  }

  /// Silent session resume: adopts an already-authorized wallet account if
  /// one exists, then refreshes orders and balance. A missing provider is
  /// treated as "no session to resume" rather than a failure, so startup
  /// without a wallet stays quiet.
  #[instrument(name = "OrderStore::resume", skip_all)]
  pub async fn resume(&self) -> MarketResult<Option<Address>> {
    let probed = match self.gateway.connected_account().await {
      Ok(account) => account,
      Err(MarketError::ProviderUnavailable) => {
        event!(Level::WARN, "No wallet provider detected, nothing to resume.");
        return Ok(None);
      }
      Err(e) => {
        self.record_error(e.to_string());
        return Err(e);
      }
    };
    let account = match probed {
      Some(account) => account,
      None => {
        event!(Level::DEBUG, "No authorized account, nothing to resume.");
        return Ok(None);
      }
    };
    self.adopt_account(account.clone()).await;
    Ok(Some(account))
  }

  /// Interactive connect: asks the wallet for an account, prompting the
  /// user if needed, then refreshes orders and balance.
  #[instrument(name = "OrderStore::connect", skip_all, err(Display))]
  pub async fn connect(&self) -> MarketResult<Address> {
    let account = match self.gateway.request_account().await {
      Ok(account) => account,
      Err(e) => {
        self.record_error(e.to_string());
        return Err(e);
      }
    };
    self.adopt_account(account.clone()).await;
    Ok(account)
  }

  async fn adopt_account(&self, account: Address) {
    event!(Level::INFO, account = %account.short(), "Wallet account adopted.");
    self.state.write().account = Some(account);
    // The connection itself has succeeded; refresh failures after it speak
    // through the error slot.
    if let Err(e) = self.fetch_all().await {
      event!(Level::WARN, error = %e, "Order refresh after connect failed.");
    }
    if let Err(e) = self.refresh_balance().await {
      event!(Level::WARN, error = %e, "Balance refresh after connect failed.");
    }
  }

  /// Drops the wallet session. The cached orders and the selected role
  /// survive; the account and its balance do not.
  pub fn disconnect(&self) {
    event!(Level::INFO, "Wallet disconnected.");
    let mut state = self.state.write();
    state.account = None;
    state.balance = None;
  }

  /// Repoints the store at a different deployment. The cache and balance
  /// from the previous contract are invalidated immediately, then both
  /// refreshes run against the new address; their failures speak through
  /// the error slot.
  #[instrument(name = "OrderStore::set_contract_address", skip_all, fields(contract = %address))]
  pub async fn set_contract_address(&self, address: Address) {
    {
      let mut state = self.state.write();
      state.contract_address = address;
      state.orders.clear();
      state.balance = None;
    }
    if let Err(e) = self.fetch_all().await {
      event!(Level::WARN, error = %e, "Order fetch against the new contract failed.");
    }
    if let Err(e) = self.refresh_balance().await {
      event!(Level::WARN, error = %e, "Balance fetch against the new contract failed.");
    }
  }
}
