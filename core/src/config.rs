// vitrine/src/config.rs

//! Store configuration: which deployment to read, how often to poll, where
//! the session lives. Values come from defaults, optionally overridden by
//! the environment (a `.env` file is honored when present).

use crate::error::{MarketError, MarketResult};
use crate::model::Address;
use crate::session::{FileSession, MemorySession, SessionStore};

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{event, Level};

/// The deployment the client ships against when nothing else is configured.
/// Runtime repointing goes through `OrderStore::set_contract_address`.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xd742aad8ee17e8167ccc01b1d449b644d920554c";

/// Cadence of the periodic order refresh.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(12);

#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub contract_address: Address,
  pub poll_interval: Duration,
  /// Where the selected role persists across sessions. `None` keeps it in
  /// memory only.
  pub session_file: Option<PathBuf>,
}

impl Default for StoreConfig {
  fn default() -> Self {
    StoreConfig {
      contract_address: Address::parse(DEFAULT_CONTRACT_ADDRESS)
        .expect("default contract address is well-formed"),
      poll_interval: DEFAULT_POLL_INTERVAL,
      session_file: None,
    }
  }
}

impl StoreConfig {
  /// Builds a configuration from the environment, falling back to defaults
  /// for anything unset. Recognized variables:
  ///
  /// - `VITRINE_CONTRACT_ADDRESS`: deployment to read, any hex casing.
  /// - `VITRINE_POLL_INTERVAL_SECS`: refresh cadence in whole seconds, at
  ///   least 1.
  /// - `VITRINE_SESSION_FILE`: path of the role persistence file.
  pub fn from_env() -> MarketResult<Self> {
    // Load .env file if present; ignore errors if not found
    dotenvy::dotenv().ok();

    let mut config = StoreConfig::default();

    if let Ok(raw) = env::var("VITRINE_CONTRACT_ADDRESS") {
      config.contract_address = Address::parse(&raw).map_err(|e| MarketError::Config {
        message: format!("invalid VITRINE_CONTRACT_ADDRESS: {}", e),
      })?;
    }
    if let Ok(raw) = env::var("VITRINE_POLL_INTERVAL_SECS") {
      let secs: u64 = raw.parse().map_err(|e| MarketError::Config {
        message: format!("invalid VITRINE_POLL_INTERVAL_SECS: {}", e),
      })?;
      if secs == 0 {
        return Err(MarketError::Config {
          message: "invalid VITRINE_POLL_INTERVAL_SECS: must be at least 1".to_string(),
        });
      }
      config.poll_interval = Duration::from_secs(secs);
    }
    if let Ok(raw) = env::var("VITRINE_SESSION_FILE") {
      config.session_file = Some(PathBuf::from(raw));
    }

    event!(
      Level::INFO,
      contract = %config.contract_address,
      poll_secs = config.poll_interval.as_secs(),
      "Store configuration loaded."
    );
    Ok(config)
  }

  /// The session backend this configuration implies: file-backed when a
  /// session file is set, in-memory otherwise.
  pub fn session_store(&self) -> Arc<dyn SessionStore> {
    match &self.session_file {
      Some(path) => Arc::new(FileSession::new(path.clone())),
      None => Arc::new(MemorySession::new()),
    }
  }
}
