// vitrine/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
  /// No wallet provider was detected in the environment. Fatal for the
  /// current operation, recoverable for the session.
  #[error("No Ethereum provider found")]
  ProviderUnavailable,

  /// The user dismissed the wallet's signature prompt.
  #[error("Transaction rejected by user")]
  UserRejected,

  /// The contract reverted the call; `reason` is the revert string as the
  /// provider reported it.
  #[error("Contract call reverted: {reason}")]
  Contract { reason: String },

  /// A read from the provider failed: transport trouble, a reverted view
  /// call, or a response that could not be normalized.
  #[error("Provider call failed. Source: {source}")]
  Fetch {
    #[source]
    source: AnyhowError,
  },

  #[error("Invalid account address: '{input}'")]
  InvalidAddress { input: String },

  /// The order id is not present in the cached snapshot.
  #[error("Order not found: {order_id}")]
  UnknownOrder { order_id: u64 },

  #[error("Session storage failed. Source: {source}")]
  Session {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error: {message}")]
  Config { message: String },
}

impl MarketError {
  /// Collapses a read-path failure into `Fetch`, keeping the original error
  /// as the source. `ProviderUnavailable` stays as it is: a missing wallet
  /// is a distinct condition the caller handles on its own.
  pub(crate) fn into_fetch(self) -> MarketError {
    match self {
      MarketError::Fetch { .. } | MarketError::ProviderUnavailable => self,
      other => MarketError::Fetch {
        source: AnyhowError::new(other),
      },
    }
  }
}

// The conversion for external errors reaching the store through anyhow.
impl From<AnyhowError> for MarketError {
  fn from(err: AnyhowError) -> Self {
    // MarketError is not Clone, so an anyhow chain that happens to wrap one
    // is not unwrapped; it stays as the source of a Fetch.
    MarketError::Fetch { source: err }
  }
}

pub type MarketResult<T, E = MarketError> = std::result::Result<T, E>;
