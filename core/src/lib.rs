// src/lib.rs

//! Vitrine: a client-side view-model store for an on-chain retail escrow
//! marketplace.
//!
//! Vitrine keeps a cached projection of the contract's order book and lets
//! a client application work against it:
//!  - Bulk order fetching with atomic cache replacement; readers never see
//!    a partially applied snapshot.
//!  - Role-scoped views (admin, seller, courier, consumer) with stable,
//!    per-column sorting.
//!  - One write-action per contract call (place, assign, dispatch, confirm,
//!    cancel, withdraw, timeout refund), each followed by a refetch.
//!  - A single surfaced error slot with a small, user-facing taxonomy.
//!  - Wallet session handling and role persistence across restarts.
//!  - A periodic background refresh at a configurable cadence.
//!
//! The chain side stays behind the [`EscrowGateway`] trait; the library
//! ships an in-memory implementation for tests and demos.

// Declare modules according to the planned structure
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod session;
pub mod store;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::model::{Address, Order, OrderId, OrderStatus, Role, Wei, ZERO_ADDRESS};

// The store itself and the projection vocabulary
pub use crate::store::definition::OrderStore;
pub use crate::store::refresh::{spawn_periodic_refresh, RefreshGuard};
pub use crate::store::view::{filter_by_role, sorted, SortDirection, SortKey};

// The gateway seam and the simulated backend
pub use crate::gateway::{EscrowGateway, Fault, InMemoryLedger, PlaceOrderArgs, RawOrder};

pub use crate::config::{StoreConfig, DEFAULT_CONTRACT_ADDRESS, DEFAULT_POLL_INTERVAL};
pub use crate::error::{MarketError, MarketResult};
pub use crate::session::{FileSession, MemorySession, SessionStore};

/*
    Core Workflow:
    1. Implement `EscrowGateway` for your provider (or use `InMemoryLedger`).
    2. Build a `StoreConfig` (defaults, or `StoreConfig::from_env()`).
    3. Create the store: `OrderStore::new(gateway, config.session_store(), config)`.
    4. Resume or connect the wallet session: `store.resume().await` / `store.connect().await`.
    5. Pick a lens: `store.set_role(Role::Seller)?`.
    6. Read through `store.visible_orders()` / `store.sort_by(key)`.
    7. Act through `store.place_order(..)`, `store.dispatch_order(..)`, etc.
    8. Keep it fresh: `let _guard = store.spawn_refresher();`
*/
