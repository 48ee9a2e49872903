// vitrine/src/store/mod.rs

//! The `OrderStore`: a cached, role-aware projection of the on-chain order
//! book, plus the write-actions that mutate it through the gateway.
//!
//! The store is split by concern: `definition` owns state and construction,
//! `sync` the read path (fetching, wallet session, repointing), `actions`
//! the write path, `view` the sorted and role-filtered projections, and
//! `refresh` the periodic background poll.

pub mod actions;
pub mod definition;
pub mod refresh;
pub mod sync;
pub mod view;

// Re-export the main store type and the projection vocabulary.
pub use definition::OrderStore;
pub use refresh::{spawn_periodic_refresh, RefreshGuard};
pub use view::{filter_by_role, sorted, SortDirection, SortKey};
