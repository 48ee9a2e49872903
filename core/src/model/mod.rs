// vitrine/src/model/mod.rs

//! Domain types shared across the store: canonical addresses, normalized
//! orders, and the client-side viewer role.

pub mod address;
pub mod order;
pub mod role;

// Re-export key types for easier access from other vitrine modules (and lib.rs)
pub use address::{Address, ZERO_ADDRESS};
pub use order::{Order, OrderId, OrderStatus, Wei};
pub use role::Role;
