// vitrine/src/model/role.rs

//! The viewer's role. A client-side lens over the shared order book, not a
//! chain-side permission: the contract enforces who may act regardless of
//! what the client claims to be.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
  Admin,
  Consumer,
  Courier,
  Seller,
}

impl Role {
  pub const ALL: [Role; 4] = [Role::Admin, Role::Consumer, Role::Courier, Role::Seller];

  /// Parses a persisted role string. Anything outside the fixed set yields
  /// `None`; the store treats that as "no role selected".
  pub fn parse(input: &str) -> Option<Role> {
    match input {
      "admin" => Some(Role::Admin),
      "consumer" => Some(Role::Consumer),
      "courier" => Some(Role::Courier),
      "seller" => Some(Role::Seller),
      _ => None,
    }
  }

  /// The persisted form, identical to what `parse` accepts.
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Admin => "admin",
      Role::Consumer => "consumer",
      Role::Courier => "courier",
      Role::Seller => "seller",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
