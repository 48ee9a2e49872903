// vitrine/src/model/address.rs

//! Account address handling: validation, canonical form, and the wire-level
//! "unassigned" sentinel.

use crate::error::{MarketError, MarketResult};

use std::fmt;
use std::str::FromStr;

/// The all-zero address the contract stores while no courier is assigned.
/// Normalization maps it out of the cache; it never appears inside a cached
/// [`crate::model::Order`].
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// An account address in canonical form: `0x` followed by 40 lowercase hex
/// digits.
///
/// Canonical equality is account identity. Every address that enters the
/// cache and every account comparison in the role projections goes through
/// this type, so differently-cased renditions of the same account always
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
  /// Parses an address, accepting any hex casing on input.
  pub fn parse(input: &str) -> MarketResult<Self> {
    let invalid = || MarketError::InvalidAddress {
      input: input.to_string(),
    };
    let body = input.strip_prefix("0x").ok_or_else(invalid)?;
    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
      return Err(invalid());
    }
    Ok(Address(format!("0x{}", body.to_ascii_lowercase())))
  }

  /// The canonical lowercase rendition, `0x` prefix included.
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Whether this is the all-zero sentinel address.
  pub fn is_zero(&self) -> bool {
    self.0 == ZERO_ADDRESS
  }

  /// Abbreviated form for display: first four and last four hex digits,
  /// e.g. `0x1234...abcd`.
  pub fn short(&self) -> String {
    format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
  }
}

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Address {
  type Err = MarketError;

  fn from_str(s: &str) -> MarketResult<Self> {
    Address::parse(s)
  }
}
