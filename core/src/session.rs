// vitrine/src/session.rs

//! Persisted client-side session state.
//!
//! The only thing that survives a reload is the viewer's role choice, held
//! under a single key. [`SessionStore`] keeps the storage dumb: it moves raw
//! strings, and validating them against the role set stays the store's
//! policy, not the storage's.

use crate::error::{MarketError, MarketResult};

use anyhow::Context;
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub trait SessionStore: Send + Sync {
  /// The persisted role string, if one was ever saved. `Ok(None)` means a
  /// fresh session, not a failure.
  fn load_role(&self) -> MarketResult<Option<String>>;

  /// Persists the role string, replacing any previous value.
  fn save_role(&self, role: &str) -> MarketResult<()>;
}

/// Role persistence in a single plain-text file.
pub struct FileSession {
  path: PathBuf,
}

impl FileSession {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    FileSession { path: path.into() }
  }
}

impl SessionStore for FileSession {
  fn load_role(&self) -> MarketResult<Option<String>> {
    match fs::read_to_string(&self.path) {
      Ok(contents) => {
        let trimmed = contents.trim();
        if trimmed.is_empty() {
          Ok(None)
        } else {
          Ok(Some(trimmed.to_string()))
        }
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(MarketError::Session {
        source: anyhow::Error::new(e)
          .context(format!("reading session file {}", self.path.display())),
      }),
    }
  }

  fn save_role(&self, role: &str) -> MarketResult<()> {
    fs::write(&self.path, role)
      .with_context(|| format!("writing session file {}", self.path.display()))
      .map_err(|e| MarketError::Session { source: e })
  }
}

/// Role persistence that lives and dies with the process. The default when
/// no session file is configured.
pub struct MemorySession {
  role: Mutex<Option<String>>,
}

impl MemorySession {
  pub fn new() -> Self {
    MemorySession {
      role: Mutex::new(None),
    }
  }
}

impl Default for MemorySession {
  fn default() -> Self {
    MemorySession::new()
  }
}

impl SessionStore for MemorySession {
  fn load_role(&self) -> MarketResult<Option<String>> {
    Ok(self.role.lock().clone())
  }

  fn save_role(&self, role: &str) -> MarketResult<()> {
    *self.role.lock() = Some(role.to_string());
    Ok(())
  }
}
