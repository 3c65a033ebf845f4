//! Errors raised by the core itself.
//!
//! Errors produced by an observable travel through its `Err` type parameter
//! and never show up here. This module only covers failures of the lifecycle
//! machinery: teardown actions that fail while being disposed.

use thiserror::Error;

/// Error type accepted from fallible teardown actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
  /// A single teardown action failed.
  #[error("teardown failed: {0}")]
  Teardown(#[source] BoxError),

  /// One or more members of a dispose bag failed to tear down. Every member
  /// was still disposed.
  #[error("{} of {total} teardowns failed while disposing bag", .failures.len())]
  Disposal { failures: Vec<Error>, total: usize },
}

impl Error {
  /// Number of individual teardown failures carried by this error.
  pub fn failure_count(&self) -> usize {
    match self {
      Error::Teardown(_) => 1,
      Error::Disposal { failures, .. } => failures.iter().map(Error::failure_count).sum(),
    }
  }
}
