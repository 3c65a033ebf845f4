use thiserror::Error;

/// Why a comment fetch failed.
#[derive(Debug, Error)]
pub enum NetworkError {
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("server answered with status {0}")]
  Status(u16),

  #[error("malformed response body: {0}")]
  Decode(#[from] serde_json::Error),

  /// The request was dropped before it finished, e.g. because its runtime
  /// shut down.
  #[error("request cancelled")]
  Cancelled,
}
