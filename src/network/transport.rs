use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use reqwest::{
  header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
  Client,
};
use tracing::trace;

use super::NetworkError;

/// Fetches raw response bodies.
pub trait Transport: Send + Sync + 'static {
  /// GET `url` and return the body of a successful response.
  fn get(&self, url: &str) -> BoxFuture<'static, Result<Bytes, NetworkError>>;
}

/// [`Transport`] backed by `reqwest`, sending JSON headers on every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: Client,
}

impl HttpTransport {
  pub fn new() -> Result<Self, NetworkError> {
    let client = Client::builder().default_headers(json_headers()).build()?;
    Ok(Self { client })
  }

  /// Use a preconfigured client. JSON headers are still added per request.
  pub fn with_client(client: Client) -> Self { Self { client } }
}

fn json_headers() -> HeaderMap {
  let mut headers = HeaderMap::new();
  headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
  headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
  headers
}

impl Transport for HttpTransport {
  fn get(&self, url: &str) -> BoxFuture<'static, Result<Bytes, NetworkError>> {
    trace!(url, "GET");
    let request = self.client.get(url).headers(json_headers());
    async move {
      let response = request.send().await?;
      let status = response.status();
      if !status.is_success() {
        return Err(NetworkError::Status(status.as_u16()));
      }
      Ok(response.bytes().await?)
    }
    .boxed()
  }
}
