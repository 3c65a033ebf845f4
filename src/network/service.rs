use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::{NetworkError, Post, Transport};
use crate::{observable::Observable, subscriber::Subscriber, subscription::ClosureSubscription};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/comments";

/// Where comments are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
  pub base_url: String,
}

impl Default for ServiceConfig {
  fn default() -> Self { Self { base_url: DEFAULT_BASE_URL.to_string() } }
}

impl ServiceConfig {
  /// URL listing the comments of `post_id`.
  pub fn comments_url(&self, post_id: i64) -> String {
    format!("{}?postId={}", self.base_url, post_id)
  }
}

/// Fetches the comments of a post.
///
/// Requests are spawned on the `runtime` handed to the constructor; results
/// come back through the returned observable, on a runtime worker thread.
///
/// ```rust,no_run
/// use rxlite::{
///   network::{CommentService, HttpTransport},
///   prelude::*,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = tokio::runtime::Runtime::new()?;
/// let service = CommentService::new(HttpTransport::new()?, runtime.handle().clone());
/// service.fetch_comments(1).subscribe_all(
///   |posts| println!("{} comments", posts.len()),
///   |err| eprintln!("{}", err),
///   || println!("done"),
/// );
/// # Ok(())
/// # }
/// ```
pub struct CommentService<T> {
  transport: Arc<T>,
  runtime: Handle,
  config: ServiceConfig,
}

impl<T> Clone for CommentService<T> {
  fn clone(&self) -> Self {
    Self {
      transport: self.transport.clone(),
      runtime: self.runtime.clone(),
      config: self.config.clone(),
    }
  }
}

impl<T: Transport> CommentService<T> {
  pub fn new(transport: T, runtime: Handle) -> Self {
    Self::with_config(transport, runtime, ServiceConfig::default())
  }

  pub fn with_config(transport: T, runtime: Handle, config: ServiceConfig) -> Self {
    Self { transport: Arc::new(transport), runtime, config }
  }

  pub fn config(&self) -> &ServiceConfig { &self.config }

  /// Cold observable of the comments of `post_id`.
  ///
  /// Every subscription issues its own request. Success delivers the decoded
  /// list once and completes; a transport or decode failure is delivered as a
  /// single error. Disposing the subscription aborts the request.
  pub fn fetch_comments(&self, post_id: i64) -> Observable<Vec<Post>, NetworkError> {
    let transport = self.transport.clone();
    let runtime = self.runtime.clone();
    let url = self.config.comments_url(post_id);
    Observable::create(move |subscriber| {
      let request = transport.get(&url);
      let mut pending = Pending(Some(subscriber));
      let task = runtime.spawn(async move {
        let outcome = match request.await {
          Ok(body) => serde_json::from_slice::<Vec<Post>>(&body).map_err(NetworkError::from),
          Err(err) => Err(err),
        };
        pending.finish(post_id, outcome);
      });
      ClosureSubscription(move || task.abort())
    })
  }
}

/// Subscriber of an in-flight request. Reports [`NetworkError::Cancelled`]
/// if the request task is dropped before it finished.
struct Pending(Option<Subscriber<Vec<Post>, NetworkError>>);

impl Pending {
  fn finish(&mut self, post_id: i64, outcome: Result<Vec<Post>, NetworkError>) {
    let Some(subscriber) = self.0.take() else { return };
    match outcome {
      Ok(posts) => {
        debug!(post_id, count = posts.len(), "comments fetched");
        subscriber.next(posts);
        subscriber.complete();
      }
      Err(err) => {
        warn!(post_id, error = %err, "comment fetch failed");
        subscriber.error(err);
      }
    }
  }
}

impl Drop for Pending {
  fn drop(&mut self) {
    if let Some(subscriber) = self.0.take() {
      subscriber.error(NetworkError::Cancelled);
    }
  }
}
