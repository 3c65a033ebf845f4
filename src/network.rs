//! Client for the comments endpoint, exposed as observables.
//!
//! The HTTP layer sits behind the [`Transport`] trait so the service can be
//! driven by a canned transport in tests. Nothing here is global: the
//! transport and the tokio runtime handle are passed to
//! [`CommentService::new`].

mod error;
mod post;
mod service;
mod transport;

pub use error::NetworkError;
pub use post::Post;
pub use service::{CommentService, ServiceConfig, DEFAULT_BASE_URL};
pub use transport::{HttpTransport, Transport};
