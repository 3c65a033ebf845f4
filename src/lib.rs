//! # rxlite: a small Reactive Extensions core
//!
//! Cold observables, hot subjects with distinct replay semantics, relays that
//! never terminate, and a dispose-bag lifecycle for subscriptions.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use rxlite::prelude::*;
//!
//! let bag = DisposeBag::new();
//!
//! Observable::<i64, Infallible>::range(1, 10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v))
//!   .disposed_by(&bag);
//!
//! let subject = ReplaySubject::<&str, Infallible>::new(2);
//! subject.next("1");
//! subject.next("2");
//! subject.next("3");
//! // Receives "2" and "3" immediately, then live values.
//! subject.subscribe(|v| println!("{}", v)).disposed_by(&bag);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Cold producer, re-executed for every subscription |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subject`] | Hot multicaster; Publish, Behavior and Replay variants |
//! | [`Relay`] | Subject wrapper that can only `accept` values |
//! | [`Disposable`] / [`DisposeBag`] | Handles that cancel subscriptions |
//!
//! ## Threading
//!
//! Delivery is synchronous on the calling thread. Shared state is guarded by
//! mutexes so values may be pushed from another thread (for example when a
//! network request completes), but nothing is ever scheduled implicitly.
//!
//! ## Feature Flags
//!
//! - **`network`** (default): the comments [`network`] client built on
//!   `reqwest`/`tokio`, and the [`view_model`] that drives it.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subject`]: subject::Subject
//! [`Relay`]: relay::Relay
//! [`Disposable`]: subscription::Disposable
//! [`DisposeBag`]: subscription::DisposeBag

pub mod error;
pub mod factory;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod relay;
pub mod subject;
pub mod subscriber;
pub mod subscription;

#[cfg(feature = "network")]
pub mod network;
#[cfg(feature = "network")]
pub mod view_model;

pub use error::{BoxError, Error, Result};
pub use prelude::*;
