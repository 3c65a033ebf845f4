//! Observable constructors.
//!
//! Every constructor here is lazy: building the observable has no side effect,
//! the work happens once per `subscribe`, synchronously.
//!
//! | Method | Values | Terminal |
//! |--------|--------|----------|
//! | `just(v)` | `v` | completes |
//! | `of([..])`, `from_iter(..)` | each element in order | completes |
//! | `range(start, count)` | `count` consecutive integers | completes |
//! | `empty()` | none | completes |
//! | `never()` | none | none, lives until disposed |
//! | `throw_err(e)` | none | errors with `e` |
//! | `defer(f)` | whatever `f()` yields, per subscription | same |
//! | `create(p)` | whatever the producer pushes | same |
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use rxlite::prelude::*;
//!
//! Observable::<i64, Infallible>::range(1, 3).subscribe_all(
//!   |v| println!("{}", v),
//!   |_| {},
//!   || println!("completed"),
//! );
//! ```

use tracing::trace;

use crate::{
  observable::Observable,
  subscriber::Subscriber,
  subscription::{Disposable, Subscription},
};

impl<Item: Send + 'static, Err: Send + 'static> Observable<Item, Err> {
  /// General escape hatch: wrap a subscription function.
  ///
  /// `producer` runs once per subscription. Whatever [`Subscription`] it
  /// returns is released when the subscription is disposed or terminates;
  /// return `()` when there is nothing to release.
  pub fn create<F, U>(producer: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> U + Send + Sync + 'static,
    U: Subscription + Send + 'static,
  {
    Self::from_source(move |subscriber| Disposable::new(producer(subscriber)))
  }

  /// Emit `value` once, then complete.
  pub fn just(value: Item) -> Self
  where
    Item: Clone + Send + Sync,
  {
    Self::from_iter([value])
  }

  /// Emit each element of `values` in order, then complete.
  pub fn of<const N: usize>(values: [Item; N]) -> Self
  where
    Item: Clone + Send + Sync,
  {
    Self::from_iter(values)
  }

  /// Emit every item of `iter`, then complete.
  ///
  /// The iterable is cloned for every subscription. Iteration stops early once
  /// the subscriber is closed, so an endless iterator is fine behind `take`.
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Item> + Clone + Send + Sync + 'static,
  {
    Self::from_source(move |subscriber| {
      for value in iter.clone() {
        if subscriber.is_closed() {
          trace!("iteration stopped, subscriber closed");
          return Disposable::empty();
        }
        subscriber.next(value);
      }
      subscriber.complete();
      Disposable::empty()
    })
  }

  pub fn empty() -> Self {
    Self::from_source(|subscriber| {
      subscriber.complete();
      Disposable::empty()
    })
  }

  /// Never emits and never terminates.
  pub fn never() -> Self { Self::from_source(|_| Disposable::empty()) }

  /// Error with `err` right away.
  pub fn throw_err(err: Err) -> Self
  where
    Err: Clone + Send + Sync,
  {
    Self::from_source(move |subscriber| {
      subscriber.error(err.clone());
      Disposable::empty()
    })
  }

  /// Call `factory` on every subscription and subscribe to the observable it
  /// returns.
  ///
  /// Lets each subscriber see fresh state, e.g. alternate between two
  /// sources.
  pub fn defer<F>(factory: F) -> Self
  where
    F: Fn() -> Observable<Item, Err> + Send + Sync + 'static,
  {
    Self::from_source(move |subscriber| factory().subscribe_with(subscriber.as_observer()))
  }
}

impl<Err: Send + 'static> Observable<i64, Err> {
  /// Emit `count` consecutive integers starting at `start`, then complete.
  ///
  /// The sequence stops early at `i64::MAX`.
  pub fn range(start: i64, count: usize) -> Self {
    Self::from_iter((start..=i64::MAX).take(count))
  }
}
