//! The cold `Observable` and its subscribe entry points.
//!
//! Constructors live in [`factory`](crate::factory), operators in
//! [`ops`](crate::ops).

use std::sync::Arc;

use tracing::trace;

use crate::{
  observer::{AllObserver, Event, EventObserver, FnMutObserver, Observer},
  subscriber::Subscriber,
  subscription::Disposable,
};

type Source<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> Disposable + Send + Sync;

/// A lazy producer of values.
///
/// An `Observable` only stores its subscription function. Nothing runs until
/// `subscribe` is called, and every subscription runs the function again
/// (cold semantics), synchronously on the calling thread. Cloning is cheap and
/// clones share the same function.
///
/// ```rust
/// use std::convert::Infallible;
///
/// use rxlite::prelude::*;
///
/// let numbers = Observable::<i32, Infallible>::of([1, 2, 3]);
/// let bag = DisposeBag::new();
/// numbers
///   .subscribe_all(|v| println!("{}", v), |_| {}, || println!("done"))
///   .disposed_by(&bag);
/// ```
pub struct Observable<Item, Err> {
  source: Arc<Source<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Self { source: self.source.clone() } }
}

impl<Item: Send + 'static, Err: Send + 'static> Observable<Item, Err> {
  pub(crate) fn from_source(
    source: impl Fn(Subscriber<Item, Err>) -> Disposable + Send + Sync + 'static,
  ) -> Self {
    Self { source: Arc::new(source) }
  }

  /// Subscribe any [`Observer`].
  ///
  /// The returned [`Disposable`] stops delivery to this observer and
  /// releases whatever the producer holds for the subscription. The producer's
  /// resources are also released as soon as the subscription terminates.
  pub fn subscribe_with<O>(&self, observer: O) -> Disposable
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let subscriber = Subscriber::new(observer);
    trace!("subscribe");
    let teardown = (self.source)(subscriber.clone());
    subscriber.set_teardown(teardown);
    Disposable::new(subscriber)
  }

  /// Subscribe to values only; errors and completion are ignored.
  pub fn subscribe<N>(&self, next: N) -> Disposable
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Disposable
  where
    N: FnMut(Item) + Send + 'static,
    E: FnOnce(Err) + Send + 'static,
    C: FnOnce() + Send + 'static,
  {
    self.subscribe_with(AllObserver { next, error, complete })
  }

  /// Subscribe with one closure receiving every [`Event`].
  pub fn subscribe_event<F>(&self, on_event: F) -> Disposable
  where
    F: FnMut(Event<Item, Err>) + Send + 'static,
  {
    self.subscribe_with(EventObserver(on_event))
  }
}

#[cfg(test)]
mod tests {
  use std::{
    convert::Infallible,
    sync::atomic::{AtomicUsize, Ordering},
  };

  use super::*;
  use crate::{rc::MutArc, subscription::ClosureSubscription};

  #[rxlite_macro::test]
  fn producer_runs_per_subscription() {
    let runs = Arc::new(AtomicUsize::new(0));
    let c_runs = runs.clone();
    let source = Observable::<i32, Infallible>::create(move |subscriber| {
      c_runs.fetch_add(1, Ordering::SeqCst);
      subscriber.next(1);
      subscriber.complete();
    });
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    source.subscribe(|_| {});
    source.clone().subscribe(|_| {});
    assert_eq!(runs.load(Ordering::SeqCst), 2);
  }

  #[rxlite_macro::test]
  fn subscribe_all_sees_terminal_last() {
    let log = MutArc::own(vec![]);
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    Observable::<i32, String>::create(|subscriber| {
      subscriber.next(1);
      subscriber.next(2);
      subscriber.error("bad".to_string());
      subscriber.next(3);
    })
    .subscribe_all(
      move |v| l1.rc_deref_mut().push(format!("next {v}")),
      move |e| l2.rc_deref_mut().push(format!("error {e}")),
      move || l3.rc_deref_mut().push("complete".to_string()),
    );
    assert_eq!(*log.rc_deref_mut(), vec!["next 1", "next 2", "error bad"]);
  }

  #[rxlite_macro::test]
  fn dispose_stops_later_emissions() {
    let stash: MutArc<Option<Subscriber<i32, Infallible>>> = MutArc::own(None);
    let c_stash = stash.clone();
    let source = Observable::create(move |subscriber| {
      *c_stash.rc_deref_mut() = Some(subscriber);
    });

    let received = MutArc::own(vec![]);
    let c_received = received.clone();
    let subscription = source.subscribe(move |v| c_received.rc_deref_mut().push(v));

    let producer = stash.rc_deref_mut().take().unwrap();
    producer.next(1);
    subscription.dispose();
    producer.next(2);

    assert_eq!(*received.rc_deref_mut(), vec![1]);
    assert!(producer.is_closed());
  }

  #[rxlite_macro::test]
  fn teardown_runs_on_dispose_and_on_completion() {
    let released = Arc::new(AtomicUsize::new(0));
    let c_released = released.clone();
    let stash: MutArc<Vec<Subscriber<i32, Infallible>>> = MutArc::own(vec![]);
    let c_stash = stash.clone();
    let source = Observable::create(move |subscriber| {
      c_stash.rc_deref_mut().push(subscriber);
      let released = c_released.clone();
      ClosureSubscription(move || {
        released.fetch_add(1, Ordering::SeqCst);
      })
    });

    let first = source.subscribe(|_| {});
    let _second = source.subscribe(|_| {});
    first.dispose();
    first.dispose();
    assert_eq!(released.load(Ordering::SeqCst), 1);

    stash.rc_deref_mut()[1].complete();
    assert_eq!(released.load(Ordering::SeqCst), 2);
  }

  #[rxlite_macro::test]
  fn event_subscription() {
    let events = MutArc::own(vec![]);
    let c_events = events.clone();
    Observable::<&str, Infallible>::of(["a"])
      .subscribe_event(move |e| c_events.rc_deref_mut().push(e));
    assert_eq!(*events.rc_deref_mut(), vec![Event::Next("a"), Event::Completed]);
  }

  #[rxlite_macro::test(shared)]
  async fn values_from_another_thread() {
    let (tx, rx) = tokio::sync::oneshot::channel();
    let tx = MutArc::own(Some(tx));
    let source = Observable::<i32, Infallible>::create(|subscriber| {
      std::thread::spawn(move || {
        subscriber.next(7);
        subscriber.complete();
      });
    });
    source.subscribe(move |v| {
      if let Some(tx) = tx.rc_deref_mut().take() {
        let _ = tx.send(v);
      }
    });
    assert_eq!(rx.await.unwrap(), 7);
  }
}
