//! The delivery handle producers push events into.

use std::{
  collections::VecDeque,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use tracing::trace;

use crate::{
  observer::{BoxedObserver, Event, Observer},
  rc::MutArc,
  subscription::{Disposable, Subscription},
};

struct Slot<Item, Err> {
  /// `None` while a delivery runs (the deliverer owns it) and once closed.
  observer: Option<BoxedObserver<Item, Err>>,
  delivering: bool,
  disposed: bool,
  pending: VecDeque<Event<Item, Err>>,
}

/// Handle an observable's producer uses to reach one observer.
///
/// A `Subscriber` owns the observer of a single subscription and enforces the
/// terminal-state invariant: once `error` or `complete` went through, or the
/// subscription was disposed, every later call is silently dropped.
///
/// It is cheap to clone and `Send`, so a producer can keep it around and emit
/// later from another thread:
///
/// ```rust
/// use std::convert::Infallible;
///
/// use rxlite::prelude::*;
///
/// let source = Observable::<i32, Infallible>::create(|subscriber| {
///   std::thread::spawn(move || {
///     subscriber.next(1);
///     subscriber.complete();
///   });
/// });
/// source.subscribe(|v| println!("{}", v));
/// ```
///
/// Deliveries never overlap. An event pushed while the observer is busy,
/// whether from inside its own callback or from another thread, is queued
/// and delivered by the running delivery once the callback returns.
pub struct Subscriber<Item, Err> {
  slot: MutArc<Slot<Item, Err>>,
  closed: Arc<AtomicBool>,
  teardown: MutArc<Option<Disposable>>,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self {
    Self { slot: self.slot.clone(), closed: self.closed.clone(), teardown: self.teardown.clone() }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  pub fn new(observer: impl Observer<Item, Err> + Send + 'static) -> Self
  where
    Item: 'static,
    Err: 'static,
  {
    Self::with_observer(Some(Box::new(observer)))
  }

  /// A subscriber whose delivery turn is already taken by the returned
  /// [`Hold`]. Everything pushed to the subscriber queues up behind the
  /// events given to the hold.
  pub(crate) fn new_held(
    observer: impl Observer<Item, Err> + Send + 'static,
  ) -> (Self, Hold<Item, Err>)
  where
    Item: 'static,
    Err: 'static,
  {
    let subscriber = Self::with_observer(None);
    let hold =
      Hold { subscriber: subscriber.clone(), observer: Box::new(observer), events: Vec::new() };
    (subscriber, hold)
  }

  fn with_observer(observer: Option<BoxedObserver<Item, Err>>) -> Self {
    let delivering = observer.is_none();
    Self {
      slot: MutArc::own(Slot { observer, delivering, disposed: false, pending: VecDeque::new() }),
      closed: Arc::new(AtomicBool::new(false)),
      teardown: MutArc::own(None),
    }
  }

  pub fn next(&self, value: Item) {
    if self.is_closed() {
      trace!("value after termination ignored");
      return;
    }
    self.deliver(Event::Next(value));
  }

  pub fn error(&self, err: Err) {
    if self.closed.swap(true, Ordering::AcqRel) {
      trace!("error after termination ignored");
      return;
    }
    self.deliver(Event::Error(err));
  }

  pub fn complete(&self) {
    if self.closed.swap(true, Ordering::AcqRel) {
      trace!("completion after termination ignored");
      return;
    }
    self.deliver(Event::Completed);
  }

  /// `true` once the subscription terminated or was disposed.
  #[inline]
  pub fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) }

  /// Stop delivering to the observer and release the producer's teardown.
  ///
  /// Queued events are discarded. Safe to call from inside the observer's own
  /// callback: the observer is then dropped once the callback returns.
  pub fn close(&self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      trace!("subscriber closed");
    }
    let observer = {
      let mut slot = self.slot.rc_deref_mut();
      slot.disposed = true;
      slot.pending.clear();
      slot.observer.take()
    };
    drop(observer);
    self.release_teardown();
  }

  /// Attach the producer's teardown. Released when the subscriber closes or
  /// terminates; released right away if that already happened.
  pub fn set_teardown(&self, teardown: Disposable) {
    if self.is_closed() {
      teardown.dispose();
      return;
    }
    let previous = self.teardown.rc_deref_mut().replace(teardown);
    if let Some(previous) = previous {
      previous.dispose();
    }
    // Closed while attaching; whoever closed may have missed the teardown.
    if self.is_closed() {
      self.release_teardown();
    }
  }

  fn deliver(&self, event: Event<Item, Err>) {
    let observer = {
      let mut slot = self.slot.rc_deref_mut();
      if slot.delivering {
        slot.pending.push_back(event);
        return;
      }
      let Some(observer) = slot.observer.take() else { return };
      slot.delivering = true;
      observer
    };
    self.run(observer, Some(event));
  }

  /// Deliver `events`, then whatever queued up meanwhile. The caller holds
  /// the delivery turn and hands it back here once the queue is empty.
  fn run(
    &self,
    mut observer: BoxedObserver<Item, Err>,
    events: impl IntoIterator<Item = Event<Item, Err>>,
  ) {
    let mut events = events.into_iter();
    loop {
      let event = {
        let mut slot = self.slot.rc_deref_mut();
        if slot.disposed {
          slot.delivering = false;
          return;
        }
        let next = match events.next() {
          Some(event) => Some(event),
          None => slot.pending.pop_front(),
        };
        match next {
          Some(event) => event,
          None => {
            slot.observer = Some(observer);
            slot.delivering = false;
            return;
          }
        }
      };

      match event {
        Event::Next(value) => {
          observer.next(value);
          // The observer is done, e.g. `take` reached its count.
          if observer.is_closed() {
            self.slot.rc_deref_mut().delivering = false;
            drop(observer);
            self.close();
            return;
          }
        }
        Event::Error(err) => {
          observer.error(err);
          self.finish();
          return;
        }
        Event::Completed => {
          observer.complete();
          self.finish();
          return;
        }
      }
    }
  }

  fn finish(&self) {
    self.slot.rc_deref_mut().delivering = false;
    self.release_teardown();
  }

  fn release_teardown(&self) {
    let teardown = self.teardown.rc_deref_mut().take();
    if let Some(teardown) = teardown {
      teardown.dispose();
    }
  }
}

/// Delivery turn of a subscriber built by [`Subscriber::new_held`].
///
/// A subject uses it to hand a new subscriber its catch-up: events collected
/// here are delivered on [`release`](Self::release), before anything that was
/// pushed to the subscriber in the meantime.
pub(crate) struct Hold<Item, Err> {
  subscriber: Subscriber<Item, Err>,
  observer: BoxedObserver<Item, Err>,
  events: Vec<Event<Item, Err>>,
}

impl<Item, Err> Hold<Item, Err> {
  pub(crate) fn next(&mut self, value: Item) { self.events.push(Event::Next(value)); }

  pub(crate) fn error(&mut self, err: Err) {
    if !self.subscriber.closed.swap(true, Ordering::AcqRel) {
      self.events.push(Event::Error(err));
    }
  }

  pub(crate) fn complete(&mut self) {
    if !self.subscriber.closed.swap(true, Ordering::AcqRel) {
      self.events.push(Event::Completed);
    }
  }

  pub(crate) fn release(self) {
    let Self { subscriber, observer, events } = self;
    subscriber.run(observer, events);
  }
}

/// Observer forwarding every event into a [`Subscriber`].
///
/// Obtained from [`Subscriber::as_observer`]; used to chain one observable's
/// output into another subscription, as operators do.
pub struct Forward<Item, Err>(Subscriber<Item, Err>);

impl<Item, Err> Subscriber<Item, Err> {
  pub fn as_observer(&self) -> Forward<Item, Err> { Forward(self.clone()) }
}

impl<Item, Err> Observer<Item, Err> for Forward<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { self.0.next(value) }

  #[inline]
  fn error(self, err: Err) { self.0.error(err) }

  #[inline]
  fn complete(self) { self.0.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<Item, Err> Subscription for Subscriber<Item, Err> {
  #[inline]
  fn unsubscribe(self) { self.close() }

  #[inline]
  fn is_closed(&self) -> bool { Subscriber::is_closed(self) }
}
