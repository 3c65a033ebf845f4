//! Relays: subjects that can not terminate.
//!
//! A [`Relay`] wraps a [`Subject`] whose error type is [`Infallible`] and only
//! exposes [`accept`](Relay::accept). There is no way to error or complete it,
//! so subscribers stay attached until they dispose. That makes relays the
//! natural carrier for UI state.

use std::{convert::Infallible, fmt::Debug};

use tracing::{trace, warn};

use crate::{
  observable::Observable,
  observer::Observer,
  subject::{Bounded, Latest, NoReplay, ReplayBuffer, Subject},
  subscription::Disposable,
};

pub struct Relay<Item, B> {
  subject: Subject<Item, Infallible, B>,
}

pub type PublishRelay<Item> = Relay<Item, NoReplay>;
pub type BehaviorRelay<Item> = Relay<Item, Latest<Item>>;
pub type ReplayRelay<Item> = Relay<Item, Bounded<Item>>;

impl<Item, B> Clone for Relay<Item, B> {
  fn clone(&self) -> Self { Self { subject: self.subject.clone() } }
}

impl<Item> Relay<Item, NoReplay> {
  pub fn new() -> Self { Self { subject: Subject::<Item, Infallible, NoReplay>::new() } }
}

impl<Item> Default for Relay<Item, NoReplay> {
  fn default() -> Self { Self::new() }
}

impl<Item> Relay<Item, Latest<Item>> {
  pub fn new(initial: Item) -> Self {
    Self { subject: Subject::<Item, Infallible, Latest<Item>>::new(initial) }
  }

  /// The current value.
  pub fn value(&self) -> Item
  where
    Item: Clone,
  {
    match self.subject.value() {
      Ok(value) => value,
      Err(never) => match never {},
    }
  }
}

impl<Item> Relay<Item, Bounded<Item>> {
  pub fn new(buffer_size: usize) -> Self {
    Self { subject: Subject::<Item, Infallible, Bounded<Item>>::new(buffer_size) }
  }
}

impl<Item, B> Relay<Item, B> {
  pub fn subscriber_count(&self) -> usize { self.subject.subscriber_count() }
}

impl<Item, B> Relay<Item, B>
where
  Item: Clone + Send + 'static,
  B: ReplayBuffer<Item> + Send + 'static,
{
  /// Deliver `value` to every current subscriber.
  #[inline]
  pub fn accept(&self, value: Item) { self.subject.next(value) }

  pub fn subscribe<N>(&self, next: N) -> Disposable
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subject.subscribe(next)
  }

  pub fn subscribe_with<O>(&self, observer: O) -> Disposable
  where
    O: Observer<Item, Infallible> + Send + 'static,
  {
    self.subject.subscribe_with(observer)
  }

  pub fn as_observable(&self) -> Observable<Item, Infallible> { self.subject.as_observable() }
}

impl<Item: Send + 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Forward every value into `relay`.
  ///
  /// A relay can not carry errors or completion: an error ends the binding
  /// and is logged, completion just ends it.
  pub fn bind_to<B>(&self, relay: &Relay<Item, B>) -> Disposable
  where
    Item: Clone + Send,
    Err: Debug + Send,
    B: ReplayBuffer<Item> + Send + 'static,
  {
    let relay = relay.clone();
    self.subscribe_all(
      move |value| relay.accept(value),
      |err| warn!(error = ?err, "error reached a relay binding and was dropped"),
      || trace!("relay binding source completed"),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{observer::Event, rc::MutArc};

  #[rxlite_macro::test]
  fn accept_is_one_next_per_subscriber() {
    let relay = PublishRelay::<&str>::new();
    let a = MutArc::own(vec![]);
    let b = MutArc::own(vec![]);
    let (c_a, c_b) = (a.clone(), b.clone());
    relay.subscribe(move |v| c_a.rc_deref_mut().push(v));
    relay.subscribe_with(crate::observer::EventObserver(move |e: Event<&'static str, Infallible>| {
      c_b.rc_deref_mut().push(e)
    }));

    relay.accept("x");
    assert_eq!(*a.rc_deref_mut(), vec!["x"]);
    assert_eq!(*b.rc_deref_mut(), vec![Event::Next("x")]);
    assert_eq!(relay.subscriber_count(), 2);
  }

  #[rxlite_macro::test]
  fn behavior_relay_tracks_value() {
    let relay = BehaviorRelay::new(1);
    let received = MutArc::own(vec![]);
    let c_received = received.clone();
    relay.subscribe(move |v| c_received.rc_deref_mut().push(v));
    relay.accept(2);
    assert_eq!(relay.value(), 2);
    assert_eq!(*received.rc_deref_mut(), vec![1, 2]);
  }

  #[rxlite_macro::test]
  fn behavior_relay_feedback_loop() {
    let relay = BehaviorRelay::new(0);
    let seen = MutArc::own(vec![]);
    let (c_relay, c_seen) = (relay.clone(), seen.clone());
    let subscription = relay.subscribe(move |v| {
      c_seen.rc_deref_mut().push(v);
      if v < 5 {
        c_relay.accept(v + 1);
      }
    });

    assert_eq!(*seen.rc_deref_mut(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(relay.value(), 5);
    subscription.dispose();
    assert_eq!(relay.subscriber_count(), 0);
  }

  #[rxlite_macro::test]
  fn replay_relay_replays() {
    let relay = ReplayRelay::new(2);
    for v in 1..=3 {
      relay.accept(v);
    }
    let received = MutArc::own(vec![]);
    let c_received = received.clone();
    relay.as_observable().subscribe(move |v| c_received.rc_deref_mut().push(v));
    assert_eq!(*received.rc_deref_mut(), vec![2, 3]);
  }

  #[rxlite_macro::test]
  fn bind_to_forwards_values_and_survives_source_end() {
    let relay = BehaviorRelay::new(0i64);
    Observable::<i64, Infallible>::range(1, 3).bind_to(&relay);
    assert_eq!(relay.value(), 3);

    Observable::<i64, &str>::throw_err("network down").bind_to(&relay);
    relay.accept(4);
    assert_eq!(relay.value(), 4);
  }
}
