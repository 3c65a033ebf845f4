use std::collections::VecDeque;

use tracing::{debug, trace};

use super::{
  replay::ReplayBuffer,
  subscribers::{broadcast, Subscribers},
};
use crate::{
  observable::Observable,
  observer::{AllObserver, Event, EventObserver, FnMutObserver, Observer},
  rc::MutArc,
  subscriber::Subscriber,
  subscription::Disposable,
};

pub(super) enum Status<Err> {
  Active,
  Completed,
  Errored(Err),
}

pub(super) struct SubjectState<Item, Err, B> {
  pub(super) subscribers: Subscribers<Subscriber<Item, Err>>,
  pub(super) status: Status<Err>,
  pub(super) buffer: B,
  emitting: bool,
  pending: VecDeque<Event<Item, Err>>,
}

/// A hot multicaster: both an event sink and a subscribable source.
///
/// Every value pushed with [`next`](Self::next) is recorded in the replay
/// buffer `B` and delivered, in registration order, to every subscriber
/// registered at that moment. `error` and `complete` move the subject to its
/// terminal state exactly once; later calls are ignored. A subscriber joining
/// late first receives the buffer's snapshot (and the stored terminal event
/// if the subject already terminated), before any live value.
///
/// Clones share the same state. Use the aliases
/// [`PublishSubject`](super::PublishSubject),
/// [`BehaviorSubject`](super::BehaviorSubject) and
/// [`ReplaySubject`](super::ReplaySubject) to create one.
pub struct Subject<Item, Err, B> {
  pub(super) state: MutArc<SubjectState<Item, Err, B>>,
}

impl<Item, Err, B> Clone for Subject<Item, Err, B> {
  fn clone(&self) -> Self { Self { state: self.state.clone() } }
}

impl<Item, Err, B> Subject<Item, Err, B> {
  pub(super) fn with_buffer(buffer: B) -> Self {
    Self {
      state: MutArc::own(SubjectState {
        subscribers: Subscribers::default(),
        status: Status::Active,
        buffer,
        emitting: false,
        pending: VecDeque::new(),
      }),
    }
  }

  /// Number of live subscriptions.
  pub fn subscriber_count(&self) -> usize { self.state.rc_deref_mut().subscribers.len() }

  /// `true` once `error` or `complete` went through.
  pub fn is_terminated(&self) -> bool {
    !matches!(self.state.rc_deref_mut().status, Status::Active)
  }
}

impl<Item, Err, B> Subject<Item, Err, B>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
  B: ReplayBuffer<Item> + Send + 'static,
{
  #[inline]
  pub fn next(&self, value: Item) { self.emit(Event::Next(value)) }

  #[inline]
  pub fn error(&self, err: Err) { self.emit(Event::Error(err)) }

  #[inline]
  pub fn complete(&self) { self.emit(Event::Completed) }

  /// Events raised while another emission is being delivered, from one of
  /// the callbacks or from another thread, are queued and delivered by that
  /// emission afterwards. Every subscriber sees the same order.
  fn emit(&self, event: Event<Item, Err>) {
    {
      let mut state = self.state.rc_deref_mut();
      if state.emitting {
        state.pending.push_back(event);
        return;
      }
      state.emitting = true;
    }
    let mut event = event;
    loop {
      self.dispatch(event);
      let mut state = self.state.rc_deref_mut();
      match state.pending.pop_front() {
        Some(queued) => event = queued,
        None => {
          state.emitting = false;
          return;
        }
      }
    }
  }

  fn dispatch(&self, event: Event<Item, Err>) {
    let mut state = self.state.rc_deref_mut();
    if !matches!(state.status, Status::Active) {
      trace!("subject event after termination ignored");
      return;
    }
    match event {
      Event::Next(value) => {
        state.buffer.record(&value);
        let subscribers = state.subscribers.snapshot();
        drop(state);
        broadcast(subscribers, value, |subscriber, v| subscriber.next(v));
      }
      Event::Error(err) => {
        state.status = Status::Errored(err.clone());
        let subscribers = state.subscribers.drain();
        drop(state);
        debug!(subscribers = subscribers.len(), "subject errored");
        broadcast(subscribers, err, |subscriber, e| subscriber.error(e));
      }
      Event::Completed => {
        state.status = Status::Completed;
        let subscribers = state.subscribers.drain();
        drop(state);
        debug!(subscribers = subscribers.len(), "subject completed");
        for subscriber in subscribers {
          subscriber.complete();
        }
      }
    }
  }

  /// Register `observer`.
  ///
  /// The catch-up (buffer snapshot, then the terminal event if any) is
  /// delivered synchronously before this returns. A value emitted
  /// concurrently from another thread either is part of the catch-up or is
  /// delivered after it, never before.
  pub fn subscribe_with<O>(&self, observer: O) -> Disposable
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    // Live values reaching the subscriber queue up until the hold is released.
    let (subscriber, mut hold) = Subscriber::new_held(observer);

    let id = {
      let mut guard = self.state.rc_deref_mut();
      let state = &mut *guard;
      match &state.status {
        Status::Active => {
          for value in state.buffer.snapshot() {
            hold.next(value);
          }
          Some(state.subscribers.add(subscriber.clone()))
        }
        Status::Completed => {
          for value in Self::late_catch_up(&state.buffer) {
            hold.next(value);
          }
          hold.complete();
          None
        }
        Status::Errored(err) => {
          for value in Self::late_catch_up(&state.buffer) {
            hold.next(value);
          }
          hold.error(err.clone());
          None
        }
      }
    };

    if let Some(id) = id {
      let state = self.state.downgrade();
      subscriber.set_teardown(Disposable::create(move || {
        if let Some(state) = state.upgrade() {
          let removed = state.rc_deref_mut().subscribers.remove(id);
          drop(removed);
        }
      }));
    }
    hold.release();
    trace!("subject subscribed");
    Disposable::new(subscriber)
  }

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

  pub fn subscribe_event<F>(&self, on_event: F) -> Disposable
  where
    F: FnMut(Event<Item, Err>) + Send + 'static,
  {
    self.subscribe_with(EventObserver(on_event))
  }

  /// View this subject as an [`Observable`], e.g. to apply operators.
  pub fn as_observable(&self) -> Observable<Item, Err> {
    let subject = self.clone();
    Observable::from_source(move |subscriber| subject.subscribe_with(subscriber.as_observer()))
  }

  /// An [`Observer`] feeding this subject, so it can subscribe to an
  /// observable and multicast it.
  pub fn as_observer(&self) -> SubjectObserver<Item, Err, B> { SubjectObserver(self.clone()) }

  fn late_catch_up(buffer: &B) -> Vec<Item> {
    if buffer.replays_after_termination() { buffer.snapshot() } else { Vec::new() }
  }
}

/// Observer forwarding into a [`Subject`]; see [`Subject::as_observer`].
pub struct SubjectObserver<Item, Err, B>(Subject<Item, Err, B>);

impl<Item, Err, B> Observer<Item, Err> for SubjectObserver<Item, Err, B>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
  B: ReplayBuffer<Item> + Send + 'static,
{
  fn next(&mut self, value: Item) { self.0.next(value) }

  fn error(self, err: Err) { self.0.error(err) }

  fn complete(self) { self.0.complete() }

  fn is_closed(&self) -> bool { self.0.is_terminated() }
}
