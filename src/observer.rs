//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use tracing::trace;

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable. The terminal methods consume the observer, so once `error`
/// or `complete` has run nothing else can be delivered to it.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  fn error(self, err: Err);

  /// Handle completion of the observable
  fn complete(self);

  /// Returns `true` if the observer will not accept more values.
  ///
  /// Producers use this to stop emitting early (e.g. after `take`).
  fn is_closed(&self) -> bool;
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Object-safe mirror of [`Observer`] so observers can be stored as
/// `Box<dyn DynObserver>` in subscribers and subject registries.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { (*self).error(err); }
  fn box_complete(self: Box<Self>) { (*self).complete(); }
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Boxed observer that may be handed to another thread.
pub type BoxedObserver<Item, Err> = Box<dyn DynObserver<Item, Err> + Send>;

impl<Item, Err> Observer<Item, Err> for BoxedObserver<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Closure observer handling only values.
///
/// This enables `observable.subscribe(|v| println!("{}", v))`. Errors and
/// completion are dropped.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  fn error(self, _err: Err) { trace!("error reached a next-only observer and was dropped"); }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Observer built from the three callbacks.
#[derive(Clone)]
pub struct AllObserver<N, E, C> {
  pub next: N,
  pub error: E,
  pub complete: C,
}

impl<N, E, C, Item, Err> Observer<Item, Err> for AllObserver<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(self) { (self.complete)(); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// A single notification, for observers that prefer to match on events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<Item, Err> {
  Next(Item),
  Error(Err),
  Completed,
}

impl<Item, Err> Event<Item, Err> {
  pub fn is_terminal(&self) -> bool { !matches!(self, Event::Next(_)) }

  /// The value carried by a `Next` event.
  pub fn element(&self) -> Option<&Item> {
    match self {
      Event::Next(v) => Some(v),
      _ => None,
    }
  }
}

/// Observer that funnels every notification into one closure.
#[derive(Clone)]
pub struct EventObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for EventObserver<F>
where
  F: FnMut(Event<Item, Err>),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(Event::Next(value)); }

  #[inline]
  fn error(mut self, err: Err) { (self.0)(Event::Error(err)); }

  #[inline]
  fn complete(mut self) { (self.0)(Event::Completed); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Tests
// ============================================================================
