//! Subscription handles.
//!
//! [`Subscription`] is the seam producers implement to describe how their
//! resources are released. [`Disposable`] is the concrete, clonable,
//! idempotent handle the core hands back from every `subscribe`, and
//! [`DisposeBag`] owns a group of them.

mod disposable;
mod dispose_bag;

pub use disposable::Disposable;
pub use dispose_bag::DisposeBag;

/// A releasable resource returned by a producer.
pub trait Subscription {
  /// Release the resource. Consumes the handle, so it runs at most once.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;
}

/// Object-safe mirror of [`Subscription`], so a [`Disposable`] can keep any
/// subscription around and still ask whether it is closed.
pub(crate) trait DynSubscription {
  fn box_unsubscribe(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T: Subscription> DynSubscription for T {
  #[inline]
  fn box_unsubscribe(self: Box<Self>) { (*self).unsubscribe() }

  #[inline]
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Unit subscription: nothing to release, always closed.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

/// Subscription running a closure when released.
pub struct ClosureSubscription<F>(pub F);

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  #[inline]
  fn unsubscribe(self) { (self.0)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

impl<S: Subscription> Subscription for Option<S> {
  fn unsubscribe(self) {
    if let Some(inner) = self {
      inner.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Subscription::is_closed) }
}
