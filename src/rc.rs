//! Shared mutable pointer used by every stateful piece of the core.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard};

/// `Arc<Mutex<T>>` with the handful of operations the core needs.
///
/// Subjects, subscribers and disposables are all shared between the code that
/// created them and the handles given out to callers, possibly across
/// threads, so they all sit behind this pointer.
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn rc_deref_mut(&self) -> MutexGuard<'_, T> { self.0.lock() }

  /// A handle that does not keep the value alive.
  pub fn downgrade(&self) -> MutWeak<T> { MutWeak(Arc::downgrade(&self.0)) }
}

/// Weak counterpart of [`MutArc`], used where holding a strong reference
/// would form a cycle (a subscriber's teardown pointing back at its subject).
pub struct MutWeak<T>(Weak<Mutex<T>>);

impl<T> MutWeak<T> {
  pub fn upgrade(&self) -> Option<MutArc<T>> { self.0.upgrade().map(MutArc) }
}

impl<T> Clone for MutWeak<T> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T: Default> Default for MutArc<T> {
  fn default() -> Self { Self::own(T::default()) }
}
