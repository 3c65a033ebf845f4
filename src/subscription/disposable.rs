use std::fmt::{Debug, Formatter};

use tracing::{trace, warn};

use super::{DisposeBag, DynSubscription, Subscription};
use crate::{
  error::{BoxError, Error, Result},
  rc::MutArc,
};

enum Teardown {
  Action(Box<dyn FnOnce() -> std::result::Result<(), BoxError> + Send>),
  Subscription(Box<dyn DynSubscription + Send>),
}

struct Inner {
  disposed: bool,
  teardown: Option<Teardown>,
}

/// Idempotent handle to a release action.
///
/// Every `subscribe` in this crate returns a `Disposable`. Clones share the
/// same action: whichever clone is disposed first runs it, every later call
/// is a no-op.
///
/// ```rust
/// use std::sync::{
///   atomic::{AtomicUsize, Ordering},
///   Arc,
/// };
///
/// use rxlite::prelude::*;
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let c_hits = hits.clone();
/// let d = Disposable::create(move || {
///   c_hits.fetch_add(1, Ordering::SeqCst);
/// });
/// d.dispose();
/// d.dispose();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct Disposable(MutArc<Inner>);

impl Disposable {
  /// Wrap an infallible release action.
  pub fn create(action: impl FnOnce() + Send + 'static) -> Self {
    Self::try_create(move || {
      action();
      Ok(())
    })
  }

  /// Wrap a release action that may fail. The failure is reported by
  /// [`try_dispose`](Self::try_dispose) and collected by [`DisposeBag`].
  pub fn try_create(
    action: impl FnOnce() -> std::result::Result<(), BoxError> + Send + 'static,
  ) -> Self {
    Self::with_teardown(Teardown::Action(Box::new(action)))
  }

  /// Wrap any producer subscription.
  ///
  /// The disposable also reports itself disposed once the subscription
  /// closed on its own, e.g. a subscription whose source completed.
  pub fn new(subscription: impl Subscription + Send + 'static) -> Self {
    Self::with_teardown(Teardown::Subscription(Box::new(subscription)))
  }

  fn with_teardown(teardown: Teardown) -> Self {
    Self(MutArc::own(Inner { disposed: false, teardown: Some(teardown) }))
  }

  /// A disposable with nothing to release.
  pub fn empty() -> Self { Self(MutArc::own(Inner { disposed: false, teardown: None })) }

  /// Release the resource, logging a failing teardown.
  pub fn dispose(&self) {
    if let Err(err) = self.try_dispose() {
      warn!(error = %err, "teardown failed while disposing");
    }
  }

  /// Release the resource and report a failing teardown. Only the first call
  /// runs the action; later calls return `Ok(())`.
  pub fn try_dispose(&self) -> Result<()> {
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.disposed {
        return Ok(());
      }
      inner.disposed = true;
      inner.teardown.take()
    };
    trace!("disposing");
    // Runs unlocked: a teardown may dispose this very handle again.
    match teardown {
      Some(Teardown::Action(action)) => action().map_err(Error::Teardown),
      Some(Teardown::Subscription(subscription)) => {
        subscription.box_unsubscribe();
        Ok(())
      }
      None => Ok(()),
    }
  }

  pub fn is_disposed(&self) -> bool {
    let inner = self.0.rc_deref_mut();
    match &inner.teardown {
      Some(Teardown::Subscription(subscription)) => inner.disposed || subscription.box_is_closed(),
      _ => inner.disposed,
    }
  }

  /// Hand this disposable to `bag`, which releases it when the bag is
  /// released or dropped.
  pub fn disposed_by(self, bag: &DisposeBag) { bag.insert(self); }
}

impl Subscription for Disposable {
  #[inline]
  fn unsubscribe(self) { self.dispose() }

  #[inline]
  fn is_closed(&self) -> bool { self.is_disposed() }
}

impl Debug for Disposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Disposable").field("disposed", &self.is_disposed()).finish()
  }
}
