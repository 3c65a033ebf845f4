use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;
use tracing::{trace, warn};

use super::Disposable;
use crate::{
  error::{Error, Result},
  rc::MutArc,
};

#[derive(Default)]
struct Inner {
  disposed: bool,
  members: SmallVec<[Disposable; 4]>,
}

/// Owner of a group of [`Disposable`]s, released together.
///
/// Releasing happens on [`dispose`](Self::dispose) or when the bag is
/// dropped. A bag is single-use: a disposable inserted after the bag was
/// released is disposed immediately.
#[derive(Default)]
pub struct DisposeBag(MutArc<Inner>);

impl DisposeBag {
  pub fn new() -> Self { Self::default() }

  /// Take ownership of `disposable`.
  pub fn insert(&self, disposable: Disposable) {
    let mut inner = self.0.rc_deref_mut();
    if inner.disposed {
      drop(inner);
      trace!("insert into released bag, disposing immediately");
      disposable.dispose();
    } else {
      inner.members.retain(|d| !d.is_disposed());
      inner.members.push(disposable);
    }
  }

  /// Number of members not yet disposed.
  pub fn len(&self) -> usize {
    self.0.rc_deref_mut().members.iter().filter(|d| !d.is_disposed()).count()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn is_disposed(&self) -> bool { self.0.rc_deref_mut().disposed }

  /// Dispose every member.
  ///
  /// A failing member never stops the others from being disposed; all
  /// failures are returned together. Calling this again is a no-op.
  pub fn dispose(&self) -> Result<()> {
    let members = {
      let mut inner = self.0.rc_deref_mut();
      if inner.disposed {
        return Ok(());
      }
      inner.disposed = true;
      std::mem::take(&mut inner.members)
    };

    let total = members.len();
    trace!(total, "disposing bag");
    let failures: Vec<Error> = members.into_iter().filter_map(|d| d.try_dispose().err()).collect();
    if failures.is_empty() {
      Ok(())
    } else {
      Err(Error::Disposal { failures, total })
    }
  }
}

impl Drop for DisposeBag {
  fn drop(&mut self) {
    if let Err(err) = self.dispose() {
      warn!(
        error = %err,
        failures = err.failure_count(),
        "dispose bag dropped with failing teardowns"
      );
    }
  }
}

impl Debug for DisposeBag {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.rc_deref_mut();
    f.debug_struct("DisposeBag")
      .field("disposed", &inner.disposed)
      .field("members", &inner.members.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use super::*;

  fn counted(hits: &Arc<AtomicUsize>) -> Disposable {
    let hits = hits.clone();
    Disposable::create(move || {
      hits.fetch_add(1, Ordering::SeqCst);
    })
  }

  #[rxlite_macro::test]
  fn dispose_releases_every_member_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    let bag = DisposeBag::new();
    for _ in 0..3 {
      counted(&hits).disposed_by(&bag);
    }
    assert_eq!(bag.len(), 3);
    bag.dispose().unwrap();
    bag.dispose().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert!(bag.is_disposed());
  }

  #[rxlite_macro::test]
  fn drop_releases_members() {
    let hits = Arc::new(AtomicUsize::new(0));
    {
      let bag = DisposeBag::new();
      bag.insert(counted(&hits));
      bag.insert(counted(&hits));
    }
    assert_eq!(hits.load(Ordering::SeqCst), 2);
  }

  #[rxlite_macro::test]
  fn insert_after_release_disposes_immediately() {
    let hits = Arc::new(AtomicUsize::new(0));
    let bag = DisposeBag::new();
    bag.dispose().unwrap();
    let late = counted(&hits);
    late.clone().disposed_by(&bag);
    assert!(late.is_disposed());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(bag.is_empty());
  }

  #[rxlite_macro::test]
  fn failures_do_not_stop_siblings() {
    let hits = Arc::new(AtomicUsize::new(0));
    let bag = DisposeBag::new();
    bag.insert(counted(&hits));
    bag.insert(Disposable::try_create(|| Err("first".into())));
    bag.insert(counted(&hits));
    bag.insert(Disposable::try_create(|| Err("second".into())));
    bag.insert(counted(&hits));

    match bag.dispose() {
      Err(Error::Disposal { failures, total }) => {
        assert_eq!(failures.len(), 2);
        assert_eq!(total, 5);
      }
      other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);
  }

  #[rxlite_macro::test]
  fn disposed_members_are_pruned() {
    let hits = Arc::new(AtomicUsize::new(0));
    let bag = DisposeBag::new();
    let first = counted(&hits);
    bag.insert(first.clone());
    first.dispose();
    bag.insert(counted(&hits));
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.0.rc_deref_mut().members.len(), 1);
  }
}
