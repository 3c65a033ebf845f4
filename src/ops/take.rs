use tracing::trace;

use crate::{observable::Observable, observer::Observer, subscription::Disposable};

impl<Item: Send + 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Emits only the first `count` values, then completes.
  ///
  /// If the source emits fewer than `count` values then all of them are
  /// emitted. Once `count` values went through, the source subscription is
  /// released right away, which is how an endless source is cut short:
  ///
  /// ```
  /// use std::convert::Infallible;
  ///
  /// use rxlite::prelude::*;
  ///
  /// Observable::<u64, Infallible>::from_iter(0..)
  ///   .take(5)
  ///   .subscribe(|v| println!("{}", v));
  /// ```
  pub fn take(&self, count: usize) -> Observable<Item, Err> {
    let source = self.clone();
    Observable::from_source(move |subscriber| {
      if count == 0 {
        trace!("take(0) completes without subscribing upstream");
        subscriber.complete();
        return Disposable::empty();
      }
      source.subscribe_with(TakeObserver { observer: Some(subscriber.as_observer()), count })
    })
  }
}

pub struct TakeObserver<O> {
  observer: Option<O>,
  count: usize,
}

impl<Item, Err, O> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else { return };
    observer.next(value);
    self.count -= 1;
    if self.count == 0 {
      if let Some(observer) = self.observer.take() {
        observer.complete();
      }
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err)
    }
  }

  fn complete(self) {
    if let Some(observer) = self.observer {
      observer.complete()
    }
  }

  fn is_closed(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_closed()) }
}
