use std::sync::Arc;

use crate::{observable::Observable, observer::Observer};

impl<Item: Send + 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Emit only those items that pass the predicate.
  ///
  /// ```
  /// use std::convert::Infallible;
  ///
  /// use rxlite::prelude::*;
  ///
  /// Observable::<i64, Infallible>::range(0, 10)
  ///   .filter(|v| v % 2 == 0)
  ///   .subscribe(|v| println!("{}", v));
  /// ```
  pub fn filter<F>(&self, predicate: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> bool + Send + Sync + 'static,
  {
    let source = self.clone();
    let predicate = Arc::new(predicate);
    Observable::from_source(move |subscriber| {
      source.subscribe_with(FilterObserver {
        observer: subscriber.as_observer(),
        predicate: predicate.clone(),
      })
    })
  }
}

pub struct FilterObserver<O, F> {
  observer: O,
  predicate: Arc<F>,
}

impl<Item, Err, O, F> Observer<Item, Err> for FilterObserver<O, F>
where
  O: Observer<Item, Err>,
  F: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value)
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
