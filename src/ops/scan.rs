use std::sync::Arc;

use crate::{observable::Observable, observer::Observer};

impl<Item: Send + 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Fold every value into an accumulator and emit each intermediate result.
  ///
  /// Every subscription starts again from a clone of `seed`.
  ///
  /// ```
  /// use std::convert::Infallible;
  ///
  /// use rxlite::prelude::*;
  ///
  /// // prints 101, 102, 103
  /// Observable::<i32, Infallible>::of([1, 1, 1])
  ///   .scan(100, |acc, v| acc + v)
  ///   .subscribe(|v| println!("{}", v));
  /// ```
  pub fn scan<Acc, F>(&self, seed: Acc, func: F) -> Observable<Acc, Err>
  where
    Acc: Clone + Send + Sync + 'static,
    F: Fn(Acc, Item) -> Acc + Send + Sync + 'static,
  {
    let source = self.clone();
    let func = Arc::new(func);
    Observable::from_source(move |subscriber| {
      source.subscribe_with(ScanObserver {
        observer: subscriber.as_observer(),
        func: func.clone(),
        acc: Some(seed.clone()),
      })
    })
  }
}

pub struct ScanObserver<O, F, Acc> {
  observer: O,
  func: Arc<F>,
  acc: Option<Acc>,
}

impl<Item, Err, O, F, Acc> Observer<Item, Err> for ScanObserver<O, F, Acc>
where
  O: Observer<Acc, Err>,
  F: Fn(Acc, Item) -> Acc,
  Acc: Clone,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      let acc = (self.func)(acc, value);
      self.acc = Some(acc.clone());
      self.observer.next(acc);
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use crate::{observable::Observable, rc::MutArc};

  #[rxlite_macro::test]
  fn running_total() {
    let received = MutArc::own(vec![]);
    let c_received = received.clone();
    Observable::<i32, Infallible>::of([1, 1, 1, 1, 1])
      .scan(100, |acc, v| acc + v)
      .subscribe(move |v| c_received.rc_deref_mut().push(v));
    assert_eq!(*received.rc_deref_mut(), vec![101, 102, 103, 104, 105]);
  }

  #[rxlite_macro::test]
  fn accumulator_of_another_type() {
    let received = MutArc::own(vec![]);
    let c_received = received.clone();
    Observable::<char, Infallible>::from_iter("abc".chars().collect::<Vec<_>>())
      .scan(String::new(), |mut acc, c| {
        acc.push(c);
        acc
      })
      .subscribe(move |v| c_received.rc_deref_mut().push(v));
    assert_eq!(*received.rc_deref_mut(), vec!["a", "ab", "abc"]);
  }
}
