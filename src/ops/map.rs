use std::sync::Arc;

use crate::{observable::Observable, observer::Observer};

impl<Item: Send + 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  ///
  /// ```
  /// use std::convert::Infallible;
  ///
  /// use rxlite::prelude::*;
  ///
  /// Observable::<i32, Infallible>::of([1, 2])
  ///   .map(|v| v.to_string())
  ///   .subscribe(|s| println!("{}", s));
  /// ```
  pub fn map<Out, F>(&self, func: F) -> Observable<Out, Err>
  where
    Out: Send + 'static,
    F: Fn(Item) -> Out + Send + Sync + 'static,
  {
    let source = self.clone();
    let func = Arc::new(func);
    Observable::from_source(move |subscriber| {
      source.subscribe_with(MapObserver { observer: subscriber.as_observer(), func: func.clone() })
    })
  }
}

pub struct MapObserver<O, F> {
  observer: O,
  func: Arc<F>,
}

impl<Item, Out, Err, O, F> Observer<Item, Err> for MapObserver<O, F>
where
  O: Observer<Out, Err>,
  F: Fn(Item) -> Out,
{
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use crate::{observable::Observable, observer::Event, rc::MutArc};

  #[rxlite_macro::test]
  fn primitive_type() {
    let sum = MutArc::own(0);
    let c_sum = sum.clone();
    Observable::<i32, Infallible>::from_iter(100..101)
      .map(|v| v * 2)
      .subscribe(move |v| *c_sum.rc_deref_mut() += v);
    assert_eq!(*sum.rc_deref_mut(), 200);
  }

  #[rxlite_macro::test]
  fn changes_item_type_and_keeps_error() {
    let events = MutArc::own(vec![]);
    let c_events = events.clone();
    Observable::<i32, &str>::create(|subscriber| {
      subscriber.next(1);
      subscriber.error("broken");
    })
    .map(|v| format!("#{v}"))
    .subscribe_event(move |e| c_events.rc_deref_mut().push(e));
    assert_eq!(*events.rc_deref_mut(), vec![Event::Next("#1".to_string()), Event::Error("broken")]);
  }
}
