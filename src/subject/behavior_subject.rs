use super::{
  replay::Latest,
  subject_core::{Status, Subject},
};

/// Subject holding a current value: new subscribers receive it immediately,
/// then every later value.
///
/// Once terminated, late subscribers only receive the terminal event.
pub type BehaviorSubject<Item, Err> = Subject<Item, Err, Latest<Item>>;

impl<Item, Err> Subject<Item, Err, Latest<Item>> {
  #[inline]
  pub fn new(initial: Item) -> Self { Self::with_buffer(Latest(initial)) }

  /// The current value, or the error the subject terminated with.
  pub fn value(&self) -> Result<Item, Err>
  where
    Item: Clone,
    Err: Clone,
  {
    let state = self.state.rc_deref_mut();
    match &state.status {
      Status::Errored(err) => Err(err.clone()),
      Status::Active | Status::Completed => Ok(state.buffer.0.clone()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{observer::Event, rc::MutArc};

  fn record(
    subject: &BehaviorSubject<&'static str, &'static str>,
  ) -> MutArc<Vec<Event<&'static str, &'static str>>> {
    let events = MutArc::own(vec![]);
    let c_events = events.clone();
    subject.subscribe_event(move |e| c_events.rc_deref_mut().push(e));
    events
  }

  #[rxlite_macro::test]
  fn initial_value_first() {
    let subject = BehaviorSubject::new("initial");
    let events = record(&subject);
    subject.next("1");
    assert_eq!(*events.rc_deref_mut(), vec![Event::Next("initial"), Event::Next("1")]);
  }

  #[rxlite_macro::test]
  fn late_subscriber_sees_latest_only() {
    let subject = BehaviorSubject::new("initial");
    subject.next("1");
    subject.next("2");
    let events = record(&subject);
    assert_eq!(*events.rc_deref_mut(), vec![Event::Next("2")]);
    assert_eq!(subject.value(), Ok("2"));
  }

  #[rxlite_macro::test]
  fn error_is_delivered_to_late_subscribers() {
    let subject = BehaviorSubject::new("initial");
    let early = record(&subject);
    subject.error("oops");
    subject.next("ignored");

    let late = record(&subject);
    assert_eq!(*early.rc_deref_mut(), vec![Event::Next("initial"), Event::Error("oops")]);
    assert_eq!(*late.rc_deref_mut(), vec![Event::Error("oops")]);
    assert_eq!(subject.value(), Err("oops"));
  }

  #[rxlite_macro::test]
  fn completed_keeps_last_value() {
    let subject = BehaviorSubject::new("initial");
    subject.next("last");
    subject.complete();
    assert_eq!(subject.value(), Ok("last"));
    assert_eq!(*record(&subject).rc_deref_mut(), vec![Event::Completed]);
  }
}
