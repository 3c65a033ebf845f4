//! Property-based invariant tests.
//!
//! 1. A replay subject hands a late subscriber exactly the last `n` values.
//! 2. At most one terminal event is ever delivered, and always last.
//! 3. Disposing any number of times runs the teardown once.
//! 4. `range` emits `count` consecutive values.
//! 5. A dispose bag releases each member exactly once.
//! 6. `take` never forwards more than asked.

use std::{
  convert::Infallible,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
};

use proptest::prelude::*;
use rxlite::prelude::*;

#[derive(Debug, Clone)]
enum Op {
  Next(u8),
  Error,
  Complete,
}

fn op_strategy() -> impl Strategy<Value = Op> {
  prop_oneof![
    8 => any::<u8>().prop_map(Op::Next),
    1 => Just(Op::Error),
    1 => Just(Op::Complete),
  ]
}

fn capture<Item: Send + 'static>(
  subject: &PublishSubject<Item, ()>,
) -> Arc<Mutex<Vec<Event<Item, ()>>>>
where
  Item: Clone,
{
  let log = Arc::new(Mutex::new(Vec::new()));
  let c_log = log.clone();
  subject.subscribe_event(move |e| c_log.lock().unwrap().push(e));
  log
}

proptest! {
  #[test]
  fn replay_hands_over_the_last_n(
    values in proptest::collection::vec(any::<i32>(), 0..64),
    buffer_size in 0usize..16,
  ) {
    let subject = ReplaySubject::<i32, Infallible>::new(buffer_size);
    for v in &values {
      subject.next(*v);
    }
    let seen = Arc::new(Mutex::new(Vec::new()));
    let c_seen = seen.clone();
    subject.subscribe(move |v| c_seen.lock().unwrap().push(v));

    let skip = values.len().saturating_sub(buffer_size);
    prop_assert_eq!(&*seen.lock().unwrap(), &values[skip..]);
  }

  #[test]
  fn terminal_event_is_exclusive_and_last(ops in proptest::collection::vec(op_strategy(), 0..32)) {
    let subject = PublishSubject::<u8, ()>::new();
    let log = capture(&subject);
    for op in &ops {
      match op {
        Op::Next(v) => subject.next(*v),
        Op::Error => subject.error(()),
        Op::Complete => subject.complete(),
      }
    }

    let log = log.lock().unwrap();
    let terminals = log.iter().filter(|e| e.is_terminal()).count();
    prop_assert!(terminals <= 1);
    if terminals == 1 {
      prop_assert!(log.last().is_some_and(|e| e.is_terminal()));
    }
    let expected_values: Vec<u8> = ops
      .iter()
      .take_while(|op| matches!(op, Op::Next(_)))
      .filter_map(|op| match op {
        Op::Next(v) => Some(*v),
        _ => None,
      })
      .collect();
    let values: Vec<u8> = log.iter().filter_map(|e| e.element().copied()).collect();
    prop_assert_eq!(values, expected_values);
  }

  #[test]
  fn dispose_is_idempotent(times in 1usize..8) {
    let hits = Arc::new(AtomicUsize::new(0));
    let c_hits = hits.clone();
    let disposable = Disposable::create(move || {
      c_hits.fetch_add(1, Ordering::SeqCst);
    });
    for _ in 0..times {
      disposable.clone().dispose();
    }
    prop_assert!(disposable.is_disposed());
    prop_assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn range_is_consecutive(start in -1000i64..1000, count in 0usize..200) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let c_seen = seen.clone();
    Observable::<i64, Infallible>::range(start, count)
      .subscribe(move |v| c_seen.lock().unwrap().push(v));
    let expected: Vec<i64> = (0..count as i64).map(|i| start + i).collect();
    prop_assert_eq!(&*seen.lock().unwrap(), &expected);
  }

  #[test]
  fn bag_releases_each_member_once(members in 0usize..20, early in 0usize..20) {
    let hits = Arc::new(AtomicUsize::new(0));
    let disposables: Vec<Disposable> = (0..members)
      .map(|_| {
        let hits = hits.clone();
        Disposable::create(move || {
          hits.fetch_add(1, Ordering::SeqCst);
        })
      })
      .collect();
    let bag = DisposeBag::new();
    for d in &disposables {
      d.clone().disposed_by(&bag);
    }
    for d in disposables.iter().take(early) {
      d.dispose();
    }
    drop(bag);
    prop_assert_eq!(hits.load(Ordering::SeqCst), members);
  }

  #[test]
  fn take_never_exceeds_count(len in 0usize..50, count in 0usize..60) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let c_seen = seen.clone();
    let completed = Arc::new(AtomicUsize::new(0));
    let c_completed = completed.clone();
    Observable::<usize, Infallible>::from_iter(0..len)
      .take(count)
      .subscribe_all(
        move |v| c_seen.lock().unwrap().push(v),
        |_| {},
        move || {
          c_completed.fetch_add(1, Ordering::SeqCst);
        },
      );
    prop_assert_eq!(seen.lock().unwrap().len(), len.min(count));
    prop_assert_eq!(completed.load(Ordering::SeqCst), 1);
  }
}
