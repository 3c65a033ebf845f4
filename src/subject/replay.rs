//! What a subject hands to a subscriber that joins late.

use std::collections::VecDeque;

/// Retention policy of a [`Subject`](super::Subject).
///
/// `record` sees every value the subject emits; `snapshot` is what a new
/// subscriber receives before live values.
pub trait ReplayBuffer<Item> {
  fn record(&mut self, value: &Item);

  fn snapshot(&self) -> Vec<Item>;

  /// Whether a subscriber joining after termination still gets the snapshot
  /// before the terminal event.
  fn replays_after_termination(&self) -> bool { true }
}

/// Retains nothing (publish semantics).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReplay;

impl<Item> ReplayBuffer<Item> for NoReplay {
  #[inline]
  fn record(&mut self, _: &Item) {}

  #[inline]
  fn snapshot(&self) -> Vec<Item> { Vec::new() }
}

/// Exactly one current value (behavior semantics). Late subscribers of a
/// terminated subject only get the terminal event.
#[derive(Debug, Clone)]
pub struct Latest<Item>(pub(crate) Item);

impl<Item: Clone> ReplayBuffer<Item> for Latest<Item> {
  fn record(&mut self, value: &Item) { self.0 = value.clone(); }

  fn snapshot(&self) -> Vec<Item> { vec![self.0.clone()] }

  fn replays_after_termination(&self) -> bool { false }
}

/// The last `capacity` values, oldest evicted first (replay semantics).
#[derive(Debug, Clone)]
pub struct Bounded<Item> {
  capacity: usize,
  values: VecDeque<Item>,
}

impl<Item> Bounded<Item> {
  /// Storage grows with the values recorded, not with `capacity`.
  pub fn new(capacity: usize) -> Self { Self { capacity, values: VecDeque::new() } }

  pub fn capacity(&self) -> usize { self.capacity }
}

impl<Item: Clone> ReplayBuffer<Item> for Bounded<Item> {
  fn record(&mut self, value: &Item) {
    if self.capacity == 0 {
      return;
    }
    if self.values.len() == self.capacity {
      self.values.pop_front();
    }
    self.values.push_back(value.clone());
  }

  fn snapshot(&self) -> Vec<Item> { self.values.iter().cloned().collect() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[rxlite_macro::test]
  fn bounded_evicts_oldest() {
    let mut buffer = Bounded::new(2);
    for v in ["1", "2", "3"] {
      buffer.record(&v);
    }
    assert_eq!(buffer.snapshot(), vec!["2", "3"]);
    assert!(buffer.replays_after_termination());
  }

  #[rxlite_macro::test]
  fn zero_capacity_keeps_nothing() {
    let mut buffer = Bounded::new(0);
    buffer.record(&1);
    assert!(buffer.snapshot().is_empty());
  }

  #[rxlite_macro::test]
  fn latest_overwrites() {
    let mut buffer = Latest(0);
    buffer.record(&5);
    assert_eq!(buffer.snapshot(), vec![5]);
    assert!(!buffer.replays_after_termination());
  }

  #[rxlite_macro::test]
  fn no_replay_is_empty() {
    let mut buffer = NoReplay;
    buffer.record(&1);
    assert!(ReplayBuffer::<i32>::snapshot(&buffer).is_empty());
  }
}
