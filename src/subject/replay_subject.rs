use super::{replay::Bounded, subject_core::Subject};

/// Subject replaying up to `buffer_size` most recent values to every new
/// subscriber, then relaying live ones.
///
/// Once terminated, late subscribers receive the buffer followed by the
/// terminal event.
pub type ReplaySubject<Item, Err> = Subject<Item, Err, Bounded<Item>>;

impl<Item, Err> Subject<Item, Err, Bounded<Item>> {
  #[inline]
  pub fn new(buffer_size: usize) -> Self { Self::with_buffer(Bounded::new(buffer_size)) }

  pub fn buffer_size(&self) -> usize { self.state.rc_deref_mut().buffer.capacity() }
}
