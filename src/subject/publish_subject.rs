use super::{replay::NoReplay, subject_core::Subject};

/// Subject that only relays values emitted after subscription.
pub type PublishSubject<Item, Err> = Subject<Item, Err, NoReplay>;

impl<Item, Err> Subject<Item, Err, NoReplay> {
  #[inline]
  pub fn new() -> Self { Self::with_buffer(NoReplay) }
}

impl<Item, Err> Default for Subject<Item, Err, NoReplay> {
  fn default() -> Self { Self::new() }
}
