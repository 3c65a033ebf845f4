use smallvec::SmallVec;

/// Subscribers container with ID-based management.
///
/// Keeps insertion order, which is the order a subject delivers in. IDs are
/// never reused, so a late removal can not hit a newer subscriber.
pub(crate) struct Subscribers<Ob> {
  next_id: usize,
  items: SmallVec<[(usize, Ob); 2]>,
}

impl<Ob> Default for Subscribers<Ob> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<Ob> Subscribers<Ob> {
  /// Add an observer and return its unique ID.
  #[inline]
  pub(crate) fn add(&mut self, observer: Ob) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, observer));
    id
  }

  /// Remove an observer by ID.
  pub(crate) fn remove(&mut self, id: usize) -> Option<Ob> {
    self.items.iter().position(|(i, _)| *i == id).map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.items.len() }

  /// Take every observer out, leaving the container empty.
  pub(crate) fn drain(&mut self) -> SmallVec<[Ob; 2]> {
    self.items.drain(..).map(|(_, ob)| ob).collect()
  }

  /// Copy of the current observers, so delivery can happen without holding
  /// the lock that guards this container.
  pub(crate) fn snapshot(&self) -> SmallVec<[Ob; 2]>
  where
    Ob: Clone,
  {
    self.items.iter().map(|(_, ob)| ob.clone()).collect()
  }
}

/// Deliver `value` to every observer.
///
/// The value is cloned for all observers except the last one, which receives
/// the moved value.
pub(crate) fn broadcast<Ob, Item>(
  observers: impl IntoIterator<Item = Ob>,
  value: Item,
  mut deliver: impl FnMut(&Ob, Item),
) where
  Item: Clone,
{
  let mut iter = observers.into_iter().peekable();
  while let Some(observer) = iter.next() {
    if iter.peek().is_some() {
      deliver(&observer, value.clone());
    } else {
      deliver(&observer, value);
      break;
    }
  }
}
