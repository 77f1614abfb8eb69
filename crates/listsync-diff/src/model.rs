//! A vector-backed consumer that reuses old items across a dispatch.

use crate::consumer::ListConsumer;
use crate::error::{ConsumerError, DiffError, Result};

/// One position of a [`ListModel`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<T> {
    /// An old item carried over unchanged.
    Kept(T),
    /// An old item whose content was reported as changed.
    Stale(T),
    /// Placeholder for an inserted item.
    Pending,
}

impl<T> Slot<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Kept(item) | Self::Stale(item) => Some(item),
            Self::Pending => None,
        }
    }
}

/// Applies dispatched edits to a list of items.
///
/// Old items are moved around rather than rebuilt. After dispatch, every
/// position is either a reused old item or a placeholder; [`into_items`]
/// fills placeholders and changed positions from the new sequence.
///
/// [`into_items`]: ListModel::into_items
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListModel<T> {
    slots: Vec<Slot<T>>,
}

impl<T> ListModel<T> {
    /// A model holding `items`, all kept.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            slots: items.into_iter().map(Slot::Kept).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Number of placeholders left by inserts.
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Pending))
            .count()
    }

    /// Finish the list: placeholders and changed positions take the item at
    /// the same index of `new`, kept items stay as they are.
    pub fn into_items(self, new: &[T]) -> Result<Vec<T>>
    where
        T: Clone,
    {
        if self.slots.len() != new.len() {
            return Err(DiffError::InvalidInput(format!(
                "model has {} positions, new sequence has {}",
                self.slots.len(),
                new.len()
            )));
        }
        Ok(self
            .slots
            .into_iter()
            .zip(new)
            .map(|(slot, fresh)| match slot {
                Slot::Kept(item) => item,
                Slot::Stale(_) | Slot::Pending => fresh.clone(),
            })
            .collect())
    }

    fn check_range(&self, index: usize, count: usize) -> std::result::Result<(), ConsumerError> {
        match index.checked_add(count) {
            Some(end) if end <= self.slots.len() => Ok(()),
            _ => Err(ConsumerError::out_of_range(index, count, self.slots.len())),
        }
    }
}

impl<T, P> ListConsumer<P> for ListModel<T> {
    fn insert_range(&mut self, index: usize, count: usize) -> std::result::Result<(), ConsumerError> {
        self.check_range(index, 0)?;
        self.slots
            .splice(index..index, std::iter::repeat_with(|| Slot::Pending).take(count));
        Ok(())
    }

    fn remove_range(&mut self, index: usize, count: usize) -> std::result::Result<(), ConsumerError> {
        self.check_range(index, count)?;
        self.slots.drain(index..index + count);
        Ok(())
    }

    fn move_item(&mut self, from: usize, to: usize) -> std::result::Result<(), ConsumerError> {
        self.check_range(from, 1)?;
        self.check_range(to, 1)?;
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
        Ok(())
    }

    fn update_range(
        &mut self,
        index: usize,
        count: usize,
        _payload: Option<&P>,
    ) -> std::result::Result<(), ConsumerError> {
        self.check_range(index, count)?;
        for slot in &mut self.slots[index..index + count] {
            *slot = match std::mem::replace(slot, Slot::Pending) {
                Slot::Kept(item) | Slot::Stale(item) => Slot::Stale(item),
                Slot::Pending => Slot::Pending,
            };
        }
        Ok(())
    }
}
