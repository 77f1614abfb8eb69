//! Replaying a [`DiffResult`] against a positional consumer.
//!
//! The match table is walked from the last diagonal back to the first. While
//! walking backward, every position before the cursor still holds its old
//! item, so old indices there are also live consumer indices. Positions
//! after the cursor are tracked as distances from the end of the live list.
//!
//! A move shows up twice: once on the old side (the item leaves) and once on
//! the new side (the item arrives). Whichever side is reached first is
//! postponed; the second side emits the move, translating the first side's
//! recorded distance into a live index.

use tracing::debug;

use crate::batching::BatchingConsumer;
use crate::consumer::ListConsumer;
use crate::error::Result;
use crate::matching::ItemStatus;
use crate::result::DiffResult;

/// A half-seen move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PostponedUpdate {
    /// Position in the sequence that owns this half (old for removals).
    owner_pos: usize,
    /// Distance from the end of the live list.
    from_end: usize,
    removal: bool,
}

/// Half-seen moves, in the order they were postponed.
#[derive(Debug, Default)]
struct PostponedUpdates {
    updates: Vec<PostponedUpdate>,
}

impl PostponedUpdates {
    fn push(&mut self, owner_pos: usize, from_end: usize, removal: bool) {
        self.updates.push(PostponedUpdate {
            owner_pos,
            from_end,
            removal,
        });
    }

    /// Take the postponed half owned by `pos`, if any.
    ///
    /// Halves postponed after it sit between it and the end of the list. When
    /// the move completes, the item leaves (removal half) or joins (insertion
    /// half) that stretch, so their distances shift by one.
    fn take(&mut self, pos: usize, removal: bool) -> Option<PostponedUpdate> {
        let index = self
            .updates
            .iter()
            .position(|u| u.owner_pos == pos && u.removal == removal)?;
        let update = self.updates.remove(index);
        for later in &mut self.updates[index..] {
            if removal {
                later.from_end -= 1;
            } else {
                later.from_end += 1;
            }
        }
        Some(update)
    }
}

impl<P: PartialEq> DiffResult<P> {
    /// Apply the edit script to `consumer`.
    ///
    /// A consumer holding the old sequence ends up holding the new one.
    /// Consecutive single-item edits are coalesced into range calls. If a
    /// consumer primitive fails, nothing further is applied and the error
    /// reports how many operations went through.
    pub fn dispatch<C>(&self, consumer: &mut C) -> Result<()>
    where
        C: ListConsumer<P> + ?Sized,
    {
        let mut batch = BatchingConsumer::new(consumer);
        let mut postponed = PostponedUpdates::default();
        let mut live_len = self.old_size();
        let mut pos_x = self.old_size();
        let mut pos_y = self.new_size();

        for diagonal in self.diagonals.iter().rev() {
            while pos_x > diagonal.end_x() {
                pos_x -= 1;
                match self.table.old[pos_x] {
                    ItemStatus::Moved { partner, changed } => {
                        if let Some(arrival) = postponed.take(partner, false) {
                            let to = live_len - arrival.from_end - 1;
                            batch.move_item(pos_x, to)?;
                            if changed {
                                batch.update(to, 1, self.payload(partner))?;
                            }
                        } else {
                            postponed.push(pos_x, live_len - pos_x - 1, true);
                        }
                    }
                    _ => {
                        batch.remove(pos_x, 1)?;
                        live_len -= 1;
                    }
                }
            }

            while pos_y > diagonal.end_y() {
                pos_y -= 1;
                match self.table.new[pos_y] {
                    ItemStatus::Moved { partner, changed } => {
                        if let Some(departure) = postponed.take(partner, true) {
                            let from = live_len - departure.from_end - 1;
                            batch.move_item(from, pos_x)?;
                            if changed {
                                batch.update(pos_x, 1, self.payload(pos_y))?;
                            }
                        } else {
                            postponed.push(pos_y, live_len - pos_x, false);
                        }
                    }
                    _ => {
                        batch.insert(pos_x, 1)?;
                        live_len += 1;
                    }
                }
            }

            for offset in 0..diagonal.size {
                let x = diagonal.x + offset;
                if let ItemStatus::Matched { changed: true, .. } = self.table.old[x] {
                    batch.update(x, 1, self.payload(diagonal.y + offset))?;
                }
            }
            pos_x = diagonal.x;
            pos_y = diagonal.y;
        }

        batch.flush()?;
        debug!(
            applied = batch.applied(),
            old_size = self.old_size(),
            new_size = self.new_size(),
            "dispatched list diff"
        );
        Ok(())
    }
}
