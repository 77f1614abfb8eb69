//! Per-position match status for both sides of a diff.
//!
//! Built from the diagonals: every diagonal pair is classified by the
//! equality callback, and (when move detection is on) leftover old and new
//! positions with equal identity are paired up as moves.

use std::collections::BTreeMap;

use crate::callback::{payload, same_content, same_item, DiffCallback};
use crate::error::Result;
use crate::snake::Diagonal;

/// What happened to one position of the old or new sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ItemStatus {
    /// Removed (old side) or inserted (new side).
    Unmatched,
    /// Part of a diagonal; `partner` is the index on the other side.
    Matched { partner: usize, changed: bool },
    /// Paired by move detection; `partner` is the index on the other side.
    Moved { partner: usize, changed: bool },
}

impl ItemStatus {
    pub fn partner(&self) -> Option<usize> {
        match *self {
            Self::Unmatched => None,
            Self::Matched { partner, .. } | Self::Moved { partner, .. } => Some(partner),
        }
    }
}

/// Match status for every old and new position, plus payloads for changed
/// pairs keyed by new index.
#[derive(Clone, Debug)]
pub(crate) struct MatchTable<P> {
    pub old: Vec<ItemStatus>,
    pub new: Vec<ItemStatus>,
    pub payloads: BTreeMap<usize, P>,
    pub moves: usize,
}

impl<P> MatchTable<P> {
    /// Classify every pair covered by `diagonals` and, if asked, pair up moves.
    pub fn build<C>(
        old_size: usize,
        new_size: usize,
        diagonals: &[Diagonal],
        cb: &C,
        detect_moves: bool,
    ) -> Result<Self>
    where
        C: DiffCallback<Payload = P> + ?Sized,
    {
        let mut table = Self {
            old: vec![ItemStatus::Unmatched; old_size],
            new: vec![ItemStatus::Unmatched; new_size],
            payloads: BTreeMap::new(),
            moves: 0,
        };

        for diagonal in diagonals {
            for offset in 0..diagonal.size {
                let (x, y) = (diagonal.x + offset, diagonal.y + offset);
                let changed = table.classify(cb, x, y)?;
                table.old[x] = ItemStatus::Matched { partner: y, changed };
                table.new[y] = ItemStatus::Matched { partner: x, changed };
            }
        }

        if detect_moves {
            table.find_moves(cb)?;
        }
        Ok(table)
    }

    /// Evaluate content equality (and the payload, when changed) for an
    /// identity-matched pair. Returns whether the content changed.
    fn classify<C>(&mut self, cb: &C, x: usize, y: usize) -> Result<bool>
    where
        C: DiffCallback<Payload = P> + ?Sized,
    {
        if same_content(cb, x, y)? {
            return Ok(false);
        }
        if let Some(p) = payload(cb, x, y)? {
            self.payloads.insert(y, p);
        }
        Ok(true)
    }

    /// Pair each unmatched old position, ascending, with the closest unpaired
    /// new position of equal identity. Ties go to the lower new index.
    fn find_moves<C>(&mut self, cb: &C) -> Result<()>
    where
        C: DiffCallback<Payload = P> + ?Sized,
    {
        let mut candidates: Vec<Option<usize>> = self
            .new
            .iter()
            .enumerate()
            .filter(|(_, status)| **status == ItemStatus::Unmatched)
            .map(|(y, _)| Some(y))
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }

        for x in 0..self.old.len() {
            if self.old[x] != ItemStatus::Unmatched {
                continue;
            }

            let mut best: Option<(usize, usize)> = None;
            for (slot, candidate) in candidates.iter().enumerate() {
                let Some(y) = *candidate else { continue };
                let distance = x.abs_diff(y);
                if best.is_some_and(|(_, d)| d <= distance) {
                    continue;
                }
                if same_item(cb, x, y)? {
                    best = Some((slot, distance));
                    if distance == 0 {
                        break;
                    }
                }
            }

            if let Some((slot, _)) = best {
                let Some(y) = candidates[slot].take() else { continue };
                let changed = self.classify(cb, x, y)?;
                self.old[x] = ItemStatus::Moved { partner: y, changed };
                self.new[y] = ItemStatus::Moved { partner: x, changed };
                self.moves += 1;
            }
        }
        Ok(())
    }
}
