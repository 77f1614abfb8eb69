//! Coalescing of consecutive single-item edits into range operations.

use tracing::warn;

use crate::consumer::ListConsumer;
use crate::error::{ConsumerError, DiffError, Result};

/// The last edit seen, not yet forwarded.
enum Pending<'p, P> {
    None,
    Insert { index: usize, count: usize },
    Remove { index: usize, count: usize },
    Update {
        index: usize,
        count: usize,
        payload: Option<&'p P>,
    },
}

/// Wraps a consumer, merging adjacent inserts, removes and equal-payload
/// updates into single range calls.
///
/// Counts forwarded operations so a consumer failure can report how far the
/// dispatch got. Callers must [`flush`](Self::flush) at the end.
pub(crate) struct BatchingConsumer<'c, 'p, C: ?Sized, P> {
    inner: &'c mut C,
    pending: Pending<'p, P>,
    applied: usize,
}

impl<'c, 'p, C, P> BatchingConsumer<'c, 'p, C, P>
where
    C: ListConsumer<P> + ?Sized,
    P: PartialEq,
{
    pub fn new(inner: &'c mut C) -> Self {
        Self {
            inner,
            pending: Pending::None,
            applied: 0,
        }
    }

    /// Number of operations forwarded to the wrapped consumer so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn insert(&mut self, index: usize, count: usize) -> Result<()> {
        if let Pending::Insert {
            index: last,
            count: last_count,
        } = self.pending
        {
            if index >= last && index <= last + last_count {
                self.pending = Pending::Insert {
                    index: last.min(index),
                    count: last_count + count,
                };
                return Ok(());
            }
        }
        self.flush()?;
        self.pending = Pending::Insert { index, count };
        Ok(())
    }

    pub fn remove(&mut self, index: usize, count: usize) -> Result<()> {
        if let Pending::Remove {
            index: last,
            count: last_count,
        } = self.pending
        {
            if last >= index && last <= index + count {
                self.pending = Pending::Remove {
                    index,
                    count: last_count + count,
                };
                return Ok(());
            }
        }
        self.flush()?;
        self.pending = Pending::Remove { index, count };
        Ok(())
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.flush()?;
        let outcome = self.inner.move_item(from, to);
        self.forwarded(outcome)
    }

    pub fn update(&mut self, index: usize, count: usize, payload: Option<&'p P>) -> Result<()> {
        if let Pending::Update {
            index: last,
            count: last_count,
            payload: last_payload,
        } = self.pending
        {
            let overlaps = index <= last + last_count && index + count >= last;
            if overlaps && last_payload == payload {
                let end = (last + last_count).max(index + count);
                let start = last.min(index);
                self.pending = Pending::Update {
                    index: start,
                    count: end - start,
                    payload,
                };
                return Ok(());
            }
        }
        self.flush()?;
        self.pending = Pending::Update {
            index,
            count,
            payload,
        };
        Ok(())
    }

    /// Forward the pending edit, if any.
    pub fn flush(&mut self) -> Result<()> {
        let outcome = match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::None => return Ok(()),
            Pending::Insert { index, count } => self.inner.insert_range(index, count),
            Pending::Remove { index, count } => self.inner.remove_range(index, count),
            Pending::Update {
                index,
                count,
                payload,
            } => self.inner.update_range(index, count, payload),
        };
        self.forwarded(outcome)
    }

    fn forwarded(&mut self, outcome: std::result::Result<(), ConsumerError>) -> Result<()> {
        match outcome {
            Ok(()) => {
                self.applied += 1;
                Ok(())
            }
            Err(source) => {
                warn!(applied = self.applied, error = %source, "consumer rejected edit operation");
                Err(DiffError::ConsumerDispatch {
                    applied: self.applied,
                    source,
                })
            }
        }
    }
}
