//! Diff computation and the resulting match table.

use tracing::{debug, warn};

use crate::callback::DiffCallback;
use crate::consumer::EditOp;
use crate::error::{DiffError, Result};
use crate::matching::{ItemStatus, MatchTable};
use crate::options::DiffOptions;
use crate::snake::{find_diagonals, Diagonal};

/// The outcome of [`compute_diff`]: sizes plus the match table between the
/// old and new sequences.
///
/// Holds no reference to the callback; payloads for changed pairs are
/// computed up front. Dispatching it repeatedly emits the same operations.
#[derive(Clone, Debug)]
pub struct DiffResult<P> {
    old_size: usize,
    new_size: usize,
    detect_moves: bool,
    /// Sorted by old index, bracketed by `(0,0,0)` and `(old,new,0)`.
    pub(crate) diagonals: Vec<Diagonal>,
    pub(crate) table: MatchTable<P>,
}

/// Compute the edit script turning `old_size` old items into `new_size` new
/// items, as judged by `callback`.
///
/// Any callback failure aborts the computation.
pub fn compute_diff<C>(
    old_size: usize,
    new_size: usize,
    callback: &C,
    options: &DiffOptions,
) -> Result<DiffResult<C::Payload>>
where
    C: DiffCallback + ?Sized,
{
    validate_sizes(old_size, new_size, options)?;

    let mut diagonals = find_diagonals(old_size, new_size, callback)?;
    if diagonals.first().map_or(true, |d| d.x != 0 || d.y != 0) {
        diagonals.insert(0, Diagonal::new(0, 0, 0));
    }
    diagonals.push(Diagonal::new(old_size, new_size, 0));

    let table = MatchTable::build(old_size, new_size, &diagonals, callback, options.detect_moves)?;

    debug!(
        old_size,
        new_size,
        diagonals = diagonals.len() - 1,
        moves = table.moves,
        changed = table.payloads.len(),
        "computed list diff"
    );

    Ok(DiffResult {
        old_size,
        new_size,
        detect_moves: options.detect_moves,
        diagonals,
        table,
    })
}

fn validate_sizes(old_size: usize, new_size: usize, options: &DiffOptions) -> Result<()> {
    // The search works in signed coordinates over old_size + new_size.
    let representable = old_size
        .checked_add(new_size)
        .is_some_and(|total| isize::try_from(total).is_ok());
    if !representable {
        return Err(DiffError::InvalidInput(format!(
            "sizes {old_size} + {new_size} exceed the addressable range"
        )));
    }
    if let Some(max_len) = options.max_len {
        if old_size > max_len || new_size > max_len {
            return Err(DiffError::InvalidInput(format!(
                "sequence length {} exceeds max_len {max_len}",
                old_size.max(new_size)
            )));
        }
    }
    Ok(())
}

impl<P> DiffResult<P> {
    pub fn old_size(&self) -> usize {
        self.old_size
    }

    pub fn new_size(&self) -> usize {
        self.new_size
    }

    /// Whether move detection was enabled for this computation.
    pub fn detects_moves(&self) -> bool {
        self.detect_moves
    }

    /// Where the item at old `position` ended up in the new sequence.
    ///
    /// `None` if it was removed. Moved items report their new position.
    pub fn old_position_to_new(&self, position: usize) -> Result<Option<usize>> {
        self.table
            .old
            .get(position)
            .map(ItemStatus::partner)
            .ok_or_else(|| out_of_bounds("old", position, self.old_size))
    }

    /// Where the item at new `position` came from in the old sequence.
    ///
    /// `None` if it was inserted.
    pub fn new_position_to_old(&self, position: usize) -> Result<Option<usize>> {
        self.table
            .new
            .get(position)
            .map(ItemStatus::partner)
            .ok_or_else(|| out_of_bounds("new", position, self.new_size))
    }

    /// The operations [`dispatch`](Self::dispatch) emits, in order.
    pub fn operations(&self) -> Vec<EditOp<P>>
    where
        P: Clone + PartialEq,
    {
        let mut ops = Vec::new();
        if let Err(err) = self.dispatch(&mut ops) {
            debug_assert!(false, "recording consumer rejected an operation: {err}");
            warn!(error = %err, recorded = ops.len(), "operation recording stopped early");
        }
        ops
    }

    pub(crate) fn payload(&self, new_position: usize) -> Option<&P> {
        self.table.payloads.get(&new_position)
    }
}

fn out_of_bounds(side: &str, position: usize, len: usize) -> DiffError {
    DiffError::InvalidInput(format!(
        "{side} position {position} out of bounds for length {len}"
    ))
}
