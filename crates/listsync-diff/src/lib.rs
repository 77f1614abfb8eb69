//! Ordered list reconciliation.
//!
//! Given an old and a new ordered sequence, computes a minimal edit script
//! (inserts, removes, moves, and updates carrying a payload) and replays it
//! against a positional consumer such as a UI list, so the consumer can be
//! updated in place instead of rebuilt.
//!
//! The engine never sees items. A [`DiffCallback`] answers identity, content
//! equality and payload questions about index pairs, and a [`ListConsumer`]
//! receives the resulting positional edits.
//!
//! # Key Types
//!
//! - [`compute_diff`] / [`DiffResult`] -- Myers shortest-edit-script search plus optional move detection
//! - [`DiffCallback`] / [`Callbacks`] -- Caller-supplied comparisons
//! - [`ListConsumer`] / [`EditOp`] -- Positional edits in live index space
//! - [`ListModel`] -- Vector-backed consumer reusing old items
//!
//! # Example
//!
//! ```
//! use listsync_diff::{diff_by_key, DiffOptions, EditOp};
//!
//! let old = ["a", "b", "c"];
//! let new = ["a", "c", "b"];
//! let diff = diff_by_key(&old, &new, |s| *s, &DiffOptions::new().detect_moves(true)).unwrap();
//! assert_eq!(diff.operations(), vec![EditOp::Move { from: 1, to: 2 }]);
//! ```

mod batching;
pub mod callback;
pub mod consumer;
mod dispatch;
pub mod error;
mod matching;
pub mod model;
pub mod options;
pub mod result;
mod snake;

pub use callback::{Callbacks, DiffCallback};
pub use consumer::{EditOp, ListConsumer};
pub use error::{CallbackError, CallbackKind, ConsumerError, DiffError, Result};
pub use model::{ListModel, Slot};
pub use options::DiffOptions;
pub use result::{compute_diff, DiffResult};

/// Diff two slices, matching items by `key` and comparing content with `==`.
///
/// Updates carry no payload.
pub fn diff_by_key<T, K, F>(
    old: &[T],
    new: &[T],
    key: F,
    options: &DiffOptions,
) -> Result<DiffResult<()>>
where
    T: PartialEq,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let callbacks = Callbacks::new(|o, n| key(&old[o]) == key(&new[n]), |o, n| old[o] == new[n]);
    compute_diff(old.len(), new.len(), &callbacks, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// `(key, content)` pairs: identity is the key, equality is the pair.
    type Item = (u8, u8);

    fn diff_items(old: &[Item], new: &[Item], detect_moves: bool) -> DiffResult<(u8, u8)> {
        let cb = Callbacks::new(|o, n| old[o].0 == new[n].0, |o, n| old[o] == new[n])
            .with_payload(|o, n| (old[o].1, new[n].1));
        compute_diff(old.len(), new.len(), &cb, &DiffOptions::new().detect_moves(detect_moves))
            .unwrap()
    }

    fn items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec((0u8..10, 0u8..3), 0..24)
    }

    fn structural_count(ops: &[EditOp<(u8, u8)>]) -> usize {
        ops.iter()
            .map(|op| match op {
                EditOp::Insert { count, .. } | EditOp::Remove { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }

    proptest! {
        #[test]
        fn dispatch_reproduces_new_sequence(
            old in items(),
            new in items(),
            detect_moves in any::<bool>(),
        ) {
            let result = diff_items(&old, &new, detect_moves);
            let mut model = ListModel::new(old.iter().copied());
            result.dispatch(&mut model).unwrap();

            prop_assert_eq!(model.len(), new.len());
            for (i, slot) in model.slots().iter().enumerate() {
                let partner = result.new_position_to_old(i).unwrap();
                match slot {
                    Slot::Kept(item) => {
                        prop_assert_eq!(partner.map(|j| old[j]), Some(*item));
                        prop_assert_eq!(*item, new[i]);
                    }
                    Slot::Stale(item) => {
                        prop_assert_eq!(partner.map(|j| old[j]), Some(*item));
                        prop_assert_eq!(item.0, new[i].0);
                        prop_assert_ne!(*item, new[i]);
                    }
                    Slot::Pending => {
                        prop_assert_eq!(partner, None);
                    }
                }
            }
            prop_assert_eq!(model.into_items(&new).unwrap(), new);
        }

        #[test]
        fn replaying_recorded_operations_matches_dispatch(
            old in items(),
            new in items(),
            detect_moves in any::<bool>(),
        ) {
            let result = diff_items(&old, &new, detect_moves);
            let mut direct = ListModel::new(old.iter().copied());
            result.dispatch(&mut direct).unwrap();

            let mut replayed = ListModel::new(old.iter().copied());
            for op in result.operations() {
                op.apply_to(&mut replayed).unwrap();
            }
            prop_assert_eq!(direct, replayed);
        }

        #[test]
        fn identical_sequences_need_no_operations(seq in items(), detect_moves in any::<bool>()) {
            prop_assert!(diff_items(&seq, &seq, detect_moves).operations().is_empty());
        }

        #[test]
        fn structural_edits_are_bounded(old in items(), new in items()) {
            let ops = diff_items(&old, &new, false).operations();
            prop_assert!(structural_count(&ops) <= old.len() + new.len());
            let has_move = ops.iter().any(|op| matches!(op, EditOp::Move { .. }));
            prop_assert!(!has_move);
        }

        #[test]
        fn one_inserted_element_is_one_insert(
            seq in prop::collection::vec((0u8..10, 0u8..3), 0..24),
            at in any::<prop::sample::Index>(),
        ) {
            let mut new = seq.clone();
            new.insert(at.index(seq.len() + 1), (99, 0));
            let ops = diff_items(&seq, &new, false).operations();
            prop_assert_eq!(ops.len(), 1);
            let single_insert = matches!(ops[0], EditOp::Insert { count: 1, .. });
            prop_assert!(single_insert);
        }

        #[test]
        fn permutations_are_pure_moves(
            (old, new) in (1usize..20).prop_flat_map(|n| {
                let keys: Vec<Item> = (0..n as u8).map(|k| (k, 0)).collect();
                (Just(keys.clone()), Just(keys).prop_shuffle())
            }),
        ) {
            let result = diff_items(&old, &new, true);
            let ops = result.operations();
            let all_moves = ops.iter().all(|op| matches!(op, EditOp::Move { .. }));
            prop_assert!(all_moves);

            let mut model = ListModel::new(old.iter().copied());
            result.dispatch(&mut model).unwrap();
            let order: Vec<Item> = model.slots().iter().filter_map(|s| s.item().copied()).collect();
            prop_assert_eq!(order, new);
        }

        #[test]
        fn computation_is_deterministic(old in items(), new in items(), detect_moves in any::<bool>()) {
            let first = diff_items(&old, &new, detect_moves).operations();
            let second = diff_items(&old, &new, detect_moves).operations();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn payload_comes_from_the_callback() {
        let old = [(1, 1), (2, 0)];
        let new = [(1, 2), (2, 0)];
        let ops = diff_items(&old, &new, false).operations();
        assert_eq!(
            ops,
            vec![EditOp::Update {
                index: 0,
                count: 1,
                payload: Some((1, 2)),
            }]
        );
    }

    #[test]
    fn diff_by_key_ignores_payloads() {
        let old = [("a", 1), ("b", 1)];
        let new = [("b", 2), ("a", 1)];
        let diff = diff_by_key(&old, &new, |item| item.0, &DiffOptions::new().detect_moves(true))
            .unwrap();

        let mut model = ListModel::new(old);
        diff.dispatch(&mut model).unwrap();
        assert_eq!(model.into_items(&new).unwrap(), new.to_vec());
        assert!(diff.operations().iter().any(|op| matches!(
            op,
            EditOp::Update { payload: None, .. }
        )));
    }
}
