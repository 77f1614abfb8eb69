//! The positional consumer contract and the edit operations handed to it.

use serde::{Deserialize, Serialize};

use crate::error::ConsumerError;

/// Receiver of positional edits, typically a presentation list.
///
/// Indices are always in the consumer's *current* index space: each call
/// sees the list as left by the previous calls of the same dispatch.
pub trait ListConsumer<P> {
    /// `count` new items were inserted at `index`.
    fn insert_range(&mut self, index: usize, count: usize) -> Result<(), ConsumerError>;

    /// `count` items starting at `index` were removed.
    fn remove_range(&mut self, index: usize, count: usize) -> Result<(), ConsumerError>;

    /// The item at `from` was taken out and re-inserted so that it ends up
    /// at `to`.
    fn move_item(&mut self, from: usize, to: usize) -> Result<(), ConsumerError>;

    /// `count` items starting at `index` changed content.
    fn update_range(
        &mut self,
        index: usize,
        count: usize,
        payload: Option<&P>,
    ) -> Result<(), ConsumerError>;
}

impl<P, C: ListConsumer<P> + ?Sized> ListConsumer<P> for &mut C {
    fn insert_range(&mut self, index: usize, count: usize) -> Result<(), ConsumerError> {
        (**self).insert_range(index, count)
    }

    fn remove_range(&mut self, index: usize, count: usize) -> Result<(), ConsumerError> {
        (**self).remove_range(index, count)
    }

    fn move_item(&mut self, from: usize, to: usize) -> Result<(), ConsumerError> {
        (**self).move_item(from, to)
    }

    fn update_range(
        &mut self,
        index: usize,
        count: usize,
        payload: Option<&P>,
    ) -> Result<(), ConsumerError> {
        (**self).update_range(index, count, payload)
    }
}

/// One step of an edit script, in the consumer's live index space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp<P> {
    /// Insert `count` items at `index`.
    Insert { index: usize, count: usize },
    /// Remove `count` items starting at `index`.
    Remove { index: usize, count: usize },
    /// Move the item at `from` so that it ends up at `to`.
    Move { from: usize, to: usize },
    /// `count` items starting at `index` changed; `payload` says how.
    Update {
        index: usize,
        count: usize,
        payload: Option<P>,
    },
}

impl<P> EditOp<P> {
    /// Replay this operation against a consumer.
    pub fn apply_to<C>(&self, consumer: &mut C) -> Result<(), ConsumerError>
    where
        C: ListConsumer<P> + ?Sized,
    {
        match self {
            Self::Insert { index, count } => consumer.insert_range(*index, *count),
            Self::Remove { index, count } => consumer.remove_range(*index, *count),
            Self::Move { from, to } => consumer.move_item(*from, *to),
            Self::Update {
                index,
                count,
                payload,
            } => consumer.update_range(*index, *count, payload.as_ref()),
        }
    }

    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Update { .. })
    }
}

/// Recording consumer: every call is appended as an [`EditOp`].
impl<P: Clone> ListConsumer<P> for Vec<EditOp<P>> {
    fn insert_range(&mut self, index: usize, count: usize) -> Result<(), ConsumerError> {
        self.push(EditOp::Insert { index, count });
        Ok(())
    }

    fn remove_range(&mut self, index: usize, count: usize) -> Result<(), ConsumerError> {
        self.push(EditOp::Remove { index, count });
        Ok(())
    }

    fn move_item(&mut self, from: usize, to: usize) -> Result<(), ConsumerError> {
        self.push(EditOp::Move { from, to });
        Ok(())
    }

    fn update_range(
        &mut self,
        index: usize,
        count: usize,
        payload: Option<&P>,
    ) -> Result<(), ConsumerError> {
        self.push(EditOp::Update {
            index,
            count,
            payload: payload.cloned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_captures_calls_in_order() {
        let mut ops: Vec<EditOp<&str>> = Vec::new();
        ops.insert_range(0, 2).unwrap();
        ops.move_item(3, 1).unwrap();
        ops.update_range(1, 1, Some(&"name")).unwrap();
        ops.remove_range(4, 1).unwrap();

        assert_eq!(
            ops,
            vec![
                EditOp::Insert { index: 0, count: 2 },
                EditOp::Move { from: 3, to: 1 },
                EditOp::Update {
                    index: 1,
                    count: 1,
                    payload: Some("name"),
                },
                EditOp::Remove { index: 4, count: 1 },
            ]
        );
    }

    #[test]
    fn apply_to_replays_a_script() {
        let script = vec![
            EditOp::Remove { index: 1, count: 2 },
            EditOp::Update {
                index: 0,
                count: 1,
                payload: Some(7u8),
            },
        ];
        let mut replayed: Vec<EditOp<u8>> = Vec::new();
        for op in &script {
            op.apply_to(&mut replayed).unwrap();
        }
        assert_eq!(replayed, script);
        assert!(script[0].is_structural());
        assert!(!script[1].is_structural());
    }
}
