//! Caller-supplied comparison callbacks.
//!
//! The engine never looks at items. It asks a [`DiffCallback`] three
//! questions about index pairs: are these the same entity, is their content
//! unchanged, and (for changed pairs only) what changed.

use crate::error::{CallbackError, CallbackKind, DiffError, Result};

/// Identity, equality and payload queries over an old/new index pair.
///
/// Implementations must be deterministic and side-effect free. The engine may
/// ask about the same pair many times and in any order.
pub trait DiffCallback {
    /// Description of what changed between two matched items.
    type Payload;

    /// Whether `old` and `new` are the same logical entity.
    fn are_items_the_same(&self, old: usize, new: usize) -> std::result::Result<bool, CallbackError>;

    /// Whether two identity-matched items have unchanged content.
    ///
    /// Only called on pairs for which [`are_items_the_same`] returned `true`.
    ///
    /// [`are_items_the_same`]: DiffCallback::are_items_the_same
    fn are_contents_the_same(
        &self,
        old: usize,
        new: usize,
    ) -> std::result::Result<bool, CallbackError>;

    /// Payload attached to the update of an identity-matched, changed pair.
    fn change_payload(
        &self,
        _old: usize,
        _new: usize,
    ) -> std::result::Result<Option<Self::Payload>, CallbackError> {
        Ok(None)
    }
}

impl<C: DiffCallback + ?Sized> DiffCallback for &C {
    type Payload = C::Payload;

    fn are_items_the_same(&self, old: usize, new: usize) -> std::result::Result<bool, CallbackError> {
        (**self).are_items_the_same(old, new)
    }

    fn are_contents_the_same(
        &self,
        old: usize,
        new: usize,
    ) -> std::result::Result<bool, CallbackError> {
        (**self).are_contents_the_same(old, new)
    }

    fn change_payload(
        &self,
        old: usize,
        new: usize,
    ) -> std::result::Result<Option<Self::Payload>, CallbackError> {
        (**self).change_payload(old, new)
    }
}

/// A [`DiffCallback`] assembled from closures.
///
/// ```
/// use listsync_diff::{compute_diff, Callbacks, DiffOptions};
///
/// let old = [("a", 1), ("b", 1)];
/// let new = [("a", 2), ("b", 1)];
/// let cb = Callbacks::new(
///     |o, n| old[o].0 == new[n].0,
///     |o, n| old[o] == new[n],
/// )
/// .with_payload(|o, n| (old[o].1, new[n].1));
///
/// let diff = compute_diff(old.len(), new.len(), &cb, &DiffOptions::default()).unwrap();
/// assert_eq!(diff.operations().len(), 1);
/// ```
pub struct Callbacks<I, E, F> {
    identity: I,
    equality: E,
    payload: F,
}

fn no_payload(_old: usize, _new: usize) -> Option<()> {
    None
}

impl<I, E> Callbacks<I, E, fn(usize, usize) -> Option<()>>
where
    I: Fn(usize, usize) -> bool,
    E: Fn(usize, usize) -> bool,
{
    /// Callbacks with identity and equality only; updates carry no payload.
    pub fn new(identity: I, equality: E) -> Self {
        Self {
            identity,
            equality,
            payload: no_payload,
        }
    }
}

impl<I, E, F> Callbacks<I, E, F> {
    /// Attach a payload function, evaluated for identity-matched changed pairs.
    pub fn with_payload<G, P>(self, payload: G) -> Callbacks<I, E, impl Fn(usize, usize) -> Option<P>>
    where
        G: Fn(usize, usize) -> P,
    {
        Callbacks {
            identity: self.identity,
            equality: self.equality,
            payload: move |old, new| Some(payload(old, new)),
        }
    }
}

impl<I, E, F, P> DiffCallback for Callbacks<I, E, F>
where
    I: Fn(usize, usize) -> bool,
    E: Fn(usize, usize) -> bool,
    F: Fn(usize, usize) -> Option<P>,
{
    type Payload = P;

    fn are_items_the_same(&self, old: usize, new: usize) -> std::result::Result<bool, CallbackError> {
        Ok((self.identity)(old, new))
    }

    fn are_contents_the_same(
        &self,
        old: usize,
        new: usize,
    ) -> std::result::Result<bool, CallbackError> {
        Ok((self.equality)(old, new))
    }

    fn change_payload(
        &self,
        old: usize,
        new: usize,
    ) -> std::result::Result<Option<P>, CallbackError> {
        Ok((self.payload)(old, new))
    }
}

// Engine-side wrappers that attach the index pair to callback failures.

pub(crate) fn same_item<C: DiffCallback + ?Sized>(cb: &C, old: usize, new: usize) -> Result<bool> {
    cb.are_items_the_same(old, new)
        .map_err(|source| failure(CallbackKind::Identity, old, new, source))
}

pub(crate) fn same_content<C: DiffCallback + ?Sized>(
    cb: &C,
    old: usize,
    new: usize,
) -> Result<bool> {
    cb.are_contents_the_same(old, new)
        .map_err(|source| failure(CallbackKind::Equality, old, new, source))
}

pub(crate) fn payload<C: DiffCallback + ?Sized>(
    cb: &C,
    old: usize,
    new: usize,
) -> Result<Option<C::Payload>> {
    cb.change_payload(old, new)
        .map_err(|source| failure(CallbackKind::Payload, old, new, source))
}

fn failure(kind: CallbackKind, old_index: usize, new_index: usize, source: CallbackError) -> DiffError {
    DiffError::Callback {
        kind,
        old_index,
        new_index,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_answer_queries() {
        let old = [1, 2, 3];
        let new = [3, 2];
        let cb = Callbacks::new(|o, n| old[o] == new[n], |o, n| old[o] == new[n]);

        assert!(cb.are_items_the_same(2, 0).unwrap());
        assert!(!cb.are_items_the_same(0, 0).unwrap());
        assert_eq!(cb.change_payload(1, 1).unwrap(), None);
    }

    #[test]
    fn payload_closure_is_wrapped() {
        let cb = Callbacks::new(|_, _| true, |_, _| false).with_payload(|o, n| (o, n));
        assert_eq!(cb.change_payload(4, 5).unwrap(), Some((4, 5)));
    }

    struct Refusing;

    impl DiffCallback for Refusing {
        type Payload = ();

        fn are_items_the_same(&self, _: usize, _: usize) -> std::result::Result<bool, CallbackError> {
            Err(CallbackError::new("no identity"))
        }

        fn are_contents_the_same(
            &self,
            _: usize,
            _: usize,
        ) -> std::result::Result<bool, CallbackError> {
            Ok(true)
        }
    }

    #[test]
    fn failures_carry_kind_and_pair() {
        let err = same_item(&Refusing, 3, 9).unwrap_err();
        match err {
            DiffError::Callback {
                kind,
                old_index,
                new_index,
                ..
            } => {
                assert_eq!(kind, CallbackKind::Identity);
                assert_eq!((old_index, new_index), (3, 9));
            }
            other => panic!("expected Callback, got {:?}", other),
        }
    }
}
