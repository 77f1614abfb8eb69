//! The artist list sample: a favourites list edited between two versions.

use std::fmt;

use listsync_diff::{Callbacks, DiffCallback};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Interested,
    Like,
    Love,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interested => Ok(()),
            Self::Like => f.write_str("Like"),
            Self::Love => f.write_str("Love"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub name: &'static str,
    pub status: Status,
}

const fn artist(name: &'static str, status: Status) -> Artist {
    Artist { name, status }
}

pub fn original_list() -> Vec<Artist> {
    use Status::*;
    vec![
        artist("小倉唯", Love),
        artist("雨宮天", Love),
        artist("水瀬いのり", Like),
        artist("Trysail", Like),
        artist("Minami", Like),
        artist("佐倉綾音", Love),
        artist("田村ゆかり", Interested),
        artist("ワルキューレ", Interested),
        artist("水樹奈々", Interested),
    ]
}

/// The list after a round of edits: a reorder at the top, two status
/// changes, one removal, a swap near the end and a new entry.
pub fn edited_list() -> Vec<Artist> {
    use Status::*;
    vec![
        artist("雨宮天", Love),
        artist("小倉唯", Love),
        artist("水瀬いのり", Love),
        artist("Trysail", Like),
        artist("佐倉綾音", Love),
        artist("田村ゆかり", Like),
        artist("水樹奈々", Interested),
        artist("ワルキューレ", Interested),
        artist("三森すずこ", Like),
    ]
}

/// Identity by name, content by full equality, payload `(old, new)` status.
pub fn artist_callbacks<'a>(
    old: &'a [Artist],
    new: &'a [Artist],
) -> impl DiffCallback<Payload = (Status, Status)> + 'a {
    Callbacks::new(
        move |o, n| old[o].name == new[n].name,
        move |o, n| old[o] == new[n],
    )
    .with_payload(move |o, n| (old[o].status, new[n].status))
}
