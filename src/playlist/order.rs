//! Sort criteria for the playlist view.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::track::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortCriterion {
    /// Keep insertion order.
    #[default]
    Default,
    Author,
    Title,
    Album,
    Duration,
}

impl SortCriterion {
    /// Compare two tracks under this criterion. Total and deterministic; ties
    /// are left to the (stable) sort.
    pub fn compare(self, a: &Track, b: &Track) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::Author => a.author().cmp(b.author()),
            Self::Title => a.title().cmp(b.title()),
            Self::Album => by_album(a, b),
            Self::Duration => {
                let da = a.duration().unwrap_or_default();
                let db = b.duration().unwrap_or_default();
                da.cmp(&db)
            }
        }
    }

    /// Like `compare`, for callers that may hold an absent track.
    pub fn try_compare(self, a: Option<&Track>, b: Option<&Track>) -> Result<Ordering> {
        match (a, b) {
            (Some(a), Some(b)) => Ok(self.compare(a, b)),
            _ => Err(Error::InvalidComparison("cannot compare against a missing track")),
        }
    }

    /// The next criterion in display order, wrapping back to `Default`.
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::Author,
            Self::Author => Self::Title,
            Self::Title => Self::Album,
            Self::Album => Self::Duration,
            Self::Duration => Self::Default,
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Author => "author",
            Self::Title => "title",
            Self::Album => "album",
            Self::Duration => "duration",
        })
    }
}

// Untagged < tagged with empty album < tagged by album, then title.
fn by_album(a: &Track, b: &Track) -> Ordering {
    match (a.album(), b.album()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x.is_empty(), y.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => x.cmp(y).then_with(|| a.title().cmp(b.title())),
        },
    }
}
