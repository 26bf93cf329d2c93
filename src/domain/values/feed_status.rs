use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable state of the swipe feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    /// A card is available to decide on.
    Ready,
    /// A replenishment request is in flight.
    Refilling,
    /// The queue drained and no refill is running. Not a crash state; the
    /// feed presents "nothing more to show".
    Exhausted,
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedStatus::Ready => write!(f, "ready"),
            FeedStatus::Refilling => write!(f, "refilling"),
            FeedStatus::Exhausted => write!(f, "exhausted"),
        }
    }
}
