use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's decision on the current queue head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swipe {
    /// Swipe left: not interested.
    Nope,
    /// Swipe right: like. Triggers a match scan against the friend roster.
    Like,
    /// Swipe up: add to "my list".
    Save,
}

impl fmt::Display for Swipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Swipe::Nope => write!(f, "nope"),
            Swipe::Like => write!(f, "like"),
            Swipe::Save => write!(f, "save"),
        }
    }
}

impl FromStr for Swipe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nope" | "n" | "left" => Ok(Swipe::Nope),
            "like" | "l" | "right" => Ok(Swipe::Like),
            "save" | "s" | "up" => Ok(Swipe::Save),
            _ => Err(format!("Unknown swipe: {s}. Use nope, like or save")),
        }
    }
}
