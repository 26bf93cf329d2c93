use serde::{Deserialize, Serialize};

/// Raised when a liked movie is also on a peer's liked list. Ephemeral: at
/// most one per like, dismissed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    pub peer_name: String,
    pub peer_photo: String,
    pub movie_title: String,
    pub movie_poster: String,
}
