use crate::domain::values::taste_filter::TasteFilter;
use serde::{Deserialize, Serialize};

/// Id carried by the synthetic expansion-notice card. Real catalog ids are
/// positive; the notice never participates in match checks or dedup.
pub const NOTICE_ID: i64 = -1;

const NOTICE_SYNOPSIS: &str = "We've run out of picks matching your exact tastes, \
so we're widening the search to every genre. Keep swiping!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub poster: String,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub rating: f64,
    pub year: i32,
    pub synopsis: String,
}

impl Movie {
    /// The one-time pseudo-card queued when recommendations widen beyond the
    /// user's original genre/platform preferences.
    pub fn expansion_notice() -> Self {
        Self {
            id: NOTICE_ID,
            title: "Expanding your horizons".to_string(),
            poster: String::new(),
            genres: vec![],
            platforms: vec![],
            rating: 0.0,
            year: 0,
            synopsis: NOTICE_SYNOPSIS.to_string(),
        }
    }

    pub fn is_notice(&self) -> bool {
        self.id == NOTICE_ID
    }

    /// Genre AND platform overlap, the same predicate the original sample
    /// catalog is filtered with. An empty filter side matches everything.
    pub fn matches_filter(&self, filter: &TasteFilter) -> bool {
        let genre_ok = filter.genres.is_empty()
            || self.genres.iter().any(|g| filter.genres.contains(g));
        let platform_ok = filter.platforms.is_empty()
            || self.platforms.iter().any(|p| filter.platforms.contains(p));
        genre_ok && platform_ok
    }
}
