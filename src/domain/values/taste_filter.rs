use serde::{Deserialize, Serialize};

/// Genre/platform preferences chosen once during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteFilter {
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
}

impl TasteFilter {
    pub fn new(genres: Vec<String>, platforms: Vec<String>) -> Self {
        Self { genres, platforms }
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.platforms.is_empty()
    }
}
