use crate::domain::entities::movie::Movie;
use crate::domain::values::taste_filter::TasteFilter;

/// Supplies candidate movies for the swipe feed.
///
/// Implementations may return duplicates, entries already excluded, or
/// malformed records; the feed filters blank titles and dedups by title
/// before anything reaches the queue. `filter = None` is the widened,
/// any-genre request used once the session has exhausted the user's
/// original preferences.
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    async fn recommend(
        &self,
        count: usize,
        filter: Option<&TasteFilter>,
        exclude_titles: &[String],
    ) -> Result<Vec<Movie>, String>;
}
