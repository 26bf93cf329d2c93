use crate::domain::entities::movie::Movie;
use crate::domain::ports::recommendation_source::RecommendationSource;
use crate::domain::values::taste_filter::TasteFilter;

/// Deterministic built-in catalog: the offline/sample-data recommendation
/// path and the default source when no API key is configured.
pub struct CatalogSource;

fn entry(
    id: i64,
    title: &str,
    genres: &[&str],
    platforms: &[&str],
    rating: f64,
    year: i32,
    synopsis: &str,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster: format!("https://image.tmdb.org/t/p/w500/cineboard-{id}.jpg"),
        genres: genres.iter().map(|s| s.to_string()).collect(),
        platforms: platforms.iter().map(|s| s.to_string()).collect(),
        rating,
        year,
        synopsis: synopsis.to_string(),
    }
}

pub fn catalog() -> Vec<Movie> {
    vec![
        entry(1, "Inception", &["Action", "Sci-Fi"], &["Netflix", "Max"], 8.8, 2010,
            "A thief plants an idea so deep that even the audience wakes up confused."),
        entry(2, "The Matrix", &["Action", "Sci-Fi"], &["Max"], 8.7, 1999,
            "An office drone learns his commute is optional and reality is negotiable."),
        entry(3, "Parasite", &["Thriller", "Drama"], &["Prime Video"], 8.6, 2019,
            "A family interview process goes extremely well, then extremely not."),
        entry(4, "The Godfather", &["Drama"], &["Netflix"], 9.2, 1972,
            "A reluctant son discovers the family business has aggressive retention policies."),
        entry(5, "Pulp Fiction", &["Thriller"], &["Max"], 8.9, 1994,
            "Several very bad days told in the wrong order, on purpose."),
        entry(6, "Forrest Gump", &["Comedy", "Drama", "Romance"], &["Netflix"], 8.8, 1994,
            "One man accidentally attends all of twentieth-century history."),
        entry(7, "Spirited Away", &["Animation", "Romance"], &["Max"], 8.6, 2001,
            "A girl takes a bathhouse job to un-pig her parents."),
        entry(8, "The Dark Knight", &["Action", "Thriller"], &["Netflix", "Max"], 9.0, 2008,
            "A billionaire and a clown disagree about city planning."),
        entry(9, "Coco", &["Animation", "Comedy"], &["Disney+"], 8.4, 2017,
            "A boy crashes the afterlife to settle a family dispute about guitars."),
        entry(10, "Up", &["Animation", "Comedy", "Drama"], &["Disney+"], 8.3, 2009,
            "A grumpy widower commits aviation crimes with balloons."),
        entry(11, "The Silence of the Lambs", &["Horror", "Thriller"], &["Prime Video"], 8.6, 1991,
            "A trainee agent's informant has concerning dinner preferences."),
        entry(12, "Get Out", &["Horror", "Thriller"], &["Netflix"], 7.7, 2017,
            "Meeting the in-laws goes worse than statistically expected."),
        entry(13, "The Hangover", &["Comedy"], &["Netflix", "Max"], 7.7, 2009,
            "Three men reverse-engineer the worst night of their lives."),
        entry(14, "Bridesmaids", &["Comedy", "Romance"], &["Prime Video"], 6.8, 2011,
            "A maid of honor wages a one-woman war on wedding planning."),
        entry(15, "Blade Runner 2049", &["Sci-Fi", "Thriller"], &["Netflix"], 8.0, 2017,
            "A replicant cop digs up a secret best left composted."),
    ]
}

#[async_trait::async_trait]
impl RecommendationSource for CatalogSource {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn recommend(
        &self,
        count: usize,
        filter: Option<&TasteFilter>,
        exclude_titles: &[String],
    ) -> Result<Vec<Movie>, String> {
        let picks = catalog()
            .into_iter()
            .filter(|m| filter.map_or(true, |f| m.matches_filter(f)))
            .filter(|m| !exclude_titles.iter().any(|t| t == &m.title))
            .take(count)
            .collect();
        Ok(picks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn filters_require_genre_and_platform_overlap() {
        let filter = TasteFilter::new(vec!["Animation".into()], vec!["Disney+".into()]);
        let picks = CatalogSource
            .recommend(10, Some(&filter), &[])
            .await
            .unwrap();
        assert!(!picks.is_empty());
        assert!(picks.iter().all(|m| {
            m.genres.iter().any(|g| g == "Animation") && m.platforms.iter().any(|p| p == "Disney+")
        }));
    }

    #[tokio::test]
    async fn unfiltered_request_spans_all_genres() {
        let picks = CatalogSource.recommend(100, None, &[]).await.unwrap();
        assert_eq!(picks.len(), catalog().len());
    }

    #[tokio::test]
    async fn excluded_titles_are_skipped() {
        let picks = CatalogSource
            .recommend(100, None, &["Inception".to_string(), "Coco".to_string()])
            .await
            .unwrap();
        assert_eq!(picks.len(), catalog().len() - 2);
        assert!(picks.iter().all(|m| m.title != "Inception" && m.title != "Coco"));
    }
}
