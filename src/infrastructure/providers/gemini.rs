use crate::domain::entities::movie::Movie;
use crate::domain::ports::recommendation_source::RecommendationSource;
use crate::domain::values::taste_filter::TasteFilter;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Recommendations from the Gemini generateContent API. The model is asked
/// for a raw JSON array; whatever comes back is coerced into strict `Movie`
/// values at this boundary and malformed records are dropped.
pub struct GeminiSource {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Loose shape of one generated record. Every field is optional; coercion
/// decides what survives.
#[derive(Debug, Deserialize)]
struct RawMovie {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    poster: Option<String>,
    #[serde(default)]
    genres: Option<Vec<String>>,
    #[serde(default)]
    platforms: Option<Vec<String>>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    synopsis: Option<String>,
}

impl RawMovie {
    /// None when the record has no usable title. A missing id gets a stable
    /// surrogate derived from the title, since ids also key match checks.
    fn coerce(self) -> Option<Movie> {
        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return None;
        }
        let id = self.id.unwrap_or_else(|| surrogate_id(&title));
        Some(Movie {
            id,
            title,
            poster: self.poster.unwrap_or_default(),
            genres: self.genres.unwrap_or_default(),
            platforms: self.platforms.unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
            year: self.year.unwrap_or(0),
            synopsis: self.synopsis.unwrap_or_default(),
        })
    }
}

fn surrogate_id(title: &str) -> i64 {
    // FNV-1a, masked positive so it can never collide with the notice id.
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in title.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash & 0x7fff_ffff_ffff_ffff) as i64
}

/// Models love wrapping JSON in markdown fences; unwrap before parsing.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a generated response body into movies, dropping malformed records.
pub fn parse_movies(text: &str) -> Result<Vec<Movie>, String> {
    let body = strip_code_fences(text);
    let raw: Vec<RawMovie> =
        serde_json::from_str(body).map_err(|e| format!("Bad recommendation JSON: {e}"))?;
    Ok(raw.into_iter().filter_map(RawMovie::coerce).collect())
}

impl GeminiSource {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| "gemini-2.5-flash".to_string()),
        }
    }

    fn prompt(&self, count: usize, filter: Option<&TasteFilter>, exclude: &[String]) -> String {
        let mut prompt = format!(
            "Recommend exactly {count} real movies as a JSON array. Each element must \
             have: id (TMDB numeric id), title, poster (TMDB w500 url), genres \
             (array), platforms (array from Netflix, Prime Video, Disney+, Max), \
             rating (0-10), year, synopsis (one playful sentence). Respond with the \
             JSON array only."
        );
        match filter {
            Some(f) if !f.is_empty() => {
                prompt.push_str(&format!(
                    " Only movies in genres [{}] available on [{}].",
                    f.genres.join(", "),
                    f.platforms.join(", ")
                ));
            }
            _ => prompt.push_str(" Any genre and platform is fine."),
        }
        if !exclude.is_empty() {
            prompt.push_str(&format!(
                " Never recommend these titles again: [{}].",
                exclude.join(", ")
            ));
        }
        prompt
    }
}

#[async_trait::async_trait]
impl RecommendationSource for GeminiSource {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn recommend(
        &self,
        count: usize,
        filter: Option<&TasteFilter>,
        exclude_titles: &[String],
    ) -> Result<Vec<Movie>, String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GeminiRequest {
                contents: vec![Content {
                    parts: vec![Part {
                        text: self.prompt(count, filter, exclude_titles),
                    }],
                }],
                generation_config: GenerationConfig {
                    response_mime_type: "application/json".to_string(),
                },
            })
            .send()
            .await
            .map_err(|e| format!("Gemini API error: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Gemini API {status}: {body}"));
        }

        let result: GeminiResponse = resp.json().await.map_err(|e| format!("Parse error: {e}"))?;
        let text = result
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .ok_or_else(|| "Gemini response had no text part".to_string())?;

        parse_movies(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_json() {
        let text = "```json\n[{\"id\": 603, \"title\": \"The Matrix\", \"rating\": 8.7}]\n```";
        let movies = parse_movies(text).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 603);
        assert_eq!(movies[0].title, "The Matrix");
        assert_eq!(movies[0].rating, 8.7);
    }

    #[test]
    fn drops_records_without_titles() {
        let text = r#"[{"id": 1}, {"title": "   "}, {"title": "Coco", "year": 2017}]"#;
        let movies = parse_movies(text).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Coco");
        assert_eq!(movies[0].year, 2017);
    }

    #[test]
    fn missing_id_gets_a_positive_surrogate() {
        let movies = parse_movies(r#"[{"title": "Up"}]"#).unwrap();
        assert!(movies[0].id > 0);
        // stable across calls
        let again = parse_movies(r#"[{"title": "Up"}]"#).unwrap();
        assert_eq!(movies[0].id, again[0].id);
    }

    #[test]
    fn rejects_non_array_payloads() {
        assert!(parse_movies("not json at all").is_err());
        assert!(parse_movies(r#"{"title": "Up"}"#).is_err());
    }
}
