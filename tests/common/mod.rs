//! Shared test helpers and recommendation-source doubles.
#![allow(dead_code)]

use cineboard::application::feed::FeedConfig;
use cineboard::domain::entities::movie::Movie;
use cineboard::domain::ports::recommendation_source::RecommendationSource;
use cineboard::domain::values::taste_filter::TasteFilter;
use cineboard::CineBoard;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn make_movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster: format!("https://posters.test/{id}.jpg"),
        genres: vec!["Drama".to_string()],
        platforms: vec!["Netflix".to_string()],
        rating: 7.5,
        year: 2021,
        synopsis: "A test movie.".to_string(),
    }
}

/// `count` movies titled "Movie <n>" with ids starting at `first_id`.
pub fn batch(first_id: i64, count: usize) -> Vec<Movie> {
    (0..count as i64)
        .map(|i| make_movie(first_id + i, &format!("Movie {}", first_id + i)))
        .collect()
}

pub fn drama_filter() -> TasteFilter {
    TasteFilter::new(vec!["Drama".to_string()], vec!["Netflix".to_string()])
}

/// No cool-down so tests can refill back to back.
pub fn test_config() -> FeedConfig {
    FeedConfig {
        refill_cooldown: Duration::ZERO,
        ..FeedConfig::default()
    }
}

pub fn setup(source: Arc<dyn RecommendationSource>) -> CineBoard {
    CineBoard::with_config(":memory:", source, test_config()).unwrap()
}

pub fn setup_with(source: Arc<dyn RecommendationSource>, config: FeedConfig) -> CineBoard {
    CineBoard::with_config(":memory:", source, config).unwrap()
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub count: usize,
    pub filtered: bool,
    pub excluded: Vec<String>,
}

/// Replays queued responses in order; unqueued calls return an empty batch.
/// Every request is recorded for assertions.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Movie>, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn push_ok(&self, movies: Vec<Movie>) {
        self.responses.lock().unwrap().push_back(Ok(movies));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl RecommendationSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn recommend(
        &self,
        count: usize,
        filter: Option<&TasteFilter>,
        exclude_titles: &[String],
    ) -> Result<Vec<Movie>, String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            count,
            filtered: filter.is_some(),
            excluded: exclude_titles.to_vec(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }
}

/// Like `ScriptedSource` but calls from `gate_after` onward park until
/// `release` is called, so tests can hold a request in flight.
pub struct BlockingSource {
    batches: Mutex<VecDeque<Vec<Movie>>>,
    calls: AtomicUsize,
    gate_after: usize,
    gate: Notify,
}

impl BlockingSource {
    pub fn new(gate_after: usize, batches: Vec<Vec<Movie>>) -> Arc<Self> {
        Arc::new(Self {
            batches: Mutex::new(batches.into()),
            calls: AtomicUsize::new(0),
            gate_after,
            gate: Notify::new(),
        })
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecommendationSource for BlockingSource {
    fn name(&self) -> &str {
        "blocking"
    }

    async fn recommend(
        &self,
        _count: usize,
        _filter: Option<&TasteFilter>,
        _exclude_titles: &[String],
    ) -> Result<Vec<Movie>, String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.gate_after {
            self.gate.notified().await;
        }
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }
}
