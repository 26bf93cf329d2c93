use crate::application::matches::MatchScan;
use crate::domain::entities::movie::Movie;
use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::recommendation_source::RecommendationSource;
use crate::domain::values::feed_status::FeedStatus;
use crate::domain::values::match_event::MatchEvent;
use crate::domain::values::swipe::Swipe;
use crate::domain::values::taste_filter::TasteFilter;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Tuning knobs for the swipe feed. Defaults mirror the production app.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Cards requested when a session starts.
    pub initial_count: usize,
    /// Cards requested per replenishment.
    pub refill_count: usize,
    /// Refill triggers once the queue shrinks to this length.
    pub low_watermark: usize,
    /// Once this many distinct titles have been shown, refills drop the
    /// genre/platform filter and search everything.
    pub expansion_threshold: usize,
    /// Minimum pause between completed refills, so rapid swiping does not
    /// hammer the provider.
    pub refill_cooldown: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_count: 10,
            refill_count: 5,
            low_watermark: 3,
            expansion_threshold: 15,
            refill_cooldown: Duration::from_millis(1000),
        }
    }
}

/// What a single swipe produced.
#[derive(Debug, Clone, Serialize)]
pub struct SwipeOutcome {
    pub card: Movie,
    /// Present only on a like that a peer shares. At most one per swipe.
    pub matched: Option<MatchEvent>,
    /// Queue length after the swipe (and any refill it triggered).
    pub remaining: usize,
    /// Cards added by a refill this swipe triggered, notice included.
    pub refilled: usize,
}

/// The swipe feed: an ordered queue of candidate movies, low-watermark
/// replenishment, one-shot search-expansion notice, and per-card
/// disposition. All session state lives behind one mutex; the only
/// suspension point is the provider call, during which no lock is held.
pub struct SwipeFeed {
    session: Arc<Mutex<Session>>,
    source: Arc<dyn RecommendationSource>,
    matcher: Arc<MatchScan>,
    config: FeedConfig,
    /// Re-entrancy guard: set before a refill request is issued, cleared
    /// only after its response is processed. Concurrent swipes keep
    /// draining the queue but never start a second refill.
    refill_inflight: AtomicBool,
    last_refill_done: Mutex<Option<Instant>>,
}

impl SwipeFeed {
    pub fn new(
        session: Arc<Mutex<Session>>,
        source: Arc<dyn RecommendationSource>,
        matcher: Arc<MatchScan>,
        config: FeedConfig,
    ) -> Self {
        Self {
            session,
            source,
            matcher,
            config,
            refill_inflight: AtomicBool::new(false),
            last_refill_done: Mutex::new(None),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Begin a session: reset all state, fetch the opening batch with the
    /// user's preferences. A provider failure leaves the queue empty and is
    /// reported as zero cards, not an error. Returns how many cards were
    /// queued.
    pub async fn start(&self, taste: TasteFilter) -> Result<usize, DomainError> {
        let generation = {
            let mut s = self.session();
            s.reset();
            s.taste = taste.clone();
            s.generation
        };

        let batch = match self
            .source
            .recommend(self.config.initial_count, Some(&taste), &[])
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "initial fetch failed");
                vec![]
            }
        };

        let mut s = self.session();
        if s.generation != generation {
            debug!("discarding initial batch for a superseded session");
            return Ok(0);
        }
        let fresh = admit(&mut s.shown_titles, batch);
        let queued = fresh.len();
        // Reverse so the first recommended card sits at the back of the
        // vec, which is the queue head.
        s.queue = fresh.into_iter().rev().collect();
        Ok(queued)
    }

    /// Decide on the current head. `Save` copies the card to the session's
    /// saved list, `Like` runs a match scan against the friend roster; the
    /// notice pseudo-card has no disposition side effects. Dropping to the
    /// low watermark triggers a refill before this call returns.
    pub async fn swipe(&self, direction: Swipe) -> Result<SwipeOutcome, DomainError> {
        let (card, remaining) = {
            let mut s = self.session();
            let card = s
                .queue
                .pop()
                .ok_or_else(|| DomainError::NotFound("no card left to swipe".into()))?;
            if direction == Swipe::Save && !card.is_notice() {
                s.saved.push(card.clone());
            }
            (card, s.queue.len())
        };

        let matched = if direction == Swipe::Like && !card.is_notice() {
            self.matcher.check(&card)
        } else {
            None
        };

        let refilled = if remaining <= self.config.low_watermark {
            self.refill().await
        } else {
            0
        };

        Ok(SwipeOutcome {
            card,
            matched,
            remaining: self.session().queue.len(),
            refilled,
        })
    }

    /// Fetch more cards, excluding every title shown this session. Past the
    /// expansion threshold the request is unfiltered, and the first such
    /// request also queues the one-time notice card ahead of the new batch.
    /// Single-flight: if a refill is already running this returns
    /// immediately. Returns how many cards were added.
    pub async fn refill(&self) -> usize {
        if self
            .refill_inflight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return 0;
        }

        let cooled_down = {
            let last = self
                .last_refill_done
                .lock()
                .unwrap_or_else(|p| p.into_inner());
            last.map_or(true, |at| at.elapsed() >= self.config.refill_cooldown)
        };
        if !cooled_down {
            self.refill_inflight.store(false, Ordering::SeqCst);
            return 0;
        }

        let (generation, widen, taste, exclude) = {
            let s = self.session();
            let widen = s.shown_titles.len() >= self.config.expansion_threshold;
            let exclude: Vec<String> = s.shown_titles.iter().cloned().collect();
            (s.generation, widen, s.taste.clone(), exclude)
        };
        debug!(
            source = self.source.name(),
            widen,
            excluded = exclude.len(),
            "refilling feed"
        );

        let filter = if widen { None } else { Some(&taste) };
        let batch = match self
            .source
            .recommend(self.config.refill_count, filter, &exclude)
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "refill failed");
                vec![]
            }
        };

        let mut s = self.session();
        if s.generation != generation {
            // Session was reset while the request was outstanding.
            debug!("discarding refill response from a superseded session");
            self.refill_inflight.store(false, Ordering::SeqCst);
            return 0;
        }

        let fresh = admit(&mut s.shown_titles, batch);
        let mut added = fresh.len();
        // Splice at the front: cards already queued are served first, then
        // the notice (if this is the first widened refill), then the new
        // batch in fetch order.
        let mut rebuilt: Vec<Movie> = fresh.into_iter().rev().collect();
        if widen && !s.expansion_notified {
            rebuilt.push(Movie::expansion_notice());
            s.expansion_notified = true;
            added += 1;
        }
        rebuilt.append(&mut s.queue);
        s.queue = rebuilt;
        drop(s);

        *self
            .last_refill_done
            .lock()
            .unwrap_or_else(|p| p.into_inner()) = Some(Instant::now());
        self.refill_inflight.store(false, Ordering::SeqCst);
        added
    }

    pub fn status(&self) -> FeedStatus {
        if !self.session().queue.is_empty() {
            FeedStatus::Ready
        } else if self.refill_inflight.load(Ordering::SeqCst) {
            FeedStatus::Refilling
        } else {
            FeedStatus::Exhausted
        }
    }

    /// Snapshot of the queue, head last.
    pub fn queue(&self) -> Vec<Movie> {
        self.session().queue.clone()
    }

    pub fn head(&self) -> Option<Movie> {
        self.session().head().cloned()
    }

    pub fn saved(&self) -> Vec<Movie> {
        self.session().saved.clone()
    }

    /// Logout: clears queue, shown titles, expansion flag, liked and saved
    /// lists, and invalidates any in-flight provider request.
    pub fn reset(&self) {
        self.session().reset();
    }
}

/// Boundary filter for provider batches: drop records with blank titles,
/// drop titles already shown, record the survivors in the registry. Dedup
/// identity is the trimmed title; ids are not trusted to be unique.
fn admit(shown: &mut HashSet<String>, batch: Vec<Movie>) -> Vec<Movie> {
    let mut fresh = Vec::new();
    for movie in batch {
        let title = movie.title.trim().to_string();
        if title.is_empty() {
            continue;
        }
        if shown.insert(title) {
            fresh.push(movie);
        }
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster: String::new(),
            genres: vec![],
            platforms: vec![],
            rating: 7.0,
            year: 2020,
            synopsis: String::new(),
        }
    }

    #[test]
    fn admit_drops_blank_titles_and_duplicates() {
        let mut shown = HashSet::new();
        let batch = vec![
            movie(1, "Inception"),
            movie(2, ""),
            movie(3, "  "),
            movie(4, "Inception"),
            movie(5, "Coco"),
        ];
        let fresh = admit(&mut shown, batch);
        assert_eq!(fresh.len(), 2);
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn admit_is_idempotent_across_calls() {
        let mut shown = HashSet::new();
        let batch = vec![movie(1, "Up"), movie(2, "Coco")];
        assert_eq!(admit(&mut shown, batch.clone()).len(), 2);
        assert_eq!(admit(&mut shown, batch).len(), 0);
        assert_eq!(shown.len(), 2);
    }
}
