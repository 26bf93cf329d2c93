pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::feed::{FeedConfig, SwipeFeed, SwipeOutcome};
use crate::application::friends::FriendBook;
use crate::application::matches::MatchScan;
use crate::domain::entities::friend::{ChatMessage, Friend};
use crate::domain::entities::movie::Movie;
use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::friend_repository::FriendRepository;
use crate::domain::ports::recommendation_source::RecommendationSource;
use crate::domain::values::feed_status::FeedStatus;
use crate::domain::values::swipe::Swipe;
use crate::domain::values::taste_filter::TasteFilter;
use crate::infrastructure::providers::catalog::CatalogSource;
use crate::infrastructure::providers::gemini::GeminiSource;
use crate::infrastructure::sqlite::friend_repo::SqliteFriendRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub struct CineBoard {
    session: Arc<Mutex<Session>>,
    feed: SwipeFeed,
    friends: Arc<FriendBook>,
}

impl CineBoard {
    /// Wire up with the source named by `CINEBOARD_SOURCE` (gemini needs
    /// `CINEBOARD_API_KEY`; anything else falls back to the built-in
    /// catalog).
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let provider = std::env::var("CINEBOARD_SOURCE").unwrap_or_else(|_| "catalog".into());
        let api_key = std::env::var("CINEBOARD_API_KEY").unwrap_or_default();
        let model = std::env::var("CINEBOARD_MODEL").ok();

        let source: Arc<dyn RecommendationSource> = match provider.as_str() {
            "gemini" if !api_key.is_empty() => Arc::new(GeminiSource::new(api_key, model)),
            _ => Arc::new(CatalogSource),
        };

        Self::with_providers(db_path, source)
    }

    pub fn with_providers(
        db_path: &str,
        source: Arc<dyn RecommendationSource>,
    ) -> Result<Self, DomainError> {
        Self::with_config(db_path, source, FeedConfig::default())
    }

    pub fn with_config(
        db_path: &str,
        source: Arc<dyn RecommendationSource>,
        config: FeedConfig,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;
        let repo: Arc<dyn FriendRepository> = Arc::new(SqliteFriendRepo::new(conn));

        let session = Arc::new(Mutex::new(Session::default()));
        let friends = Arc::new(FriendBook::new(repo, session.clone()));
        let matcher = Arc::new(MatchScan::new(session.clone(), friends.clone()));
        let feed = SwipeFeed::new(session.clone(), source, matcher, config);

        Ok(Self {
            session,
            feed,
            friends,
        })
    }

    // Delegating methods

    /// Start a session with onboarding preferences; returns cards queued.
    pub async fn start_session(&self, taste: TasteFilter) -> Result<usize, DomainError> {
        self.feed.start(taste).await
    }

    pub async fn swipe(&self, direction: Swipe) -> Result<SwipeOutcome, DomainError> {
        self.feed.swipe(direction).await
    }

    pub async fn refill(&self) -> usize {
        self.feed.refill().await
    }

    pub fn status(&self) -> FeedStatus {
        self.feed.status()
    }

    pub fn queue(&self) -> Vec<Movie> {
        self.feed.queue()
    }

    pub fn head(&self) -> Option<Movie> {
        self.feed.head()
    }

    pub fn saved(&self) -> Vec<Movie> {
        self.feed.saved()
    }

    pub fn liked_ids(&self) -> Vec<i64> {
        let s = self.session.lock().unwrap_or_else(|p| p.into_inner());
        let mut ids: Vec<i64> = s.liked.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn logout(&self) {
        self.feed.reset();
    }

    pub fn friends(&self) -> Vec<Friend> {
        self.friends.list()
    }

    pub fn friend(&self, id: &str) -> Option<Friend> {
        self.friends.get(id)
    }

    pub fn add_friend(
        &self,
        name: String,
        photo: String,
        liked: Vec<i64>,
    ) -> Result<Friend, DomainError> {
        self.friends.add(name, photo, liked)
    }

    pub fn remove_friend(&self, id: &str) -> Result<(), DomainError> {
        self.friends.remove(id)
    }

    /// Send a chat message and wait out the peer's simulated reply. The
    /// reply is `None` when a logout cancelled it mid-typing.
    pub async fn chat(
        &self,
        friend_id: &str,
        body: String,
    ) -> Result<(ChatMessage, Option<ChatMessage>), DomainError> {
        let sent = self.friends.send_message(friend_id, body)?;
        let reply = self.friends.simulate_reply(friend_id).await?;
        Ok((sent, reply))
    }
}
