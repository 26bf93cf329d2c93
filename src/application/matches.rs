use crate::application::friends::FriendBook;
use crate::domain::entities::movie::Movie;
use crate::domain::entities::session::Session;
use crate::domain::values::match_event::MatchEvent;
use std::sync::{Arc, Mutex};

/// Decides whether a just-liked movie should raise a match against the
/// friend roster.
pub struct MatchScan {
    session: Arc<Mutex<Session>>,
    friends: Arc<FriendBook>,
}

impl MatchScan {
    pub fn new(session: Arc<Mutex<Session>>, friends: Arc<FriendBook>) -> Self {
        Self { session, friends }
    }

    /// Record the like, then scan the roster in order and return the first
    /// peer who liked the same movie id. At most one event per call even
    /// when several peers match; peers' liked lists are never mutated.
    pub fn check(&self, movie: &Movie) -> Option<MatchEvent> {
        {
            let mut s = self.session.lock().unwrap_or_else(|p| p.into_inner());
            s.liked.insert(movie.id);
        }
        self.friends
            .list()
            .into_iter()
            .find(|peer| peer.has_liked(movie.id))
            .map(|peer| MatchEvent {
                peer_name: peer.name,
                peer_photo: peer.photo,
                movie_title: movie.title.clone(),
                movie_poster: movie.poster.clone(),
            })
    }
}
