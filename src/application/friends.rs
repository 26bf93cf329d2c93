use crate::domain::entities::friend::{ChatMessage, Friend};
use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::friend_repository::FriendRepository;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::warn;

const REPLIES: &[&str] = &[
    "Oh, I've been meaning to watch that one!",
    "Add it to the list, movie night soon?",
    "Ha, not sure that's my thing, convince me.",
    "Seen it twice already. So good.",
];

/// The friend roster with chat simulation. Loaded once from persistence;
/// an absent, empty or unreadable store silently falls back to the built-in
/// sample roster. Every mutation is written through to the repository.
pub struct FriendBook {
    repo: Arc<dyn FriendRepository>,
    session: Arc<Mutex<Session>>,
    roster: Mutex<Vec<Friend>>,
    typing_delay: Duration,
}

impl FriendBook {
    pub fn new(repo: Arc<dyn FriendRepository>, session: Arc<Mutex<Session>>) -> Self {
        Self::with_typing_delay(repo, session, Duration::from_millis(1200))
    }

    pub fn with_typing_delay(
        repo: Arc<dyn FriendRepository>,
        session: Arc<Mutex<Session>>,
        typing_delay: Duration,
    ) -> Self {
        let roster = match repo.load_all() {
            Ok(stored) if !stored.is_empty() => stored,
            Ok(_) => Self::seed(repo.as_ref()),
            Err(e) => {
                warn!(error = %e, "friend store unreadable, using built-in roster");
                builtin_roster()
            }
        };
        Self {
            repo,
            session,
            roster: Mutex::new(roster),
            typing_delay,
        }
    }

    /// First run: persist the sample roster so later sessions see it.
    fn seed(repo: &dyn FriendRepository) -> Vec<Friend> {
        let roster = builtin_roster();
        for friend in &roster {
            if let Err(e) = repo.upsert(friend) {
                warn!(error = %e, friend = %friend.name, "could not persist sample friend");
            }
        }
        roster
    }

    fn roster(&self) -> MutexGuard<'_, Vec<Friend>> {
        self.roster.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Roster snapshot in stable (insertion) order.
    pub fn list(&self) -> Vec<Friend> {
        self.roster().clone()
    }

    pub fn get(&self, id: &str) -> Option<Friend> {
        self.roster().iter().find(|f| f.id == id).cloned()
    }

    pub fn add(&self, name: String, photo: String, liked: Vec<i64>) -> Result<Friend, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput("friend name is empty".into()));
        }
        let friend = Friend::new(name, photo, liked);
        self.repo.upsert(&friend)?;
        self.roster().push(friend.clone());
        Ok(friend)
    }

    pub fn remove(&self, id: &str) -> Result<(), DomainError> {
        let mut roster = self.roster();
        let before = roster.len();
        roster.retain(|f| f.id != id);
        if roster.len() == before {
            return Err(DomainError::NotFound(format!("friend {id}")));
        }
        drop(roster);
        self.repo.delete(id)
    }

    /// Record an outgoing chat message.
    pub fn send_message(&self, friend_id: &str, body: String) -> Result<ChatMessage, DomainError> {
        let message = ChatMessage::new(true, body);
        let mut roster = self.roster();
        let friend = roster
            .iter_mut()
            .find(|f| f.id == friend_id)
            .ok_or_else(|| DomainError::NotFound(format!("friend {friend_id}")))?;
        friend.messages.push(message.clone());
        drop(roster);
        self.repo.add_message(friend_id, &message)?;
        Ok(message)
    }

    /// Simulated reply: waits out a typing pause, then appends a canned
    /// message. A logout while the peer is "typing" cancels the reply, so a
    /// fresh session never receives chat from the previous one.
    pub async fn simulate_reply(&self, friend_id: &str) -> Result<Option<ChatMessage>, DomainError> {
        let generation = {
            let s = self.session.lock().unwrap_or_else(|p| p.into_inner());
            s.generation
        };
        tokio::time::sleep(self.typing_delay).await;
        {
            let s = self.session.lock().unwrap_or_else(|p| p.into_inner());
            if s.generation != generation {
                return Ok(None);
            }
        }

        let reply = {
            let mut roster = self.roster();
            let friend = roster
                .iter_mut()
                .find(|f| f.id == friend_id)
                .ok_or_else(|| DomainError::NotFound(format!("friend {friend_id}")))?;
            let reply = ChatMessage::new(
                false,
                REPLIES[friend.messages.len() % REPLIES.len()].to_string(),
            );
            friend.messages.push(reply.clone());
            reply
        };
        self.repo.add_message(friend_id, &reply)?;
        Ok(Some(reply))
    }
}

/// Sample roster shipped with the app, referencing built-in catalog ids.
pub fn builtin_roster() -> Vec<Friend> {
    vec![
        Friend::new(
            "Ana".to_string(),
            "https://i.pravatar.cc/150?img=5".to_string(),
            vec![1, 4, 8],
        ),
        Friend::new(
            "Carlos".to_string(),
            "https://i.pravatar.cc/150?img=12".to_string(),
            vec![2, 5, 11],
        ),
        Friend::new(
            "Lucia".to_string(),
            "https://i.pravatar.cc/150?img=31".to_string(),
            vec![3, 9, 15],
        ),
    ]
}
