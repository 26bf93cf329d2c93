use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub photo: String,
    /// Movie ids this peer has liked. Fixed sample data unless edited
    /// through the roster API; read-only from the match scan's perspective.
    pub liked: Vec<i64>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl Friend {
    pub fn new(name: String, photo: String, liked: Vec<i64>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            photo,
            liked,
            messages: vec![],
            created_at: Utc::now(),
        }
    }

    pub fn has_liked(&self, movie_id: i64) -> bool {
        self.liked.contains(&movie_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub from_me: bool,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(from_me: bool, body: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            from_me,
            body,
            sent_at: Utc::now(),
        }
    }
}
