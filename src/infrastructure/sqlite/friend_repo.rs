use crate::domain::entities::friend::{ChatMessage, Friend};
use crate::domain::error::DomainError;
use crate::domain::ports::friend_repository::FriendRepository;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct SqliteFriendRepo {
    conn: Mutex<Connection>,
}

impl SqliteFriendRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_friend(row: &rusqlite::Row) -> Result<Friend, rusqlite::Error> {
        let liked_str: String = row.get(3)?;
        let created_str: String = row.get(4)?;
        Ok(Friend {
            id: row.get(0)?,
            name: row.get(1)?,
            photo: row.get(2)?,
            // A corrupt liked column decodes as an empty list, not an error.
            liked: serde_json::from_str(&liked_str).unwrap_or_default(),
            messages: vec![],
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

impl FriendRepository for SqliteFriendRepo {
    fn load_all(&self) -> Result<Vec<Friend>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name, photo, liked, created_at FROM friends ORDER BY rowid")
            .map_err(|e| DomainError::Database(format!("Failed to load friends: {e}")))?;
        let mut friends: Vec<Friend> = stmt
            .query_map([], Self::row_to_friend)
            .map_err(|e| DomainError::Database(format!("Failed to load friends: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        let mut stmt = conn
            .prepare("SELECT friend_id, id, from_me, body, sent_at FROM messages ORDER BY sent_at, id")
            .map_err(|e| DomainError::Database(format!("Failed to load messages: {e}")))?;
        let mut by_friend: HashMap<String, Vec<ChatMessage>> = HashMap::new();
        let rows = stmt
            .query_map([], |row| {
                let friend_id: String = row.get(0)?;
                let from_me: i32 = row.get(2)?;
                let sent_str: String = row.get(4)?;
                Ok((
                    friend_id,
                    ChatMessage {
                        id: row.get(1)?,
                        from_me: from_me != 0,
                        body: row.get(3)?,
                        sent_at: DateTime::parse_from_rfc3339(&sent_str)
                            .map(|dt| dt.with_timezone(&chrono::Utc))
                            .unwrap_or_else(|_| chrono::Utc::now()),
                    },
                ))
            })
            .map_err(|e| DomainError::Database(format!("Failed to load messages: {e}")))?;
        for row in rows.flatten() {
            by_friend.entry(row.0).or_default().push(row.1);
        }

        for friend in &mut friends {
            if let Some(messages) = by_friend.remove(&friend.id) {
                friend.messages = messages;
            }
        }
        Ok(friends)
    }

    fn upsert(&self, friend: &Friend) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO friends (id, name, photo, liked, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET name = ?2, photo = ?3, liked = ?4",
            params![
                friend.id,
                friend.name,
                friend.photo,
                serde_json::to_string(&friend.liked).unwrap_or_default(),
                friend.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save friend: {e}")))?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute("DELETE FROM messages WHERE friend_id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete messages: {e}")))?;
        conn.execute("DELETE FROM friends WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete friend: {e}")))?;
        Ok(())
    }

    fn add_message(&self, friend_id: &str, message: &ChatMessage) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO messages (id, friend_id, from_me, body, sent_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                message.id,
                friend_id,
                message.from_me as i32,
                message.body,
                message.sent_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save message: {e}")))?;
        Ok(())
    }
}
