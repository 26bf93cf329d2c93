use crate::domain::entities::friend::{ChatMessage, Friend};
use crate::domain::error::DomainError;

/// Persistence for the friend roster and chat history. The roster survives
/// logout; absent or unreadable state is recovered by the caller with a
/// built-in fallback roster, never surfaced as a fatal error.
pub trait FriendRepository: Send + Sync {
    fn load_all(&self) -> Result<Vec<Friend>, DomainError>;
    fn upsert(&self, friend: &Friend) -> Result<(), DomainError>;
    fn delete(&self, id: &str) -> Result<(), DomainError>;
    fn add_message(&self, friend_id: &str, message: &ChatMessage) -> Result<(), DomainError>;
}
