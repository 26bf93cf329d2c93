pub mod friend_repository;
pub mod recommendation_source;
