pub mod friend_repo;
pub mod migrations;
