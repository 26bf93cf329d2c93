pub mod friend;
pub mod movie;
pub mod session;
