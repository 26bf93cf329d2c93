pub mod feed;
pub mod friends;
pub mod matches;
