pub mod feed_status;
pub mod match_event;
pub mod swipe;
pub mod taste_filter;
