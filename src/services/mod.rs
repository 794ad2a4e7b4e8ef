// Service exports
pub mod api;
pub mod feed;

pub use api::{ApiClient, ApiError};
pub use feed::FeedStore;
