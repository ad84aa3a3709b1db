pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod feed;
pub mod models;
pub mod session;
pub mod store;
pub mod transport;

// Re-export the types most callers touch at the crate root
pub use error::FeedError;
pub use events::FeedEvent;
pub use feed::FeedEngine;
pub use models::{Message, MessageBody};
