use crate::constants::{PAGE_SIZE, POLL_INTERVAL};
use std::time::Duration;

/// Connection settings for a feed session.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the chat server, without trailing slash
    pub server_url: String,
    /// Room whose feed this session follows
    pub room_id: String,
    /// Older-page size for backward pagination
    pub page_size: usize,
    /// Poll-mode refetch interval
    pub poll_interval: Duration,
}

impl FeedConfig {
    pub fn new(server_url: impl Into<String>, room_id: impl Into<String>) -> Self {
        let mut server_url = server_url.into();
        while server_url.ends_with('/') {
            server_url.pop();
        }
        Self {
            server_url,
            room_id: room_id.into(),
            page_size: PAGE_SIZE,
            poll_interval: POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let config = FeedConfig::new("https://chat.example.com/", "room-1");
        assert_eq!(config.server_url, "https://chat.example.com");
        assert_eq!(config.room_id, "room-1");
    }
}
