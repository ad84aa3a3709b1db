use thiserror::Error;

/// Failures surfaced by the transports and fetch paths.
///
/// All of these are non-fatal to the engine: transports fall back or retry
/// on their own schedule, and pagination failures are retryable on the next
/// qualifying scroll. Nothing here propagates into render or scroll logic.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {code}")]
    Status { code: u16 },
    #[error("failed to decode server payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("push stream closed by server")]
    StreamClosed,
}
