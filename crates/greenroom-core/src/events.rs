use crate::error::FeedError;
use crate::models::Message;
use crate::transport::PushState;

/// Everything the transports and background fetches deliver to the engine.
#[derive(Debug)]
pub enum FeedEvent {
    /// Single message from the push channel
    Push(Message),
    /// Authoritative recent window fetched by a poll cycle
    PollReload(Vec<Message>),
    /// Push connection state change
    PushState(PushState),
    /// Completion of a backward-pagination fetch
    OlderPage(Result<Vec<Message>, FeedError>),
    /// Completion of an outbound send; the message itself arrives via echo
    SendFinished(Result<(), FeedError>),
}
