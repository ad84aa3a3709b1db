//! Transport selector: push mode over an SSE stream while it holds, timed
//! poll fallback otherwise. Both paths deliver into the same deduplicated
//! store sink, so the handover window cannot produce visible duplicates.

use crate::api::{ChatApi, MessageDto};
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::events::FeedEvent;
use crate::models::Message;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Push-connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushState {
    Disconnected,
    Connecting,
    Connected,
}

/// Push-channel collaborator: a live stream of individual message events.
pub trait PushChannel: Send + Sync + 'static {
    type Events: Stream<Item = Result<Message, FeedError>> + Send + Unpin;

    fn connect(
        &self,
        room_id: &str,
    ) -> impl Future<Output = Result<Self::Events, FeedError>> + Send;
}

/// SSE-backed push channel: a streaming GET whose `data:` lines each carry
/// one JSON-encoded message.
#[derive(Debug, Clone)]
pub struct SsePush {
    client: reqwest::Client,
    base_url: String,
    credential: String,
}

impl SsePush {
    pub fn new(base_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            credential: credential.into(),
        }
    }
}

impl PushChannel for SsePush {
    type Events = BoxStream<'static, Result<Message, FeedError>>;

    async fn connect(&self, room_id: &str) -> Result<Self::Events, FeedError> {
        let url = format!("{}/rooms/{}/stream", self.base_url, room_id);
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.credential)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(FeedError::Status {
                code: resp.status().as_u16(),
            });
        }

        let bytes = Box::pin(resp.bytes_stream());
        let stream = futures::stream::unfold((bytes, Vec::new()), |(mut bytes, mut buf)| async move {
            loop {
                if let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&line);
                    if let Some(item) = parse_sse_line(line.trim()) {
                        return Some((item, (bytes, buf)));
                    }
                    continue;
                }
                match bytes.next().await {
                    Some(Ok(chunk)) => buf.extend_from_slice(&chunk),
                    Some(Err(err)) => return Some((Err(FeedError::Http(err)), (bytes, buf))),
                    None => return None,
                }
            }
        })
        .boxed();
        Ok(stream)
    }
}

/// One SSE line → message, if it carries data. Comments, keep-alives and
/// event-name lines are skipped.
fn parse_sse_line(line: &str) -> Option<Result<Message, FeedError>> {
    let data = line.strip_prefix("data:")?.trim();
    if data.is_empty() {
        return None;
    }
    Some(
        serde_json::from_str::<MessageDto>(data)
            .map(Message::from)
            .map_err(FeedError::Decode),
    )
}

/// Run the transport selector for one joined session.
///
/// Push mode while the stream is up; while it is down, one full-feed poll
/// refetch per interval, then another push attempt. Connected mode never
/// polls. Aborting the returned handle (on leave) closes the push
/// connection and stops the poll timer.
pub fn spawn_transport<A, P>(
    api: Arc<A>,
    push: P,
    config: FeedConfig,
    tx: mpsc::Sender<FeedEvent>,
) -> JoinHandle<()>
where
    A: ChatApi,
    P: PushChannel,
{
    tokio::spawn(async move {
        loop {
            if tx
                .send(FeedEvent::PushState(PushState::Connecting))
                .await
                .is_err()
            {
                return;
            }
            match push.connect(&config.room_id).await {
                Ok(mut events) => {
                    if tx
                        .send(FeedEvent::PushState(PushState::Connected))
                        .await
                        .is_err()
                    {
                        return;
                    }
                    debug!(room = %config.room_id, "push connected");
                    loop {
                        match events.next().await {
                            Some(Ok(message)) => {
                                if tx.send(FeedEvent::Push(message)).await.is_err() {
                                    return;
                                }
                            }
                            Some(Err(err)) => {
                                warn!(error = %err, "push stream error");
                                break;
                            }
                            None => {
                                warn!(error = %FeedError::StreamClosed, "push stream ended");
                                break;
                            }
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, "push connect failed, falling back to poll");
                }
            }
            if tx
                .send(FeedEvent::PushState(PushState::Disconnected))
                .await
                .is_err()
            {
                return;
            }

            // poll fallback: one authoritative refetch per interval, then
            // retry the push connection
            tokio::time::sleep(config.poll_interval).await;
            match api.fetch_messages(&config.room_id).await {
                Ok(messages) => {
                    if tx.send(FeedEvent::PollReload(messages)).await.is_err() {
                        return;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "poll fetch failed");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OutgoingMessage;

    struct DownPush;

    impl PushChannel for DownPush {
        type Events = BoxStream<'static, Result<Message, FeedError>>;

        async fn connect(&self, _room_id: &str) -> Result<Self::Events, FeedError> {
            Err(FeedError::StreamClosed)
        }
    }

    struct CannedApi;

    impl ChatApi for CannedApi {
        async fn fetch_messages(&self, _room_id: &str) -> Result<Vec<Message>, FeedError> {
            Ok(vec![Message::text("m1", "ana", "from poll", 1_000)])
        }

        async fn fetch_messages_before(
            &self,
            _room_id: &str,
            _before: i64,
            _limit: usize,
        ) -> Result<Vec<Message>, FeedError> {
            Ok(vec![])
        }

        async fn send_message(
            &self,
            _room_id: &str,
            _outgoing: &OutgoingMessage,
        ) -> Result<(), FeedError> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_sse_line() {
        assert!(parse_sse_line("").is_none());
        assert!(parse_sse_line(": keep-alive").is_none());
        assert!(parse_sse_line("event: message").is_none());
        assert!(parse_sse_line("data:").is_none());

        let msg = parse_sse_line(r#"data: {"id":"m1","sender":"ana","text":"hi","createdAt":5}"#)
            .unwrap()
            .unwrap();
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.created_at, 5);

        let err = parse_sse_line("data: {not json").unwrap();
        assert!(matches!(err, Err(FeedError::Decode(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_begins_within_one_interval_when_push_is_down() {
        let (tx, mut rx) = mpsc::channel(16);
        let config = FeedConfig::new("http://localhost:0", "room-1");
        let handle = spawn_transport(Arc::new(CannedApi), DownPush, config.clone(), tx);

        assert!(matches!(
            rx.recv().await,
            Some(FeedEvent::PushState(PushState::Connecting))
        ));
        assert!(matches!(
            rx.recv().await,
            Some(FeedEvent::PushState(PushState::Disconnected))
        ));

        // paused time: the sleep equals exactly one poll interval
        match rx.recv().await {
            Some(FeedEvent::PollReload(messages)) => {
                assert_eq!(messages.len(), 1);
                assert_eq!(messages[0].id, "m1");
            }
            other => panic!("expected poll reload, got {:?}", other),
        }

        // next cycle retries the push connection
        assert!(matches!(
            rx.recv().await,
            Some(FeedEvent::PushState(PushState::Connecting))
        ));

        handle.abort();
    }

    #[tokio::test]
    async fn test_connected_push_streams_messages_without_polling() {
        struct UpPush;

        impl PushChannel for UpPush {
            type Events = BoxStream<'static, Result<Message, FeedError>>;

            async fn connect(&self, _room_id: &str) -> Result<Self::Events, FeedError> {
                Ok(futures::stream::iter(vec![
                    Ok(Message::text("p1", "ana", "one", 1_000)),
                    Ok(Message::text("p2", "ben", "two", 2_000)),
                ])
                .boxed())
            }
        }

        let (tx, mut rx) = mpsc::channel(16);
        let config = FeedConfig::new("http://localhost:0", "room-1");
        let handle = spawn_transport(Arc::new(CannedApi), UpPush, config, tx);

        assert!(matches!(
            rx.recv().await,
            Some(FeedEvent::PushState(PushState::Connecting))
        ));
        assert!(matches!(
            rx.recv().await,
            Some(FeedEvent::PushState(PushState::Connected))
        ));
        assert!(matches!(rx.recv().await, Some(FeedEvent::Push(m)) if m.id == "p1"));
        assert!(matches!(rx.recv().await, Some(FeedEvent::Push(m)) if m.id == "p2"));
        // stream end drops back to disconnected before any poll runs
        assert!(matches!(
            rx.recv().await,
            Some(FeedEvent::PushState(PushState::Disconnected))
        ));

        handle.abort();
    }
}
