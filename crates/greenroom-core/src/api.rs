//! REST fetch collaborator: wire DTOs and the HTTP client.
//!
//! The engine never calls the network itself; everything goes through
//! [`ChatApi`] so transports and pagination can be exercised against fakes.

use crate::error::FeedError;
use crate::models::{Message, MessageBody, PinAmount, VoiceAttachment};
use serde::{Deserialize, Serialize};
use std::future::Future;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDto {
    pub url: String,
    pub duration_secs: f64,
    #[serde(default)]
    pub waveform: Vec<f32>,
}

/// Wire shape of a message as the server sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub sender: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<VoiceDto>,
    #[serde(default)]
    pub is_from_host: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub pin_amount: PinAmount,
    #[serde(default)]
    pub reply_to: Option<String>,
    pub created_at: i64,
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        // text XOR voice on the wire; voice wins if a server ever sends both
        let body = match dto.voice {
            Some(v) => MessageBody::Voice(VoiceAttachment {
                url: v.url,
                duration_secs: v.duration_secs,
                waveform: v.waveform,
            }),
            None => MessageBody::Text(dto.text.unwrap_or_default()),
        };
        Message {
            id: dto.id,
            sender: dto.sender,
            body,
            is_from_host: dto.is_from_host,
            is_pinned: dto.is_pinned,
            pin_amount: dto.pin_amount,
            reply_to: dto.reply_to,
            created_at: dto.created_at,
        }
    }
}

/// Outbound message. The sender sees it in the feed only via its own echo,
/// like any other participant; there is no optimistic local insert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            client_id: Uuid::new_v4().to_string(),
            text: Some(content.into()),
            voice: None,
            reply_to: None,
        }
    }
}

/// Fetch/send surface consumed by the transports and pagination.
///
/// Exhaustion of history is inferred solely from an empty batch returned by
/// [`ChatApi::fetch_messages_before`]; there is no separate "more" flag.
pub trait ChatApi: Send + Sync + 'static {
    fn fetch_messages(
        &self,
        room_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, FeedError>> + Send;

    fn fetch_messages_before(
        &self,
        room_id: &str,
        before: i64,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Message>, FeedError>> + Send;

    fn send_message(
        &self,
        room_id: &str,
        outgoing: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), FeedError>> + Send;
}

/// reqwest-backed [`ChatApi`] against the chat server's REST endpoints.
#[derive(Debug, Clone)]
pub struct RestApi {
    client: reqwest::Client,
    base_url: String,
    credential: String,
}

impl RestApi {
    pub fn new(base_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            credential: credential.into(),
        }
    }

    fn room_url(&self, room_id: &str, tail: &str) -> String {
        format!("{}/rooms/{}/{}", self.base_url, room_id, tail)
    }

    async fn get_messages(&self, url: String) -> Result<Vec<Message>, FeedError> {
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
        let dtos: Vec<MessageDto> = resp.json().await?;
        Ok(dtos.into_iter().map(Message::from).collect())
    }
}

impl ChatApi for RestApi {
    async fn fetch_messages(&self, room_id: &str) -> Result<Vec<Message>, FeedError> {
        self.get_messages(self.room_url(room_id, "messages")).await
    }

    async fn fetch_messages_before(
        &self,
        room_id: &str,
        before: i64,
        limit: usize,
    ) -> Result<Vec<Message>, FeedError> {
        let url = format!(
            "{}?before={}&limit={}",
            self.room_url(room_id, "messages"),
            before,
            limit
        );
        self.get_messages(url).await
    }

    async fn send_message(
        &self,
        room_id: &str,
        outgoing: &OutgoingMessage,
    ) -> Result<(), FeedError> {
        let resp = self
            .client
            .post(self.room_url(room_id, "messages"))
            .bearer_auth(&self.credential)
            .json(outgoing)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(FeedError::Status {
                code: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_text_message() {
        let json = r#"{
            "id": "m1",
            "sender": "ana",
            "text": "hello",
            "isFromHost": true,
            "createdAt": 1700000000000
        }"#;
        let dto: MessageDto = serde_json::from_str(json).unwrap();
        let msg = Message::from(dto);
        assert_eq!(msg.id, "m1");
        assert!(msg.is_from_host);
        assert!(!msg.is_pinned);
        assert!(msg.pin_amount.is_zero());
        assert_eq!(msg.text_content(), "hello");
        assert_eq!(msg.created_at, 1_700_000_000_000);
    }

    #[test]
    fn test_dto_voice_message() {
        let json = r#"{
            "id": "m2",
            "sender": "ben",
            "voice": {"url": "https://cdn.example.com/v.ogg", "durationSecs": 3.5, "waveform": [0.1, 0.9]},
            "createdAt": 1700000001000
        }"#;
        let dto: MessageDto = serde_json::from_str(json).unwrap();
        let msg = Message::from(dto);
        assert!(msg.is_voice());
        match &msg.body {
            MessageBody::Voice(v) => {
                assert_eq!(v.url, "https://cdn.example.com/v.ogg");
                assert_eq!(v.waveform.len(), 2);
            }
            other => panic!("expected voice body, got {:?}", other),
        }
    }

    #[test]
    fn test_dto_pinned_with_amount() {
        let json = r#"{
            "id": "m3",
            "sender": "cleo",
            "text": "pin me",
            "isPinned": true,
            "pinAmount": "25.50",
            "replyTo": "m1",
            "createdAt": 1700000002000
        }"#;
        let dto: MessageDto = serde_json::from_str(json).unwrap();
        let msg = Message::from(dto);
        assert!(msg.is_pinned);
        assert_eq!(msg.pin_amount.as_str(), "25.50");
        assert_eq!(msg.reply_to.as_deref(), Some("m1"));
    }

    #[test]
    fn test_outgoing_serializes_without_empty_fields() {
        let out = OutgoingMessage::text("hi");
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["text"], "hi");
        assert!(json.get("voice").is_none());
        assert!(json.get("replyTo").is_none());
        assert!(!json["clientId"].as_str().unwrap().is_empty());
    }
}
