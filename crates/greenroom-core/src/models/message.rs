use crate::models::PinAmount;

/// Voice-note attachment carried instead of text content.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceAttachment {
    pub url: String,
    pub duration_secs: f64,
    /// Normalized amplitude samples for waveform rendering
    pub waveform: Vec<f32>,
}

/// Message payload: text content or a voice attachment, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text(String),
    Voice(VoiceAttachment),
}

/// A single feed entry.
///
/// `id` is opaque, unique within a room, and stable across transports: the
/// same message redelivered over push and poll carries the same id, which is
/// what makes store insertion idempotent.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    /// Sender display name
    pub sender: String,
    pub body: MessageBody,
    pub is_from_host: bool,
    pub is_pinned: bool,
    /// Amount paid to pin this message; zero for unpinned messages
    pub pin_amount: PinAmount,
    /// Id of the message this one replies to, if any
    pub reply_to: Option<String>,
    /// Creation time in unix milliseconds. Non-decreasing within one fetched
    /// page; no ordering guarantee across interleaved push/fetch sources.
    pub created_at: i64,
}

impl Message {
    /// Plain text message with no host/pin markings.
    pub fn text(
        id: impl Into<String>,
        sender: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            body: MessageBody::Text(content.into()),
            is_from_host: false,
            is_pinned: false,
            pin_amount: PinAmount::zero(),
            reply_to: None,
            created_at,
        }
    }

    pub fn is_voice(&self) -> bool {
        matches!(self.body, MessageBody::Voice(_))
    }

    /// Text content, or empty for voice messages.
    pub fn text_content(&self) -> &str {
        match &self.body {
            MessageBody::Text(t) => t,
            MessageBody::Voice(_) => "",
        }
    }
}
