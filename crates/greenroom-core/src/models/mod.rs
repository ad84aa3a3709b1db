pub mod message;
pub mod pin_amount;

pub use message::{Message, MessageBody, VoiceAttachment};
pub use pin_amount::PinAmount;
