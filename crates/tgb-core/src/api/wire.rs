//! Wire shapes of the bot API.
//!
//! Required fields are plain (absence fails decoding); optional fields carry
//! `#[serde(default)]` and come out zero/empty.

use serde::{Deserialize, Serialize};

use crate::domain::{BotIdentity, ChatId, Event, Message};

/// Every API response is wrapped in this envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Error body of a non-2xx response; only the description is of interest.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    /// Absent for `edited_message`, `my_chat_member` and other update kinds.
    #[serde(default)]
    pub message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    pub message_id: i64,
    #[serde(default)]
    pub text: String,
    pub chat: Chat,
    #[serde(default)]
    pub reply_to_message: Option<ReplyTo>,
    #[serde(default)]
    pub group_chat_created: bool,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub chat_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyTo {
    pub message_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageBody<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

impl From<WireMessage> for Message {
    fn from(m: WireMessage) -> Self {
        Self {
            message_id: m.message_id,
            text: m.text,
            chat_id: ChatId(m.chat.id),
            chat_type: m.chat.chat_type,
            reply_to_message_id: m.reply_to_message.map(|r| r.message_id),
            group_chat_created: m.group_chat_created,
        }
    }
}

impl From<Update> for Event {
    fn from(u: Update) -> Self {
        Self {
            id: u.update_id,
            message: u.message.map(Message::from).unwrap_or_default(),
        }
    }
}

impl From<User> for BotIdentity {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            display_name: u.first_name,
            is_bot: u.is_bot,
        }
    }
}
