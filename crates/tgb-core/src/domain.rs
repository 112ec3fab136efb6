use std::{fmt, str::FromStr};

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message as returned by `getUpdates` / `sendMessage`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    pub message_id: i64,
    pub text: String,
    pub chat_id: ChatId,
    pub chat_type: String,
    pub reply_to_message_id: Option<i64>,
    pub group_chat_created: bool,
}

/// One incoming update. `id` is assigned by the platform and strictly increasing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub message: Message,
}

impl Event {
    /// The checkpoint value that marks this event as fully handled.
    pub fn next_offset(&self) -> i64 {
        self.id.saturating_add(1)
    }
}

/// Snapshot of the authenticated bot account (`getMe`).
///
/// Zero-valued when the platform answered `ok: false`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub is_bot: bool,
}

impl BotIdentity {
    pub fn is_known(&self) -> bool {
        self.id != 0
    }
}

/// Media that can be sent by reference (a platform file id or URL).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Animation,
    Sticker,
    Photo,
    Video,
    Document,
    Audio,
    Voice,
}

impl MediaKind {
    /// API method name, e.g. `sendAnimation`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Animation => "sendAnimation",
            Self::Sticker => "sendSticker",
            Self::Photo => "sendPhoto",
            Self::Video => "sendVideo",
            Self::Document => "sendDocument",
            Self::Audio => "sendAudio",
            Self::Voice => "sendVoice",
        }
    }

    /// JSON body field carrying the media reference, e.g. `animation`.
    pub fn field(self) -> &'static str {
        match self {
            Self::Animation => "animation",
            Self::Sticker => "sticker",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Voice => "voice",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown media kind: {0}")]
pub struct UnknownMediaKind(pub String);

impl FromStr for MediaKind {
    type Err = UnknownMediaKind;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "animation" => Ok(Self::Animation),
            "sticker" => Ok(Self::Sticker),
            "photo" => Ok(Self::Photo),
            "video" => Ok(Self::Video),
            "document" => Ok(Self::Document),
            "audio" => Ok(Self::Audio),
            "voice" => Ok(Self::Voice),
            _ => Err(UnknownMediaKind(s.to_string())),
        }
    }
}

/// What the polling loop does after an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
    /// Abort the whole process. The checkpoint has already been saved.
    Crash,
}
