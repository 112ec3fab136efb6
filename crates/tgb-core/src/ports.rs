use async_trait::async_trait;

use crate::{
    domain::{BotIdentity, ChatId, Event, Flow, MediaKind, Message},
    Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Hexagonal port for the HTTP exchange.
///
/// Implementations return `Error::Transport` when no status could be obtained;
/// any status (including 4xx/5xx) is a successful exchange at this level.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse>;
}

/// The four bot API operations the core relies on.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// `offset == 0` omits the filter, `timeout == 0` omits the long-poll hint.
    async fn fetch_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Event>>;

    async fn get_me(&self) -> Result<BotIdentity>;

    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message>;

    async fn send_media(&self, chat_id: ChatId, media_ref: &str, kind: MediaKind) -> Result<()>;
}

/// Durable slot holding the lowest event id not yet fully processed.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Returns 0 when nothing usable was stored. Never fails.
    async fn load(&self) -> i64;

    async fn save(&self, offset: i64) -> Result<()>;
}

/// Handles one event. Implementations save the checkpoint themselves once the
/// event is fully handled.
#[async_trait]
pub trait UpdateHandler: Send {
    async fn handle(
        &mut self,
        api: &dyn BotApi,
        store: &dyn CheckpointStore,
        event: &Event,
    ) -> Result<Flow>;
}
