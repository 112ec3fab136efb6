//! Test doubles for the ports.

use std::{collections::VecDeque, io::Write, path::PathBuf, sync::Mutex};

use async_trait::async_trait;

use crate::{
    domain::{BotIdentity, ChatId, Event, MediaKind, Message},
    errors::Error,
    ports::{BotApi, HttpRequest, HttpResponse, Transport},
    Result,
};

/// Replays canned responses and records every request.
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new(responses: Vec<Result<HttpResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request(&self, idx: usize) -> HttpRequest {
        self.requests.lock().unwrap()[idx].clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("no canned response left".to_string())))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    Fetch { offset: i64, timeout: u64 },
    GetMe,
    Reply { chat_id: ChatId, text: String, reply_to: Option<i64> },
    Media { chat_id: ChatId, media_ref: String, kind: MediaKind },
}

/// In-memory bot API.
///
/// `fetch_updates` serves the queued batches in order, keeping only events with
/// `id >= offset` like the real server does. Once the batches run out it
/// answers with HTTP 500 so a runaway loop ends.
#[derive(Default)]
pub struct FakeApi {
    batches: Mutex<VecDeque<Result<Vec<Event>>>>,
    calls: Mutex<Vec<ApiCall>>,
    fail_sends: Mutex<bool>,
    outbound_log: Option<PathBuf>,
}

impl FakeApi {
    pub fn with_batches(batches: Vec<Result<Vec<Event>>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    /// Also append every outbound call to `path`, one line each. Lets a test
    /// see what a process did before it aborted.
    pub fn with_outbound_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.outbound_log = Some(path.into());
        self
    }

    pub fn fail_sends(&self) {
        *self.fail_sends.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than `fetch_updates`.
    pub fn outbound(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, ApiCall::Fetch { .. }))
            .collect()
    }

    fn record_outbound(&self, call: ApiCall) {
        if let Some(path) = &self.outbound_log {
            let mut f = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .unwrap();
            writeln!(f, "{call:?}").unwrap();
        }
        self.calls.lock().unwrap().push(call);
    }

    fn send_result(&self) -> Result<()> {
        if *self.fail_sends.lock().unwrap() {
            return Err(Error::api(502, Error::GENERIC_API_DETAILS));
        }
        Ok(())
    }
}

#[async_trait]
impl BotApi for FakeApi {
    async fn fetch_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Event>> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::Fetch { offset, timeout });
        let next = self
            .batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::api(500, Error::GENERIC_API_DETAILS)))?;
        Ok(next.into_iter().filter(|e| e.id >= offset).collect())
    }

    async fn get_me(&self) -> Result<BotIdentity> {
        self.calls.lock().unwrap().push(ApiCall::GetMe);
        Ok(BotIdentity::default())
    }

    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message> {
        self.record_outbound(ApiCall::Reply {
            chat_id,
            text: text.to_string(),
            reply_to,
        });
        self.send_result()?;
        Ok(Message {
            text: text.to_string(),
            chat_id,
            reply_to_message_id: reply_to,
            ..Message::default()
        })
    }

    async fn send_media(&self, chat_id: ChatId, media_ref: &str, kind: MediaKind) -> Result<()> {
        self.record_outbound(ApiCall::Media {
            chat_id,
            media_ref: media_ref.to_string(),
            kind,
        });
        self.send_result()
    }
}

pub fn event(id: i64, chat_id: i64, text: &str) -> Event {
    Event {
        id,
        message: Message {
            text: text.to_string(),
            chat_id: ChatId(chat_id),
            chat_type: "private".to_string(),
            ..Message::default()
        },
    }
}
