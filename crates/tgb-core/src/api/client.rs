use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{
    domain::{BotIdentity, ChatId, Event, MediaKind, Message},
    errors::Error,
    logging::redact_token,
    ports::{BotApi, HttpRequest, Method, Transport},
    Result,
};

use super::wire::{Envelope, ErrorBody, SendMessageBody, Update, User, WireMessage};

/// Static credentials, fixed for the life of the process.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub token: String,
    pub endpoint_base_url: String,
}

/// One API call before it is turned into an HTTP request.
struct ApiCall<'a> {
    method: Method,
    name: &'a str,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> ApiCall<'a> {
    fn get(name: &'a str) -> Self {
        Self {
            method: Method::Get,
            name,
            query: Vec::new(),
            body: None,
        }
    }

    fn post_json<B: Serialize + ?Sized>(name: &'a str, body: &B) -> Result<Self> {
        Ok(Self {
            method: Method::Post,
            name,
            query: Vec::new(),
            body: Some(serde_json::to_vec(body)?),
        })
    }

    fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }
}

/// Bot API client over an injected [`Transport`].
pub struct ApiClient<T> {
    creds: Credentials,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(creds: Credentials, transport: T) -> Self {
        Self { creds, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `<endpoint>/bot<token>/<method>` plus query parameters.
    pub fn method_url(&self, name: &str, query: &[(&str, String)]) -> Result<Url> {
        let base = self.creds.endpoint_base_url.trim_end_matches('/');
        let raw = format!("{base}/bot{}/{name}", self.creds.token);
        let mut url = Url::parse(&raw).map_err(|e| {
            Error::Config(format!(
                "invalid API url {}: {e}",
                redact_token(&raw, &self.creds.token)
            ))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Shared request path: build url, send, check status, hand the body to `parse`.
    async fn call<R>(
        &self,
        call: ApiCall<'_>,
        parse: impl FnOnce(&[u8]) -> Result<R> + Send,
    ) -> Result<R> {
        let url = self.method_url(call.name, &call.query)?;

        let mut headers = Vec::new();
        if call.body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        debug!(
            method = call.method.as_str(),
            url = %redact_token(url.as_str(), &self.creds.token),
            "api request"
        );

        let resp = self
            .transport
            .request(HttpRequest {
                method: call.method,
                url: url.into(),
                headers,
                body: call.body,
            })
            .await?;

        if !resp.is_success() {
            debug!(status = resp.status, api_method = call.name, "api call rejected");
            return Err(Error::api(resp.status, error_details(&resp.body)));
        }

        parse(&resp.body)
    }
}

#[async_trait]
impl<T: Transport> BotApi for ApiClient<T> {
    async fn fetch_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Event>> {
        let mut call = ApiCall::get("getUpdates");
        if offset != 0 {
            call = call.query("offset", offset);
        }
        if timeout != 0 {
            call = call.query("timeout", timeout);
        }
        self.call(call, parse_updates).await
    }

    async fn get_me(&self) -> Result<BotIdentity> {
        self.call(ApiCall::get("getMe"), parse_identity).await
    }

    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message> {
        let body = SendMessageBody {
            chat_id: chat_id.0,
            text,
            reply_to_message_id: reply_to,
        };
        let call = ApiCall::post_json("sendMessage", &body)?;
        self.call(call, parse_sent_message).await
    }

    async fn send_media(&self, chat_id: ChatId, media_ref: &str, kind: MediaKind) -> Result<()> {
        let mut body = serde_json::Map::new();
        body.insert("chat_id".to_string(), chat_id.0.into());
        body.insert(kind.field().to_string(), media_ref.into());
        let call = ApiCall::post_json(kind.endpoint(), &body)?;
        self.call(call, |_| Ok(())).await
    }
}

fn error_details(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.description)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| Error::GENERIC_API_DETAILS.to_string())
}

fn required_result<R>(env: Envelope<R>) -> Result<R> {
    env.result
        .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("result").into())
}

fn parse_updates(body: &[u8]) -> Result<Vec<Event>> {
    let env: Envelope<Vec<Update>> = serde_json::from_slice(body)?;
    let updates = required_result(env)?;
    Ok(updates.into_iter().map(Event::from).collect())
}

fn parse_identity(body: &[u8]) -> Result<BotIdentity> {
    let env: Envelope<User> = serde_json::from_slice(body)?;
    if !env.ok {
        return Ok(BotIdentity::default());
    }
    Ok(env.result.unwrap_or_default().into())
}

fn parse_sent_message(body: &[u8]) -> Result<Message> {
    let env: Envelope<WireMessage> = serde_json::from_slice(body)?;
    Ok(required_result(env)?.into())
}
