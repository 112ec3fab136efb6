//! HTTP transport adapter (reqwest).
//!
//! Implements the `tgb-core` `Transport` port. Any received status is returned
//! as-is; only failures before a status is known become `Error::Transport`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use tgb_core::{
    errors::Error,
    ports::{HttpRequest, HttpResponse, Method, Transport},
    Result,
};

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// No whole-request timeout: long polls are bounded by the server-side hint.
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build error: {e}")))?;
        Ok(Self { http })
    }

    fn map_err(e: reqwest::Error) -> Error {
        // The url carries the bot token.
        Error::Transport(format!("http error: {}", e.without_url()))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse> {
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.http.request(method, req.url.as_str());
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(Self::map_err)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(Self::map_err)?;
        debug!(status, bytes = body.len(), "http response");

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
