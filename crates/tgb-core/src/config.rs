use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use crate::{api::client::Credentials, dispatcher::DEFAULT_SEED, errors::Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_OFFSET_FILE: &str = "offset.txt";

/// Typed configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_api_url: String,

    pub offset_file: PathBuf,
    /// Long-poll hint for `getUpdates`, seconds. 0 omits the parameter.
    pub poll_timeout_secs: u64,
    pub random_seed: u64,

    pub http_connect_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if telegram_bot_token.is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let telegram_api_url = lookup("TELEGRAM_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let offset_file = PathBuf::from(
            lookup("OFFSET_FILE")
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_OFFSET_FILE.to_string()),
        );

        let u64_var = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());
        let poll_timeout_secs = u64_var("POLL_TIMEOUT_SECS").unwrap_or(0);
        let random_seed = u64_var("RANDOM_SEED").unwrap_or(DEFAULT_SEED);
        let http_connect_timeout =
            Duration::from_millis(u64_var("HTTP_CONNECT_TIMEOUT_MS").unwrap_or(10_000));

        Ok(Self {
            telegram_bot_token,
            telegram_api_url,
            offset_file,
            poll_timeout_secs,
            random_seed,
            http_connect_timeout,
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            token: self.telegram_bot_token.clone(),
            endpoint_base_url: self.telegram_api_url.clone(),
        }
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = &val[1..val.len() - 1];
        }

        out.push((key.to_string(), val.to_string()));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
