//! Command dispatcher: maps message text to an action.

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    domain::{ChatId, Event, Flow, MediaKind},
    ports::{BotApi, CheckpointStore, UpdateHandler},
    Result,
};

pub const WEATHER_TEXT: &str = "Winter Is Coming";
pub const STYLEGUIDE_TEXT: &str = "Code review is a joke";
pub const ANIMATION_ID: &str = "CgADBAADs6kAAsMXZAd1OLcYWalBdhYE";
pub const STICKER_ID: &str = "CAADAgADLQcAAlwCZQMbhEfcuESw4RYE";

pub const DEFAULT_SEED: u64 = 37;
pub const RANDOM_MAX: u32 = 1000;

/// The fixed command set. Matching is exact and case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Random,
    Weather,
    Styleguide,
    Sticker,
    Gif,
    Stop,
    Crash,
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/random" => Some(Self::Random),
            "/weather" => Some(Self::Weather),
            "/styleguide" => Some(Self::Styleguide),
            "/sticker" => Some(Self::Sticker),
            "/gif" => Some(Self::Gif),
            "/stop" => Some(Self::Stop),
            "/crash" => Some(Self::Crash),
            _ => None,
        }
    }
}

/// The bot's command handler.
///
/// Saves `event.id + 1` once every API call of the command succeeded, so a
/// failed send leaves the event to be delivered again.
pub struct CommandBot {
    rng: StdRng,
}

impl CommandBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next `/random` value, uniform over `0..=RANDOM_MAX`.
    pub fn next_random(&mut self) -> u32 {
        self.rng.gen_range(0..=RANDOM_MAX)
    }

    async fn run(&mut self, api: &dyn BotApi, chat: ChatId, cmd: Command) -> Result<Flow> {
        match cmd {
            Command::Random => {
                let n = self.next_random();
                api.send_message(chat, &n.to_string(), None).await?;
            }
            Command::Weather => {
                api.send_message(chat, WEATHER_TEXT, None).await?;
            }
            Command::Styleguide => {
                api.send_message(chat, STYLEGUIDE_TEXT, None).await?;
                api.send_media(chat, ANIMATION_ID, MediaKind::Animation)
                    .await?;
            }
            Command::Sticker => {
                api.send_media(chat, STICKER_ID, MediaKind::Sticker).await?;
            }
            Command::Gif => {
                api.send_media(chat, ANIMATION_ID, MediaKind::Animation)
                    .await?;
            }
            Command::Stop => return Ok(Flow::Stop),
            Command::Crash => return Ok(Flow::Crash),
        }
        Ok(Flow::Continue)
    }
}

impl Default for CommandBot {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[async_trait]
impl UpdateHandler for CommandBot {
    async fn handle(
        &mut self,
        api: &dyn BotApi,
        store: &dyn CheckpointStore,
        event: &Event,
    ) -> Result<Flow> {
        let flow = match Command::parse(&event.message.text) {
            Some(cmd) => {
                debug!(event_id = event.id, chat_id = %event.message.chat_id, ?cmd, "dispatching");
                self.run(api, event.message.chat_id, cmd).await?
            }
            None => Flow::Continue,
        };

        store.save(event.next_offset()).await?;

        match flow {
            Flow::Stop => info!(event_id = event.id, "stop requested"),
            Flow::Crash => warn!(event_id = event.id, "crash requested"),
            Flow::Continue => {}
        }
        Ok(flow)
    }
}
