//! The long-polling loop.

use tracing::{debug, error, info};

use crate::{
    domain::Flow,
    ports::{BotApi, CheckpointStore, UpdateHandler},
    Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollState {
    Running,
    Stopped,
}

/// Owns the API client, the checkpoint store and the handler for its whole life.
///
/// Strictly sequential: one fetch at a time, events of a batch handled in
/// receipt order, no overlap between fetch and dispatch.
pub struct Poller<A, S, H> {
    api: A,
    store: S,
    handler: H,
    poll_timeout: u64,
    state: PollState,
}

impl<A, S, H> Poller<A, S, H>
where
    A: BotApi,
    S: CheckpointStore,
    H: UpdateHandler,
{
    pub fn new(api: A, store: S, handler: H) -> Self {
        Self {
            api,
            store,
            handler,
            poll_timeout: 0,
            state: PollState::Running,
        }
    }

    /// Long-poll hint in seconds passed to every fetch (0 = omitted).
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout = secs;
        self
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run until a handler asks to stop or a call fails.
    ///
    /// A failure is logged here once and returned; the poller is `Stopped`
    /// either way and later calls make no API requests. `Flow::Crash` aborts the
    /// process and never returns.
    pub async fn run(&mut self) -> Result<()> {
        if self.state == PollState::Stopped {
            return Ok(());
        }
        info!(poll_timeout = self.poll_timeout, "polling started");

        let outcome = self.poll_until_stopped().await;
        self.state = PollState::Stopped;

        match &outcome {
            Ok(()) => info!("polling stopped"),
            Err(e) => error!(error = %e, "polling stopped on error"),
        }
        outcome
    }

    async fn poll_until_stopped(&mut self) -> Result<()> {
        loop {
            let offset = self.store.load().await;
            let events = self.api.fetch_updates(offset, self.poll_timeout).await?;
            debug!(offset, count = events.len(), "fetched updates");

            for event in &events {
                match self
                    .handler
                    .handle(&self.api, &self.store, event)
                    .await?
                {
                    Flow::Continue => {}
                    Flow::Stop => return Ok(()),
                    Flow::Crash => crash(event.id),
                }
            }
        }
    }
}

/// Fault-injection exit. Not an `Error`: it ends the process, not just the loop.
fn crash(event_id: i64) -> ! {
    error!(event_id, "aborting process on /crash");
    std::process::abort()
}
