//! Stable fetch coordinator
//!
//! A [`FetchSubscription`] owns one logical request slot. Starting a fetch
//! cancels the one in flight, and only the most recently started fetch of a
//! live subscription can ever publish its result.
//!
//! ```text
//! Idle ──run──▶ Fetching ──▶ Resolved | Cancelled | Failed
//!                  │  ▲                    │
//!                  └──┘ superseded         └──▶ Idle (on next run)
//! ```

use std::future::Future;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchState {
    Idle,
    Fetching,
    Resolved,
    Cancelled,
    Failed,
}

impl FetchState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FetchState::Resolved | FetchState::Cancelled | FetchState::Failed
        )
    }
}

struct Slot {
    generation: u64,
    token: Option<CancellationToken>,
    alive: bool,
    state: FetchState,
}

/// Per-subscription fetch handle.
///
/// Share it behind an `Arc` when fetches are started from several tasks.
/// Dropping the subscription unmounts it.
pub struct FetchSubscription<T> {
    name: String,
    slot: Mutex<Slot>,
    published: watch::Sender<Option<T>>,
}

impl<T> FetchSubscription<T>
where
    T: Clone,
{
    pub fn new(name: impl Into<String>) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            name: name.into(),
            slot: Mutex::new(Slot {
                generation: 0,
                token: None,
                alive: true,
                state: FetchState::Idle,
            }),
            published,
        }
    }

    /// Start a fetch, superseding any fetch still in flight.
    ///
    /// `fetch` receives the cancellation token for this attempt and should
    /// stop early (returning [`FetchError::Aborted`]) once it fires; the
    /// coordinator also stops polling it on cancellation.
    ///
    /// Returns `Ok(Some(value))` when the result was applied, `Ok(None)`
    /// when the fetch was aborted, superseded, or the subscription was
    /// unmounted, and `Err` for any other failure of the current fetch.
    pub async fn run<F, Fut>(&self, fetch: F) -> Result<Option<T>, FetchError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let (generation, token) = {
            let mut slot = self.slot.lock();
            if !slot.alive {
                debug!(subscription = %self.name, "Fetch requested after unmount; ignoring");
                return Ok(None);
            }

            if let Some(previous) = slot.token.take() {
                previous.cancel();
                debug!(
                    subscription = %self.name,
                    superseded = slot.generation,
                    "Cancelled in-flight fetch superseded by a newer request"
                );
            }
            if slot.state.is_terminal() {
                slot.state = FetchState::Idle;
            }

            slot.generation += 1;
            let token = CancellationToken::new();
            slot.token = Some(token.clone());
            slot.state = FetchState::Fetching;
            (slot.generation, token)
        };

        trace!(subscription = %self.name, generation, "Fetch started");

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(FetchError::Aborted),
            result = fetch(token.clone()) => result,
        };

        let mut slot = self.slot.lock();
        if !slot.alive || slot.generation != generation {
            debug!(
                subscription = %self.name,
                generation,
                current = slot.generation,
                alive = slot.alive,
                "Discarding result of stale fetch"
            );
            return Ok(None);
        }
        slot.token = None;

        match outcome {
            Ok(value) => {
                slot.state = FetchState::Resolved;
                self.published.send_replace(Some(value.clone()));
                Ok(Some(value))
            }
            Err(FetchError::Aborted) => {
                slot.state = FetchState::Cancelled;
                debug!(subscription = %self.name, generation, "Fetch aborted");
                Ok(None)
            }
            Err(e) => {
                slot.state = FetchState::Failed;
                debug!(subscription = %self.name, generation, error = %e, "Fetch failed");
                Err(e)
            }
        }
    }

    /// Cancel the in-flight fetch, if any, without tearing down.
    pub fn cancel(&self) {
        let slot = self.slot.lock();
        if let Some(token) = slot.token.as_ref() {
            token.cancel();
        }
    }

    /// Tear down the subscription.
    ///
    /// The in-flight fetch is cancelled before this returns, and no later
    /// result will be applied.
    pub fn unmount(&self) {
        let mut slot = self.slot.lock();
        if !slot.alive {
            return;
        }
        slot.alive = false;
        if let Some(token) = slot.token.take() {
            token.cancel();
            slot.state = FetchState::Cancelled;
        }
        debug!(subscription = %self.name, "Subscription unmounted");
    }

    pub fn state(&self) -> FetchState {
        self.slot.lock().state
    }

    pub fn is_alive(&self) -> bool {
        self.slot.lock().alive
    }

    /// Number of fetches started so far.
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    /// Last applied result.
    pub fn latest(&self) -> Option<T> {
        self.published.borrow().clone()
    }

    /// Watch applied results; stale fetches never appear on this channel.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.published.subscribe()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Drop for FetchSubscription<T> {
    fn drop(&mut self) {
        let slot = self.slot.get_mut();
        slot.alive = false;
        if let Some(token) = slot.token.take() {
            token.cancel();
        }
    }
}
