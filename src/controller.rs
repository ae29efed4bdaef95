//! Speech output queue controller
//!
//! Owns the bounded utterance queue, the mute/speaking flags, and the
//! dispatch loop that hands one utterance at a time to the synthesis engine.
//! Two call sources mutate the state: the caller thread (`speak`, mute/stop
//! lifecycle) and the engine's callback context (`handle_event`). Each
//! operation runs as one critical section under a single lock — state
//! mutation, the engine calls it implies, and the observer snapshots are
//! published together, so a flush and a queue-advancing completion can never
//! interleave. The [`SynthesisEngine`] contract forbids delivering events
//! synchronously from inside an engine call, which keeps the lock
//! non-reentrant.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::SpeechConfig;
use crate::engine::{EngineEvent, QueueMode, SynthesisEngine};
use crate::queue::SpeechQueue;

/// Mutable controller state, guarded by one lock
struct State {
    queue: SpeechQueue,
    muted: bool,
    /// True strictly between a dispatch and its done/error event
    speaking: bool,
    /// Most recently dispatched (not necessarily completed) text
    last_spoken: Option<String>,
    /// Incremented once per dispatch, never reused
    utterance_counter: u64,
    /// Set once the engine's async initialization succeeds
    ready: bool,
    /// Released on cleanup; all operations no-op afterwards
    engine: Option<Arc<dyn SynthesisEngine>>,
}

struct Inner {
    state: Mutex<State>,
    config: SpeechConfig,
    muted_tx: watch::Sender<bool>,
    speaking_tx: watch::Sender<bool>,
}

/// Bounded speech queue with adaptive playback rate and mute/cancel semantics.
///
/// Cheap to clone; clones share the same state. All operations are
/// fire-and-forget: failures are absorbed into state and logs, never
/// returned to the caller.
#[derive(Clone)]
pub struct SpeechController {
    inner: Arc<Inner>,
}

impl SpeechController {
    /// Create a controller bound to a synthesis engine.
    ///
    /// The controller stays inert until [`initialize`](Self::initialize)
    /// succeeds.
    #[must_use]
    pub fn new(engine: Arc<dyn SynthesisEngine>, config: SpeechConfig) -> Self {
        let (muted_tx, _) = watch::channel(false);
        let (speaking_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    queue: SpeechQueue::new(),
                    muted: false,
                    speaking: false,
                    last_spoken: None,
                    utterance_counter: 0,
                    ready: false,
                    engine: Some(engine),
                }),
                config,
                muted_tx,
                speaking_tx,
            }),
        }
    }

    /// One-time engine initialization for the configured language.
    ///
    /// On failure the controller stays permanently uninitialized and every
    /// subsequent [`speak`](Self::speak) is a silent no-op. Nothing is
    /// surfaced to the caller; the failure is logged.
    pub async fn initialize(&self) {
        let engine = self.inner.state.lock().unwrap().engine.clone();
        let Some(engine) = engine else {
            return;
        };
        match engine.initialize(&self.inner.config.language).await {
            Ok(()) => {
                self.inner.state.lock().unwrap().ready = true;
                tracing::info!(language = %self.inner.config.language, "synthesis engine ready");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    language = %self.inner.config.language,
                    "synthesis engine initialization failed, speech disabled"
                );
            }
        }
    }

    /// Submit text for speech output.
    ///
    /// Guards, first match wins: muted; engine not ready; blank text; text
    /// equals the queue tail; text equals the utterance currently being
    /// spoken with an empty queue. Otherwise the text is appended (evicting
    /// the oldest pending item when full) and dispatched immediately if
    /// nothing is in flight.
    pub fn speak(&self, text: &str) {
        let mut state = self.inner.state.lock().unwrap();
        if state.muted {
            return;
        }
        if !state.ready || state.engine.is_none() {
            return;
        }
        if text.trim().is_empty() {
            return;
        }
        if state.queue.tail() == Some(text) {
            return;
        }
        if state.queue.is_empty() && state.speaking && state.last_spoken.as_deref() == Some(text) {
            return;
        }

        if let Some(evicted) = state.queue.push(text.to_string()) {
            tracing::debug!(evicted = %evicted, "speech queue full, dropped oldest utterance");
        }
        if !state.speaking {
            // Otherwise the in-flight utterance's done/error event advances
            // the queue
            self.dispatch_locked(&mut state);
        }
        self.publish_locked(&state);
    }

    /// Handle an asynchronous engine event.
    ///
    /// Done and error are identical for flow control: both free the
    /// in-flight slot and advance the queue. Failed text is dropped with no
    /// retry.
    pub fn handle_event(&self, event: EngineEvent) {
        let mut state = self.inner.state.lock().unwrap();
        match event {
            EngineEvent::Started { utterance_id } => {
                tracing::trace!(utterance_id = %utterance_id, "playback started");
                // A stale start for an utterance the mute flush already
                // stopped must not re-raise the flag
                if !state.muted {
                    state.speaking = true;
                }
            }
            EngineEvent::Done { utterance_id } => {
                tracing::trace!(utterance_id = %utterance_id, "playback finished");
                state.speaking = false;
                self.dispatch_locked(&mut state);
            }
            EngineEvent::Error { utterance_id, code } => {
                tracing::warn!(
                    utterance_id = %utterance_id,
                    code,
                    "synthesis error, advancing queue"
                );
                state.speaking = false;
                self.dispatch_locked(&mut state);
            }
        }
        self.publish_locked(&state);
    }

    /// Set the mute flag.
    ///
    /// Muting is a total flush: the queue is cleared, in-flight output is
    /// stopped, and the speaking flag drops immediately.
    pub fn set_muted(&self, muted: bool) {
        let mut state = self.inner.state.lock().unwrap();
        state.muted = muted;
        if muted {
            state.queue.clear();
            state.speaking = false;
            if let Some(engine) = &state.engine {
                engine.stop();
            }
        }
        self.publish_locked(&state);
        drop(state);
        tracing::debug!(muted, "mute state changed");
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_mute(&self) -> bool {
        let next = !self.inner.state.lock().unwrap().muted;
        self.set_muted(next);
        next
    }

    /// Clear the queue and stop in-flight output without changing the mute flag
    pub fn stop(&self) {
        let mut state = self.inner.state.lock().unwrap();
        self.stop_locked(&mut state);
        self.publish_locked(&state);
    }

    /// Stop playback, shut the engine down, and release the handle.
    ///
    /// Permanent: there is no re-initialization path. Every subsequent
    /// [`speak`](Self::speak) is a no-op.
    pub fn cleanup(&self) {
        let mut state = self.inner.state.lock().unwrap();
        self.stop_locked(&mut state);
        state.ready = false;
        if let Some(engine) = state.engine.take() {
            engine.shutdown();
            tracing::info!("speech controller released");
        }
        self.publish_locked(&state);
    }

    /// Forward engine events from a channel into the controller.
    ///
    /// Engines that deliver callbacks on their own thread can instead send
    /// into the channel; the pump serializes them through
    /// [`handle_event`](Self::handle_event). Runs until the sender side is
    /// dropped.
    pub fn spawn_event_pump(
        &self,
        mut events: mpsc::UnboundedReceiver<EngineEvent>,
    ) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                controller.handle_event(event);
            }
        })
    }

    /// Observe the mute flag
    #[must_use]
    pub fn muted_watch(&self) -> watch::Receiver<bool> {
        self.inner.muted_tx.subscribe()
    }

    /// Observe the speaking flag
    #[must_use]
    pub fn speaking_watch(&self) -> watch::Receiver<bool> {
        self.inner.speaking_tx.subscribe()
    }

    /// Current mute flag
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.inner.state.lock().unwrap().muted
    }

    /// Current speaking flag
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.inner.state.lock().unwrap().speaking
    }

    /// Number of utterances waiting behind the in-flight one
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.state.lock().unwrap().queue.len()
    }

    /// Pop the head of the queue, claim the in-flight slot, and hand the
    /// utterance to the engine.
    ///
    /// Runs entirely under the state lock: the speaking flag is claimed by
    /// the same critical section that pops the queue and issues the engine
    /// calls, so a dispatch can neither race another dispatch into one idle
    /// window nor slip an utterance past a concurrent mute/stop flush.
    fn dispatch_locked(&self, state: &mut State) {
        if state.muted {
            return;
        }
        let Some(engine) = state.engine.clone() else {
            return;
        };
        let Some(text) = state.queue.pop() else {
            return;
        };
        state.last_spoken = Some(text.clone());
        let backlog = state.queue.len();
        let rate = self.inner.config.rate.rate_for_backlog(backlog);
        state.utterance_counter += 1;
        let utterance_id = format!("utterance_{}", state.utterance_counter);
        state.speaking = true;
        tracing::debug!(utterance_id = %utterance_id, rate, backlog, "dispatching utterance");
        engine.set_rate(rate);
        engine.speak(&text, QueueMode::Flush, &utterance_id);
    }

    /// Flush pending and in-flight speech; the mute flag is untouched
    fn stop_locked(&self, state: &mut State) {
        state.queue.clear();
        state.speaking = false;
        if let Some(engine) = &state.engine {
            engine.stop();
        }
    }

    /// Publish flag snapshots to observers.
    ///
    /// Runs under the state lock so snapshots reach the watch channels in
    /// state order; a slow thread can never overwrite a newer snapshot with
    /// a stale one.
    fn publish_locked(&self, state: &State) {
        self.inner.muted_tx.send_replace(state.muted);
        self.inner.speaking_tx.send_replace(state.speaking);
    }
}
