//! Synthesis engine abstraction and playback events
//!
//! The controller depends on an external text-to-speech capability through
//! the [`SynthesisEngine`] trait; waveform generation and audio output are
//! the engine's concern. Engines report playback progress asynchronously as
//! [`EngineEvent`]s.

use async_trait::async_trait;

use crate::Result;

/// How the engine should treat audio it is already holding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Discard anything buffered at the engine and start the new utterance
    /// immediately. The controller is the sole queue; the engine never holds
    /// more than the in-flight item.
    Flush,
}

/// Asynchronous playback notification delivered back to the controller.
///
/// `utterance_id` correlates an event with the dispatch that produced it.
/// Correlation is best-effort; the controller does not reject stale ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Playback of the utterance began
    Started {
        /// Dispatch correlation id
        utterance_id: String,
    },

    /// Playback finished normally
    Done {
        /// Dispatch correlation id
        utterance_id: String,
    },

    /// Synthesis or playback failed
    Error {
        /// Dispatch correlation id
        utterance_id: String,
        /// Engine-specific error code
        code: i32,
    },
}

/// External text-to-speech capability consumed by the controller.
///
/// `set_rate`, `speak`, `stop`, and `shutdown` may be invoked while the
/// controller holds its internal state lock. Implementations must return
/// promptly and must not deliver [`EngineEvent`]s synchronously from inside
/// these calls — events go through the controller's event pump or are
/// handed to `handle_event` from another context once the call has
/// returned.
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// One-time engine initialization for the given language tag (e.g. `en-US`).
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot start or the language is
    /// unsupported. The controller treats failure as permanent.
    async fn initialize(&self, language: &str) -> Result<()>;

    /// Set the playback rate as a multiplier of normal speed
    fn set_rate(&self, multiplier: f32);

    /// Hand one utterance to the engine. Fire-and-forget; progress is
    /// reported through [`EngineEvent`]s.
    fn speak(&self, text: &str, mode: QueueMode, utterance_id: &str);

    /// Stop any in-flight output immediately
    fn stop(&self);

    /// Release engine resources; no further calls will be made
    fn shutdown(&self);
}
