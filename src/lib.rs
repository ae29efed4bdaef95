//! Voicegate - speech-output queue controller
//!
//! A bounded utterance queue with adaptive playback-rate control and
//! mute/cancel semantics, for clients that speak back textual responses from
//! a remote AI service. Synthesis itself (text to waveform, audio output) is
//! an external capability behind the [`SynthesisEngine`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  speak(text)   ┌───────────────────┐   speak/stop    ┌────────────┐
//! │  Host app    ├───────────────►│ SpeechController  ├────────────────►│ Synthesis  │
//! │  (session,   │  mute/stop     │  bounded queue    │                 │ engine     │
//! │   UI, ...)   │◄───────────────┤  rate policy      │◄────────────────┤ (external) │
//! └──────────────┘  watch streams │  mute/speaking    │  EngineEvents   └────────────┘
//!                                 └───────────────────┘
//! ```
//!
//! The controller is the sole queue: at most one utterance is in flight at
//! the engine, and at most [`MAX_QUEUE_SIZE`] more wait behind it (oldest
//! dropped under backpressure). Utterances with a deeper backlog are spoken
//! faster so the output catches up under load.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod queue;
pub mod rate;

pub use config::SpeechConfig;
pub use controller::SpeechController;
pub use engine::{EngineEvent, QueueMode, SynthesisEngine};
pub use error::{Error, Result};
pub use queue::{MAX_QUEUE_SIZE, SpeechQueue};
pub use rate::{BASE_RATE, MAX_RATE, RATE_INCREMENT, RatePolicy};
