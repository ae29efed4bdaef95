//! Shared test utilities

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use voicegate::{Error, QueueMode, Result, SpeechConfig, SpeechController, SynthesisEngine};

/// A recorded controller-to-engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    SetRate(f32),
    Speak {
        text: String,
        utterance_id: String,
    },
    Stop,
    Shutdown,
}

/// Scripted engine that records every call; synthesis never actually happens.
///
/// Playback progress is driven by the test through
/// [`SpeechController::handle_event`].
#[derive(Default)]
pub struct MockEngine {
    commands: Mutex<Vec<EngineCommand>>,
    fail_init: bool,
}

impl MockEngine {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// An engine whose one-time initialization always fails
    #[must_use]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            commands: Mutex::new(Vec::new()),
            fail_init: true,
        })
    }

    /// All recorded calls, in order
    pub fn commands(&self) -> Vec<EngineCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// Texts handed to `speak`, in dispatch order
    pub fn spoken(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                EngineCommand::Speak { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Rates handed to `set_rate`, in dispatch order
    pub fn rates(&self) -> Vec<f32> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                EngineCommand::SetRate(rate) => Some(rate),
                _ => None,
            })
            .collect()
    }

    fn record(&self, command: EngineCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

#[async_trait]
impl SynthesisEngine for MockEngine {
    async fn initialize(&self, language: &str) -> Result<()> {
        if self.fail_init {
            return Err(Error::Engine(format!("language not supported: {language}")));
        }
        Ok(())
    }

    fn set_rate(&self, multiplier: f32) {
        self.record(EngineCommand::SetRate(multiplier));
    }

    fn speak(&self, text: &str, _mode: QueueMode, utterance_id: &str) {
        self.record(EngineCommand::Speak {
            text: text.to_string(),
            utterance_id: utterance_id.to_string(),
        });
    }

    fn stop(&self) {
        self.record(EngineCommand::Stop);
    }

    fn shutdown(&self) {
        self.record(EngineCommand::Shutdown);
    }
}

/// Initialize test logging once; respects `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Set up an initialized controller backed by a recording engine
pub async fn ready_controller() -> (SpeechController, Arc<MockEngine>) {
    let engine = MockEngine::new();
    let controller = SpeechController::new(engine.clone(), SpeechConfig::default());
    controller.initialize().await;
    (controller, engine)
}
