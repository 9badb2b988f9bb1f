// tagsig/src/session/builder.rs

use crate::config::{PollConfig, SessionOptions};
use crate::session::cancel::CancelHandle;
use crate::session::orchestrator::{Orchestrator, Progress, SessionState};
use crate::session::provider::SessionProvider;
use crate::utils::{Clock, SystemClock};

/// Helper to construct an Orchestrator with optional configuration.
pub struct OrchestratorBuilder<P> {
    provider: P,
    clock: Option<Box<dyn Clock>>,
    config: PollConfig,
    options: SessionOptions,
    progress: Option<Box<dyn FnMut(Progress)>>,
}

impl<P: SessionProvider> OrchestratorBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            clock: None,
            config: PollConfig::default(),
            options: SessionOptions::default(),
            progress: None,
        }
    }

    /// Provide a clock (e.g. ManualClock in tests). Defaults to SystemClock.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_progress<F: FnMut(Progress) + 'static>(mut self, f: F) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Orchestrator<P> {
        Orchestrator {
            provider: self.provider,
            clock: self
                .clock
                .unwrap_or_else(|| Box::new(SystemClock::new())),
            config: self.config,
            options: self.options,
            cancel: CancelHandle::new(),
            progress: self.progress,
            state: SessionState::Idle,
        }
    }
}
