// tagsig/src/session/orchestrator.rs

use log::{info, warn};

use crate::config::{ALERT_DONE, ALERT_FAILED, ALERT_WORKING, PollConfig, SessionOptions};
use crate::device::Tag;
use crate::session::cancel::CancelHandle;
use crate::session::guard::Session;
use crate::session::provider::{ReleaseOutcome, SessionProvider};
use crate::session::request::{ActionOutcome, ActionRequest};
use crate::utils::Clock;
use crate::{Error, Result};

/// Lifecycle of one session. The orchestrator is back in `Idle` after every
/// exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    Idle,
    Acquiring,
    Active,
    Succeeding,
    Failing,
    Cancelling,
}

/// Advisory milestones reported to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Progress {
    TagDetected,
    Working,
    Done,
}

pub(crate) type ProgressFn = Box<dyn FnMut(Progress)>;

/// Runs actions inside an exclusive radio session.
///
/// `perform` takes `&mut self`, so one orchestrator never runs two sessions
/// at a time.
pub struct Orchestrator<P> {
    pub(crate) provider: P,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) config: PollConfig,
    pub(crate) options: SessionOptions,
    pub(crate) cancel: CancelHandle,
    pub(crate) progress: Option<ProgressFn>,
    pub(crate) state: SessionState,
}

impl<P: SessionProvider> Orchestrator<P> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Handle that cancels the running session. The flag is cleared when a
    /// new `perform` starts; a cancel fired while the platform is still
    /// waiting for a tap applies to that session.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    fn notify(&mut self, progress: Progress) {
        if let Some(cb) = self.progress.as_mut() {
            cb(progress);
        }
    }

    /// Acquire a session, run `action` against the tag and release.
    ///
    /// * acquisition failure: `Error::AcquireFailed`, `action` is not run;
    /// * `Ok(None)` from the action: released as a failure, `Ok(None)`;
    /// * cancelled: the action's result is discarded, `Ok(None)`;
    /// * otherwise the action's result, after release.
    pub fn perform<T, F>(&mut self, action: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Tag<'_>) -> Result<Option<T>>,
    {
        self.cancel.reset();
        self.state = SessionState::Acquiring;
        info!("requesting session");

        let transport = match self.provider.request_session(&self.options) {
            Ok(t) => t,
            Err(e) => {
                self.state = SessionState::Idle;
                warn!("session acquisition failed: {}", e);
                return Err(match e {
                    Error::AcquireFailed(msg) => Error::AcquireFailed(msg),
                    other => Error::AcquireFailed(other.to_string()),
                });
            }
        };

        info!("tag detected");
        self.notify(Progress::TagDetected);
        self.provider.set_alert_message(ALERT_WORKING);
        self.notify(Progress::Working);

        let mut session = Session::new(
            &mut self.provider,
            transport,
            self.cancel.clone(),
            &mut self.state,
        );
        let result = {
            let mut tag = Tag::new(&mut session, &*self.clock).with_config(self.config);
            action(&mut tag)
        };

        let cancelled = self.cancel.is_cancelled();
        let outcome = if cancelled {
            session.set_state(SessionState::Cancelling);
            ReleaseOutcome::Dismissed
        } else {
            match &result {
                Ok(Some(_)) => {
                    session.set_state(SessionState::Succeeding);
                    ReleaseOutcome::Success {
                        message: ALERT_DONE.to_string(),
                    }
                }
                Ok(None) => {
                    warn!("action produced no result");
                    session.set_state(SessionState::Failing);
                    ReleaseOutcome::Failure {
                        message: ALERT_FAILED.to_string(),
                    }
                }
                Err(e) => {
                    warn!("action failed: {}", e);
                    session.set_state(SessionState::Failing);
                    ReleaseOutcome::Failure {
                        message: ALERT_FAILED.to_string(),
                    }
                }
            }
        };
        session.release(outcome);

        if cancelled {
            info!("session cancelled, result discarded");
            return Ok(None);
        }
        if matches!(result, Ok(Some(_))) {
            self.notify(Progress::Done);
        }
        result
    }

    /// Run one explicitly requested action.
    pub fn run(&mut self, request: &ActionRequest) -> Result<Option<ActionOutcome>> {
        info!("running {}", request.name());
        self.perform(|tag| request.execute(tag).map(Some))
    }
}
