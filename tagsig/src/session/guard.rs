// tagsig/src/session/guard.rs

use log::{debug, info, warn};

use crate::config::ALERT_FAILED;
use crate::protocol::CommandFrame;
use crate::session::cancel::CancelHandle;
use crate::session::orchestrator::SessionState;
use crate::session::provider::{ReleaseOutcome, SessionProvider};
use crate::transport::Transport;
use crate::{Error, Result};

/// An acquired radio session.
///
/// The session is released exactly once: explicitly through
/// [`Session::release`], or on drop (unwinding included) with a failure
/// outcome. Exchanges are refused with `Error::Cancelled` once the cancel
/// handle fires.
pub struct Session<'o> {
    provider: &'o mut dyn SessionProvider,
    transport: Box<dyn Transport>,
    cancel: CancelHandle,
    state: &'o mut SessionState,
    released: bool,
}

impl<'o> Session<'o> {
    pub(crate) fn new(
        provider: &'o mut dyn SessionProvider,
        transport: Box<dyn Transport>,
        cancel: CancelHandle,
        state: &'o mut SessionState,
    ) -> Self {
        *state = SessionState::Active;
        Self {
            provider,
            transport,
            cancel,
            state,
            released: false,
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        debug!("session state {:?} -> {:?}", self.state, state);
        *self.state = state;
    }

    /// Release the session. Release errors are logged and otherwise
    /// ignored so they never replace the action's own result.
    pub fn release(mut self, outcome: ReleaseOutcome) {
        self.release_once(&outcome);
    }

    fn release_once(&mut self, outcome: &ReleaseOutcome) {
        if self.released {
            return;
        }
        self.released = true;
        info!("releasing session: {:?}", outcome);
        if let Err(e) = self.provider.release_session(outcome) {
            warn!("session release failed: {}", e);
        }
        *self.state = SessionState::Idle;
    }
}

impl Transport for Session<'_> {
    fn transceive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.transport.transceive(frame)
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if !self.released {
            warn!("session dropped without release");
            self.release_once(&ReleaseOutcome::Failure {
                message: ALERT_FAILED.to_string(),
            });
        }
    }
}
