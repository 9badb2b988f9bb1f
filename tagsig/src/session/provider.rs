// tagsig/src/session/provider.rs

use crate::Result;
use crate::config::SessionOptions;
use crate::transport::Transport;

/// How a session ended, passed to the platform on release so it can show
/// the matching alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Success { message: String },
    Failure { message: String },
    /// Cancelled by the user, or the action produced no result.
    Dismissed,
}

/// Platform side of the radio session.
///
/// `request_session` blocks until a tag is in the field (or fails) and
/// returns the transport for that tag. Every successful request is paired
/// with exactly one `release_session` call.
pub trait SessionProvider {
    fn request_session(&mut self, options: &SessionOptions) -> Result<Box<dyn Transport>>;

    fn release_session(&mut self, outcome: &ReleaseOutcome) -> Result<()>;

    /// Update the prompt shown while the session is active. Optional.
    fn set_alert_message(&mut self, _message: &str) {}
}
