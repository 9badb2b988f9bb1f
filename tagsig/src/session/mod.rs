// tagsig/src/session/mod.rs

//! Acquisition and release of the exclusive radio session around one action.

pub mod builder;
pub mod cancel;
pub mod guard;
pub mod orchestrator;
pub mod provider;
pub mod request;

pub use builder::OrchestratorBuilder;
pub use cancel::CancelHandle;
pub use guard::Session;
pub use orchestrator::{Orchestrator, Progress, SessionState};
pub use provider::{ReleaseOutcome, SessionProvider};
pub use request::{ActionOutcome, ActionRequest};
