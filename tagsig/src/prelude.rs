// tagsig/src/prelude.rs

pub use crate::config::{PollConfig, SessionOptions};
pub use crate::crypto::KeyMaterial;
pub use crate::device::Tag;
pub use crate::session::{
    ActionOutcome, ActionRequest, CancelHandle, Orchestrator, OrchestratorBuilder, Progress,
    ReleaseOutcome, SessionProvider, SessionState,
};
pub use crate::transport::{
    CustomCommandLink, CustomCommandTransport, RawFrameTransport, RawLink, Transport,
};
pub use crate::{
    Challenge, DeviceChallenge, DeviceErrorCode, Error, GeneratedKey, Result, SignResult,
    SignatureVerifier, SignedChallenge,
};

// Re-export small utilities for convenience
pub use crate::utils::{Clock, SystemClock, bytes_to_hex, bytes_to_hex_spaced, ms};
