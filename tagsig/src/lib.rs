// tagsig/src/lib.rs

//! tagsig
//!
//! Host-side protocol stack for contactless signing tags: frame codec,
//! SRAM transfer protocol, password-protected key actions and the session
//! orchestrator that brackets one action per tap.

pub mod actions;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the result types in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
