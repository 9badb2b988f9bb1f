//! Small reusable helpers: hex formatting for logs and the clock
//! abstraction used by the poll loops.

pub mod clock;
pub mod hex;

pub use clock::{Clock, ManualClock, SystemClock, ms};
pub use hex::*;
