// tagsig/src/transport/mod.rs

pub mod mock;
pub mod platform;
pub mod traits;

pub use mock::MockTransport;
pub use platform::{CustomCommandTransport, RawFrameTransport};
pub use traits::{CustomCommandLink, RawLink, Transport};
