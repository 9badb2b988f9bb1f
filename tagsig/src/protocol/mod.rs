// tagsig/src/protocol/mod.rs

pub mod checksum;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod payload;
pub mod response;

pub use checksum::{crc32, crc32_le};
pub use commands::Command;
pub use frame::{CommandFrame, decode_reply};
pub use payload::HlPayload;
pub use response::{ResponseHeader, ResponseStatus};
