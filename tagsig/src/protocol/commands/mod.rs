// tagsig/src/protocol/commands/mod.rs

pub mod config;
pub mod sram;

pub use config::encode_read_config;
pub use sram::{encode_handoff, encode_read_sram, encode_write_sram};

use crate::constants::{CMD_READ_CONFIG, CMD_READ_SRAM, CMD_WRITE_SRAM, HANDOFF_ARGS, PAGE_SIZE};
use crate::protocol::CommandFrame;
use crate::protocol::parser::{byte_at, ensure_len};
use crate::{Error, Result};

/// Low-level command set of the tag, as seen from the tag side. Encoders
/// live in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ReadConfig { register: u8 },
    WriteSram { start_page: u8, data: Vec<u8> },
    Handoff,
    ReadSram { start_page: u8, pages: u8 },
}

impl Command {
    /// Decode a frame back into a command. Used by the tag side of the
    /// link (simulators, sniffers).
    pub fn from_frame(frame: &CommandFrame) -> Result<Self> {
        let data = frame.data();
        match frame.code() {
            CMD_READ_CONFIG => Ok(Self::ReadConfig {
                register: byte_at(data, 0)?,
            }),
            CMD_WRITE_SRAM if data == &HANDOFF_ARGS[..] => Ok(Self::Handoff),
            CMD_WRITE_SRAM => {
                let start_page = byte_at(data, 0)?;
                let pages = byte_at(data, 1)? as usize + 1;
                ensure_len(data, 2 + pages * PAGE_SIZE)?;
                Ok(Self::WriteSram {
                    start_page,
                    data: data[2..2 + pages * PAGE_SIZE].to_vec(),
                })
            }
            CMD_READ_SRAM => {
                let start_page = byte_at(data, 0)?;
                let count = byte_at(data, 1)?;
                let pages = count
                    .checked_add(1)
                    .ok_or_else(|| Error::FrameFormat("sram read count overflow".into()))?;
                Ok(Self::ReadSram { start_page, pages })
            }
            other => Err(Error::FrameFormat(format!(
                "unknown command code {:#04x}",
                other
            ))),
        }
    }
}
