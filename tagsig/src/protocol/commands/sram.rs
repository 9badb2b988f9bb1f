// tagsig/src/protocol/commands/sram.rs

use crate::constants::{CMD_READ_SRAM, CMD_WRITE_SRAM, HANDOFF_ARGS, PAGE_SIZE};
use crate::protocol::CommandFrame;
use crate::{Error, Result};

/// Encode a WRITE_SRAM request.
/// Layout: start_page(1) + page_count_minus_one(1) + data(4*N)
///
/// `data` must already be padded to whole pages.
pub fn encode_write_sram(start_page: u8, data: &[u8]) -> Result<CommandFrame> {
    if data.is_empty() || data.len() % PAGE_SIZE != 0 {
        return Err(Error::FrameFormat(format!(
            "sram write of {} bytes is not page aligned",
            data.len()
        )));
    }
    let pages = data.len() / PAGE_SIZE;
    if pages > 256 {
        return Err(Error::PayloadTooLarge {
            max: 256 * PAGE_SIZE,
            actual: data.len(),
        });
    }

    let mut args = Vec::with_capacity(2 + data.len());
    args.push(start_page);
    args.push((pages - 1) as u8);
    args.extend_from_slice(data);
    Ok(CommandFrame::new(CMD_WRITE_SRAM, args))
}

/// Encode the write that passes control of the SRAM to the secure element.
pub fn encode_handoff() -> CommandFrame {
    CommandFrame::new(CMD_WRITE_SRAM, HANDOFF_ARGS.to_vec())
}

/// Encode a READ_SRAM request for `pages` pages starting at `start_page`.
/// Layout: start_page(1) + page_count_minus_one(1)
pub fn encode_read_sram(start_page: u8, pages: u8) -> CommandFrame {
    CommandFrame::new(CMD_READ_SRAM, vec![start_page, pages.saturating_sub(1)])
}
