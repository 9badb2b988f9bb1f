// tagsig/src/protocol/commands/config.rs

use crate::constants::CMD_READ_CONFIG;
use crate::protocol::CommandFrame;

/// Encode a READ_CONFIG request for a single config block.
/// Layout: block_address(1) + block_count_minus_one(1)
pub fn encode_read_config(register: u8) -> CommandFrame {
    CommandFrame::new(CMD_READ_CONFIG, vec![register, 0x00])
}
