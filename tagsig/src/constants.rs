// tagsig/src/constants.rs
//! Wire constants shared across the crate. These must match the tag
//! firmware bit for bit.

/// ISO 15693 request flags byte: high data rate
pub const REQUEST_FLAGS: u8 = 0x02;

/// NXP IC manufacturer code used by custom commands
pub const MANUFACTURER_CODE: u8 = 0x04;

/// Custom command: read configuration block
pub const CMD_READ_CONFIG: u8 = 0xC0;
/// Custom command: write SRAM pages
pub const CMD_WRITE_SRAM: u8 = 0xD3;
/// Custom command: read SRAM pages
pub const CMD_READ_SRAM: u8 = 0xD2;

/// Config register holding the unlock bits
pub const REG_STATUS: u8 = 0xA0;
/// Config register holding the arbiter / transfer direction bits
pub const REG_CONFIG: u8 = 0xA1;

/// `(status & UNLOCK_MASK) == UNLOCK_VALUE` means the SRAM is ours again
pub const UNLOCK_MASK: u8 = 0x03;
pub const UNLOCK_VALUE: u8 = 0x01;

/// Arbiter pass-through, SRAM accessible, transfer direction NFC
pub const CONFIG_READY_MASK: u8 = 0x0F;
pub const CONFIG_READY_VALUE: u8 = 0x0B;

/// Arguments of the SRAM write that hands control over to the secure side:
/// one page of `FF` written to the last SRAM page.
pub const HANDOFF_ARGS: [u8; 6] = [0x3F, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];

/// Page size of the tag's SRAM in bytes
pub const PAGE_SIZE: usize = 4;
/// Number of SRAM pages
pub const SRAM_PAGES: usize = 64;
/// Pages occupied by the response header
pub const RESPONSE_HEADER_PAGES: usize = 2;

/// HL payload header marker
pub const PAYLOAD_MARKER: [u8; 3] = [0xDE, 0x21, 0x37];
/// HL payload header length: marker(3) + len(1) + crc(4)
pub const PAYLOAD_HEADER_LEN: usize = 8;
/// Maximum command data length accepted by the firmware
pub const MAX_COMMAND_LEN: usize = 248;

/// HL response magic
pub const RESPONSE_MAGIC: [u8; 2] = [0xDE, 0xCA];
/// HL response header length: magic(2) + status(1) + len(1) + crc(4)
pub const RESPONSE_HEADER_LEN: usize = 8;
/// Maximum number of valid response bytes
pub const MAX_RESPONSE_LEN: usize = 244;

pub const STATUS_SUCCESS: u8 = 0xF0;
pub const STATUS_FAILURE: u8 = 0xEE;

/// Firmware command: read public key
pub const OP_PUBLIC_KEY: u8 = 0xB0;
/// Firmware command: sign a challenge
pub const OP_SIGN: u8 = 0xB1;
/// Firmware command: generate keys
pub const OP_GENERATE_KEYS: u8 = 0xE5;
/// Firmware command: erase keys (parameterless form requests a challenge)
pub const OP_ERASE_KEYS: u8 = 0xE7;
/// Firmware command: change password (parameterless form requests a challenge)
pub const OP_CHANGE_PASSWORD: u8 = 0xE9;

/// Length of the nonce prefixed to erase / change-password challenges
pub const NONCE_LEN: usize = 12;
/// Length of a sign challenge
pub const CHALLENGE_LEN: usize = 32;
/// Length of derived key material (SHA-256)
pub const KEY_LEN: usize = 32;
/// Minimum password length for generate / change password
pub const MIN_PASSWORD_LEN: usize = 3;
