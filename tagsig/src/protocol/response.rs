// tagsig/src/protocol/response.rs

use crate::constants::{
    MAX_RESPONSE_LEN, PAGE_SIZE, RESPONSE_HEADER_LEN, RESPONSE_HEADER_PAGES, RESPONSE_MAGIC,
    SRAM_PAGES, STATUS_FAILURE, STATUS_SUCCESS,
};
use crate::protocol::checksum::crc32_le;
use crate::protocol::parser::{array_at, byte_at, ensure_len, le_u32_at};
use crate::{Error, Result};

/// Status byte of a high-level response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    Failure,
}

impl ResponseStatus {
    pub fn from_byte(status: u8) -> Result<Self> {
        match status {
            STATUS_SUCCESS => Ok(Self::Success),
            STATUS_FAILURE => Ok(Self::Failure),
            other => Err(Error::UnknownStatus { status: other }),
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Success => STATUS_SUCCESS,
            Self::Failure => STATUS_FAILURE,
        }
    }
}

/// Response header stored in SRAM pages 0-1 after execution.
/// Format: [Magic(2)] [Status(1)] [ValidBytes(1)] [CRC32 LE(4)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub status: ResponseStatus,
    pub valid_bytes: usize,
    pub crc: u32,
}

impl ResponseHeader {
    /// Parse and validate magic, status and length, in that order.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        ensure_len(raw, RESPONSE_HEADER_LEN)?;

        let magic: [u8; 2] = array_at(raw, 0)?;
        if magic != RESPONSE_MAGIC {
            return Err(Error::InvalidMagic { actual: magic });
        }

        let status = ResponseStatus::from_byte(byte_at(raw, 2)?)?;

        let valid_bytes = byte_at(raw, 3)? as usize;
        if valid_bytes > MAX_RESPONSE_LEN {
            return Err(Error::InvalidLength {
                declared: valid_bytes,
                max: MAX_RESPONSE_LEN,
            });
        }

        Ok(Self {
            status,
            valid_bytes,
            crc: le_u32_at(raw, 4)?,
        })
    }

    /// Build the header the firmware writes for `data`.
    pub fn encode(status: ResponseStatus, data: &[u8]) -> [u8; RESPONSE_HEADER_LEN] {
        let crc = crc32_le(data);
        [
            RESPONSE_MAGIC[0],
            RESPONSE_MAGIC[1],
            status.as_byte(),
            data.len() as u8,
            crc[0],
            crc[1],
            crc[2],
            crc[3],
        ]
    }

    /// Number of SRAM pages to read after the header to obtain
    /// `valid_bytes`: bytes rounded up to a page, pages rounded up to a
    /// multiple of four, clamped to the SRAM window.
    pub fn data_pages(valid_bytes: usize) -> u8 {
        let pages = valid_bytes.div_ceil(PAGE_SIZE);
        let rounded = pages.div_ceil(4) * 4;
        rounded.min(SRAM_PAGES - RESPONSE_HEADER_PAGES) as u8
    }
}
