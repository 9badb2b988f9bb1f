// tagsig/src/protocol/payload.rs

use crate::constants::{MAX_COMMAND_LEN, PAGE_SIZE, PAYLOAD_HEADER_LEN, PAYLOAD_MARKER};
use crate::protocol::checksum::{crc32, crc32_le, pad_to};
use crate::protocol::parser::{byte_at, le_u32_at, slice_at};
use crate::{Error, Result};

use zeroize::{Zeroize, ZeroizeOnDrop};

/// High-level command payload as written into the tag's SRAM.
/// Format: [Marker(3)] [Len(1)] [CRC32 LE(4)] [Data padded to 4 bytes]
///
/// The CRC covers the unpadded data; the firmware trusts the declared
/// length, not the padded one. Payloads may carry key material and are
/// wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct HlPayload {
    bytes: Vec<u8>,
}

impl HlPayload {
    /// Frame `data` into an SRAM payload.
    pub fn encode(data: &[u8]) -> Result<Self> {
        if data.len() > MAX_COMMAND_LEN {
            return Err(Error::PayloadTooLarge {
                max: MAX_COMMAND_LEN,
                actual: data.len(),
            });
        }

        let padded = pad_to(data, PAGE_SIZE);
        let mut bytes = Vec::with_capacity(PAYLOAD_HEADER_LEN + padded.len());
        bytes.extend_from_slice(&PAYLOAD_MARKER);
        bytes.push(data.len() as u8);
        bytes.extend_from_slice(&crc32_le(data));
        bytes.extend_from_slice(&padded);
        Ok(Self { bytes })
    }

    /// Parse an SRAM payload and return the command data.
    pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
        let marker = slice_at(bytes, 0, PAYLOAD_MARKER.len())?;
        if marker != PAYLOAD_MARKER {
            return Err(Error::FrameFormat("invalid payload marker".into()));
        }
        let len = byte_at(bytes, 3)? as usize;
        if len > MAX_COMMAND_LEN {
            return Err(Error::PayloadTooLarge {
                max: MAX_COMMAND_LEN,
                actual: len,
            });
        }
        let expected = le_u32_at(bytes, 4)?;
        let data = slice_at(bytes, PAYLOAD_HEADER_LEN, len)?;
        let actual = crc32(data);
        if actual != expected {
            return Err(Error::CrcMismatch { expected, actual });
        }
        Ok(data.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Page count minus one, as carried in the SRAM write frame.
    pub fn num_pages(&self) -> u8 {
        (self.bytes.len() / PAGE_SIZE - 1) as u8
    }
}
