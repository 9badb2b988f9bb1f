// tagsig/src/device/transfer.rs

//! High-level command transfer through the tag's SRAM.
//!
//! write payload -> hand off -> wait for unlock -> read header -> read data.
//! A failure at any step aborts the whole exchange; nothing is retried.

use log::debug;

use crate::constants::{MAX_COMMAND_LEN, PAGE_SIZE, RESPONSE_HEADER_PAGES};
use crate::device::Tag;
use crate::protocol::commands::{encode_handoff, encode_read_sram, encode_write_sram};
use crate::protocol::{HlPayload, ResponseHeader, ResponseStatus, crc32};
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

/// Upper bound on follow-up exchanges of a streamed response.
pub const MAX_STREAM_CHUNKS: usize = 64;

impl Tag<'_> {
    /// Run one high-level command and return the validated response data.
    pub fn execute(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() > MAX_COMMAND_LEN {
            return Err(Error::PayloadTooLarge {
                max: MAX_COMMAND_LEN,
                actual: data.len(),
            });
        }

        let payload = HlPayload::encode(data)?;
        debug!(
            "hl command [{}], {} pages",
            bytes_to_hex(data),
            payload.num_pages() as usize + 1
        );
        self.exchange(&encode_write_sram(0x00, payload.as_bytes())?)?;

        self.exchange(&encode_handoff())?;

        self.wait_until_unlocked()?;

        let raw_header = self.exchange(&encode_read_sram(0x00, RESPONSE_HEADER_PAGES as u8))?;
        debug!("hl response header [{}]", bytes_to_hex(&raw_header));
        let header = ResponseHeader::parse(&raw_header)?;

        let mut out = Vec::new();
        if header.valid_bytes > 0 {
            let pages = ResponseHeader::data_pages(header.valid_bytes);
            let raw = self.exchange(&encode_read_sram(RESPONSE_HEADER_PAGES as u8, pages))?;
            out = raw[..header.valid_bytes.min(raw.len())].to_vec();
        }

        let actual = crc32(&out);
        if actual != header.crc {
            return Err(Error::CrcMismatch {
                expected: header.crc,
                actual,
            });
        }

        match header.status {
            ResponseStatus::Success => {
                debug!("hl response ok, {} bytes", out.len());
                Ok(out)
            }
            ResponseStatus::Failure => {
                debug!("hl response failure [{}]", bytes_to_hex(&out));
                Err(Error::from_device_payload(&out))
            }
        }
    }

    /// Run a command whose result may span several exchanges: keep sending
    /// empty follow-up commands while the previous response was non-empty.
    pub fn execute_streaming(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = self.execute(data)?;
        let mut last_len = out.len();
        let mut chunks = 1;

        while last_len > 0 {
            if chunks >= MAX_STREAM_CHUNKS {
                return Err(Error::FrameFormat(format!(
                    "response stream exceeded {} chunks",
                    MAX_STREAM_CHUNKS
                )));
            }
            let next = self.execute(&[])?;
            last_len = next.len();
            out.extend_from_slice(&next);
            chunks += 1;
        }

        debug!("streamed {} bytes in {} chunks", out.len(), chunks);
        Ok(out)
    }
}

/// Bytes fetched by the data read for `valid_bytes` of output.
pub fn data_read_len(valid_bytes: usize) -> usize {
    ResponseHeader::data_pages(valid_bytes) as usize * PAGE_SIZE
}
