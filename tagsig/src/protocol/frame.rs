// tagsig/src/protocol/frame.rs

use crate::constants::{MANUFACTURER_CODE, REQUEST_FLAGS};
use crate::{Error, Result};

/// One low-level ISO 15693 custom command exchange.
/// Format: [Flags(1)] [Code(1)] [Manufacturer(0|1)] [Data(n)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    code: u8,
    data: Vec<u8>,
    with_manufacturer: bool,
}

impl CommandFrame {
    pub fn new(code: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            data: data.into(),
            with_manufacturer: true,
        }
    }

    /// Frame for commands that carry no manufacturer code byte.
    pub fn without_manufacturer(code: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            data: data.into(),
            with_manufacturer: false,
        }
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn with_manufacturer(&self) -> bool {
        self.with_manufacturer
    }

    /// Encode into the exact bytes sent over the air.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.data.len());
        out.push(REQUEST_FLAGS);
        out.push(self.code);
        if self.with_manufacturer {
            out.push(MANUFACTURER_CODE);
        }
        out.extend_from_slice(&self.data);
        out
    }
}

/// Strip the echoed response flags byte from a raw transceive reply.
pub fn decode_reply(raw: &[u8]) -> Result<Vec<u8>> {
    match raw.split_first() {
        Some((_flags, rest)) => Ok(rest.to_vec()),
        None => Err(Error::FrameFormat("empty reply".into())),
    }
}
