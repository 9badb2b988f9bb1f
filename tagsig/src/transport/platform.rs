// tagsig/src/transport/platform.rs

//! Adapters that normalize the two platform link styles into a single
//! `Transport`. The host picks one at startup and injects it.

use log::trace;

use crate::protocol::{CommandFrame, decode_reply};
use crate::transport::traits::{CustomCommandLink, RawLink, Transport};
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

/// Transport over a raw transceive link. Frames are sent fully encoded and
/// the echoed flags byte is stripped from every reply.
#[derive(Debug)]
pub struct RawFrameTransport<L> {
    link: L,
}

impl<L: RawLink> RawFrameTransport<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn into_inner(self) -> L {
        self.link
    }
}

impl<L: RawLink> Transport for RawFrameTransport<L> {
    fn transceive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        let bytes = frame.encode();
        trace!("> {}", bytes_to_hex_spaced(&bytes));
        let raw = self.link.transceive_raw(&bytes)?;
        trace!("< {}", bytes_to_hex_spaced(&raw));
        decode_reply(&raw)
    }
}

/// Transport over a custom-command link. The platform supplies flags and
/// manufacturer code and already returns the bare payload.
#[derive(Debug)]
pub struct CustomCommandTransport<L> {
    link: L,
}

impl<L: CustomCommandLink> CustomCommandTransport<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn into_inner(self) -> L {
        self.link
    }
}

impl<L: CustomCommandLink> Transport for CustomCommandTransport<L> {
    fn transceive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        trace!(
            "> custom {:#04x} {}",
            frame.code(),
            bytes_to_hex_spaced(frame.data())
        );
        let reply = self.link.custom_command(frame.code(), frame.data())?;
        trace!("< {}", bytes_to_hex_spaced(&reply));
        Ok(reply)
    }
}
