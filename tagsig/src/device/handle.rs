// tagsig/src/device/handle.rs

use log::trace;

use crate::config::PollConfig;
use crate::protocol::CommandFrame;
use crate::transport::Transport;
use crate::utils::{Clock, bytes_to_hex};
use crate::Result;

/// Handle to a tag in the field for the duration of one session.
///
/// Borrows the session transport and a clock; every protocol layer above
/// the frame codec is implemented as methods on this type (`poller`,
/// `transfer`, `actions`).
pub struct Tag<'a> {
    transport: &'a mut dyn Transport,
    clock: &'a dyn Clock,
    config: PollConfig,
}

impl<'a> Tag<'a> {
    pub fn new(transport: &'a mut dyn Transport, clock: &'a dyn Clock) -> Self {
        Self {
            transport,
            clock,
            config: PollConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock
    }

    /// One radio exchange. Errors are never retried here.
    pub fn exchange(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        trace!(
            "exchange {:#04x} [{}]",
            frame.code(),
            bytes_to_hex(frame.data())
        );
        let reply = self.transport.transceive(frame)?;
        trace!("reply [{}]", bytes_to_hex(&reply));
        Ok(reply)
    }
}
