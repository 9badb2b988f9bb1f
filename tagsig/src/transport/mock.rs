// tagsig/src/transport/mock.rs

use crate::protocol::CommandFrame;
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent frames and returns queued
/// replies in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<CommandFrame>,
    pub responses: Vec<Result<Vec<u8>>>,
    /// Reply returned once the queue is drained; `None` means a transport error.
    pub fallback: Option<Vec<u8>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(Ok(resp));
    }

    /// Queue a transport-level failure.
    pub fn push_error(&mut self, msg: &str) {
        self.responses.push(Err(Error::Transport(msg.to_string())));
    }

    /// Reply with `resp` forever once the queue is drained.
    pub fn set_fallback(&mut self, resp: Vec<u8>) {
        self.fallback = Some(resp);
    }

    pub fn pop_sent(&mut self) -> Option<CommandFrame> {
        self.sent.pop()
    }
}

impl Transport for MockTransport {
    fn transceive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        self.sent.push(frame.clone());
        if self.responses.is_empty() {
            match &self.fallback {
                Some(resp) => Ok(resp.clone()),
                None => Err(Error::Transport("no response queued".into())),
            }
        } else {
            self.responses.remove(0)
        }
    }
}
