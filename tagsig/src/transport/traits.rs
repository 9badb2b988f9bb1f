// tagsig/src/transport/traits.rs

use crate::Result;
use crate::protocol::CommandFrame;

/// Transport trait abstracts the contactless link away from protocol logic.
///
/// One call is one radio exchange. Implementations return the reply with
/// any platform-specific framing (echoed flags byte etc.) already removed.
pub trait Transport {
    /// Send one command frame and return the normalized reply bytes.
    fn transceive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn transceive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        (**self).transceive(frame)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transceive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        (**self).transceive(frame)
    }
}

/// Platform link that sends raw frame bytes and returns the raw reply,
/// including the echoed response flags byte.
pub trait RawLink {
    fn transceive_raw(&mut self, bytes: &[u8]) -> Result<Vec<u8>>;
}

/// Platform link exposing an ISO 15693 "custom command" call. The platform
/// adds flags and manufacturer code itself and returns the bare payload.
pub trait CustomCommandLink {
    fn custom_command(&mut self, code: u8, params: &[u8]) -> Result<Vec<u8>>;
}
